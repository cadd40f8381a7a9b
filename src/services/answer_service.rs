use crate::models::answer::{Answer, SpeedTapAnswer};
use crate::models::question::{AnswerFamily, Question, QuestionType};
use serde_json::{json, Value as JsonValue};
use std::collections::{BTreeMap, HashSet};

const DEFAULT_ROUND_SECONDS: u32 = 20;

/// Answer codec: defaults, completeness, structural validity and wire shape
/// for every archetype. Correctness is never judged here.
pub struct AnswerService;

impl AnswerService {
    /// Value to seed the UI with. `None` for archetypes this build does not know.
    pub fn default_answer(question: &Question) -> Option<Answer> {
        let answer = match question.question_type.family()? {
            AnswerFamily::SingleChoice => Answer::choice(-1),
            AnswerFamily::PairwiseMatch => Answer::Match(BTreeMap::new()),
            AnswerFamily::Ordering => Answer::ordered(question.native_items()),
            AnswerFamily::Ranking => {
                Answer::ordered((0..question.choice_count()).map(|i| format!("choice{}", i)))
            }
            AnswerFamily::SpeedTap => Answer::SpeedTap(SpeedTapAnswer::new(
                question.prompt.round_seconds.unwrap_or(DEFAULT_ROUND_SECONDS),
            )),
        };
        Some(answer)
    }

    /// Gates the submit button.
    pub fn is_answer_complete(question: &Question, answer: &Answer) -> bool {
        let Some(family) = question.question_type.family() else {
            return false;
        };

        match (family, answer) {
            (AnswerFamily::SingleChoice, Answer::SingleChoice(choice)) => choice.choice_index >= 0,
            (AnswerFamily::PairwiseMatch, Answer::Match(pairs)) => !pairs.is_empty(),
            (AnswerFamily::Ordering | AnswerFamily::Ranking, Answer::Ordering(order)) => {
                !order.ordered_items.is_empty()
            }
            (AnswerFamily::SpeedTap, Answer::SpeedTap(taps)) => !taps.events.is_empty(),
            _ => false,
        }
    }

    /// Type, shape and bounds only. Checked before anything goes on the wire.
    pub fn is_answer_valid(question: &Question, answer: &Answer) -> bool {
        if !Self::is_answer_complete(question, answer) {
            return false;
        }

        match answer {
            Answer::SingleChoice(choice) => (choice.choice_index as usize) < question.choice_count(),
            Answer::Match(pairs) => pairs
                .iter()
                .all(|(left, right)| !left.trim().is_empty() && !right.trim().is_empty()),
            Answer::Ordering(order) => {
                let mut seen = HashSet::new();
                order
                    .ordered_items
                    .iter()
                    .all(|item| !item.trim().is_empty() && seen.insert(item.as_str()))
            }
            Answer::SpeedTap(taps) => {
                taps.round_seconds > 0
                    && taps.events.iter().all(|e| !e.option.trim().is_empty())
                    && taps.events.windows(2).all(|pair| pair[0].ts <= pair[1].ts)
            }
        }
    }

    /// JSON the server expects for this answer.
    ///
    /// `tracklist-order` goes out as `orderedTracks` while `timeline-order`
    /// keeps `orderedItems`; the server reads them under those names.
    pub fn to_submission(question: &Question, answer: &Answer) -> Option<JsonValue> {
        let family = question.question_type.family()?;

        match (&question.question_type, answer) {
            (QuestionType::TracklistOrder, Answer::Ordering(order)) => {
                Some(json!({ "orderedTracks": order.ordered_items }))
            }
            (QuestionType::TimelineOrder, Answer::Ordering(order)) => {
                Some(json!({ "orderedItems": order.ordered_items }))
            }
            (QuestionType::PopularityMatch, Answer::Ordering(order)) => {
                Some(json!({ "orderedChoices": order.ordered_items }))
            }
            (_, answer) if shape_matches(family, answer) => serde_json::to_value(answer).ok(),
            _ => None,
        }
    }
}

fn shape_matches(family: AnswerFamily, answer: &Answer) -> bool {
    matches!(
        (family, answer),
        (AnswerFamily::SingleChoice, Answer::SingleChoice(_))
            | (AnswerFamily::PairwiseMatch, Answer::Match(_))
            | (AnswerFamily::Ordering | AnswerFamily::Ranking, Answer::Ordering(_))
            | (AnswerFamily::SpeedTap, Answer::SpeedTap(_))
    )
}
