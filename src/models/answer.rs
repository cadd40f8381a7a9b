use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// In-memory answer as the UI holds it. The owning question's archetype
/// decides which variant is legal; see `AnswerService`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    SingleChoice(ChoiceAnswer),
    Ordering(OrderingAnswer),
    SpeedTap(SpeedTapAnswer),
    /// Left key -> right value.
    Match(BTreeMap<String, String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceAnswer {
    pub choice_index: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderingAnswer {
    pub ordered_items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedTapAnswer {
    pub round_seconds: u32,
    pub events: Vec<TapEvent>,
    pub client_summary: TapSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapEvent {
    /// Milliseconds since the round started.
    pub ts: i64,
    pub option: String,
    pub action: TapAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TapAction {
    Tap,
    Undo,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapSummary {
    pub taps: u32,
    pub correct: u32,
    pub wrong: u32,
}

impl Answer {
    pub fn choice(index: i64) -> Self {
        Answer::SingleChoice(ChoiceAnswer {
            choice_index: index,
        })
    }

    pub fn ordered<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Answer::Ordering(OrderingAnswer {
            ordered_items: items.into_iter().map(Into::into).collect(),
        })
    }
}

impl SpeedTapAnswer {
    pub fn new(round_seconds: u32) -> Self {
        Self {
            round_seconds,
            events: Vec::new(),
            client_summary: TapSummary::default(),
        }
    }

    pub fn record_tap(&mut self, ts: i64, option: impl Into<String>) {
        self.events.push(TapEvent {
            ts,
            option: option.into(),
            action: TapAction::Tap,
        });
        self.client_summary.taps += 1;
    }

    /// Undo is logged as its own event; earlier taps are never removed.
    pub fn record_undo(&mut self, ts: i64, option: impl Into<String>) {
        self.events.push(TapEvent {
            ts,
            option: option.into(),
            action: TapAction::Undo,
        });
        self.client_summary.taps = self.client_summary.taps.saturating_sub(1);
    }

    /// Instant feedback shown during the round; the server still grades.
    pub fn record_result(&mut self, correct: bool) {
        if correct {
            self.client_summary.correct += 1;
        } else {
            self.client_summary.wrong += 1;
        }
    }
}
