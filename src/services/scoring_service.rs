use crate::models::score::{QuestionScore, ScoreBreakdown};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategoryKind {
    Accuracy,
    Speed,
    EarlyBonus,
}

impl ScoreCategoryKind {
    pub fn label(&self) -> &'static str {
        match self {
            ScoreCategoryKind::Accuracy => "Accuracy",
            ScoreCategoryKind::Speed => "Speed",
            ScoreCategoryKind::EarlyBonus => "Early bonus",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCategory {
    pub kind: ScoreCategoryKind,
    pub label: &'static str,
    pub points: f64,
    /// Fraction of the total score, 0 when the total is not positive.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerSummary {
    pub correct: usize,
    pub total: usize,
    pub average_time_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorePresentation {
    pub total: f64,
    /// Highest first. Empty when the server sent no breakdown.
    pub categories: Vec<ScoreCategory>,
    pub summary: Option<AnswerSummary>,
}

/// Display mapping for server scores. The numbers are trusted verbatim.
pub struct ScoringService;

impl ScoringService {
    pub fn present(result: &ScoreBreakdown) -> ScorePresentation {
        let categories = match &result.breakdown {
            Some(parts) => {
                let mut categories: Vec<ScoreCategory> = [
                    (ScoreCategoryKind::Accuracy, parts.base + parts.accuracy_bonus),
                    (ScoreCategoryKind::Speed, parts.speed_bonus),
                    (ScoreCategoryKind::EarlyBonus, parts.early_bonus),
                ]
                .into_iter()
                .map(|(kind, points)| ScoreCategory {
                    kind,
                    label: kind.label(),
                    points,
                    share: if result.score > 0.0 {
                        points / result.score
                    } else {
                        0.0
                    },
                })
                .collect();
                // stable: ties keep accuracy, speed, early order
                categories.sort_by(|a, b| b.points.total_cmp(&a.points));
                categories
            }
            None => Vec::new(),
        };

        ScorePresentation {
            total: result.score,
            categories,
            summary: summarize(&result.per_question),
        }
    }
}

fn summarize(questions: &[QuestionScore]) -> Option<AnswerSummary> {
    if questions.is_empty() {
        return None;
    }
    let total_time: u64 = questions.iter().map(|q| q.time_spent_ms).sum();
    Some(AnswerSummary {
        correct: questions.iter().filter(|q| q.is_correct).count(),
        total: questions.len(),
        average_time_ms: total_time / questions.len() as u64,
    })
}
