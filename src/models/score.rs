use crate::utils::flexible::deserialize_string_flexible;
use serde::{Deserialize, Serialize};

/// Response of `POST /attempts/{id}/finish`. Server-computed, rendered as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreComponents>,
    #[serde(default, alias = "questions", skip_serializing_if = "Vec::is_empty")]
    pub per_question: Vec<QuestionScore>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreComponents {
    #[serde(default)]
    pub base: f64,
    #[serde(default)]
    pub accuracy_bonus: f64,
    #[serde(default)]
    pub speed_bonus: f64,
    #[serde(default)]
    pub early_bonus: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionScore {
    #[serde(deserialize_with = "deserialize_string_flexible")]
    pub question_id: String,
    #[serde(default)]
    pub is_correct: bool,
    #[serde(default)]
    pub time_spent_ms: u64,
    #[serde(default)]
    pub accuracy_points: f64,
}
