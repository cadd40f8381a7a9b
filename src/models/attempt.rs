use crate::utils::flexible::deserialize_string_flexible;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Response of `POST /attempts/start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    #[serde(deserialize_with = "deserialize_string_flexible")]
    pub attempt_id: String,
    pub server_start_at: DateTime<Utc>,
    pub deadline: DateTime<Utc>,
    pub seed: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_url: Option<String>,
}

impl Attempt {
    /// Deterministic permutation of `0..len` for one question of this attempt.
    pub fn shuffled_indices(&self, question_index: usize, len: usize) -> Vec<usize> {
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(question_index as u64));
        let mut indices: Vec<usize> = (0..len).collect();
        indices.shuffle(&mut rng);
        indices
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptStatus {
    Active,
    Finished,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptSummary {
    #[serde(deserialize_with = "deserialize_string_flexible")]
    pub id: String,
    pub status: AttemptStatus,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub score: Option<f64>,
}

/// Response of `GET /attempts/today`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayAttemptStatus {
    pub has_attempt: bool,
    #[serde(default)]
    pub attempt: Option<AttemptSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartAttemptRequest {
    pub local_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerRequest {
    pub question_id: String,
    pub answer: serde_json::Value,
    pub idempotency_key: String,
    pub time_spent_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerReceipt {
    pub status: String,
}
