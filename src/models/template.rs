use crate::models::question::Question;
use crate::utils::flexible::{deserialize_opt_string_flexible, deserialize_string_flexible};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// CDN-hosted quiz document. Only trusted after `validate()` passes.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuizTemplate {
    #[serde(alias = "quizId", deserialize_with = "deserialize_string_flexible")]
    #[validate(length(min = 1, message = "template id must not be empty"))]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_opt_string_flexible")]
    pub version: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub time_limit_seconds: Option<u32>,
    #[validate(length(min = 1, message = "template has no questions"))]
    pub questions: Vec<Question>,
}

impl QuizTemplate {
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    pub fn question_index(&self, question_id: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.id == question_id)
    }
}
