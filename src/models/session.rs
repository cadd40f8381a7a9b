use crate::models::answer::Answer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Submitted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAnswer {
    pub question_id: String,
    pub answer: Answer,
    pub time_spent_ms: u64,
    pub answered_at: DateTime<Utc>,
}

/// Client-side view of the attempt in progress. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSession {
    pub attempt_id: String,
    pub quiz_id: String,
    pub start_time: DateTime<Utc>,
    pub answers: Vec<SessionAnswer>,
    pub status: SessionStatus,
}

impl QuizSession {
    pub fn new(attempt_id: impl Into<String>, quiz_id: impl Into<String>) -> Self {
        Self {
            attempt_id: attempt_id.into(),
            quiz_id: quiz_id.into(),
            start_time: Utc::now(),
            answers: Vec::new(),
            status: SessionStatus::InProgress,
        }
    }

    /// Last write wins: a second answer for the same question replaces the first in place.
    pub fn record(&mut self, entry: SessionAnswer) {
        match self
            .answers
            .iter_mut()
            .find(|existing| existing.question_id == entry.question_id)
        {
            Some(existing) => *existing = entry,
            None => self.answers.push(entry),
        }
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&SessionAnswer> {
        self.answers.iter().find(|a| a.question_id == question_id)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == SessionStatus::InProgress
    }
}
