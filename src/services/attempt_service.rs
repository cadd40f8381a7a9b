use crate::error::{ApiResource, DailyQuizError, DailyQuizErrorType, Result};
use crate::models::answer::Answer;
use crate::models::attempt::{
    AnswerReceipt, Attempt, StartAttemptRequest, SubmitAnswerRequest, TodayAttemptStatus,
};
use crate::models::question::Question;
use crate::models::score::ScoreBreakdown;
use crate::services::answer_service::AnswerService;
use crate::services::http_service::HttpService;
use crate::utils::time;
use crate::utils::token::idempotency_key;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Client for the attempt lifecycle endpoints. Holds no attempt state; the
/// server is the authority on whether an attempt is active, finished or expired.
#[derive(Clone)]
pub struct AttemptService {
    http: HttpService,
}

impl AttemptService {
    pub fn new(http: HttpService) -> Self {
        Self { http }
    }

    pub async fn get_today_attempt_status(&self) -> Result<TodayAttemptStatus> {
        self.http.get("/attempts/today", ApiResource::Attempts).await
    }

    /// Binds the attempt to the device's local calendar date. The deadline in
    /// the response is the only one the client uses.
    pub async fn start_attempt(&self) -> Result<Attempt> {
        let request = StartAttemptRequest {
            local_date: time::today_local_date(),
        };

        let attempt: Attempt = self
            .http
            .post("/attempts/start", &request, ApiResource::Attempts)
            .await?;

        info!(
            attempt_id = %attempt.attempt_id,
            local_date = %request.local_date,
            deadline = %attempt.deadline,
            "Attempt started"
        );
        Ok(attempt)
    }

    /// Submits one answer. A fresh idempotency key is generated on every call,
    /// so a retry is a new request; the server keeps the latest answer per question.
    pub async fn submit_answer(
        &self,
        attempt_id: &str,
        question: &Question,
        answer: &Answer,
        time_spent_ms: u64,
    ) -> Result<AnswerReceipt> {
        if !AnswerService::is_answer_valid(question, answer) {
            warn!(
                attempt_id,
                question_id = %question.id,
                question_type = question.question_type.as_str(),
                "Refusing to submit structurally invalid answer"
            );
            return Err(DailyQuizError::new(
                DailyQuizErrorType::UnknownError,
                format!("Answer for question {} is not valid", question.id),
            ));
        }

        let payload = AnswerService::to_submission(question, answer).ok_or_else(|| {
            DailyQuizError::new(
                DailyQuizErrorType::UnknownError,
                format!("Answer for question {} cannot be encoded", question.id),
            )
        })?;

        let request = SubmitAnswerRequest {
            question_id: question.id.clone(),
            answer: payload,
            idempotency_key: idempotency_key(attempt_id, &question.id, time::now()),
            time_spent_ms,
        };

        self.http
            .post(
                &format!("/attempts/{}/answer", attempt_id),
                &request,
                ApiResource::Attempts,
            )
            .await
    }

    pub async fn finish_attempt(&self, attempt_id: &str) -> Result<ScoreBreakdown> {
        let score: ScoreBreakdown = self
            .http
            .post_empty(&format!("/attempts/{}/finish", attempt_id), ApiResource::Attempts)
            .await?;

        info!(attempt_id, score = score.score, "Attempt finished");
        Ok(score)
    }

    pub fn get_time_remaining(deadline: DateTime<Utc>) -> u64 {
        time::time_remaining(deadline)
    }

    pub fn is_time_up(deadline: DateTime<Utc>) -> bool {
        time::is_time_up(deadline)
    }

    pub fn format_time_remaining(seconds: u64) -> String {
        time::format_time_remaining(seconds)
    }
}
