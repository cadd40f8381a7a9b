use crate::error::{DailyQuizError, DailyQuizErrorType, Result};
use crate::models::answer::Answer;
use crate::models::attempt::{AnswerReceipt, Attempt};
use crate::models::score::ScoreBreakdown;
use crate::models::session::{QuizSession, SessionAnswer, SessionStatus};
use crate::models::template::QuizTemplate;
use crate::services::attempt_service::AttemptService;
use crate::services::daily_quiz_service::DailyQuizService;
use crate::services::template_service::TemplateService;
use crate::utils::time;
use tracing::{info, warn};

/// Everything the orchestrator knows about the quiz being played.
#[derive(Debug, Clone)]
pub struct ActiveQuiz {
    pub attempt: Attempt,
    pub template: QuizTemplate,
    pub session: QuizSession,
}

/// Drives one quiz from availability check to final score.
///
/// All mutation goes through `&mut self`, so answers submitted through one
/// orchestrator reach the server in call order.
pub struct QuizSessionService {
    daily_quiz: DailyQuizService,
    templates: TemplateService,
    attempts: AttemptService,
    active: Option<ActiveQuiz>,
}

impl QuizSessionService {
    pub fn new(
        daily_quiz: DailyQuizService,
        templates: TemplateService,
        attempts: AttemptService,
    ) -> Self {
        Self {
            daily_quiz,
            templates,
            attempts,
            active: None,
        }
    }

    /// Daily metadata, then template, then attempt, then local session.
    /// Each step runs only after the previous one succeeded; on any failure
    /// the orchestrator state is left exactly as it was. Refused while a quiz
    /// is already active; finish or `abandon` it first.
    pub async fn start_quiz_attempt(&mut self) -> Result<&ActiveQuiz> {
        if let Some(active) = &self.active {
            warn!(
                attempt_id = %active.attempt.attempt_id,
                "Start requested while a quiz is in progress"
            );
            return Err(DailyQuizError::new(
                DailyQuizErrorType::UnknownError,
                "Quiz already in progress",
            ));
        }

        let daily = self.daily_quiz.get_today_quiz(false).await?;
        let template = self.templates.fetch_template(&daily.template_url).await?;
        let attempt = self.attempts.start_attempt().await?;

        let session = QuizSession::new(attempt.attempt_id.clone(), template.id.clone());

        info!(
            attempt_id = %attempt.attempt_id,
            quiz_id = %template.id,
            questions = template.questions.len(),
            "Quiz session started"
        );

        let active: &ActiveQuiz = self.active.insert(ActiveQuiz {
            attempt,
            template,
            session,
        });
        Ok(active)
    }

    /// Session-local write, last answer per question wins. No network.
    pub fn record_answer(
        &mut self,
        question_id: &str,
        answer: Answer,
        time_spent_ms: u64,
    ) -> Result<()> {
        let active = self.active_mut()?;

        if !active.session.is_in_progress() {
            return Err(DailyQuizError::new(
                DailyQuizErrorType::UnknownError,
                "Quiz session is no longer accepting answers",
            ));
        }
        if active.template.question(question_id).is_none() {
            return Err(DailyQuizError::new(
                DailyQuizErrorType::UnknownError,
                format!("Question {} is not part of this quiz", question_id),
            ));
        }

        active.session.record(SessionAnswer {
            question_id: question_id.to_string(),
            answer,
            time_spent_ms,
            answered_at: time::now(),
        });
        Ok(())
    }

    /// Records the answer locally, then sends it to the server.
    pub async fn submit_answer(
        &mut self,
        question_id: &str,
        answer: Answer,
        time_spent_ms: u64,
    ) -> Result<AnswerReceipt> {
        self.record_answer(question_id, answer.clone(), time_spent_ms)?;

        let active = self.active_ref()?;
        let question = active.template.question(question_id).ok_or_else(|| {
            DailyQuizError::new(
                DailyQuizErrorType::UnknownError,
                format!("Question {} is not part of this quiz", question_id),
            )
        })?;

        self.attempts
            .submit_answer(&active.attempt.attempt_id, question, &answer, time_spent_ms)
            .await
    }

    /// Finishes the attempt. On success the session, template and attempt are
    /// dropped, so a second call has nothing to resubmit.
    pub async fn submit_quiz_attempt(&mut self) -> Result<ScoreBreakdown> {
        let attempt_id = {
            let active = self.active_ref()?;
            if active.attempt.attempt_id.is_empty() {
                return Err(DailyQuizError::no_active_session());
            }
            active.attempt.attempt_id.clone()
        };

        let score = self.attempts.finish_attempt(&attempt_id).await?;

        if let Some(mut finished) = self.active.take() {
            finished.session.status = SessionStatus::Submitted;
            info!(
                attempt_id = %attempt_id,
                answered = finished.session.answered_count(),
                score = score.score,
                "Quiz submitted"
            );
        }
        Ok(score)
    }

    /// Countdown hit zero: finish with whatever answers exist.
    pub async fn auto_submit_if_time_up(&mut self) -> Result<Option<ScoreBreakdown>> {
        let Some(active) = self.active.as_ref() else {
            return Ok(None);
        };
        if !AttemptService::is_time_up(active.attempt.deadline) {
            return Ok(None);
        }

        warn!(
            attempt_id = %active.attempt.attempt_id,
            answered = active.session.answered_count(),
            "Time is up, submitting quiz automatically"
        );
        self.submit_quiz_attempt().await.map(Some)
    }

    /// Display order of a question's choices, stable for the whole attempt.
    pub fn choice_order(&self, question_id: &str) -> Option<Vec<usize>> {
        let active = self.active.as_ref()?;
        let index = active.template.question_index(question_id)?;
        let question = &active.template.questions[index];
        Some(active.attempt.shuffled_indices(index, question.choice_count()))
    }

    pub fn time_remaining(&self) -> Option<u64> {
        self.active
            .as_ref()
            .map(|active| AttemptService::get_time_remaining(active.attempt.deadline))
    }

    pub fn current_session(&self) -> Option<&QuizSession> {
        self.active.as_ref().map(|active| &active.session)
    }

    pub fn current_template(&self) -> Option<&QuizTemplate> {
        self.active.as_ref().map(|active| &active.template)
    }

    pub fn current_attempt(&self) -> Option<&Attempt> {
        self.active.as_ref().map(|active| &active.attempt)
    }

    /// Drops local state without telling the server, e.g. after `ATTEMPT_EXPIRED`.
    pub fn abandon(&mut self) {
        if let Some(active) = self.active.take() {
            info!(attempt_id = %active.attempt.attempt_id, "Quiz session abandoned");
        }
    }

    fn active_ref(&self) -> Result<&ActiveQuiz> {
        self.active.as_ref().ok_or_else(DailyQuizError::no_active_session)
    }

    fn active_mut(&mut self) -> Result<&mut ActiveQuiz> {
        self.active.as_mut().ok_or_else(DailyQuizError::no_active_session)
    }
}
