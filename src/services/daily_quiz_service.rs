use crate::error::{ApiResource, DailyQuizError, DailyQuizErrorType, Result};
use crate::models::daily_quiz::{CanStartResult, DailyQuiz, NextDrop};
use crate::services::alert_service::AlertSink;
use crate::services::http_service::HttpService;
use crate::utils::time::to_rfc3339;
use std::sync::Arc;
use tracing::{debug, info};

/// Answers "can the user start a quiz right now".
#[derive(Clone)]
pub struct DailyQuizService {
    http: HttpService,
    alerts: Arc<dyn AlertSink>,
}

impl DailyQuizService {
    pub fn new(http: HttpService, alerts: Arc<dyn AlertSink>) -> Self {
        Self { http, alerts }
    }

    /// Today's quiz metadata. With `suppress_notifications`, the expected
    /// polling outcomes (not yet available, window expired) come back silent.
    pub async fn get_today_quiz(&self, suppress_notifications: bool) -> Result<DailyQuiz> {
        self.http
            .get("/daily", ApiResource::Daily)
            .await
            .map_err(|e| self.surface(e, suppress_notifications))
    }

    pub async fn get_next_quiz_time(&self) -> Result<NextDrop> {
        self.fetch_next_drop()
            .await
            .map_err(|e| self.surface(e, false))
    }

    /// Never fails: every error is folded into the returned decision.
    pub async fn can_start_quiz(&self, suppress_notifications: bool) -> CanStartResult {
        let err = match self.get_today_quiz(suppress_notifications).await {
            Ok(daily) => {
                debug!(local_date = %daily.local_date, "Daily quiz is open");
                return CanStartResult::allowed();
            }
            Err(err) => err,
        };

        let next_available_time = match err.error_type {
            DailyQuizErrorType::NotYetAvailable | DailyQuizErrorType::WindowExpired => self
                .fetch_next_drop()
                .await
                .ok()
                .map(|next| to_rfc3339(next.next_drop_time)),
            _ => None,
        };

        info!(
            error_type = %err.error_type,
            silent = err.silent,
            next_available_time = ?next_available_time,
            "Daily quiz cannot be started"
        );

        CanStartResult::blocked(blocked_reason(&err), next_available_time)
    }

    async fn fetch_next_drop(&self) -> Result<NextDrop> {
        self.http.get("/daily/next", ApiResource::DailyNext).await
    }

    fn surface(&self, err: DailyQuizError, suppress_notifications: bool) -> DailyQuizError {
        let err = if suppress_notifications && is_expected_while_polling(err.error_type) {
            err.silenced()
        } else {
            err
        };

        if !err.silent {
            self.alerts.alert(&err);
        }
        err
    }
}

fn is_expected_while_polling(error_type: DailyQuizErrorType) -> bool {
    matches!(
        error_type,
        DailyQuizErrorType::NotYetAvailable | DailyQuizErrorType::WindowExpired
    )
}

fn blocked_reason(err: &DailyQuizError) -> String {
    match err.error_type {
        DailyQuizErrorType::NotYetAvailable => "Quiz not yet available".to_string(),
        DailyQuizErrorType::WindowExpired => "Quiz window expired".to_string(),
        DailyQuizErrorType::TemplateNotReady => "Quiz is being prepared".to_string(),
        DailyQuizErrorType::NoQuizToday => "No quiz today".to_string(),
        DailyQuizErrorType::AlreadyAttempted => "Already attempted today".to_string(),
        _ => err.message.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::services::alert_service::MockAlertSink;
    use crate::services::identity_service::{IdentityError, MockIdentityProvider};

    fn signed_out_service(alerts: MockAlertSink) -> DailyQuizService {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_ensure_token()
            .returning(|| Err(IdentityError::SignedOut));
        let http = HttpService::new(&Config::new("http://127.0.0.1:9"), Arc::new(identity)).unwrap();
        DailyQuizService::new(http, Arc::new(alerts))
    }

    #[test]
    fn only_polling_outcomes_are_silenced() {
        let mut alerts = MockAlertSink::new();
        alerts
            .expect_alert()
            .withf(|e| e.error_type == DailyQuizErrorType::AlreadyAttempted)
            .times(1)
            .return_const(());
        let service = signed_out_service(alerts);

        let expired = service.surface(DailyQuizError::of_type(DailyQuizErrorType::WindowExpired), true);
        assert!(expired.silent);
        let early = service.surface(DailyQuizError::of_type(DailyQuizErrorType::NotYetAvailable), true);
        assert!(early.silent);

        let dup = service.surface(DailyQuizError::of_type(DailyQuizErrorType::AlreadyAttempted), true);
        assert!(!dup.silent);
    }

    #[test]
    fn without_suppression_polling_outcomes_alert() {
        let mut alerts = MockAlertSink::new();
        alerts.expect_alert().times(1).return_const(());
        let service = signed_out_service(alerts);

        let err = service.surface(DailyQuizError::of_type(DailyQuizErrorType::WindowExpired), false);
        assert!(!err.silent);
        assert_eq!(err.error_type, DailyQuizErrorType::WindowExpired);
    }

    #[tokio::test]
    async fn can_start_folds_auth_failure_into_decision() {
        let mut alerts = MockAlertSink::new();
        alerts
            .expect_alert()
            .withf(|e| e.error_type == DailyQuizErrorType::AuthenticationError)
            .times(1)
            .return_const(());
        let service = signed_out_service(alerts);

        let result = service.can_start_quiz(true).await;
        assert!(!result.can_start);
        assert_eq!(result.reason.as_deref(), Some("User is not signed in"));
        assert!(result.next_available_time.is_none());
    }

    #[test]
    fn reasons_are_fixed_per_type() {
        let err = DailyQuizError::from_status(410, ApiResource::Daily, Some("closed at 22:00".into()));
        assert_eq!(blocked_reason(&err), "Quiz window expired");
        let err = DailyQuizError::from_status(500, ApiResource::Daily, Some("boom".into()));
        assert_eq!(blocked_reason(&err), "boom");
    }
}
