use crate::error::DailyQuizError;
use tracing::warn;

/// Where user-visible alerts go. Silent errors never reach it.
#[cfg_attr(test, mockall::automock)]
pub trait AlertSink: Send + Sync {
    fn alert(&self, error: &DailyQuizError);
}

#[derive(Debug, Clone, Default)]
pub struct LogAlertSink;

impl AlertSink for LogAlertSink {
    fn alert(&self, error: &DailyQuizError) {
        warn!(
            error_type = %error.error_type,
            status = ?error.status_code,
            retry_after = ?error.retry_after,
            "{}",
            error.message
        );
    }
}
