use serde::{Deserialize, Serialize};
use std::fmt;

pub type Result<T> = std::result::Result<T, DailyQuizError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DailyQuizErrorType {
    NotYetAvailable,
    WindowExpired,
    TemplateNotReady,
    NoQuizToday,
    NoUpcomingQuiz,
    AlreadyAttempted,
    AttemptExpired,
    NetworkError,
    CdnError,
    AuthenticationError,
    UnknownError,
}

impl DailyQuizErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DailyQuizErrorType::NotYetAvailable => "NOT_YET_AVAILABLE",
            DailyQuizErrorType::WindowExpired => "WINDOW_EXPIRED",
            DailyQuizErrorType::TemplateNotReady => "TEMPLATE_NOT_READY",
            DailyQuizErrorType::NoQuizToday => "NO_QUIZ_TODAY",
            DailyQuizErrorType::NoUpcomingQuiz => "NO_UPCOMING_QUIZ",
            DailyQuizErrorType::AlreadyAttempted => "ALREADY_ATTEMPTED",
            DailyQuizErrorType::AttemptExpired => "ATTEMPT_EXPIRED",
            DailyQuizErrorType::NetworkError => "NETWORK_ERROR",
            DailyQuizErrorType::CdnError => "CDN_ERROR",
            DailyQuizErrorType::AuthenticationError => "AUTHENTICATION_ERROR",
            DailyQuizErrorType::UnknownError => "UNKNOWN_ERROR",
        }
    }

    fn default_message(&self) -> &'static str {
        match self {
            DailyQuizErrorType::NotYetAvailable => "Quiz not yet available",
            DailyQuizErrorType::WindowExpired => "Quiz window expired",
            DailyQuizErrorType::TemplateNotReady => "Quiz is being prepared",
            DailyQuizErrorType::NoQuizToday => "No quiz today",
            DailyQuizErrorType::NoUpcomingQuiz => "No upcoming quiz scheduled",
            DailyQuizErrorType::AlreadyAttempted => "Already attempted today",
            DailyQuizErrorType::AttemptExpired => "Attempt has expired",
            DailyQuizErrorType::NetworkError => "Network error",
            DailyQuizErrorType::CdnError => "Failed to load quiz content",
            DailyQuizErrorType::AuthenticationError => "Authentication required",
            DailyQuizErrorType::UnknownError => "Unexpected error",
        }
    }

    fn default_retry_after(&self) -> Option<u64> {
        match self {
            DailyQuizErrorType::TemplateNotReady => Some(300),
            DailyQuizErrorType::NetworkError => Some(30),
            DailyQuizErrorType::CdnError => Some(30),
            _ => None,
        }
    }
}

impl fmt::Display for DailyQuizErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend resource a status code came from. The same status means
/// different things on different endpoints (404, 410).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiResource {
    Daily,
    DailyNext,
    Attempts,
}

/// The only error type that crosses a component boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{error_type}: {message}")]
pub struct DailyQuizError {
    pub error_type: DailyQuizErrorType,
    pub status_code: Option<u16>,
    /// Seconds the caller should wait before retrying.
    pub retry_after: Option<u64>,
    pub message: String,
    /// Silent errors are expected conditions and must not raise an alert.
    pub silent: bool,
}

impl DailyQuizError {
    pub fn new(error_type: DailyQuizErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            status_code: None,
            retry_after: error_type.default_retry_after(),
            message: message.into(),
            silent: false,
        }
    }

    pub fn of_type(error_type: DailyQuizErrorType) -> Self {
        Self::new(error_type, error_type.default_message())
    }

    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    pub fn with_retry_after(mut self, seconds: u64) -> Self {
        self.retry_after = Some(seconds);
        self
    }

    pub fn silenced(mut self) -> Self {
        self.silent = true;
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(DailyQuizErrorType::NetworkError, message).with_status(0)
    }

    pub fn cdn(message: impl Into<String>) -> Self {
        Self::new(DailyQuizErrorType::CdnError, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(DailyQuizErrorType::AuthenticationError, message).with_status(401)
    }

    pub fn no_active_session() -> Self {
        Self::new(DailyQuizErrorType::UnknownError, "No active quiz session")
    }

    /// Maps a non-success HTTP status from the backend into the taxonomy.
    pub fn from_status(status: u16, resource: ApiResource, message: Option<String>) -> Self {
        let error_type = match (status, resource) {
            (0, _) => DailyQuizErrorType::NetworkError,
            (401, _) => DailyQuizErrorType::AuthenticationError,
            (403, _) => DailyQuizErrorType::NotYetAvailable,
            (404, ApiResource::Daily) => DailyQuizErrorType::NoQuizToday,
            (404, ApiResource::DailyNext) => DailyQuizErrorType::NoUpcomingQuiz,
            (409, _) => DailyQuizErrorType::AlreadyAttempted,
            (410, ApiResource::Attempts) => DailyQuizErrorType::AttemptExpired,
            (410, _) => DailyQuizErrorType::WindowExpired,
            (503, _) => DailyQuizErrorType::TemplateNotReady,
            _ => DailyQuizErrorType::UnknownError,
        };

        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| match error_type {
                DailyQuizErrorType::UnknownError => format!("Request failed with status {}", status),
                other => other.default_message().to_string(),
            });

        Self::new(error_type, message).with_status(status)
    }

    pub fn is_retryable(&self) -> bool {
        match self.error_type {
            DailyQuizErrorType::NotYetAvailable
            | DailyQuizErrorType::TemplateNotReady
            | DailyQuizErrorType::NetworkError
            | DailyQuizErrorType::CdnError => true,
            DailyQuizErrorType::UnknownError => {
                matches!(self.status_code, Some(code) if code >= 500)
            }
            DailyQuizErrorType::WindowExpired
            | DailyQuizErrorType::NoQuizToday
            | DailyQuizErrorType::NoUpcomingQuiz
            | DailyQuizErrorType::AlreadyAttempted
            | DailyQuizErrorType::AttemptExpired
            | DailyQuizErrorType::AuthenticationError => false,
        }
    }
}

impl From<reqwest::Error> for DailyQuizError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::new(
                DailyQuizErrorType::UnknownError,
                format!("Invalid response body: {}", err),
            );
        }
        if err.is_timeout() {
            return Self::network(format!("Request timed out: {}", err));
        }
        Self::network(format!("Network request failed: {}", err))
    }
}

impl From<serde_json::Error> for DailyQuizError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(
            DailyQuizErrorType::UnknownError,
            format!("Invalid response body: {}", err),
        )
    }
}
