pub mod alert_service;
pub mod answer_service;
pub mod attempt_service;
pub mod daily_quiz_service;
pub mod http_service;
pub mod identity_service;
pub mod quiz_session_service;
pub mod scoring_service;
pub mod template_service;
