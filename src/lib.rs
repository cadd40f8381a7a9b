pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::error::Result;
use crate::services::{
    alert_service::AlertSink, attempt_service::AttemptService,
    daily_quiz_service::DailyQuizService, http_service::HttpService,
    identity_service::IdentityProvider, quiz_session_service::QuizSessionService,
    template_service::TemplateService,
};
use std::sync::Arc;

/// Composition root. The application builds this once and hands services down.
#[derive(Clone)]
pub struct QuizServices {
    pub daily_quiz_service: DailyQuizService,
    pub attempt_service: AttemptService,
    pub template_service: TemplateService,
}

impl QuizServices {
    pub fn new(
        config: &Config,
        identity: Arc<dyn IdentityProvider>,
        alerts: Arc<dyn AlertSink>,
    ) -> Result<Self> {
        let http = HttpService::new(config, identity)?;

        let daily_quiz_service = DailyQuizService::new(http.clone(), alerts);
        let attempt_service = AttemptService::new(http);
        let template_service = TemplateService::new(config)?;

        Ok(Self {
            daily_quiz_service,
            attempt_service,
            template_service,
        })
    }

    /// A fresh orchestrator with no quiz in progress.
    pub fn quiz_session(&self) -> QuizSessionService {
        QuizSessionService::new(
            self.daily_quiz_service.clone(),
            self.template_service.clone(),
            self.attempt_service.clone(),
        )
    }
}
