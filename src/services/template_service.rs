use crate::config::Config;
use crate::error::{DailyQuizError, DailyQuizErrorType, Result};
use crate::models::template::QuizTemplate;
use crate::utils::validation::validate;
use reqwest::{header, Client};
use tracing::{info, warn};
use url::Url;

const CDN_TIMEOUT_RETRY_AFTER: u64 = 60;

/// Fetches quiz templates from the CDN. Any failure, including a payload
/// that parses but is structurally wrong, is reported as `CDN_ERROR`.
#[derive(Clone)]
pub struct TemplateService {
    client: Client,
}

impl TemplateService {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.cdn_timeout)
            .build()
            .map_err(|e| {
                DailyQuizError::new(
                    DailyQuizErrorType::UnknownError,
                    format!("Failed to create CDN client: {}", e),
                )
            })?;
        Ok(Self { client })
    }

    pub async fn fetch_template(&self, template_url: &str) -> Result<QuizTemplate> {
        let url = Url::parse(template_url)
            .map_err(|e| DailyQuizError::cdn(format!("Invalid template URL {}: {}", template_url, e)))?;

        info!("Fetching quiz template from: {}", url);

        let response = self
            .client
            .get(url.as_str())
            .header(header::CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| {
                warn!("Template fetch failed: {}", e);
                if e.is_timeout() {
                    DailyQuizError::cdn("Timed out loading quiz content")
                        .with_retry_after(CDN_TIMEOUT_RETRY_AFTER)
                } else {
                    DailyQuizError::cdn(format!("Failed to load quiz content: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("CDN returned status {} for {}", status, url);
            return Err(DailyQuizError::cdn(format!("CDN returned status {}", status))
                .with_status(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                DailyQuizError::cdn("Timed out loading quiz content")
                    .with_retry_after(CDN_TIMEOUT_RETRY_AFTER)
            } else {
                DailyQuizError::cdn(format!("Failed to read quiz content: {}", e))
            }
        })?;

        parse_template(&body)
    }
}

fn parse_template(body: &str) -> Result<QuizTemplate> {
    let template: QuizTemplate = serde_json::from_str(body).map_err(|e| {
        warn!("Quiz template is malformed: {}", e);
        DailyQuizError::cdn(format!("Malformed quiz template: {}", e))
    })?;

    validate(&template).map_err(|reason| {
        warn!("Quiz template failed validation: {}", reason);
        DailyQuizError::cdn(format!("Invalid quiz template: {}", reason))
    })?;

    Ok(template)
}
