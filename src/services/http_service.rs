use crate::config::Config;
use crate::error::{ApiResource, DailyQuizError, DailyQuizErrorType, Result};
use crate::services::identity_service::IdentityProvider;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Authenticated JSON client for the quiz backend. Every failure leaves here
/// as a `DailyQuizError`.
#[derive(Clone)]
pub struct HttpService {
    client: Client,
    base_url: String,
    identity: Arc<dyn IdentityProvider>,
}

impl HttpService {
    pub fn new(config: &Config, identity: Arc<dyn IdentityProvider>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                DailyQuizError::new(
                    DailyQuizErrorType::UnknownError,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            identity,
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, resource: ApiResource) -> Result<T> {
        let token = self.bearer_token().await?;
        let builder = self.client.get(self.url(path)).bearer_auth(token);
        self.send(builder, path, resource).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B, resource: ApiResource) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = self.bearer_token().await?;
        let builder = self.client.post(self.url(path)).bearer_auth(token).json(body);
        self.send(builder, path, resource).await
    }

    pub async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        resource: ApiResource,
    ) -> Result<T> {
        let token = self.bearer_token().await?;
        let builder = self.client.post(self.url(path)).bearer_auth(token);
        self.send(builder, path, resource).await
    }

    async fn bearer_token(&self) -> Result<String> {
        self.identity.ensure_token().await.map_err(|e| {
            warn!("Identity provider could not supply a token: {}", e);
            DailyQuizError::authentication(e.to_string())
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        path: &str,
        resource: ApiResource,
    ) -> Result<T> {
        let response = builder.send().await.map_err(|e| {
            warn!(path, "Request failed before a response arrived: {}", e);
            DailyQuizError::from(e)
        })?;

        let status = response.status();
        debug!(path, status = status.as_u16(), "Backend responded");

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        Err(DailyQuizError::from_status(
            status.as_u16(),
            resource,
            error_message(&body),
        ))
    }
}

/// Pulls `error` or `message` out of a JSON error body.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|field| value.get(*field).and_then(|v| v.as_str()))
        .map(str::to_string)
}
