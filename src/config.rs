use crate::error::ConfigError;
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub cdn_timeout: Duration,
    pub id_token: Option<String>,
}

impl Config {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cdn_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            id_token: None,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let mut config = Self::new(get_env("QUIZ_API_BASE_URL")?);
        config.request_timeout = Duration::from_secs(
            get_env_parse_or("QUIZ_REQUEST_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
        );
        config.cdn_timeout =
            Duration::from_secs(get_env_parse_or("QUIZ_CDN_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?);
        config.id_token = env::var("QUIZ_ID_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        Ok(config)
    }
}

fn get_env(name: &str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name.to_string()))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name: name.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_strips_trailing_slash_and_uses_default_timeouts() {
        let config = Config::new("https://api.example.com/v1/");
        assert_eq!(config.api_base_url, "https://api.example.com/v1");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.cdn_timeout, Duration::from_secs(10));
        assert!(config.id_token.is_none());
    }

    #[test]
    fn parse_helper_rejects_garbage() {
        env::set_var("QUIZ_TEST_BAD_TIMEOUT", "ten");
        let err = get_env_parse_or::<u64>("QUIZ_TEST_BAD_TIMEOUT", 10).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        let value = get_env_parse_or::<u64>("QUIZ_TEST_UNSET_TIMEOUT", 7).unwrap();
        assert_eq!(value, 7);
    }
}
