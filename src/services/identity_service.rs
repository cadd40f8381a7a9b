use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IdentityError {
    #[error("User is not signed in")]
    SignedOut,

    #[error("Token refresh failed: {0}")]
    Refresh(String),
}

/// The external identity provider. Implementations refresh the token when it
/// is close to expiry and return a token that is valid right now.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn ensure_token(&self) -> Result<String, IdentityError>;
}

/// Fixed token, for the CLI and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenProvider {
    token: Option<String>,
}

impl StaticTokenProvider {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticTokenProvider {
    async fn ensure_token(&self) -> Result<String, IdentityError> {
        self.token.clone().ok_or(IdentityError::SignedOut)
    }
}
