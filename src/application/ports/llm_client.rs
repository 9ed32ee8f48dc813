use async_trait::async_trait;

use crate::domain::{Classification, Prompt};

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends one classification request. Never retries.
    async fn classify(&self, prompt: &Prompt) -> Result<Classification, LlmClientError>;

    /// Whether the client holds the credentials it needs to reach the provider.
    fn is_configured(&self) -> bool {
        true
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("llm client not initialized")]
    ClientUninitialized,
    #[error("rate limited")]
    RateLimited,
    #[error("provider error: {0}")]
    ProviderError(String),
    #[error("response failed schema validation: {0}")]
    SchemaInvalid(String),
    #[error("provider unreachable: {0}")]
    Unreachable(String),
}
