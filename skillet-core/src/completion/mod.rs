//! Completion-service abstraction.
//!
//! The generator talks to a chat-completion endpoint through the
//! [`CompletionClient`] trait so tests can swap in a canned fake and the
//! hosted client stays a detail. One request per generation; retry policy
//! belongs to callers.

mod fake;
mod openai;

pub use fake::FakeCompletionClient;
pub use openai::OpenAiClient;

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompletionError {
    /// The endpoint rejected the credential outright.
    #[error("authentication failed, check your API key")]
    Auth,
    /// The credential is valid but not allowed to use this model.
    #[error("access denied, check your API key permissions")]
    PermissionDenied,
    #[error("rate limit exceeded, try again in a few minutes")]
    RateLimited { retry_after_secs: Option<u64> },
    #[error("network error, check your connection: {0}")]
    Network(String),
    #[error("completion service returned an unreadable response: {0}")]
    InvalidResponse(String),
    #[error("completion service error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// A chat-completion backend: one system prompt, one user prompt, one
/// text completion back.
#[async_trait]
pub trait CompletionClient: Send + Sync + fmt::Debug {
    async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError>;

    fn provider_name(&self) -> &'static str;

    fn model_name(&self) -> &str;
}

#[async_trait]
impl<C: CompletionClient + ?Sized> CompletionClient for std::sync::Arc<C> {
    async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError> {
        (**self).complete(system, user).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
