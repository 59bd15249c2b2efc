//! Single-shot text generation port.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for text generation operations.
pub type TextGeneratorResult<T> = Result<T, TextGeneratorError>;

/// Text generation contract of the external provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends `prompt` to `model` and returns the raw generated text.
    ///
    /// # Errors
    ///
    /// Returns [`TextGeneratorError`] when the provider cannot be reached,
    /// rejects the request, or returns no text.
    async fn generate(&self, model: &str, prompt: &str) -> TextGeneratorResult<String>;
}

/// Errors returned by text generation adapters.
#[derive(Debug, Clone, Error)]
pub enum TextGeneratorError {
    /// The provider answered with a non-success status.
    #[error("provider returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body or extracted error message.
        body: String,
    },

    /// The provider answered without any generated text.
    #[error("provider returned no text")]
    EmptyResponse,

    /// Network or decoding failure.
    #[error("provider transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl TextGeneratorError {
    /// Wraps a transport error.
    #[must_use]
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
