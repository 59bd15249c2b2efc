//! Rate-limited dispatch of enhancement requests to the text provider.

use crate::enhancement::{
    domain::{EnhancementError, EnhancementKind, ModelTier, RateLimiter},
    ports::TextGenerator,
};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Model used while the short-term budget allows it.
pub const DEFAULT_PRIMARY_MODEL: &str = "gemini-2.0-flash-exp";
/// Model used once the short-term budget is spent.
pub const DEFAULT_FALLBACK_MODEL: &str = "gemini-2.0-flash-lite";

/// Provider model names per tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRoute {
    /// Model for [`ModelTier::Primary`].
    pub primary: String,
    /// Model for [`ModelTier::Fallback`].
    pub fallback: String,
}

impl ModelRoute {
    /// Creates a route from explicit model names.
    #[must_use]
    pub fn new(primary: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            fallback: fallback.into(),
        }
    }

    /// Returns the model serving `tier`.
    #[must_use]
    pub fn model(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Primary => &self.primary,
            ModelTier::Fallback => &self.fallback,
        }
    }
}

impl Default for ModelRoute {
    fn default() -> Self {
        Self::new(DEFAULT_PRIMARY_MODEL, DEFAULT_FALLBACK_MODEL)
    }
}

/// Turns task text and an enhancement kind into the provider's raw rewrite.
pub struct EnhancementGateway<G, C>
where
    G: TextGenerator,
    C: Clock + Send + Sync,
{
    generator: Arc<G>,
    limiter: Arc<RateLimiter<C>>,
    models: ModelRoute,
    timeout: Option<Duration>,
}

impl<G, C> EnhancementGateway<G, C>
where
    G: TextGenerator,
    C: Clock + Send + Sync,
{
    /// Creates a gateway without a provider timeout.
    #[must_use]
    pub const fn new(generator: Arc<G>, limiter: Arc<RateLimiter<C>>, models: ModelRoute) -> Self {
        Self {
            generator,
            limiter,
            models,
            timeout: None,
        }
    }

    /// Bounds each provider call; an expired call fails the enhancement.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the shared limiter.
    #[must_use]
    pub fn limiter(&self) -> &RateLimiter<C> {
        &self.limiter
    }

    /// Returns the configured models.
    #[must_use]
    pub const fn models(&self) -> &ModelRoute {
        &self.models
    }

    /// Enhances `task_text` and returns the provider's raw output.
    ///
    /// The request is counted against the budget before the provider is
    /// called, so failed and slow calls still consume it.
    ///
    /// # Errors
    ///
    /// - [`EnhancementError::Validation`] when `task_text` is blank.
    /// - [`EnhancementError::RateLimitExceeded`] when the daily budget is
    ///   spent; the provider is not called.
    /// - [`EnhancementError::Failed`] when the provider errors, times out,
    ///   or the instruction cannot be rendered.
    pub async fn enhance(
        &self,
        task_text: &str,
        kind: EnhancementKind,
    ) -> Result<String, EnhancementError> {
        if task_text.trim().is_empty() {
            return Err(EnhancementError::missing_fields());
        }
        let prompt = kind.render_instruction(task_text).map_err(|err| {
            error!(kind = kind.as_str(), error = %err, "instruction template failed to render");
            EnhancementError::Failed
        })?;

        let tier = self.limiter.acquire().map_err(|err| {
            warn!(kind = kind.as_str(), error = %err, "enhancement rejected by rate limiter");
            EnhancementError::RateLimitExceeded
        })?;
        let model = self.models.model(tier);
        info!(model, kind = kind.as_str(), ?tier, "dispatching enhancement");

        let call = self.generator.generate(model, &prompt);
        let outcome = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => {
                    error!(model, timeout = ?limit, "provider call timed out");
                    return Err(EnhancementError::Failed);
                }
            },
            None => call.await,
        };
        outcome.map_err(|err| {
            error!(model, error = %err, "provider call failed");
            EnhancementError::Failed
        })
    }
}
