//! Error taxonomy for the enhancement path.

use thiserror::Error;

/// Message returned when an enhancement request lacks its inputs.
pub const MISSING_FIELDS_MESSAGE: &str = "Missing taskText or enhancementType";

/// Errors surfaced by the enhancement gateway.
///
/// Display strings are user-facing and are returned verbatim over HTTP.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnhancementError {
    /// The request was missing or malformed. Never retried.
    #[error("{0}")]
    Validation(String),

    /// The daily request budget is spent.
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimitExceeded,

    /// The provider failed, timed out, or returned nothing usable.
    #[error("Failed to enhance task. Please try again.")]
    Failed,
}

impl EnhancementError {
    /// Builds the validation error for missing request fields.
    #[must_use]
    pub fn missing_fields() -> Self {
        Self::Validation(MISSING_FIELDS_MESSAGE.to_owned())
    }
}
