//! Domain model for text enhancement.
//!
//! Covers the enhancement kinds and their instruction templates, the
//! request budget guarding the provider, and the normalization applied to
//! provider output before it is written into a task.

mod error;
mod kind;
mod rate_limit;
mod sanitize;

pub use error::{EnhancementError, MISSING_FIELDS_MESSAGE};
pub use kind::EnhancementKind;
pub use rate_limit::{ModelTier, RateLimitExceeded, RateLimiter, RateLimits, RateUsage};
pub use sanitize::{EnhancedField, sanitize_enhancement, sanitize_for_field};
