//! Application services for enhancement: the rate-limited provider gateway
//! and the task write-back flow built on it.

mod enhancer;
mod gateway;

pub use enhancer::{EnhanceOutcome, TaskEnhancer, TaskEnhancerError, TaskEnhancerResult};
pub use gateway::{DEFAULT_FALLBACK_MODEL, DEFAULT_PRIMARY_MODEL, EnhancementGateway, ModelRoute};
