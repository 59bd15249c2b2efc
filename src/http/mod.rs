//! HTTP surface of the enhancement gateway.
//!
//! Exposes `POST /api/enhance-task`. Validation failures answer `400`; any
//! downstream failure, including rate limiting, answers `500` with the
//! user-facing message.

mod enhance;

pub use enhance::{EnhanceTaskRequest, EnhanceTaskResponse, ErrorResponse};

use crate::enhancement::{ports::TextGenerator, services::EnhancementGateway};
use axum::{Router, routing::post};
use mockable::Clock;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Path of the enhancement endpoint.
pub const ENHANCE_TASK_PATH: &str = "/api/enhance-task";

/// Builds the application router around a shared gateway.
#[must_use]
pub fn router<G, C>(gateway: Arc<EnhancementGateway<G, C>>) -> Router
where
    G: TextGenerator + 'static,
    C: Clock + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(ENHANCE_TASK_PATH, post(enhance::enhance_task::<G, C>))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(gateway)
}
