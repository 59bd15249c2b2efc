//! Handler and wire types for task text enhancement.

use crate::enhancement::{
    domain::{EnhancementError, EnhancementKind},
    ports::TextGenerator,
    services::EnhancementGateway,
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Request body of `POST /api/enhance-task`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceTaskRequest {
    /// Text to rewrite.
    #[serde(default)]
    pub task_text: Option<String>,
    /// Kind of rewrite; unknown values mean `general`.
    #[serde(default)]
    pub enhancement_type: Option<String>,
}

/// Success body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceTaskResponse {
    /// Raw provider output.
    pub enhanced_text: String,
}

/// Failure body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
}

impl IntoResponse for EnhancementError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::RateLimitExceeded | Self::Failed => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl EnhanceTaskRequest {
    /// Returns the text and kind, or the validation error when either is
    /// missing or empty.
    fn validate(self) -> Result<(String, EnhancementKind), EnhancementError> {
        match (self.task_text, self.enhancement_type) {
            (Some(text), Some(kind)) if !text.trim().is_empty() && !kind.trim().is_empty() => {
                Ok((text, EnhancementKind::parse_or_general(&kind)))
            }
            _ => Err(EnhancementError::missing_fields()),
        }
    }
}

pub(super) async fn enhance_task<G, C>(
    State(gateway): State<Arc<EnhancementGateway<G, C>>>,
    payload: Result<Json<EnhanceTaskRequest>, JsonRejection>,
) -> Result<Json<EnhanceTaskResponse>, EnhancementError>
where
    G: TextGenerator + 'static,
    C: Clock + Send + Sync + 'static,
{
    let request = payload
        .map_err(|rejection| {
            debug!(error = %rejection, "rejected enhancement request body");
            EnhancementError::missing_fields()
        })?
        .0;
    let (text, kind) = request.validate()?;
    let enhanced_text = gateway.enhance(&text, kind).await.inspect_err(|err| {
        warn!(kind = kind.as_str(), error = %err, "enhancement request failed");
    })?;
    Ok(Json(EnhanceTaskResponse { enhanced_text }))
}
