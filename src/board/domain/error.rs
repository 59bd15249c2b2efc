//! Error types for board domain parsing.

use thiserror::Error;

/// Error returned while parsing a task color from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task color: {0}")]
pub struct ParseTaskColorError(pub String);
