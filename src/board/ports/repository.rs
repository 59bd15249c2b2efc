//! Repository port for whole-board persistence.

use crate::board::domain::Board;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for board repository operations.
pub type BoardRepositoryResult<T> = Result<T, BoardRepositoryError>;

/// Board persistence contract.
///
/// The board is stored and restored as a single unit.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Loads the saved board.
    ///
    /// Returns `None` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::Malformed`] when saved state exists
    /// but cannot be decoded, or [`BoardRepositoryError::Persistence`] when
    /// storage cannot be read.
    async fn load(&self) -> BoardRepositoryResult<Option<Board>>;

    /// Overwrites the saved board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::Persistence`] when storage cannot be
    /// written.
    async fn save(&self, board: &Board) -> BoardRepositoryResult<()>;
}

/// Errors returned by board repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardRepositoryError {
    /// Saved state exists but is not a valid board document.
    #[error("malformed board state: {0}")]
    Malformed(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
