//! In-memory repository for board tests and ephemeral sessions.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::Board,
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult},
};

/// Thread-safe in-memory board repository.
///
/// Clones share the same slot, so a test can keep a handle and inspect what
/// a service saved.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardRepository {
    state: Arc<RwLock<InMemoryBoardState>>,
}

#[derive(Debug, Default)]
struct InMemoryBoardState {
    saved: Option<Board>,
    save_count: usize,
}

impl InMemoryBoardRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository that already holds a saved board.
    #[must_use]
    pub fn with_board(board: Board) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryBoardState {
                saved: Some(board),
                save_count: 0,
            })),
        }
    }

    /// Returns how many times the board has been saved.
    ///
    /// # Errors
    ///
    /// Returns persistence errors when lock acquisition fails.
    pub fn save_count(&self) -> BoardRepositoryResult<usize> {
        let state = self.state.read().map_err(|err| {
            BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.save_count)
    }
}

#[async_trait]
impl BoardRepository for InMemoryBoardRepository {
    async fn load(&self) -> BoardRepositoryResult<Option<Board>> {
        let state = self.state.read().map_err(|err| {
            BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.saved.clone())
    }

    async fn save(&self, board: &Board) -> BoardRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.saved = Some(board.clone());
        state.save_count = state.save_count.saturating_add(1);
        Ok(())
    }
}
