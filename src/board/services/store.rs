//! The board store: single owner of the board and the one place where
//! mutations are applied and persisted.

use crate::board::{
    domain::{Board, ItemId, ItemLocation, ListId, ListPatch, TaskId, TaskPatch},
    ports::{BoardRepository, BoardRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Service-level errors for board store operations.
#[derive(Debug, Error)]
pub enum BoardStoreError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] BoardRepositoryError),
}

/// Result type for board store operations.
pub type BoardStoreResult<T> = Result<T, BoardStoreError>;

/// Outcome of an operation that creates an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created<Id> {
    /// Identifier of the created entity.
    pub id: Id,
    /// Board state after the creation.
    pub board: Board,
}

/// Owns the board and serializes every mutation.
///
/// Each operation applies to a working copy, persists it, and only then
/// replaces the current board, so a failed save leaves the state untouched.
/// Operations that change nothing are not persisted. Unknown ids are
/// silent no-ops.
pub struct BoardStore<R>
where
    R: BoardRepository,
{
    repository: Arc<R>,
    board: Mutex<Board>,
}

impl<R> BoardStore<R>
where
    R: BoardRepository,
{
    /// Restores the saved board, falling back to the default single-list
    /// board when nothing was saved or the saved document is malformed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Repository`] when storage cannot be read.
    pub async fn open(repository: Arc<R>) -> BoardStoreResult<Self> {
        let board = match repository.load().await {
            Ok(Some(board)) => board,
            Ok(None) => {
                debug!("no saved board, starting with the default list");
                Board::new()
            }
            Err(BoardRepositoryError::Malformed(reason)) => {
                warn!(%reason, "saved board is malformed, starting with the default list");
                Board::new()
            }
            Err(err) => return Err(err.into()),
        };
        Ok(Self::with_board(repository, board))
    }

    /// Creates a store around an already-loaded board.
    #[must_use]
    pub fn with_board(repository: Arc<R>, board: Board) -> Self {
        Self {
            repository,
            board: Mutex::new(board),
        }
    }

    /// Returns a copy of the current board.
    pub async fn snapshot(&self) -> Board {
        self.board.lock().await.clone()
    }

    /// Resolves a drag id against the current board.
    pub async fn locate(&self, item: ItemId) -> Option<ItemLocation> {
        self.board.lock().await.locate(item)
    }

    /// Appends a new empty list.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Repository`] when the board cannot be saved.
    pub async fn add_list(&self) -> BoardStoreResult<Created<ListId>> {
        let (id, board) = self.mutate(|board| (board.add_list(), true)).await?;
        debug!(list_id = %id, "list added");
        Ok(Created { id, board })
    }

    /// Removes a list and its tasks; no-op when absent.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Repository`] when the board cannot be saved.
    pub async fn delete_list(&self, list_id: ListId) -> BoardStoreResult<Board> {
        self.apply(|board| board.delete_list(list_id)).await
    }

    /// Patches a list; no-op when absent.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Repository`] when the board cannot be saved.
    pub async fn update_list(&self, list_id: ListId, patch: &ListPatch) -> BoardStoreResult<Board> {
        self.apply(|board| board.update_list(list_id, patch)).await
    }

    /// Appends a default task to a list.
    ///
    /// Returns `None` when the list does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Repository`] when the board cannot be saved.
    pub async fn add_task(&self, list_id: ListId) -> BoardStoreResult<Option<Created<TaskId>>> {
        let (id, board) = self
            .mutate(|board| {
                let id = board.add_task(list_id);
                (id, id.is_some())
            })
            .await?;
        Ok(id.map(|task_id| {
            debug!(%list_id, %task_id, "task added");
            Created { id: task_id, board }
        }))
    }

    /// Patches a task; no-op when the list or task is absent.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Repository`] when the board cannot be saved.
    pub async fn update_task(
        &self,
        list_id: ListId,
        task_id: TaskId,
        patch: &TaskPatch,
    ) -> BoardStoreResult<Board> {
        self.apply(|board| board.update_task(list_id, task_id, patch))
            .await
    }

    /// Removes a task; no-op when absent.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Repository`] when the board cannot be saved.
    pub async fn delete_task(&self, list_id: ListId, task_id: TaskId) -> BoardStoreResult<Board> {
        self.apply(|board| board.delete_task(list_id, task_id)).await
    }

    /// Advances every running task by one second.
    ///
    /// Returns how many tasks accumulated time.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Repository`] when the board cannot be saved.
    pub async fn tick(&self) -> BoardStoreResult<usize> {
        let (ticked, _) = self
            .mutate(|board| {
                let ticked = board.tick();
                (ticked, ticked > 0)
            })
            .await?;
        Ok(ticked)
    }

    /// Moves a task to the end of the list named or containing `over`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Repository`] when the board cannot be saved.
    pub async fn transfer_task(&self, task_id: TaskId, over: ItemId) -> BoardStoreResult<bool> {
        self.changed(|board| board.transfer_task(task_id, over))
            .await
    }

    /// Moves `active` to the position of `over` within the same sequence.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Repository`] when the board cannot be saved.
    pub async fn reorder(&self, active: ItemId, over: ItemId) -> BoardStoreResult<bool> {
        self.changed(|board| board.reorder(active, over)).await
    }

    /// Puts a task back at a recorded position in a list.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Repository`] when the board cannot be saved.
    pub async fn restore_task(
        &self,
        task_id: TaskId,
        list_id: ListId,
        index: usize,
    ) -> BoardStoreResult<bool> {
        self.changed(|board| board.restore_task(task_id, list_id, index))
            .await
    }

    async fn apply(&self, operation: impl FnOnce(&mut Board) -> bool) -> BoardStoreResult<Board> {
        let ((), board) = self
            .mutate(|board| ((), operation(board)))
            .await?;
        Ok(board)
    }

    async fn changed(&self, operation: impl FnOnce(&mut Board) -> bool) -> BoardStoreResult<bool> {
        let (changed, _) = self
            .mutate(|board| {
                let changed = operation(board);
                (changed, changed)
            })
            .await?;
        Ok(changed)
    }

    /// Runs `operation` on a working copy; when it reports a change the copy
    /// is saved and becomes the current board.
    async fn mutate<T>(
        &self,
        operation: impl FnOnce(&mut Board) -> (T, bool),
    ) -> BoardStoreResult<(T, Board)> {
        let mut current = self.board.lock().await;
        let mut working = current.clone();
        let (value, changed) = operation(&mut working);
        if changed {
            self.repository.save(&working).await?;
            *current = working;
        }
        Ok((value, current.clone()))
    }
}
