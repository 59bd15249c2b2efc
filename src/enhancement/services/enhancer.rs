//! Enhancement of a task field with write-back into the board store.

use crate::board::{
    domain::{Board, ListId, TaskId, TaskList, TaskPatch},
    ports::BoardRepository,
    services::{BoardStore, BoardStoreError},
};
use crate::enhancement::{
    domain::{EnhancedField, EnhancementError, EnhancementKind, sanitize_for_field},
    ports::TextGenerator,
    services::EnhancementGateway,
};
use mockable::Clock;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for task enhancement.
#[derive(Debug, Error)]
pub enum TaskEnhancerError {
    /// An enhancement of this task is already in flight.
    #[error("task {0} is already being enhanced")]
    Busy(TaskId),

    /// The gateway refused or failed the request.
    #[error(transparent)]
    Enhancement(#[from] EnhancementError),

    /// The result could not be written back.
    #[error(transparent)]
    Store(#[from] BoardStoreError),
}

/// Result type for task enhancement.
pub type TaskEnhancerResult<T> = Result<T, TaskEnhancerError>;

/// What happened to an enhancement request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnhanceOutcome {
    /// The field was replaced; carries the board after the write-back.
    Applied(Board),
    /// The task did not exist when the request was made.
    TaskMissing,
    /// The task was deleted while the provider was working; the result was
    /// discarded.
    TaskRemoved,
}

/// Enhances task fields, one request per task at a time.
///
/// The task stays editable while its enhancement is in flight. The result
/// is merged through the store against wherever the task lives at that
/// moment.
pub struct TaskEnhancer<R, G, C>
where
    R: BoardRepository,
    G: TextGenerator,
    C: Clock + Send + Sync,
{
    store: Arc<BoardStore<R>>,
    gateway: Arc<EnhancementGateway<G, C>>,
    busy: Mutex<HashSet<TaskId>>,
}

/// Clears the busy mark when the request completes, however it completes.
struct BusyGuard<'a> {
    busy: &'a Mutex<HashSet<TaskId>>,
    task_id: TaskId,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.busy
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.task_id);
    }
}

impl<R, G, C> TaskEnhancer<R, G, C>
where
    R: BoardRepository,
    G: TextGenerator,
    C: Clock + Send + Sync,
{
    /// Creates an enhancer over a store and gateway.
    #[must_use]
    pub fn new(store: Arc<BoardStore<R>>, gateway: Arc<EnhancementGateway<G, C>>) -> Self {
        Self {
            store,
            gateway,
            busy: Mutex::new(HashSet::new()),
        }
    }

    /// Reports whether an enhancement of `task_id` is in flight.
    #[must_use]
    pub fn is_busy(&self, task_id: TaskId) -> bool {
        self.busy
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&task_id)
    }

    /// Rewrites one field of a task through the gateway.
    ///
    /// The sanitized result replaces the field. The field's previous text is
    /// kept as the task's original text the first time it is enhanced.
    ///
    /// # Errors
    ///
    /// - [`TaskEnhancerError::Busy`] when the task is already being
    ///   enhanced.
    /// - [`TaskEnhancerError::Enhancement`] when the gateway fails or the
    ///   sanitized result is empty.
    /// - [`TaskEnhancerError::Store`] when the write-back cannot be saved.
    pub async fn enhance_task(
        &self,
        list_id: ListId,
        task_id: TaskId,
        field: EnhancedField,
        kind: EnhancementKind,
    ) -> TaskEnhancerResult<EnhanceOutcome> {
        let snapshot = self.store.snapshot().await;
        let Some(task) = snapshot.find_task(list_id, task_id) else {
            debug!(%list_id, %task_id, "enhancement requested for unknown task");
            return Ok(EnhanceOutcome::TaskMissing);
        };
        let source = match field {
            EnhancedField::Title => task.title().to_owned(),
            EnhancedField::Details => task.details().to_owned(),
        };

        let _guard = self.mark_busy(task_id)?;
        let raw = self.gateway.enhance(&source, kind).await?;
        let enhanced = sanitize_for_field(&raw, field);
        if enhanced.is_empty() {
            return Err(EnhancementError::Failed.into());
        }

        let Some(current_list) = self
            .store
            .snapshot()
            .await
            .list_of_task(task_id)
            .map(TaskList::id)
        else {
            info!(%task_id, "task removed during enhancement, discarding result");
            return Ok(EnhanceOutcome::TaskRemoved);
        };
        let patch = match field {
            EnhancedField::Title => TaskPatch::new().with_title(enhanced),
            EnhancedField::Details => TaskPatch::new().with_details(enhanced),
        }
        .with_original_text(source);
        let board = self.store.update_task(current_list, task_id, &patch).await?;
        if board.find_task(current_list, task_id).is_none() {
            info!(%task_id, "task removed during enhancement, discarding result");
            return Ok(EnhanceOutcome::TaskRemoved);
        }
        info!(list_id = %current_list, %task_id, kind = kind.as_str(), ?field, "task enhanced");
        Ok(EnhanceOutcome::Applied(board))
    }

    fn mark_busy(&self, task_id: TaskId) -> TaskEnhancerResult<BusyGuard<'_>> {
        let mut busy = self.busy.lock().unwrap_or_else(PoisonError::into_inner);
        if !busy.insert(task_id) {
            return Err(TaskEnhancerError::Busy(task_id));
        }
        Ok(BusyGuard {
            busy: &self.busy,
            task_id,
        })
    }
}
