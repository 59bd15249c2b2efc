//! Drag gesture state machine over the board store.
//!
//! A gesture is `start(active)`, any number of `over(id)` position updates,
//! and then `drop(id)` or `cancel()`. Cross-list moves happen eagerly on
//! `over` so the target list previews the task; a cancelled gesture puts the
//! task back where it started.

use crate::board::{
    domain::{ItemId, ItemLocation, ListId, TaskId},
    ports::BoardRepository,
    services::{BoardStore, BoardStoreResult},
};
use tracing::debug;

/// Position a dragged task occupied when its gesture started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragOrigin {
    /// List that held the task.
    pub list_id: ListId,
    /// Index of the task within that list.
    pub index: usize,
}

/// Gesture state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// An item is being dragged.
    Dragging {
        /// The dragged item.
        active: ItemId,
        /// Starting position when the dragged item is a task.
        origin: Option<DragOrigin>,
    },
}

/// One drag-and-drop interaction at a time.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    /// Creates an idle session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current gesture state.
    #[must_use]
    pub const fn state(&self) -> DragState {
        self.state
    }

    /// Returns the dragged item, if a gesture is in progress.
    #[must_use]
    pub const fn active(&self) -> Option<ItemId> {
        match self.state {
            DragState::Dragging { active, .. } => Some(active),
            DragState::Idle => None,
        }
    }

    /// Starts a gesture. A gesture already in progress is cancelled first,
    /// so its eager transfer is reverted before the new origin is recorded.
    ///
    /// # Errors
    ///
    /// Returns a store error when reverting the previous gesture cannot be
    /// saved; the session is idle in that case.
    pub async fn start<R: BoardRepository>(
        &mut self,
        store: &BoardStore<R>,
        active: ItemId,
    ) -> BoardStoreResult<()> {
        if let Some(previous) = self.active() {
            debug!(%previous, "drag restarted, cancelling previous gesture");
            self.cancel(store).await?;
        }
        let board = store.snapshot().await;
        let origin = match board.locate(active) {
            Some(ItemLocation::Task {
                list_index,
                task_index,
            }) => board.lists().get(list_index).map(|list| DragOrigin {
                list_id: list.id(),
                index: task_index,
            }),
            _ => None,
        };
        debug!(%active, "drag started");
        self.state = DragState::Dragging { active, origin };
        Ok(())
    }

    /// Handles a pointer position update.
    ///
    /// When a task is dragged over another list (or a task inside it) the
    /// task is moved to the end of that list immediately. Returns whether
    /// the board changed.
    ///
    /// # Errors
    ///
    /// Returns a store error when the board cannot be saved.
    pub async fn over<R: BoardRepository>(
        &mut self,
        store: &BoardStore<R>,
        over: Option<ItemId>,
    ) -> BoardStoreResult<bool> {
        let (Some(active), Some(over_id)) = (self.active(), over) else {
            return Ok(false);
        };
        store.transfer_task(active.as_task(), over_id).await
    }

    /// Finishes the gesture at `over`, returning to idle regardless of the
    /// outcome.
    ///
    /// Tasks settle at the index of the task they were dropped on, moving
    /// lists first if no earlier `over` did. Lists reorder the board.
    /// Dropping outside any target or onto the dragged item itself changes
    /// nothing. Returns whether the board changed.
    ///
    /// # Errors
    ///
    /// Returns a store error when the board cannot be saved.
    pub async fn drop<R: BoardRepository>(
        &mut self,
        store: &BoardStore<R>,
        over: Option<ItemId>,
    ) -> BoardStoreResult<bool> {
        let state = std::mem::take(&mut self.state);
        let DragState::Dragging { active, .. } = state else {
            return Ok(false);
        };
        let Some(over_id) = over else {
            debug!(%active, "drag dropped outside any target");
            return Ok(false);
        };
        if active == over_id {
            return Ok(false);
        }
        let transferred = store.transfer_task(active.as_task(), over_id).await?;
        let reordered = store.reorder(active, over_id).await?;
        debug!(%active, over = %over_id, transferred, reordered, "drag dropped");
        Ok(transferred || reordered)
    }

    /// Abandons the gesture, returning a transferred task to its origin.
    /// Returns whether the board changed.
    ///
    /// # Errors
    ///
    /// Returns a store error when the board cannot be saved.
    pub async fn cancel<R: BoardRepository>(
        &mut self,
        store: &BoardStore<R>,
    ) -> BoardStoreResult<bool> {
        let state = std::mem::take(&mut self.state);
        let DragState::Dragging {
            active,
            origin: Some(origin),
        } = state
        else {
            return Ok(false);
        };
        let task_id: TaskId = active.as_task();
        let restored = store
            .restore_task(task_id, origin.list_id, origin.index)
            .await?;
        debug!(%active, restored, "drag cancelled");
        Ok(restored)
    }
}
