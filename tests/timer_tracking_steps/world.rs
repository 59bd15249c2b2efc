//! Shared world state for time tracking scenarios.

use std::sync::Arc;

use rstest::fixture;
use taskflow::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{Board, ListId, Task, TaskId},
    services::BoardStore,
};

/// Store type used by the scenario world.
pub type TestStore = BoardStore<InMemoryBoardRepository>;

/// Scenario world for time tracking behaviour tests.
pub struct TimerWorld {
    pub store: Arc<TestStore>,
    pub list_id: Option<ListId>,
    pub task_id: Option<TaskId>,
    pub last_update_changed: Option<bool>,
}

impl TimerWorld {
    /// Creates a world over a fresh in-memory board.
    #[must_use]
    pub fn new() -> Self {
        let store = BoardStore::with_board(Arc::new(InMemoryBoardRepository::new()), Board::new());
        Self {
            store: Arc::new(store),
            list_id: None,
            task_id: None,
            last_update_changed: None,
        }
    }

    /// Returns the list and task under test.
    pub fn target(&self) -> Result<(ListId, TaskId), eyre::Report> {
        let list_id = self
            .list_id
            .ok_or_else(|| eyre::eyre!("missing list in scenario world"))?;
        let task_id = self
            .task_id
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
        Ok((list_id, task_id))
    }

    /// Returns the current state of the task under test.
    pub fn current_task(&self) -> Result<Task, eyre::Report> {
        let (list_id, task_id) = self.target()?;
        run_async(self.store.snapshot())
            .find_task(list_id, task_id)
            .cloned()
            .ok_or_else(|| eyre::eyre!("task {task_id} is no longer on the board"))
    }
}

impl Default for TimerWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TimerWorld {
    TimerWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
