//! Application services for board state: the store, drag gestures, and the
//! running-task timer.

mod drag;
mod store;
mod timer;

pub use drag::{DragOrigin, DragSession, DragState};
pub use store::{BoardStore, BoardStoreError, BoardStoreResult, Created};
pub use timer::{TICK_PERIOD, TimerService};
