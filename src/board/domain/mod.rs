//! Domain model for the kanban board.
//!
//! The board owns its lists, which own their tasks. Every mutation goes
//! through a narrow patch-style operation so that task invariants (a
//! finished task never runs, tracked time never decreases) are enforced in
//! one place. Nothing here performs I/O.

mod board;
mod error;
mod ids;
mod list;
mod task;
mod time;

pub use board::{Board, ItemLocation};
pub use error::ParseTaskColorError;
pub use ids::{ItemId, ListId, TaskId};
pub use list::{DEFAULT_LIST_TITLE, ListPatch, ListPriority, NEW_LIST_TITLE, TaskList};
pub use task::{Task, TaskColor, TaskPatch, UNTITLED_TASK};
pub use time::ElapsedTime;
