//! JSON document persistence for the board.

mod board;

pub use board::{BOARD_STORAGE_KEY, JsonFileBoardRepository};
