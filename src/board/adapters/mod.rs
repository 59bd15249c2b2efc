//! Adapter implementations for board persistence.

pub mod file;
pub mod memory;
