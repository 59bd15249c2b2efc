//! Unit tests for the board module.
//!
//! Domain rules are tested directly on [`crate::board::domain::Board`];
//! services are tested against the in-memory and mocked repositories.

mod timer_tests;
