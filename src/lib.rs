//! Taskflow: kanban board state engine with AI text enhancement.
//!
//! The crate keeps an ordered board of task lists, reorders it through drag
//! gestures, accumulates time on running tasks, and rewrites task text
//! through a rate-limited generative model.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure state and rules with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and the text provider
//! - **Adapters**: Concrete implementations of ports (files, memory, HTTP)
//!
//! # Modules
//!
//! - [`board`]: Lists, tasks, drag reordering, and timers
//! - [`enhancement`]: Rate-limited text enhancement and output sanitation
//! - [`http`]: The `POST /api/enhance-task` endpoint
//! - [`config`]: Environment configuration for the server binary
//! - [`telemetry`]: Tracing setup

pub mod board;
pub mod config;
pub mod enhancement;
pub mod http;
pub mod telemetry;
