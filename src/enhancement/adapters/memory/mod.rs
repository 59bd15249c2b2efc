//! In-memory text generation.

mod generator;

pub use generator::{GenerationCall, ScriptedTextGenerator};
