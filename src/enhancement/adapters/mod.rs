//! Adapter implementations for text generation.

pub mod gemini;
pub mod memory;
