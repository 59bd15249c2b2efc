//! Port contracts for the external text-generation provider.

pub mod generator;

#[cfg(test)]
pub use generator::MockTextGenerator;
pub use generator::{TextGenerator, TextGeneratorError, TextGeneratorResult};
