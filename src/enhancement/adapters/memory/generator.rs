//! Scripted text generator for tests and offline runs.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use crate::enhancement::ports::{TextGenerator, TextGeneratorError, TextGeneratorResult};

/// A recorded call to the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationCall {
    /// Model the call was routed to.
    pub model: String,
    /// Full prompt sent.
    pub prompt: String,
}

/// Generator that replays queued responses in order and records calls.
///
/// Once the queue is empty every call fails with
/// [`TextGeneratorError::EmptyResponse`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedTextGenerator {
    state: Arc<RwLock<ScriptedState>>,
}

#[derive(Debug, Default)]
struct ScriptedState {
    responses: VecDeque<TextGeneratorResult<String>>,
    calls: Vec<GenerationCall>,
}

impl ScriptedTextGenerator {
    /// Creates a generator with no queued responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn push_text(&self, text: impl Into<String>) -> TextGeneratorResult<()> {
        self.push(Ok(text.into()))
    }

    /// Queues a failure.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn push_error(&self, error: TextGeneratorError) -> TextGeneratorResult<()> {
        self.push(Err(error))
    }

    /// Returns every call made so far.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn calls(&self) -> TextGeneratorResult<Vec<GenerationCall>> {
        let state = self
            .state
            .read()
            .map_err(|err| TextGeneratorError::transport(std::io::Error::other(err.to_string())))?;
        Ok(state.calls.clone())
    }

    fn push(&self, response: TextGeneratorResult<String>) -> TextGeneratorResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| TextGeneratorError::transport(std::io::Error::other(err.to_string())))?;
        state.responses.push_back(response);
        Ok(())
    }
}

#[async_trait]
impl TextGenerator for ScriptedTextGenerator {
    async fn generate(&self, model: &str, prompt: &str) -> TextGeneratorResult<String> {
        let mut state = self
            .state
            .write()
            .map_err(|err| TextGeneratorError::transport(std::io::Error::other(err.to_string())))?;
        state.calls.push(GenerationCall {
            model: model.to_owned(),
            prompt: prompt.to_owned(),
        });
        state
            .responses
            .pop_front()
            .unwrap_or(Err(TextGeneratorError::EmptyResponse))
    }
}
