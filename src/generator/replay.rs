//! Replay generator: canned responses for offline sessions and tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ExpansionRequest, Generator};
use crate::error::AppError;

/// A [`Generator`] that replays recorded raw responses in order.
///
/// Each call to [`expand`](Generator::expand) pops the next response, so a
/// recorded session drives the pipeline exactly as the live model did,
/// including responses that fail transport decoding.
pub struct ReplayGenerator {
    responses: Mutex<VecDeque<String>>,
}

impl ReplayGenerator {
    /// Creates a generator over the recorded responses, in replay order.
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }

    /// Appends one more recorded response to the queue.
    pub fn push(&self, raw: impl Into<String>) {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(raw.into());
        }
    }
}

#[async_trait]
impl Generator for ReplayGenerator {
    async fn expand(&self, request: &ExpansionRequest) -> Result<String, AppError> {
        let mut queue = self
            .responses
            .lock()
            .map_err(|_| AppError::Generator("replay queue poisoned".to_string()))?;
        queue.pop_front().ok_or_else(|| {
            AppError::Generator(format!(
                "replay exhausted: no response recorded for focus '{}'",
                request.focus_node.id
            ))
        })
    }
}
