//! Scripted provider for service and router tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{CompletionOptions, CompletionProvider, LlmError};
use crate::models::chat::ChatTurn;

/// Replies with a fixed text (or a fixed failure) and records every call.
pub struct ScriptedProvider {
    reply: Result<String, u16>,
    calls: Mutex<Vec<(Vec<ChatTurn>, CompletionOptions)>>,
}

impl ScriptedProvider {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Ok(text.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fails every call with an API error carrying `status`.
    pub fn failing(status: u16) -> Self {
        Self {
            reply: Err(status),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(Vec<ChatTurn>, CompletionOptions)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(
        &self,
        messages: &[ChatTurn],
        options: CompletionOptions,
    ) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((messages.to_vec(), options));
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(LlmError::Api {
                status: *status,
                message: "scripted failure".to_string(),
            }),
        }
    }
}
