//! Shared fixtures for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::config::Config;
use crate::llm_client::{CompletionClient, CompletionError};

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "GEMINI_API_KEY" => Some("test-key".to_string()),
        _ => None,
    })
    .unwrap()
}

/// Answers every prompt with the same text and keeps the prompts it saw.
pub struct RecordingClient {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl RecordingClient {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for RecordingClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// Always fails the way an exhausted quota does.
pub struct FailingClient;

#[async_trait]
impl CompletionClient for FailingClient {
    async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
        Err(CompletionError::Api {
            status: 429,
            message: "Resource has been exhausted".to_string(),
        })
    }
}
