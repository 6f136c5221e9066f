//! Canned completion client for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use super::{CompletionClient, CompletionError};

/// A completion client that answers from canned responses instead of the
/// network. Responses are keyed by a substring matched against the user
/// prompt; an optional default catches everything else.
#[derive(Debug, Default)]
pub struct FakeCompletionClient {
    responses: RwLock<HashMap<String, String>>,
    default_response: RwLock<Option<String>>,
    calls: AtomicUsize,
}

impl FakeCompletionClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(prompt_substring: &str, response: &str) -> Self {
        let client = Self::new();
        client.add_response(prompt_substring, response);
        client
    }

    pub fn with_default_response(response: &str) -> Self {
        let client = Self::new();
        *client.default_response.write().unwrap() = Some(response.to_string());
        client
    }

    pub fn add_response(&self, prompt_substring: &str, response: &str) {
        self.responses
            .write()
            .unwrap()
            .insert(prompt_substring.to_string(), response.to_string());
    }

    /// Number of `complete` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for FakeCompletionClient {
    async fn complete(&self, _system: &str, user: &str) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let responses = self.responses.read().unwrap();
        for (substring, response) in responses.iter() {
            if user.contains(substring.as_str()) {
                return Ok(response.clone());
            }
        }
        if let Some(default) = self.default_response.read().unwrap().as_ref() {
            return Ok(default.clone());
        }
        Err(CompletionError::Network(format!(
            "no canned response matches prompt: {user}"
        )))
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
