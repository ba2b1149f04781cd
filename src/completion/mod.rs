pub mod gemini;

pub use gemini::*;

use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("API key is not configured for {0}")]
    MissingApiKey(String),

    #[error("Completion service unreachable at {0}")]
    Connection(String),

    #[error("Completion request timed out after {0}s")]
    Timeout(u64),

    #[error("Completion service returned error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Completion response contained no text")]
    EmptyResponse,
}

/// Text-completion service abstraction (allows mocking).
///
/// One prompt in, the model's free-form text out. No JSON guarantee is
/// assumed from any provider; callers parse defensively.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;

    /// Provider label for status surfaces, e.g. `gemini/gemini-2.0-flash`.
    fn provider(&self) -> String;

    /// Whether the client has the configuration it needs to attempt a call.
    fn is_configured(&self) -> bool;
}

/// Mock completion client for testing — returns a configurable response
/// and records every prompt it was given.
pub struct MockCompletionClient {
    response: String,
    prompts: Mutex<Vec<String>>,
}

impl MockCompletionClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts seen so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.response.clone())
    }

    fn provider(&self) -> String {
        "mock".to_string()
    }

    fn is_configured(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_client_returns_configured_response() {
        let client = MockCompletionClient::new("test response");
        let result = client.complete("prompt").await.unwrap();
        assert_eq!(result, "test response");
    }

    #[tokio::test]
    async fn mock_client_records_prompts() {
        let client = MockCompletionClient::new("");
        client.complete("first").await.unwrap();
        client.complete("second").await.unwrap();
        assert_eq!(client.prompts(), vec!["first", "second"]);
    }
}
