//! Fake completion client for testing.
//!
//! Returns deterministic responses based on prompt matching, allowing tests to
//! run without network access or API costs.

use super::{CompletionClient, CompletionError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// A fake completion client for testing.
///
/// Responses are matched by checking if the prompt contains a registered
/// substring. If no match is found, returns a default response or error.
#[derive(Debug)]
pub struct FakeClient {
    /// Map of prompt substring -> response
    responses: RwLock<HashMap<String, String>>,
    /// Default response if no match found
    default_response: Option<String>,
}

impl Default for FakeClient {
    fn default() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: Some("{}".to_string()),
        }
    }
}

#[allow(dead_code)]
impl FakeClient {
    /// Create a new FakeClient with no registered responses.
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: None,
        }
    }

    /// Create a FakeClient that returns a specific response for prompts containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let mut client = Self::new();
        client.add_response(prompt_contains, response);
        client
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(&mut self, prompt_contains: &str, response: &str) {
        self.responses
            .write()
            .unwrap()
            .insert(prompt_contains.to_string(), response.to_string());
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }
}

#[async_trait]
impl CompletionClient for FakeClient {
    async fn complete(&self, _system: &str, prompt: &str) -> Result<String, CompletionError> {
        let responses = self.responses.read().unwrap();

        // Find first matching pattern (case-insensitive)
        let prompt_lower = prompt.to_lowercase();
        for (pattern, response) in responses.iter() {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return Ok(response.clone());
            }
        }

        // Return default or error
        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => {
                let preview: String = prompt.chars().take(100).collect();
                Err(CompletionError::RequestFailed(format!(
                    "FakeClient: No response configured for prompt (first 100 chars): {preview}"
                )))
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_client_matching() {
        let client = FakeClient::with_response("hello", "world");
        let result = client.complete("system", "Say hello to the user").await.unwrap();
        assert_eq!(result, "world");
    }

    #[tokio::test]
    async fn test_fake_client_case_insensitive() {
        let client = FakeClient::with_response("HELLO", "world");
        let result = client.complete("system", "hello there").await.unwrap();
        assert_eq!(result, "world");
    }

    #[tokio::test]
    async fn test_fake_client_no_match() {
        let client = FakeClient::new();
        let result = client.complete("system", "random prompt").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fake_client_no_match_long_multibyte_prompt() {
        // The error preview truncates by characters, so a prompt whose
        // 100th byte lands inside a multibyte character must not panic
        let client = FakeClient::new();
        let prompt = format!("a{}", "🍜".repeat(30));
        let result = client.complete("system", &prompt).await;
        assert!(matches!(result, Err(CompletionError::RequestFailed(_))));
    }

    #[tokio::test]
    async fn test_fake_client_default_response() {
        let client = FakeClient::new().with_default_response("default");
        let result = client.complete("system", "random prompt").await.unwrap();
        assert_eq!(result, "default");
    }
}
