//! Completion-API abstraction for AI-assisted recipe drafting.
//!
//! This module provides a trait-based abstraction over hosted completion
//! providers (OpenAI today) with a fake implementation for testing, plus the
//! extraction and validation pipeline that turns free-form model output into a
//! typed recipe draft.

mod extract;
mod fake;
mod generate;
mod openai;

pub use fake::FakeClient;
pub use generate::{generate, GenerationError, RecipeDraft};
pub use openai::OpenAiClient;

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Error type for completion-API calls.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Trait for hosted text-completion providers.
///
/// Implementations should be stateless and thread-safe. The provider is
/// responsible for making one API call and returning the model's text response.
#[async_trait]
pub trait CompletionClient: Send + Sync + fmt::Debug {
    /// Send a system instruction and user prompt to the model, returning the
    /// first message's text content.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, CompletionError>;

    /// Get the provider name (e.g., "openai", "fake").
    fn provider_name(&self) -> &'static str;

    /// Get the model name (e.g., "gpt-3.5-turbo").
    fn model_name(&self) -> &str;
}

/// Build a completion client from environment variables.
///
/// - GENERATION_PROVIDER: "openai" | "fake" (default: "openai")
/// - GENERATION_MODEL: model name (default: "gpt-3.5-turbo")
/// - OPENAI_API_KEY: API key for OpenAI
pub fn create_client_from_env() -> Result<Arc<dyn CompletionClient>, CompletionError> {
    let provider = std::env::var("GENERATION_PROVIDER").unwrap_or_else(|_| "openai".to_string());

    match provider.as_str() {
        "fake" => Ok(Arc::new(FakeClient::default())),
        "openai" => {
            let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
                CompletionError::NotConfigured("OPENAI_API_KEY not set".to_string())
            })?;
            let model = std::env::var("GENERATION_MODEL")
                .unwrap_or_else(|_| "gpt-3.5-turbo".to_string());
            Ok(Arc::new(OpenAiClient::new(api_key, model)))
        }
        other => Err(CompletionError::NotConfigured(format!(
            "Unknown provider: {}",
            other
        ))),
    }
}
