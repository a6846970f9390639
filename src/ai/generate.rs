//! AI-assisted recipe drafting.
//!
//! One completion call with a fixed system instruction, followed by strict
//! extraction and validation of the returned draft. A draft either comes back
//! fully populated and well-typed or the whole call fails with a reason; a
//! partially-filled draft never reaches the caller.

use super::{extract, CompletionClient, CompletionError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// System instruction sent with every drafting request.
pub const DRAFT_SYSTEM_PROMPT: &str = "You are a professional chef who creates detailed recipes. \
    Provide recipes in JSON format with title, description, ingredients (as array), \
    instructions (as array of steps), cookingTime (in minutes), and servings.";

/// Error type for recipe drafting.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("prompt must not be empty")]
    EmptyPrompt,

    #[error("completion request failed: {0}")]
    Completion(#[from] CompletionError),

    #[error("completion returned no content")]
    EmptyContent,

    #[error("no JSON object found in completion response")]
    NoJsonFound,

    #[error("failed to parse draft JSON: {0}")]
    InvalidJson(String),

    #[error("draft has a missing or invalid field: {0}")]
    InvalidDraft(&'static str),
}

/// A validated recipe draft, ready to populate the recipe form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    /// Minutes
    pub cooking_time: i32,
    pub servings: i32,
}

/// Loosely-typed draft as parsed from model output, before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDraft {
    title: Option<String>,
    description: Option<String>,
    ingredients: Option<Vec<String>>,
    instructions: Option<Vec<String>>,
    cooking_time: Option<i32>,
    servings: Option<i32>,
}

/// Draft a recipe from a free-text prompt.
///
/// Issues a single completion request (no retry), extracts the JSON payload
/// from the response text, and validates it into a [`RecipeDraft`].
pub async fn generate(
    client: &dyn CompletionClient,
    prompt: &str,
) -> Result<RecipeDraft, GenerationError> {
    if prompt.trim().is_empty() {
        return Err(GenerationError::EmptyPrompt);
    }

    let content = client.complete(DRAFT_SYSTEM_PROMPT, prompt).await?;
    if content.trim().is_empty() {
        return Err(GenerationError::EmptyContent);
    }

    let payload = extract::json_payload(&content).ok_or(GenerationError::NoJsonFound)?;

    let raw: RawDraft = serde_json::from_str(payload)
        .map_err(|e| GenerationError::InvalidJson(e.to_string()))?;

    validate_draft(raw)
}

fn validate_draft(raw: RawDraft) -> Result<RecipeDraft, GenerationError> {
    let title = raw
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or(GenerationError::InvalidDraft("title"))?;

    let description = raw
        .description
        .filter(|d| !d.trim().is_empty())
        .ok_or(GenerationError::InvalidDraft("description"))?;

    let ingredients = raw
        .ingredients
        .filter(|i| !i.is_empty() && i.iter().all(|s| !s.trim().is_empty()))
        .ok_or(GenerationError::InvalidDraft("ingredients"))?;

    let instructions = raw
        .instructions
        .filter(|i| !i.is_empty() && i.iter().all(|s| !s.trim().is_empty()))
        .ok_or(GenerationError::InvalidDraft("instructions"))?;

    let cooking_time = raw
        .cooking_time
        .filter(|t| *t > 0)
        .ok_or(GenerationError::InvalidDraft("cookingTime"))?;

    let servings = raw
        .servings
        .filter(|s| *s > 0)
        .ok_or(GenerationError::InvalidDraft("servings"))?;

    Ok(RecipeDraft {
        title,
        description,
        ingredients,
        instructions,
        cooking_time,
        servings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::FakeClient;

    const PASTA_DRAFT: &str = r#"```json
{
  "title": "Spinach Pesto Pasta",
  "description": "A healthy vegetarian pasta dish with fresh spinach.",
  "ingredients": ["8 oz whole wheat pasta", "2 cups fresh spinach", "1/4 cup olive oil"],
  "instructions": ["Boil the pasta until al dente.", "Blend spinach and olive oil.", "Toss pasta with the pesto."],
  "cookingTime": 25,
  "servings": 4
}
```"#;

    #[tokio::test]
    async fn test_generate_from_fenced_json_block() {
        let client = FakeClient::with_response("vegetarian pasta", PASTA_DRAFT);

        let draft = generate(&client, "A healthy vegetarian pasta dish with spinach")
            .await
            .unwrap();

        assert_eq!(draft.title, "Spinach Pesto Pasta");
        assert_eq!(draft.ingredients.len(), 3);
        assert_eq!(draft.instructions.len(), 3);
        assert_eq!(draft.cooking_time, 25);
        assert_eq!(draft.servings, 4);
    }

    #[tokio::test]
    async fn test_generate_from_bare_json() {
        let client = FakeClient::with_response(
            "soup",
            r#"Here you go: {"title": "Tomato Soup", "description": "Simple soup.",
               "ingredients": ["4 tomatoes"], "instructions": ["Simmer tomatoes."],
               "cookingTime": 30, "servings": 2}"#,
        );

        let draft = generate(&client, "A simple tomato soup").await.unwrap();
        assert_eq!(draft.title, "Tomato Soup");
        assert_eq!(draft.servings, 2);
    }

    #[tokio::test]
    async fn test_generate_fails_without_json() {
        let client = FakeClient::with_response("pasta", "Sorry, I cannot produce a recipe.");

        let err = generate(&client, "pasta").await.unwrap_err();
        assert!(matches!(err, GenerationError::NoJsonFound));
    }

    #[tokio::test]
    async fn test_generate_rejects_incomplete_draft() {
        // Valid JSON, but servings is missing
        let client = FakeClient::with_response(
            "pasta",
            r#"{"title": "Pasta", "description": "Pasta.", "ingredients": ["pasta"],
               "instructions": ["cook"], "cookingTime": 20}"#,
        );

        let err = generate(&client, "pasta").await.unwrap_err();
        assert!(matches!(err, GenerationError::InvalidDraft("servings")));
    }

    #[tokio::test]
    async fn test_generate_rejects_nonpositive_cooking_time() {
        let client = FakeClient::with_response(
            "pasta",
            r#"{"title": "Pasta", "description": "Pasta.", "ingredients": ["pasta"],
               "instructions": ["cook"], "cookingTime": 0, "servings": 2}"#,
        );

        let err = generate(&client, "pasta").await.unwrap_err();
        assert!(matches!(err, GenerationError::InvalidDraft("cookingTime")));
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_ingredient_list() {
        let client = FakeClient::with_response(
            "pasta",
            r#"{"title": "Pasta", "description": "Pasta.", "ingredients": [],
               "instructions": ["cook"], "cookingTime": 20, "servings": 2}"#,
        );

        let err = generate(&client, "pasta").await.unwrap_err();
        assert!(matches!(err, GenerationError::InvalidDraft("ingredients")));
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_prompt() {
        let client = FakeClient::new();
        let err = generate(&client, "   ").await.unwrap_err();
        assert!(matches!(err, GenerationError::EmptyPrompt));
    }

    #[tokio::test]
    async fn test_generate_rejects_unparsable_payload() {
        let client = FakeClient::with_response("pasta", "{not valid json}");

        let err = generate(&client, "pasta").await.unwrap_err();
        assert!(matches!(err, GenerationError::InvalidJson(_)));
    }

    #[tokio::test]
    async fn test_generate_propagates_completion_failure() {
        // No responses registered and no default: the fake client errors
        let client = FakeClient::new();

        let err = generate(&client, "pasta").await.unwrap_err();
        assert!(matches!(err, GenerationError::Completion(_)));
    }
}
