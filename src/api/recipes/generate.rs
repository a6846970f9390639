use crate::ai::{self, CompletionClient, GenerationError, RecipeDraft};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GenerateRecipeRequest {
    /// Free-text description of the desired recipe
    pub prompt: String,
}

#[utoipa::path(
    post,
    path = "/api/recipes/generate",
    tag = "recipes",
    request_body(content = GenerateRecipeRequest, example = json!({"prompt": "A healthy vegetarian pasta dish with spinach"})),
    responses(
        (status = 200, description = "Generated recipe draft", body = RecipeDraft),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 502, description = "Generation failed", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn generate_draft(
    AuthUser(_user): AuthUser,
    State(client): State<Arc<dyn CompletionClient>>,
    Json(request): Json<GenerateRecipeRequest>,
) -> impl IntoResponse {
    match ai::generate(client.as_ref(), &request.prompt).await {
        Ok(draft) => (StatusCode::OK, Json(draft)).into_response(),
        Err(GenerationError::EmptyPrompt) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Prompt cannot be empty".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to generate recipe draft: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "Failed to generate recipe".to_string(),
                }),
            )
                .into_response()
        }
    }
}
