use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::NewRecipe;
use crate::store;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    /// Minutes
    pub cooking_time: i32,
    pub servings: i32,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateRecipeResponse {
    pub id: Uuid,
}

/// Check a create payload against the recipe invariants.
///
/// Returns a user-facing message for the first violated rule.
pub(crate) fn validate_payload(request: &CreateRecipeRequest) -> Result<(), &'static str> {
    if request.title.trim().is_empty() {
        return Err("Title cannot be empty");
    }
    if request.description.trim().is_empty() {
        return Err("Description cannot be empty");
    }
    if request.ingredients.is_empty() {
        return Err("At least one ingredient is required");
    }
    if request.ingredients.iter().any(|i| i.trim().is_empty()) {
        return Err("Ingredients cannot be empty");
    }
    if request.instructions.is_empty() {
        return Err("At least one instruction is required");
    }
    if request.instructions.iter().any(|i| i.trim().is_empty()) {
        return Err("Instructions cannot be empty");
    }
    if request.cooking_time <= 0 {
        return Err("Cooking time must be a positive number of minutes");
    }
    if request.servings <= 0 {
        return Err("Servings must be a positive number");
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created successfully", body = CreateRecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<CreateRecipeRequest>,
) -> impl IntoResponse {
    if let Err(message) = validate_payload(&request) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response();
    }

    let mut conn = get_conn!(pool);

    let ingredients: Vec<Option<String>> = request.ingredients.into_iter().map(Some).collect();
    let instructions: Vec<Option<String>> = request.instructions.into_iter().map(Some).collect();

    // The owner comes from the session, never from the payload
    let new_recipe = NewRecipe {
        user_id: user.id,
        title: &request.title,
        description: &request.description,
        ingredients: &ingredients,
        instructions: &instructions,
        cooking_time: request.cooking_time,
        servings: request.servings,
        image_url: request.image_url.as_deref().filter(|u| !u.trim().is_empty()),
    };

    match store::create(&mut conn, &new_recipe) {
        Ok(id) => (StatusCode::CREATED, Json(CreateRecipeResponse { id })).into_response(),
        Err(e) => {
            tracing::error!("Failed to create recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create recipe".to_string(),
                }),
            )
                .into_response()
        }
    }
}
