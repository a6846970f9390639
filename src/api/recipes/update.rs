use crate::api::recipes::is_owner;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::RecipePatch;
use crate::store::{self, StoreError};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

/// Partial update: absent fields keep their stored values. The owner and
/// creation timestamp cannot be changed.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<Vec<String>>,
    /// Minutes
    pub cooking_time: Option<i32>,
    pub servings: Option<i32>,
    /// An empty string clears the image; the default picture is shown instead
    pub image_url: Option<String>,
}

pub(crate) fn validate_request(request: &UpdateRecipeRequest) -> Result<(), &'static str> {
    if let Some(ref title) = request.title {
        if title.trim().is_empty() {
            return Err("Title cannot be empty");
        }
    }
    if let Some(ref description) = request.description {
        if description.trim().is_empty() {
            return Err("Description cannot be empty");
        }
    }
    if let Some(ref ingredients) = request.ingredients {
        if ingredients.is_empty() || ingredients.iter().any(|i| i.trim().is_empty()) {
            return Err("Ingredients cannot be empty");
        }
    }
    if let Some(ref instructions) = request.instructions {
        if instructions.is_empty() || instructions.iter().any(|i| i.trim().is_empty()) {
            return Err("Instructions cannot be empty");
        }
    }
    if matches!(request.cooking_time, Some(t) if t <= 0) {
        return Err("Cooking time must be a positive number of minutes");
    }
    if matches!(request.servings, Some(s) if s <= 0) {
        return Err("Servings must be a positive number");
    }
    Ok(())
}

impl From<UpdateRecipeRequest> for RecipePatch {
    fn from(request: UpdateRecipeRequest) -> Self {
        RecipePatch {
            title: request.title,
            description: request.description,
            ingredients: request
                .ingredients
                .map(|items| items.into_iter().map(Some).collect()),
            instructions: request
                .instructions
                .map(|items| items.into_iter().map(Some).collect()),
            cooking_time: request.cooking_time,
            servings: request.servings,
            image_url: request.image_url.map(|url| {
                if url.trim().is_empty() {
                    None
                } else {
                    Some(url)
                }
            }),
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated successfully"),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the recipe owner", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRecipeRequest>,
) -> impl IntoResponse {
    if let Err(message) = validate_request(&request) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response();
    }

    let mut conn = get_conn!(pool);

    let recipe = match store::get(&mut conn, id) {
        Ok(r) => r,
        Err(StoreError::NotFound) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Recipe not found".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to fetch recipe: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    if !is_owner(&recipe, user.id) {
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse {
                error: "You do not own this recipe".to_string(),
            }),
        )
            .into_response();
    }

    let patch = RecipePatch::from(request);

    match store::update(&mut conn, id, &patch) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(StoreError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recipe not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to update recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to update recipe".to_string(),
                }),
            )
                .into_response()
        }
    }
}
