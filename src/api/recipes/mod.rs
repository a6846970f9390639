pub mod create;
pub mod delete;
pub mod generate;
pub mod get;
pub mod list;
pub mod update;

use crate::models::Recipe;
use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

/// Shown for recipes whose owner never set an image.
pub const DEFAULT_IMAGE_URL: &str = "https://images.unsplash.com/photo-1495521821757-a1efb6729352?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=800&q=80";

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route("/generate", post(generate::generate_draft))
        .route(
            "/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
}

/// Full recipe representation returned by get and list.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    /// Minutes
    pub cooking_time: i32,
    pub servings: i32,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            user_id: recipe.user_id,
            title: recipe.title,
            description: recipe.description,
            ingredients: recipe.ingredients.into_iter().flatten().collect(),
            instructions: recipe.instructions.into_iter().flatten().collect(),
            cooking_time: recipe.cooking_time,
            servings: recipe.servings,
            image_url: recipe
                .image_url
                .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string()),
            created_at: recipe.created_at,
        }
    }
}

/// Ownership rule: only the user recorded at creation may mutate a recipe.
pub(crate) fn is_owner(recipe: &Recipe, user_id: Uuid) -> bool {
    recipe.user_id == user_id
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_recipe,
        list::list_recipes,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
        generate::generate_draft,
    ),
    components(schemas(
        create::CreateRecipeRequest,
        create::CreateRecipeResponse,
        list::ListRecipesResponse,
        update::UpdateRecipeRequest,
        generate::GenerateRecipeRequest,
        crate::ai::RecipeDraft,
        RecipeResponse,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_recipe(user_id: Uuid) -> Recipe {
        Recipe {
            id: Uuid::new_v4(),
            user_id,
            title: "Minestrone".to_string(),
            description: "A hearty vegetable soup.".to_string(),
            ingredients: vec![Some("2 carrots".to_string()), Some("1 onion".to_string())],
            instructions: vec![Some("Chop vegetables.".to_string())],
            cooking_time: 40,
            servings: 4,
            image_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_owner_is_permitted() {
        let user_id = Uuid::new_v4();
        let recipe = sample_recipe(user_id);
        assert!(is_owner(&recipe, user_id));
    }

    #[test]
    fn test_non_owner_is_denied() {
        let recipe = sample_recipe(Uuid::new_v4());
        assert!(!is_owner(&recipe, Uuid::new_v4()));
    }

    #[test]
    fn test_missing_image_falls_back_to_default() {
        let recipe = sample_recipe(Uuid::new_v4());
        let response = RecipeResponse::from(recipe);
        assert_eq!(response.image_url, DEFAULT_IMAGE_URL);
    }

    #[test]
    fn test_set_image_is_preserved() {
        let mut recipe = sample_recipe(Uuid::new_v4());
        recipe.image_url = Some("https://example.com/soup.jpg".to_string());
        let response = RecipeResponse::from(recipe);
        assert_eq!(response.image_url, "https://example.com/soup.jpg");
    }
}
