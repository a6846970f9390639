use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sessions)]
pub struct NewSession<'a> {
    pub user_id: Uuid,
    pub token_hash: &'a str,
    pub expires_at: DateTime<Utc>,
}

/// A stored recipe. Ingredient and instruction arrays come back from Postgres
/// with nullable elements; in practice every element is present.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Recipe {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<Option<String>>,
    pub instructions: Vec<Option<String>>,
    pub cooking_time: i32,
    pub servings: i32,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub user_id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub ingredients: &'a [Option<String>],
    pub instructions: &'a [Option<String>],
    pub cooking_time: i32,
    pub servings: i32,
    pub image_url: Option<&'a str>,
}

/// Partial update for a recipe. `None` fields are left untouched.
///
/// `image_url` is doubly optional because the column is nullable: the outer
/// `None` skips the column, `Some(None)` clears it back to NULL, and
/// `Some(Some(url))` sets a new value.
///
/// The owner and creation timestamp are deliberately absent: both are set once
/// at creation and immutable afterwards.
#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = crate::schema::recipes)]
pub struct RecipePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<Option<String>>>,
    pub instructions: Option<Vec<Option<String>>>,
    pub cooking_time: Option<i32>,
    pub servings: Option<i32>,
    pub image_url: Option<Option<String>>,
}

impl RecipePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.ingredients.is_none()
            && self.instructions.is_none()
            && self.cooking_time.is_none()
            && self.servings.is_none()
            && self.image_url.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patch() {
        assert!(RecipePatch::default().is_empty());
    }

    #[test]
    fn test_nonempty_patch() {
        let patch = RecipePatch {
            servings: Some(4),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_clearing_image_is_not_empty() {
        let patch = RecipePatch {
            image_url: Some(None),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
