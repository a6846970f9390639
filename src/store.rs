//! Recipe persistence.
//!
//! Thin data-access layer over the `recipes` table. Input validation and
//! ownership checks are the caller's responsibility; this module trusts its
//! input and only reports storage-level failures.

use crate::models::{NewRecipe, Recipe, RecipePatch};
use crate::schema::recipes;
use diesel::prelude::*;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("recipe not found")]
    NotFound,

    #[error("recipe store unavailable: {0}")]
    Unavailable(String),
}

impl From<diesel::result::Error> for StoreError {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            diesel::result::Error::NotFound => StoreError::NotFound,
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

/// Insert a new recipe. The database assigns the id and creation timestamp.
pub fn create(conn: &mut PgConnection, new_recipe: &NewRecipe<'_>) -> Result<Uuid, StoreError> {
    let id = diesel::insert_into(recipes::table)
        .values(new_recipe)
        .returning(recipes::id)
        .get_result(conn)?;
    Ok(id)
}

/// List recipes, newest first, optionally filtered to a single owner.
pub fn list(
    conn: &mut PgConnection,
    owner: Option<Uuid>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Recipe>, StoreError> {
    let mut query = recipes::table
        .order(recipes::created_at.desc())
        .into_boxed();

    if let Some(owner) = owner {
        query = query.filter(recipes::user_id.eq(owner));
    }

    let results = query
        .select(Recipe::as_select())
        .limit(limit)
        .offset(offset)
        .load(conn)?;
    Ok(results)
}

pub fn get(conn: &mut PgConnection, id: Uuid) -> Result<Recipe, StoreError> {
    let recipe = recipes::table
        .find(id)
        .select(Recipe::as_select())
        .first(conn)?;
    Ok(recipe)
}

/// Apply a partial update. Fields left `None` in the patch keep their stored
/// values. An empty patch still reports `NotFound` for an absent id.
pub fn update(conn: &mut PgConnection, id: Uuid, patch: &RecipePatch) -> Result<(), StoreError> {
    if patch.is_empty() {
        recipes::table
            .find(id)
            .select(recipes::id)
            .first::<Uuid>(conn)?;
        return Ok(());
    }

    let updated = diesel::update(recipes::table.find(id))
        .set(patch)
        .execute(conn)?;
    if updated == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}

pub fn delete(conn: &mut PgConnection, id: Uuid) -> Result<(), StoreError> {
    let deleted = diesel::delete(recipes::table.find(id)).execute(conn)?;
    if deleted == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_from_diesel() {
        let err: StoreError = diesel::result::Error::NotFound.into();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[test]
    fn test_other_errors_map_to_unavailable() {
        let err: StoreError = diesel::result::Error::BrokenTransactionManager.into();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    // Postgres-backed tests. Run them against a scratch database with
    // `TEST_DATABASE_URL=postgres://... cargo test -- --ignored`; everything
    // happens inside a test transaction that is rolled back.
    mod postgres {
        use super::super::*;
        use crate::models::NewUser;
        use crate::schema::users;
        use chrono::{Duration, Utc};
        use diesel_migrations::MigrationHarness;

        fn test_conn() -> PgConnection {
            let url = std::env::var("TEST_DATABASE_URL")
                .expect("TEST_DATABASE_URL must point at a scratch Postgres database");
            let mut conn =
                PgConnection::establish(&url).expect("Failed to connect to test database");
            conn.run_pending_migrations(crate::db::MIGRATIONS)
                .expect("Failed to run migrations");
            conn.begin_test_transaction()
                .expect("Failed to begin test transaction");
            conn
        }

        fn insert_user(conn: &mut PgConnection) -> Uuid {
            let username = format!("cook-{}", Uuid::new_v4());
            diesel::insert_into(users::table)
                .values(NewUser {
                    username: &username,
                    password_hash: "unused",
                })
                .returning(users::id)
                .get_result(conn)
                .expect("Failed to insert user")
        }

        fn insert_recipe(conn: &mut PgConnection, user_id: Uuid, title: &str, age: Duration) -> Uuid {
            let ingredients = vec![Some("1 cup flour".to_string())];
            let instructions = vec![Some("Mix everything.".to_string())];
            let id = create(
                conn,
                &NewRecipe {
                    user_id,
                    title,
                    description: "A recipe used in tests.",
                    ingredients: &ingredients,
                    instructions: &instructions,
                    cooking_time: 20,
                    servings: 2,
                    image_url: None,
                },
            )
            .expect("Failed to create recipe");

            // now() is pinned for the whole test transaction, so spread the
            // creation timestamps by hand to make ordering observable
            diesel::update(recipes::table.find(id))
                .set(recipes::created_at.eq(Utc::now() - age))
                .execute(conn)
                .expect("Failed to adjust created_at");
            id
        }

        #[test]
        #[ignore = "requires TEST_DATABASE_URL pointing at Postgres"]
        fn test_create_then_get_returns_the_same_fields() {
            let mut conn = test_conn();
            let user_id = insert_user(&mut conn);

            let ingredients = vec![Some("200g spaghetti".to_string()), Some("2 eggs".to_string())];
            let instructions = vec![
                Some("Boil the pasta.".to_string()),
                Some("Toss with the sauce.".to_string()),
            ];
            let id = create(
                &mut conn,
                &NewRecipe {
                    user_id,
                    title: "Carbonara",
                    description: "Roman pasta.",
                    ingredients: &ingredients,
                    instructions: &instructions,
                    cooking_time: 25,
                    servings: 2,
                    image_url: Some("https://example.com/carbonara.jpg"),
                },
            )
            .expect("create failed");

            let recipe = get(&mut conn, id).expect("get failed");
            assert_eq!(recipe.id, id);
            assert_eq!(recipe.user_id, user_id);
            assert_eq!(recipe.title, "Carbonara");
            assert_eq!(recipe.description, "Roman pasta.");
            assert_eq!(recipe.ingredients, ingredients);
            assert_eq!(recipe.instructions, instructions);
            assert_eq!(recipe.cooking_time, 25);
            assert_eq!(recipe.servings, 2);
            assert_eq!(
                recipe.image_url.as_deref(),
                Some("https://example.com/carbonara.jpg")
            );
        }

        #[test]
        #[ignore = "requires TEST_DATABASE_URL pointing at Postgres"]
        fn test_delete_then_get_is_not_found() {
            let mut conn = test_conn();
            let user_id = insert_user(&mut conn);
            let id = insert_recipe(&mut conn, user_id, "Short-lived", Duration::zero());

            delete(&mut conn, id).expect("delete failed");
            assert!(matches!(get(&mut conn, id), Err(StoreError::NotFound)));
            assert!(matches!(delete(&mut conn, id), Err(StoreError::NotFound)));
        }

        #[test]
        #[ignore = "requires TEST_DATABASE_URL pointing at Postgres"]
        fn test_list_filters_by_owner_newest_first() {
            let mut conn = test_conn();
            let owner = insert_user(&mut conn);
            let other = insert_user(&mut conn);

            let oldest = insert_recipe(&mut conn, owner, "Oldest", Duration::hours(2));
            let newest = insert_recipe(&mut conn, owner, "Newest", Duration::zero());
            let middle = insert_recipe(&mut conn, owner, "Middle", Duration::hours(1));
            insert_recipe(&mut conn, other, "Someone else's", Duration::zero());

            let recipes = list(&mut conn, Some(owner), 50, 0).expect("list failed");
            let ids: Vec<Uuid> = recipes.iter().map(|r| r.id).collect();
            assert_eq!(ids, vec![newest, middle, oldest]);
            assert!(recipes.iter().all(|r| r.user_id == owner));
        }

        #[test]
        #[ignore = "requires TEST_DATABASE_URL pointing at Postgres"]
        fn test_list_limit_and_offset() {
            let mut conn = test_conn();
            let owner = insert_user(&mut conn);

            let oldest = insert_recipe(&mut conn, owner, "Oldest", Duration::hours(2));
            insert_recipe(&mut conn, owner, "Newest", Duration::zero());
            let middle = insert_recipe(&mut conn, owner, "Middle", Duration::hours(1));

            let recipes = list(&mut conn, Some(owner), 2, 1).expect("list failed");
            let ids: Vec<Uuid> = recipes.iter().map(|r| r.id).collect();
            assert_eq!(ids, vec![middle, oldest]);
        }

        #[test]
        #[ignore = "requires TEST_DATABASE_URL pointing at Postgres"]
        fn test_update_changes_only_named_fields() {
            let mut conn = test_conn();
            let user_id = insert_user(&mut conn);
            let id = insert_recipe(&mut conn, user_id, "Before", Duration::zero());

            let patch = RecipePatch {
                title: Some("After".to_string()),
                servings: Some(6),
                ..Default::default()
            };
            update(&mut conn, id, &patch).expect("update failed");

            let recipe = get(&mut conn, id).expect("get failed");
            assert_eq!(recipe.title, "After");
            assert_eq!(recipe.servings, 6);
            assert_eq!(recipe.description, "A recipe used in tests.");
            assert_eq!(recipe.cooking_time, 20);
            assert_eq!(recipe.user_id, user_id);
        }

        #[test]
        #[ignore = "requires TEST_DATABASE_URL pointing at Postgres"]
        fn test_update_can_clear_the_image() {
            let mut conn = test_conn();
            let user_id = insert_user(&mut conn);
            let id = insert_recipe(&mut conn, user_id, "Pictured", Duration::zero());

            let set_image = RecipePatch {
                image_url: Some(Some("https://example.com/dish.jpg".to_string())),
                ..Default::default()
            };
            update(&mut conn, id, &set_image).expect("update failed");
            let recipe = get(&mut conn, id).expect("get failed");
            assert_eq!(
                recipe.image_url.as_deref(),
                Some("https://example.com/dish.jpg")
            );

            let clear_image = RecipePatch {
                image_url: Some(None),
                ..Default::default()
            };
            update(&mut conn, id, &clear_image).expect("update failed");
            let recipe = get(&mut conn, id).expect("get failed");
            assert_eq!(recipe.image_url, None);
        }
    }
}
