use sqlx::{Any, Executor};
use tracing::{debug, info, instrument};

use super::dto::{NewRecipe, RecipeChanges};
use super::repo_types::Recipe;
use crate::db::{inserted_id, Database};
use crate::error::{StoreError, StoreResult};

async fn fetch_by_id<'e, E>(executor: E, rid: i64) -> Result<Option<Recipe>, sqlx::Error>
where
    E: Executor<'e, Database = Any>,
{
    sqlx::query_as::<_, Recipe>(
        r#"
        SELECT rid, name, description, type, Cookingtime, ingredients, instructions, uid
        FROM recipes
        WHERE rid = ?
        "#,
    )
    .bind(rid)
    .fetch_optional(executor)
    .await
}

#[instrument(skip(db))]
pub async fn get_recipe_by_id(db: &Database, rid: i64) -> StoreResult<Option<Recipe>> {
    Ok(fetch_by_id(db.pool(), rid).await?)
}

/// All recipes owned by `uid`, oldest first.
#[instrument(skip(db))]
pub async fn get_recipes_by_user_id(db: &Database, uid: i64) -> StoreResult<Vec<Recipe>> {
    let rows = sqlx::query_as::<_, Recipe>(
        r#"
        SELECT rid, name, description, type, Cookingtime, ingredients, instructions, uid
        FROM recipes
        WHERE uid = ?
        ORDER BY rid
        "#,
    )
    .bind(uid)
    .fetch_all(db.pool())
    .await?;
    debug!(uid, count = rows.len(), "recipes listed");
    Ok(rows)
}

#[instrument(skip(db, recipe), fields(uid = recipe.uid, name = %recipe.name))]
pub async fn create_recipe(db: &Database, recipe: &NewRecipe) -> StoreResult<Recipe> {
    let mut tx = db.pool().begin().await?;
    let result = sqlx::query(
        r#"
        INSERT INTO recipes (name, description, type, Cookingtime, ingredients, instructions, uid)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(recipe.name.as_str())
    .bind(recipe.description.as_str())
    .bind(recipe.kind.as_str())
    .bind(recipe.cooking_time)
    .bind(recipe.ingredients.as_str())
    .bind(recipe.instructions.as_str())
    .bind(recipe.uid)
    .execute(&mut *tx)
    .await?;
    let rid = inserted_id(&mut tx, &result, "recipes").await?;

    let created = fetch_by_id(&mut *tx, rid)
        .await?
        .ok_or(StoreError::Vanished {
            table: "recipes",
            id: rid,
        })?;
    tx.commit().await?;

    info!(rid, "recipe created");
    Ok(created)
}

/// Hard delete. A missing id is not an error.
#[instrument(skip(db))]
pub async fn delete_recipe(db: &Database, rid: i64) -> StoreResult<()> {
    let result = sqlx::query("DELETE FROM recipes WHERE rid = ?")
        .bind(rid)
        .execute(db.pool())
        .await?;
    info!(rid, rows_affected = result.rows_affected(), "recipe deleted");
    Ok(())
}

/// Replaces every mutable column of `rid` and returns the row as stored.
/// `Ok(None)` when no recipe has that id.
#[instrument(skip(db, changes))]
pub async fn update_recipe(
    db: &Database,
    rid: i64,
    changes: &RecipeChanges,
) -> StoreResult<Option<Recipe>> {
    let mut tx = db.pool().begin().await?;
    let result = sqlx::query(
        r#"
        UPDATE recipes
        SET name = ?, description = ?, type = ?, Cookingtime = ?, ingredients = ?, instructions = ?
        WHERE rid = ?
        "#,
    )
    .bind(changes.name.as_str())
    .bind(changes.description.as_str())
    .bind(changes.kind.as_str())
    .bind(changes.cooking_time)
    .bind(changes.ingredients.as_str())
    .bind(changes.instructions.as_str())
    .bind(rid)
    .execute(&mut *tx)
    .await?;

    let updated = fetch_by_id(&mut *tx, rid).await?;
    tx.commit().await?;

    info!(rid, rows_affected = result.rows_affected(), "recipe updated");
    Ok(updated)
}
