use serde::Deserialize;

use super::repo_types::Recipe;

/// Fields for a new recipe. Contents are stored as given; `uid` must name an
/// existing user or the store rejects the insert.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "Cookingtime")]
    pub cooking_time: i64,
    pub ingredients: String,
    pub instructions: String,
    pub uid: i64,
}

/// Replacement values for every mutable recipe column. Identity and owner
/// are never touched by an update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecipeChanges {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "Cookingtime")]
    pub cooking_time: i64,
    pub ingredients: String,
    pub instructions: String,
}

impl From<Recipe> for RecipeChanges {
    fn from(r: Recipe) -> Self {
        Self {
            name: r.name,
            description: r.description,
            kind: r.kind,
            cooking_time: r.cooking_time,
            ingredients: r.ingredients,
            instructions: r.instructions,
        }
    }
}
