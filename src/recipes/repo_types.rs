use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Recipe record in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub rid: i64,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String, // free-form category
    #[serde(rename = "Cookingtime")]
    #[sqlx(rename = "Cookingtime")]
    pub cooking_time: i64,
    pub ingredients: String,
    pub instructions: String,
    pub uid: i64, // owning user
}
