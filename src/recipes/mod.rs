mod dto;
mod repo;
mod repo_types;

pub use dto::{NewRecipe, RecipeChanges};
pub use repo::{
    create_recipe, delete_recipe, get_recipe_by_id, get_recipes_by_user_id, update_recipe,
};
pub use repo_types::Recipe;
