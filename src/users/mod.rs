pub mod password;
mod repo;
mod repo_types;

pub use repo::{create_user, get_user_by_id, get_user_by_username, list_users, verify_user};
pub use repo_types::{PublicUser, User};
