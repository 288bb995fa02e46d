//! Persistence layer for the recipe-sharing service: user accounts with
//! bcrypt-hashed passwords, and recipe CRUD, over a pooled SQL connection.
//!
//! Every operation takes a [`Database`] handle built once at startup.

pub mod config;
pub mod db;
pub mod error;
pub mod recipes;
pub mod users;

pub use config::AppConfig;
pub use db::Database;
pub use error::{StoreError, StoreResult};
