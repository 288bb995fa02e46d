use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures surfaced by the persistence layer. Lookups that match nothing are
/// not errors; they come back as `Ok(None)`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connectivity, syntax and constraint errors straight from the store.
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("store returned no generated id for insert into {table}")]
    MissingInsertId { table: &'static str },

    #[error("{table} row {id} was not found right after being written")]
    Vanished { table: &'static str, id: i64 },
}
