use anyhow::Context;
use sqlx::any::{AnyPoolOptions, AnyQueryResult};
use sqlx::{AnyConnection, AnyPool};
use tracing::info;

use crate::config::AppConfig;
use crate::error::{StoreError, StoreResult};

/// Shared handle to the store. Cheap to clone; every clone uses the same pool.
#[derive(Clone, Debug)]
pub struct Database {
    pool: AnyPool,
}

impl Database {
    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        sqlx::any::install_default_drivers();
        let pool = AnyPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .with_context(|| format!("connect to database {}", config.redacted_url()))?;
        info!(target_url = %config.redacted_url(), max_connections = config.max_connections, "database pool ready");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: AnyPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Applies the MySQL schema in `migrations/`.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("run migrations")?;
        Ok(())
    }
}

/// Generated id of the row `result` inserted. Must run on the connection that
/// did the insert, since the fallback queries are per-connection.
pub(crate) async fn inserted_id(
    conn: &mut AnyConnection,
    result: &AnyQueryResult,
    table: &'static str,
) -> StoreResult<i64> {
    if let Some(id) = result.last_insert_id() {
        return Ok(id);
    }
    let sql = match conn.backend_name().to_ascii_lowercase().as_str() {
        "mysql" => "SELECT LAST_INSERT_ID()",
        "sqlite" => "SELECT last_insert_rowid()",
        _ => return Err(StoreError::MissingInsertId { table }),
    };
    let id: Option<i64> = sqlx::query_scalar(sql).fetch_optional(&mut *conn).await?;
    id.filter(|id| *id > 0)
        .ok_or(StoreError::MissingInsertId { table })
}
