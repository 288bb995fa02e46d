use recipe_store::{users, AppConfig, Database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "recipe_store=debug,sqlx=warn".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    let db = Database::connect(&config).await?;

    if let Err(e) = db.migrate().await {
        tracing::warn!(error = %e, "migration failed; continuing");
    }

    let all = users::list_users(&db).await?;
    tracing::info!(count = all.len(), "store reachable");
    for user in &all {
        tracing::debug!(uid = user.uid, username = %user.username, email = %user.email, "user");
    }

    Ok(())
}
