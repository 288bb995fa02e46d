use anyhow::{anyhow, Context};
use serde::Deserialize;
use url::Url;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `DATABASE_URL` wins over the
    /// individual `SQL_*` settings when both are present.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = match lookup("DATABASE_URL") {
            Some(url) if !url.trim().is_empty() => url,
            _ => {
                let required = |key: &str| {
                    lookup(key).ok_or_else(|| anyhow!("missing environment variable {key}"))
                };
                mysql_url(
                    &required("SQL_HOST")?,
                    &required("SQL_USER")?,
                    &required("SQL_PASSWORD")?,
                    &required("SQL_DB")?,
                )?
            }
        };

        let max_connections = match lookup("SQL_MAX_CONNECTIONS") {
            Some(v) => v
                .parse::<u32>()
                .with_context(|| format!("SQL_MAX_CONNECTIONS is not a number: {v}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            max_connections,
        })
    }

    /// Connection target with the password stripped, safe for logs.
    pub fn redacted_url(&self) -> String {
        match Url::parse(&self.database_url) {
            Ok(mut url) => {
                let _ = url.set_password(None);
                url.to_string()
            }
            Err(_) => "<unparseable database url>".to_string(),
        }
    }
}

/// Credentials are percent-encoded, so passwords may contain `@`, `/` or `:`.
fn mysql_url(host: &str, user: &str, password: &str, database: &str) -> anyhow::Result<String> {
    let mut url =
        Url::parse(&format!("mysql://{host}/")).with_context(|| format!("invalid SQL_HOST {host}"))?;
    url.set_username(user)
        .map_err(|_| anyhow!("cannot set username on database url"))?;
    url.set_password(Some(password))
        .map_err(|_| anyhow!("cannot set password on database url"))?;
    url.set_path(database);
    Ok(url.to_string())
}
