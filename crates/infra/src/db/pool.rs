use std::str::FromStr;

use sqlx::migrate::MigrateError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

pub type DbPool = SqlitePool;

#[derive(Debug, Error)]
pub enum DbPoolError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("sqlx migrate error: {0}")]
    Migrate(#[from] MigrateError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn connect_lazy(database_url: &str) -> Result<DbPool, DbPoolError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    if let Some(parent) = options
        .get_filename()
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(SqlitePoolOptions::new()
        .max_connections(5)
        .connect_lazy_with(options))
}

/// Every connection to `sqlite::memory:` opens a fresh database, so the pool
/// is pinned to a single connection that is never recycled.
pub async fn connect_in_memory() -> Result<DbPool, DbPoolError> {
    Ok(SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?)
}
