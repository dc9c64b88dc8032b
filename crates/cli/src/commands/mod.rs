//! CLI subcommands.

pub mod migrate;
pub mod seed;
pub mod user;

use minimart_api::config::{ConfigError, get_database_url};
use sqlx::PgPool;

/// Load `.env`, then connect to the database named by `MINIMART_DATABASE_URL`
/// (or `DATABASE_URL`).
async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = get_database_url("MINIMART_DATABASE_URL")?;

    tracing::info!("Connecting to database...");
    Ok(minimart_api::db::create_pool(&database_url).await?)
}

/// Errors shared by the database-backed commands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Required configuration is missing.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),
}
