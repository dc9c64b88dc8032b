//! Database operations for the Minimart `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `product_collection` - Products (id, name, slug)
//! - `product_offers` - Prices attached to a product
//! - `product_images` - Image URLs attached to a product
//! - `credential` - Usernames and Argon2 password hashes
//!
//! Carts are never stored here; they live in the in-memory cart store.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p minimart-cli -- migrate
//! ```

pub mod credentials;
pub mod products;
pub mod seed;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use credentials::CredentialRepository;
pub use products::ProductRepository;
pub use seed::{SeedError, SeedSummary, load_seed_file, seed_products};

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Constraint violation (e.g., duplicate username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
