//! Seed the database with products.
//!
//! Reads a JSON array of products (the format of
//! `crates/api/jsondata/products.json`) and inserts every product whose id is
//! not stored yet, together with its images and offers.

use std::path::Path;

use tracing::info;

use minimart_api::db::{SeedError, load_seed_file, seed_products};

use super::{CommandError, connect};

/// Errors that can occur while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedCommandError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error(transparent)]
    Connect(#[from] CommandError),

    #[error(transparent)]
    Seed(#[from] SeedError),
}

/// Seed products from a JSON file.
///
/// # Errors
///
/// Returns an error if the file is missing or malformed, or a database
/// operation fails.
pub async fn products(path: &Path) -> Result<(), SeedCommandError> {
    if !path.exists() {
        return Err(SeedCommandError::FileNotFound(path.display().to_string()));
    }

    info!(path = %path.display(), "Loading products from file");

    // Parse before connecting so a bad file fails fast
    let products = load_seed_file(path).await?;
    info!(count = products.len(), "Parsed products");

    let pool = connect().await?;
    let summary = seed_products(&pool, &products).await?;

    info!(
        inserted = summary.inserted,
        skipped = summary.skipped,
        "Seeding complete"
    );
    Ok(())
}
