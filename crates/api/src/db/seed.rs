//! Default product data seeding.
//!
//! Reads a JSON array of [`SeedProduct`]s and inserts the ones whose id is
//! not stored yet. Existing products are never modified.

use std::path::Path;

use sqlx::PgPool;
use thiserror::Error;
use tracing::{debug, info};

use super::RepositoryError;
use crate::models::SeedProduct;

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid seed file: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for SeedError {
    fn from(err: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(err))
    }
}

/// Outcome of a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Products inserted by this run.
    pub inserted: usize,
    /// Products skipped because their id already existed.
    pub skipped: usize,
}

/// Read and parse a seed file.
///
/// # Errors
///
/// Returns `SeedError::Io` if the file cannot be read and `SeedError::Json`
/// if it is not a JSON array of products.
pub async fn load_seed_file(path: &Path) -> Result<Vec<SeedProduct>, SeedError> {
    let content = tokio::fs::read_to_string(path).await?;
    let products: Vec<SeedProduct> = serde_json::from_str(&content)?;
    debug!(path = %path.display(), count = products.len(), "Parsed seed file");
    Ok(products)
}

/// Insert products that are not stored yet.
///
/// Each product is written in its own transaction together with its images
/// and offers.
///
/// # Errors
///
/// Returns `SeedError::Repository` if a database operation fails. Products
/// committed before the failure stay stored.
pub async fn seed_products(
    pool: &PgPool,
    products: &[SeedProduct],
) -> Result<SeedSummary, SeedError> {
    let mut summary = SeedSummary::default();

    for product in products {
        let mut tx = pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO product_collection (id, name, slug) VALUES ($1, $2, $3)
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.slug)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if inserted == 0 {
            tx.rollback().await?;
            summary.skipped += 1;
            continue;
        }

        for image in &product.images {
            sqlx::query("INSERT INTO product_images (product_id, value) VALUES ($1, $2)")
                .bind(product.id)
                .bind(image)
                .execute(&mut *tx)
                .await?;
        }

        for offer in &product.offers {
            sqlx::query("INSERT INTO product_offers (product_id, price) VALUES ($1, $2)")
                .bind(product.id)
                .bind(offer.price.amount())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        summary.inserted += 1;
    }

    info!(
        inserted = summary.inserted,
        skipped = summary.skipped,
        "Product seeding complete"
    );

    Ok(summary)
}
