//! Product repository backed by `PostgreSQL`.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use minimart_core::{Price, ProductId};

use super::RepositoryError;
use crate::models::ProductSummary;
use crate::services::catalog::ProductCatalog;

/// Summary columns: the first image and the first offer of each product.
const LIST_PRODUCTS: &str = r"
    SELECT p.id, p.name, p.slug,
           (SELECT i.value FROM product_images i
             WHERE i.product_id = p.id ORDER BY i.id LIMIT 1) AS image,
           (SELECT o.price FROM product_offers o
             WHERE o.product_id = p.id ORDER BY o.id LIMIT 1) AS price
    FROM product_collection p
    ORDER BY p.id
";

const GET_PRODUCT: &str = r"
    SELECT p.id, p.name, p.slug,
           (SELECT i.value FROM product_images i
             WHERE i.product_id = p.id ORDER BY i.id LIMIT 1) AS image,
           (SELECT o.price FROM product_offers o
             WHERE o.product_id = p.id ORDER BY o.id LIMIT 1) AS price
    FROM product_collection p
    WHERE p.id = $1
";

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    slug: String,
    image: Option<String>,
    price: Option<Decimal>,
}

impl From<ProductRow> for ProductSummary {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
            image: row.image.unwrap_or_default(),
            sales_price: row.price.map_or(Price::ZERO, Price::new),
        }
    }
}

/// Repository for product queries.
#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductCatalog for ProductRepository {
    async fn list_products(&self) -> Result<Vec<ProductSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(LIST_PRODUCTS)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(ProductSummary::from).collect())
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<ProductSummary>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(GET_PRODUCT)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(ProductSummary::from))
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
