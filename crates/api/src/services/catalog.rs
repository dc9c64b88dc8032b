//! Product lookup.
//!
//! The cart service only needs to resolve a product id to its display
//! attributes, so the catalog is a trait with a `PostgreSQL` implementation
//! ([`crate::db::ProductRepository`]) and an in-memory one.

use async_trait::async_trait;

use minimart_core::ProductId;

use crate::db::RepositoryError;
use crate::models::{ProductSummary, SeedProduct};

/// Read access to the product catalog.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// All products, ordered by id.
    async fn list_products(&self) -> Result<Vec<ProductSummary>, RepositoryError>;

    /// A single product, or `None` if no product has this id.
    async fn get_product(&self, id: ProductId) -> Result<Option<ProductSummary>, RepositoryError>;

    /// Check that the backing storage is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// A fixed, in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<ProductSummary>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new(mut products: Vec<ProductSummary>) -> Self {
        products.sort_by_key(|p| p.id.as_i32());
        products.dedup_by_key(|p| p.id);
        Self { products }
    }

    /// Build a catalog from seed-file entries.
    #[must_use]
    pub fn from_seed(products: &[SeedProduct]) -> Self {
        Self::new(products.iter().map(SeedProduct::summary).collect())
    }
}

#[async_trait]
impl ProductCatalog for InMemoryCatalog {
    async fn list_products(&self) -> Result<Vec<ProductSummary>, RepositoryError> {
        Ok(self.products.clone())
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<ProductSummary>, RepositoryError> {
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use minimart_core::Price;

    use super::*;

    fn product(id: i32) -> ProductSummary {
        ProductSummary {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            slug: format!("product-{id}"),
            image: String::new(),
            sales_price: Price::from_cents(250),
        }
    }

    #[tokio::test]
    async fn test_in_memory_catalog_orders_by_id() {
        let catalog = InMemoryCatalog::new(vec![product(3), product(1), product(2)]);
        let ids: Vec<_> = catalog
            .list_products()
            .await
            .unwrap()
            .iter()
            .map(|p| p.id.as_i32())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_in_memory_catalog_lookup() {
        let catalog = InMemoryCatalog::new(vec![product(1)]);
        assert!(catalog.get_product(ProductId::new(1)).await.unwrap().is_some());
        assert!(catalog.get_product(ProductId::new(2)).await.unwrap().is_none());
    }
}
