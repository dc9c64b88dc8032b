//! Cart service.
//!
//! Implements the four cart operations on top of the [`CartStore`], using a
//! [`ProductCatalog`] to fill in display attributes of newly added items.
//!
//! # Concurrency
//!
//! Every mutation is a single `get`, an isolated change to the returned copy,
//! then a single `put` or `delete`. Two concurrent mutations for the *same*
//! identity can interleave, and the last write wins. A cart belongs to one
//! person editing it serially, so this is a known, accepted limitation; if
//! stronger guarantees are ever needed, wrap the read-modify-write in a
//! per-identity lock.

mod store;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, instrument};

use minimart_core::{ProductId, Username};

pub use store::{CartStore, DEFAULT_CART_TTL, DEFAULT_SWEEP_INTERVAL};

use crate::db::RepositoryError;
use crate::models::{InvalidQuantity, LineItem, Quantity};
use crate::services::catalog::ProductCatalog;

/// Errors returned by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The requested quantity is not a positive integer.
    #[error(transparent)]
    InvalidQuantity(#[from] InvalidQuantity),

    /// The product is already in the cart.
    #[error("Product already in cart instead use PUT to update cart")]
    DuplicateItem(ProductId),

    /// The catalog has no product with this id.
    #[error("Product with productID:{0} does not exist")]
    ProductNotFound(ProductId),

    /// The product is not in the cart.
    #[error("Product does not exist in cart")]
    ItemNotFound(ProductId),

    /// The catalog could not be queried.
    #[error("product lookup failed: {0}")]
    Catalog(#[from] RepositoryError),
}

/// Cart operations for authenticated identities.
#[derive(Clone)]
pub struct CartService {
    store: CartStore,
    catalog: Arc<dyn ProductCatalog>,
}

impl CartService {
    #[must_use]
    pub fn new(store: CartStore, catalog: Arc<dyn ProductCatalog>) -> Self {
        Self { store, catalog }
    }

    /// The underlying store (used to start the sweeper).
    #[must_use]
    pub const fn store(&self) -> &CartStore {
        &self.store
    }

    /// The identity's line items, in insertion order. Empty if no cart.
    #[instrument(skip(self), fields(identity = %identity))]
    pub async fn list(&self, identity: &Username) -> Vec<LineItem> {
        self.store.get(identity).await.into_items()
    }

    /// Add a new line for `product_id`.
    ///
    /// # Errors
    ///
    /// - `InvalidQuantity` if `quantity` is not positive
    /// - `DuplicateItem` if the product is already in the cart
    /// - `ProductNotFound` if the catalog has no such product
    /// - `Catalog` if the catalog query fails
    #[instrument(skip(self), fields(identity = %identity))]
    pub async fn add(
        &self,
        identity: &Username,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), CartError> {
        let quantity = Quantity::new(quantity)?;

        let mut cart = self.store.get(identity).await;
        if cart.contains(product_id) {
            return Err(CartError::DuplicateItem(product_id));
        }

        let product = self
            .catalog
            .get_product(product_id)
            .await?
            .ok_or(CartError::ProductNotFound(product_id))?;

        cart.push(LineItem::new(product, quantity))
            .map_err(|item| CartError::DuplicateItem(item.id))?;

        debug!(items = cart.len(), "Storing cart");
        self.store.put(identity.clone(), cart).await;
        Ok(())
    }

    /// Replace the quantity of an existing line. Attributes are not re-fetched.
    ///
    /// # Errors
    ///
    /// - `InvalidQuantity` if `quantity` is not positive
    /// - `ItemNotFound` if the product is not in the cart (nothing is stored)
    #[instrument(skip(self), fields(identity = %identity))]
    pub async fn update(
        &self,
        identity: &Username,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), CartError> {
        let quantity = Quantity::new(quantity)?;

        let mut cart = self.store.get(identity).await;
        if !cart.set_quantity(product_id, quantity) {
            return Err(CartError::ItemNotFound(product_id));
        }

        self.store.put(identity.clone(), cart).await;
        Ok(())
    }

    /// Remove the line for `product_id`. An emptied cart is dropped from the
    /// store rather than kept as an empty entry.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` if the product is not in the cart.
    #[instrument(skip(self), fields(identity = %identity))]
    pub async fn remove(&self, identity: &Username, product_id: ProductId) -> Result<(), CartError> {
        let mut cart = self.store.get(identity).await;
        if cart.remove(product_id).is_none() {
            return Err(CartError::ItemNotFound(product_id));
        }

        if cart.is_empty() {
            debug!("Cart emptied, dropping entry");
            self.store.delete(identity).await;
        } else {
            self.store.put(identity.clone(), cart).await;
        }
        Ok(())
    }
}
