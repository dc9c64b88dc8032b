//! Cart types.
//!
//! A [`Cart`] is an ordered list of [`LineItem`]s with at most one line per
//! product. Carts live only in the in-memory cart store.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use minimart_core::{Price, ProductId};

use super::ProductSummary;

/// Returned when a requested quantity is zero, negative or out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Quantity must be a positive integer")]
pub struct InvalidQuantity;

/// A positive item count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// Validate a requested quantity.
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuantity` unless `value` is in `1..=u32::MAX`.
    pub fn new(value: i64) -> Result<Self, InvalidQuantity> {
        u32::try_from(value)
            .ok()
            .filter(|&n| n > 0)
            .map(Self)
            .ok_or(InvalidQuantity)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for Quantity {
    type Error = InvalidQuantity;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

/// One product-quantity pair in a cart.
///
/// Display attributes are copied from the catalog when the line is created
/// and are not refreshed by quantity updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub image: String,
    pub sales_price: Price,
    pub quantity: Quantity,
}

impl LineItem {
    #[must_use]
    pub fn new(product: ProductSummary, quantity: Quantity) -> Self {
        Self {
            id: product.id,
            name: product.name,
            slug: product.slug,
            image: product.image,
            sales_price: product.sales_price,
            quantity,
        }
    }
}

/// The ordered line items of one identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|item| item.id == product_id)
    }

    /// Append a line item.
    ///
    /// Returns the item back if the cart already has a line for its product.
    ///
    /// # Errors
    ///
    /// Returns `Err(item)` when the product is already in the cart.
    pub fn push(&mut self, item: LineItem) -> Result<(), LineItem> {
        if self.contains(item.id) {
            return Err(item);
        }
        self.items.push(item);
        Ok(())
    }

    /// Replace the quantity of a line in place. Returns `false` if absent.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: Quantity) -> bool {
        match self.items.iter_mut().find(|item| item.id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove the line for a product, keeping the order of the others.
    pub fn remove(&mut self, product_id: ProductId) -> Option<LineItem> {
        let index = self.items.iter().position(|item| item.id == product_id)?;
        Some(self.items.remove(index))
    }
}
