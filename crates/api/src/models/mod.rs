//! Domain models for the Minimart API.
//!
//! These types are what handlers serialize to clients and what the cart store
//! holds in memory. Database row types stay private to the `db` module.

pub mod cart;
pub mod product;

use serde::{Deserialize, Serialize};

pub use cart::{Cart, InvalidQuantity, LineItem, Quantity};
pub use product::{ProductSummary, SeedOffer, SeedProduct};

/// A `{"message": "..."}` JSON body, used for both success and error replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
