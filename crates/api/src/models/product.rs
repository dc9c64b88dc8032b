//! Product types.

use serde::{Deserialize, Serialize};

use minimart_core::{Price, ProductId};

/// Display attributes of a product, as listed by `GET /products`.
///
/// Only the first image and the first offer of a stored product are exposed.
/// A product without images has an empty `image`; one without offers has a
/// zero `sales_price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub image: String,
    pub sales_price: Price,
}

/// A product entry in the default-data seed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedProduct {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub offers: Vec<SeedOffer>,
}

/// A price offer attached to a seeded product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedOffer {
    pub price: Price,
}

impl SeedProduct {
    /// The summary this product is listed with once stored.
    #[must_use]
    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            id: self.id,
            name: self.name.clone(),
            slug: self.slug.clone(),
            image: self.images.first().cloned().unwrap_or_default(),
            sales_price: self.offers.first().map_or(Price::ZERO, |offer| offer.price),
        }
    }
}
