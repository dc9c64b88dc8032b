//! Business logic services.
//!
//! - [`catalog`] - Product lookup, injected into the cart service
//! - [`cart`] - Per-user cart store and cart mutations
//! - [`auth`] - Credential checks and bearer token issuance/validation

pub mod auth;
pub mod cart;
pub mod catalog;

pub use auth::{AuthService, CredentialStore, TokenService, register_user};
pub use cart::{CartService, CartStore};
pub use catalog::ProductCatalog;
