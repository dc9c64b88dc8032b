//! Application state shared across handlers.

use std::sync::Arc;

use crate::services::{AuthService, CartService, ProductCatalog, TokenService};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Collaborators are passed in
/// rather than built here, so tests can run the router against in-memory
/// implementations.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: Arc<dyn ProductCatalog>,
    carts: CartService,
    auth: AuthService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `catalog` - Product lookup used by `/products` and readiness checks
    /// * `carts` - Cart operations (shares the same catalog)
    /// * `auth` - Credential checks and bearer tokens
    #[must_use]
    pub fn new(catalog: Arc<dyn ProductCatalog>, carts: CartService, auth: AuthService) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                catalog,
                carts,
                auth,
            }),
        }
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &dyn ProductCatalog {
        self.inner.catalog.as_ref()
    }

    /// Get a reference to the cart service.
    #[must_use]
    pub fn carts(&self) -> &CartService {
        &self.inner.carts
    }

    /// Get a reference to the authentication service.
    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }

    /// Get a reference to the bearer token service.
    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        self.inner.auth.tokens()
    }
}
