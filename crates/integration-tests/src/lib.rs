//! Integration tests for Minimart.
//!
//! Each [`TestContext`] starts the real router on an ephemeral local port,
//! backed by the bundled product data and in-memory credentials, so the
//! tests need neither a database nor a running server.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p minimart-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use secrecy::SecretString;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use minimart_api::models::SeedProduct;
use minimart_api::services::auth::{DEFAULT_TOKEN_TTL, InMemoryCredentials};
use minimart_api::services::catalog::InMemoryCatalog;
use minimart_api::services::{AuthService, CartService, CartStore, TokenService};
use minimart_api::state::AppState;

/// Signing secret used by every test server.
pub const TEST_TOKEN_SECRET: &str = "q8Vz!r2Lk#T9mW4x$Bn7Hj3Pc6Ys1Df0G";

/// Users registered in every test server, as `(username, password)`.
pub const TEST_USERS: &[(&str, &str)] = &[("alice", "wonderland"), ("bob", "builder")];

const PRODUCTS_JSON: &str = include_str!("../../api/jsondata/products.json");

/// A running API server and a client pointed at it.
pub struct TestContext {
    pub client: Client,
    pub addr: SocketAddr,
    pub tokens: TokenService,
    server: JoinHandle<()>,
}

impl TestContext {
    /// Start a server with the default cart lifetime.
    pub async fn new() -> Self {
        Self::with_cart_ttl(minimart_api::services::cart::DEFAULT_CART_TTL).await
    }

    /// Start a server whose carts expire after `cart_ttl` of disuse.
    ///
    /// # Panics
    ///
    /// Panics if the bundled product data is invalid or the listener cannot
    /// be bound.
    pub async fn with_cart_ttl(cart_ttl: Duration) -> Self {
        let products: Vec<SeedProduct> =
            serde_json::from_str(PRODUCTS_JSON).expect("Bundled products.json is invalid");
        let catalog = Arc::new(InMemoryCatalog::from_seed(&products));

        let tokens = TokenService::new(
            &SecretString::from(TEST_TOKEN_SECRET.to_string()),
            DEFAULT_TOKEN_TTL,
        );
        let auth = AuthService::new(Arc::new(InMemoryCredentials::new()), tokens.clone());
        for (username, password) in TEST_USERS {
            auth.register(username, password)
                .await
                .expect("Failed to register test user");
        }

        let carts = CartService::new(CartStore::new(cart_ttl), catalog.clone());
        let state = AppState::new(catalog, carts, auth);
        let app = minimart_api::app(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            client: Client::new(),
            addr,
            tokens,
            server,
        }
    }

    /// Absolute URL for `path` on the test server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Authenticate through `POST /authenticate` and return the token.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or does not return a token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let resp = self
            .client
            .post(self.url("/authenticate"))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to send authenticate request");

        assert!(
            resp.status().is_success(),
            "login failed for {username}: {}",
            resp.status()
        );
        resp.json::<String>()
            .await
            .expect("Authenticate response is not a JSON string")
    }

    /// A request carrying `Authorization: Bearer <token>`.
    #[must_use]
    pub fn authed(&self, builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header("Authorization", format!("Bearer {token}"))
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.server.abort();
    }
}
