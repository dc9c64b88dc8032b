//! Minimart API - products, per-user carts and bearer-token auth over HTTP.
//!
//! The library exposes the router and its collaborators so the binary and the
//! integration tests build the same application.
//!
//! # Architecture
//!
//! - Axum web framework, JSON in and out
//! - `PostgreSQL` product catalog and credentials (via `sqlx`)
//! - Carts held in process memory (`moka`), evicted after a period of disuse
//! - HS256 bearer tokens (`jsonwebtoken`) issued against Argon2 password hashes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use error::AppError;
pub use routes::app;
pub use state::AppState;
