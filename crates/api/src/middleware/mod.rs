//! HTTP middleware stack for the API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with request ID, username, status, latency)
//! 3. Request ID (add unique ID to each request)
//!
//! Authentication is an extractor ([`RequireAuth`]) on the protected handlers
//! rather than a layer.

pub mod auth;
pub mod request_id;

pub use auth::{RequireAuth, bearer_token};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
