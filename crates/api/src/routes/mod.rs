//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health               - Liveness check
//! GET    /health/ready         - Readiness check (catalog reachable)
//!
//! # Auth
//! POST   /authenticate         - Exchange username/password for a bearer token
//!
//! # Products (requires auth)
//! GET    /products             - Product listing
//!
//! # Cart (requires auth)
//! GET    /carts                - Line items in the caller's cart
//! POST   /carts                - Add a product
//! PUT    /carts/{productId}    - Change a line's quantity
//! DELETE /carts/{productId}    - Remove a line
//! ```

pub mod auth;
pub mod carts;
pub mod products;

use std::time::Duration;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Build the API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/authenticate", post(auth::authenticate))
        .route("/products", get(products::index))
        .route("/carts", get(carts::index).post(carts::add))
        .route("/carts/{product_id}", put(carts::update).delete(carts::remove))
}

/// Build the full application: routes, health checks, request IDs and
/// request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        username = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the product catalog is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.catalog().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
