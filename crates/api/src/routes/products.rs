//! Product route handlers.

use axum::{Json, extract::State};
use tracing::{info, instrument};

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::ProductSummary;
use crate::state::AppState;

/// List every product in the catalog.
#[instrument(skip(state))]
pub async fn index(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductSummary>>> {
    let products = state.catalog().list_products().await?;
    info!(count = products.len(), "Listed products");
    Ok(Json(products))
}
