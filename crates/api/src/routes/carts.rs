//! Cart route handlers.
//!
//! Every handler acts on the cart of the identity carried by the bearer
//! token. Bodies and paths are parsed here so that malformed input produces
//! the same `{"message"}` reply as a rejected cart operation.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use serde::Deserialize;
use tracing::{info, instrument};

use minimart_core::ProductId;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{LineItem, Message};
use crate::state::AppState;

/// Body of `POST /carts`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    #[serde(alias = "id")]
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Body of `PUT /carts/{productId}`.
///
/// A `productId` in the body is accepted but ignored; the path decides which
/// line is changed.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub quantity: i64,
}

/// Parse a product id taken from the request path.
fn parse_product_id(raw: &str) -> Result<ProductId> {
    raw.parse()
        .map_err(|_| AppError::InvalidInput(format!("Unable to parse productID:{raw}")))
}

/// List the line items in the caller's cart (`[]` when there is none).
#[instrument(skip(state))]
pub async fn index(
    RequireAuth(identity): RequireAuth,
    State(state): State<AppState>,
) -> Json<Vec<LineItem>> {
    let items = state.carts().list(&identity).await;
    info!(count = items.len(), "Listed cart");
    Json(items)
}

/// Add a product to the caller's cart.
#[instrument(skip(state, body))]
pub async fn add(
    RequireAuth(identity): RequireAuth,
    State(state): State<AppState>,
    body: std::result::Result<Json<AddToCartRequest>, JsonRejection>,
) -> Result<Json<Message>> {
    let Json(request) = body?;

    state
        .carts()
        .add(&identity, request.product_id, request.quantity)
        .await?;

    info!(product_id = %request.product_id, quantity = request.quantity, "Added to cart");
    Ok(Json(Message::new("Successfully added to cart")))
}

/// Change the quantity of a line already in the caller's cart.
#[instrument(skip(state, path, body))]
pub async fn update(
    RequireAuth(identity): RequireAuth,
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
    body: std::result::Result<Json<UpdateCartRequest>, JsonRejection>,
) -> Result<Json<Message>> {
    let Path(raw_id) = path?;
    let product_id = parse_product_id(&raw_id)?;
    let Json(request) = body?;

    state
        .carts()
        .update(&identity, product_id, request.quantity)
        .await?;

    info!(%product_id, quantity = request.quantity, "Updated cart");
    Ok(Json(Message::new("Successfully updated in cart")))
}

/// Remove a line from the caller's cart.
#[instrument(skip(state, path))]
pub async fn remove(
    RequireAuth(identity): RequireAuth,
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Message>> {
    let Path(raw_id) = path?;
    let product_id = parse_product_id(&raw_id)?;

    state.carts().remove(&identity, product_id).await?;

    info!(%product_id, "Removed from cart");
    Ok(Json(Message::new("Successfully deleted in cart")))
}
