//! Authentication route handlers.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::error::Result;
use crate::state::AppState;

/// Login request body.
#[derive(Deserialize)]
pub struct AuthenticateRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AuthenticateRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticateRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Exchange a username and password for a bearer token.
///
/// The response body is the token as a JSON string.
#[instrument(skip(state, body))]
pub async fn authenticate(
    State(state): State<AppState>,
    body: std::result::Result<Json<AuthenticateRequest>, JsonRejection>,
) -> Result<Json<String>> {
    let Json(request) = body?;

    let token = state
        .auth()
        .authenticate(&request.username, &request.password)
        .await?;

    info!(username = %request.username, "User authenticated");
    Ok(Json(token))
}
