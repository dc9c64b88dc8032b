//! Bearer token authentication extractor.

use axum::{
    extract::FromRequestParts,
    http::{HeaderValue, header::AUTHORIZATION, request::Parts},
};
use tracing::Span;

use minimart_core::Username;

use crate::error::{AppError, set_sentry_user};
use crate::state::AppState;

const MISSING_HEADER: &str = "An authorization header is required";
const MALFORMED_HEADER: &str = "Cannot parse authorization header";
const INVALID_TOKEN: &str = "Invalid authorization token";

/// Extractor that requires a valid bearer token.
///
/// Rejects the request with a 400 `{"message"}` body if the `Authorization`
/// header is missing, malformed, or carries a token that fails validation.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(username): RequireAuth) -> String {
///     format!("Hello, {username}!")
/// }
/// ```
pub struct RequireAuth(pub Username);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts.headers.get(AUTHORIZATION))?;

        let username = state.tokens().validate(token).map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            AppError::Unauthorized(INVALID_TOKEN.to_string())
        })?;

        Span::current().record("username", username.as_str());
        set_sentry_user(&username);

        Ok(Self(username))
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The value must be exactly two space-separated parts; the scheme is
/// matched case-insensitively.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` if the header is absent or malformed.
pub fn bearer_token(header: Option<&HeaderValue>) -> Result<&str, AppError> {
    let header = header.ok_or_else(|| AppError::Unauthorized(MISSING_HEADER.to_string()))?;
    let malformed = || AppError::Unauthorized(MALFORMED_HEADER.to_string());

    let value = header.to_str().map_err(|_| malformed())?;
    let mut parts = value.split(' ');

    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None)
            if scheme.eq_ignore_ascii_case("Bearer") && !token.is_empty() =>
        {
            Ok(token)
        }
        _ => Err(malformed()),
    }
}
