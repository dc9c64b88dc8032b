//! Unified error handling with Sentry integration.
//!
//! Every failure leaves the API as a `{"message": "..."}` JSON body. Client
//! mistakes (bad input, failed authentication, cart rule violations) are 400;
//! anything else is a 500 and is captured to Sentry before responding.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::models::Message;
use crate::services::auth::AuthError;
use crate::services::cart::CartError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart operation failed.
    #[error("{0}")]
    Cart(#[from] CartError),

    /// Authentication operation failed.
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Missing or unusable bearer token.
    #[error("{0}")]
    Unauthorized(String),

    /// Request body or path could not be understood.
    #[error("{0}")]
    InvalidInput(String),
}

impl AppError {
    const fn is_server_error(&self) -> bool {
        match self {
            Self::Repository(_) | Self::Cart(CartError::Catalog(_)) => true,
            Self::Auth(err) => matches!(
                err,
                AuthError::Token(_) | AuthError::Repository(_) | AuthError::PasswordHash
            ),
            _ => false,
        }
    }

    /// The HTTP status this error is reported with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        if self.is_server_error() {
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            StatusCode::BAD_REQUEST
        }
    }

    /// The message shown to the client.
    #[must_use]
    pub fn client_message(&self) -> String {
        if self.is_server_error() {
            // Don't expose internal error details to clients
            return "Internal server error".to_string();
        }
        match self {
            Self::Auth(AuthError::InvalidCredentials) => "Invalid username or password".to_string(),
            Self::Auth(AuthError::UserAlreadyExists) => "User already exists".to_string(),
            Self::Auth(AuthError::MissingPassword) => "Password is required".to_string(),
            Self::Auth(AuthError::InvalidUsername(err)) => format!("Invalid username: {err}"),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        (self.status(), Json(Message::new(self.client_message()))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context for the authenticated identity.
///
/// Errors captured later in the request are associated with this user.
pub fn set_sentry_user(username: &impl ToString) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            username: Some(username.to_string()),
            ..Default::default()
        }));
    });
}

#[cfg(test)]
mod tests {
    use minimart_core::ProductId;

    use super::*;
    use crate::models::InvalidQuantity;
    use crate::services::auth::TokenError;

    const fn product(id: i32) -> ProductId {
        ProductId::new(id)
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::Unauthorized("Invalid authorization token".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::InvalidInput("bad json".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Cart(CartError::DuplicateItem(product(1)))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Cart(CartError::InvalidQuantity(InvalidQuantity))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Repository(RepositoryError::Database(
                sqlx::Error::PoolTimedOut
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Cart(CartError::Catalog(RepositoryError::Database(
                sqlx::Error::PoolClosed
            )))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::Token(TokenError::Expired))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_messages() {
        assert_eq!(
            AppError::Cart(CartError::ProductNotFound(product(100))).client_message(),
            "Product with productID:100 does not exist"
        );
        assert_eq!(
            AppError::Cart(CartError::ItemNotFound(product(3))).client_message(),
            "Product does not exist in cart"
        );
        assert_eq!(
            AppError::Cart(CartError::DuplicateItem(product(1))).client_message(),
            "Product already in cart instead use PUT to update cart"
        );
        assert_eq!(
            AppError::Unauthorized("An authorization header is required".to_string())
                .client_message(),
            "An authorization header is required"
        );
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = AppError::Repository(RepositoryError::Conflict(
            "username already exists".to_string(),
        ));
        assert_eq!(err.client_message(), "Internal server error");
    }
}
