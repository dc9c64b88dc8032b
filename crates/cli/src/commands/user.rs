//! API user management commands.
//!
//! # Usage
//!
//! ```bash
//! mm-cli user create --username alice --password wonderland
//! ```
//!
//! # Environment Variables
//!
//! - `MINIMART_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

use thiserror::Error;
use tracing::info;

use minimart_api::db::CredentialRepository;
use minimart_api::services::auth::{AuthError, register_user};

use super::{CommandError, connect};

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error(transparent)]
    Connect(#[from] CommandError),

    /// Validation, hashing or storage failed.
    #[error("Cannot create user: {0}")]
    Auth(#[from] AuthError),
}

/// Create a new user with the same rules the API applies.
///
/// # Errors
///
/// Returns an error if the username or password is invalid, the user exists,
/// or a database operation fails.
pub async fn create(username: &str, password: &str) -> Result<(), UserError> {
    let pool = connect().await?;
    let credentials = CredentialRepository::new(pool);

    let username = register_user(&credentials, username, password).await?;

    info!(%username, "User created successfully");
    Ok(())
}
