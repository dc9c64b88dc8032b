//! Authentication service.
//!
//! Checks `{username, password}` against stored Argon2 hashes and issues
//! bearer tokens; [`TokenService`] validates them on every protected request.

mod error;
mod token;

pub use error::AuthError;
pub use token::{Claims, DEFAULT_TOKEN_TTL, TokenError, TokenService};

use std::collections::HashMap;
use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use minimart_core::Username;

use crate::db::RepositoryError;

/// Storage of password hashes by username.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// The stored Argon2 hash for `username`, if the user exists.
    async fn password_hash(&self, username: &Username) -> Result<Option<String>, RepositoryError>;

    /// Store a new user.
    ///
    /// Returns `RepositoryError::Conflict` if the username is taken.
    async fn create(&self, username: &Username, password_hash: &str) -> Result<(), RepositoryError>;
}

/// Credentials held in process memory.
#[derive(Default)]
pub struct InMemoryCredentials {
    users: RwLock<HashMap<Username, String>>,
}

impl InMemoryCredentials {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentials {
    async fn password_hash(&self, username: &Username) -> Result<Option<String>, RepositoryError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn create(&self, username: &Username, password_hash: &str) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;
        if users.contains_key(username) {
            return Err(RepositoryError::Conflict("username already exists".to_owned()));
        }
        users.insert(username.clone(), password_hash.to_owned());
        Ok(())
    }
}

/// Authentication service.
#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    tokens: TokenService,
}

impl AuthService {
    #[must_use]
    pub fn new(credentials: Arc<dyn CredentialStore>, tokens: TokenService) -> Self {
        Self {
            credentials,
            tokens,
        }
    }

    /// The token service used to issue and validate bearer tokens.
    #[must_use]
    pub const fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Verify a username and password and issue a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` or `AuthError::MissingPassword`
    /// for malformed input, and `AuthError::InvalidCredentials` if the user is
    /// unknown or the password does not match.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let username = Username::parse(username)?;
        if password.is_empty() {
            return Err(AuthError::MissingPassword);
        }

        let Some(password_hash) = self.credentials.password_hash(&username).await? else {
            warn!(%username, "Login attempt for unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        verify_password(password, &password_hash).inspect_err(|_| {
            warn!(%username, "Login attempt with wrong password");
        })?;

        let token = self.tokens.issue(&username)?;
        info!(%username, "Issued token");
        Ok(token)
    }

    /// Create a user with a password.
    ///
    /// # Errors
    ///
    /// See [`register_user`].
    pub async fn register(&self, username: &str, password: &str) -> Result<Username, AuthError> {
        register_user(self.credentials.as_ref(), username, password).await
    }
}

/// Validate a new user, hash the password and store it in `credentials`.
///
/// Used by [`AuthService::register`] and by tooling that has no token
/// secret to build a full service with.
///
/// # Errors
///
/// Returns `AuthError::InvalidUsername` or `AuthError::MissingPassword`
/// for malformed input and `AuthError::UserAlreadyExists` if the username
/// is taken.
#[instrument(skip(credentials, password))]
pub async fn register_user(
    credentials: &dyn CredentialStore,
    username: &str,
    password: &str,
) -> Result<Username, AuthError> {
    let username = Username::parse(username)?;
    if password.is_empty() {
        return Err(AuthError::MissingPassword);
    }

    let password_hash = hash_password(password)?;

    credentials
        .create(&username, &password_hash)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
            other => AuthError::Repository(other),
        })?;

    info!(%username, "Registered user");
    Ok(username)
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
