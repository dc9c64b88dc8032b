//! Bearer token issuance and validation.
//!
//! Tokens are HS256 JWTs carrying the username and an expiry. The password
//! is never placed in a token.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use minimart_core::Username;

/// Default token lifetime.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Errors that can occur during token operations.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token could not be signed.
    #[error("failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),

    /// The token is past its expiry.
    #[error("token expired")]
    Expired,

    /// The token is malformed, has a bad signature or bad claims.
    #[error("invalid token: {0}")]
    Invalid(jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Invalid(err),
        }
    }
}

/// Claims carried by a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub username: Username,
    /// Issued at (seconds since the epoch).
    pub iat: i64,
    /// Expiry (seconds since the epoch).
    pub exp: i64,
}

/// Signs and verifies bearer tokens with a shared secret.
#[derive(Clone)]
pub struct TokenService {
    inner: Arc<TokenServiceInner>,
}

struct TokenServiceInner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    #[must_use]
    pub fn new(secret: &SecretString, ttl: Duration) -> Self {
        let key = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);
        validation.leeway = 0;

        Self {
            inner: Arc::new(TokenServiceInner {
                encoding: EncodingKey::from_secret(key),
                decoding: DecodingKey::from_secret(key),
                validation,
                ttl,
            }),
        }
    }

    /// Issue a token for `username`, valid for the configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if the claims cannot be encoded.
    pub fn issue(&self, username: &Username) -> Result<String, TokenError> {
        self.issue_at(username, Utc::now().timestamp())
    }

    fn issue_at(&self, username: &Username, now: i64) -> Result<String, TokenError> {
        let ttl = i64::try_from(self.inner.ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims {
            username: username.clone(),
            iat: now,
            exp: now.saturating_add(ttl),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.inner.encoding)
            .map_err(TokenError::Signing)
    }

    /// Verify a token's signature and expiry and return its username.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Expired` for an expired token and
    /// `TokenError::Invalid` for anything else that fails verification.
    pub fn validate(&self, token: &str) -> Result<Username, TokenError> {
        let data = decode::<Claims>(token, &self.inner.decoding, &self.inner.validation)?;
        Ok(data.claims.username)
    }
}
