//! Credential repository backed by `PostgreSQL`.

use async_trait::async_trait;
use sqlx::PgPool;

use minimart_core::Username;

use super::RepositoryError;
use crate::services::auth::CredentialStore;

/// Repository for username/password-hash pairs.
#[derive(Clone)]
pub struct CredentialRepository {
    pool: PgPool,
}

impl CredentialRepository {
    /// Create a new credential repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for CredentialRepository {
    async fn password_hash(&self, username: &Username) -> Result<Option<String>, RepositoryError> {
        let hash = sqlx::query_scalar::<_, String>(
            "SELECT password_hash FROM credential WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(hash)
    }

    async fn create(&self, username: &Username, password_hash: &str) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO credential (username, password_hash) VALUES ($1, $2)")
            .bind(username)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_unique_violation()
                {
                    return RepositoryError::Conflict("username already exists".to_owned());
                }
                RepositoryError::Database(e)
            })?;

        Ok(())
    }
}
