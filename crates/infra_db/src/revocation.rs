//! Database-backed token revocation store
//!
//! The shared counterpart to `domain_identity`'s in-memory store: revoked
//! token identifiers live in the `revoked_tokens` table, so a logout on one
//! instance is visible to every other instance sharing the database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain_identity::{IdentityError, RevocationStore};
use sqlx::PgPool;
use uuid::Uuid;

/// Revocation store persisted in PostgreSQL
///
/// Rows older than their `expires_at` are harmless leftovers; the token
/// they describe can no longer verify anyway. `prune_expired` exists for
/// housekeeping but is not required for correctness.
#[derive(Debug, Clone)]
pub struct PgRevocationStore {
    pool: PgPool,
}

impl PgRevocationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Deletes revocation rows whose tokens have expired, returning the
    /// number of rows removed.
    pub async fn prune_expired(&self) -> Result<u64, IdentityError> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at <= now()")
            .execute(&self.pool)
            .await
            .map_err(|e| IdentityError::Store(e.to_string()))?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl RevocationStore for PgRevocationStore {
    async fn revoke(&self, jti: Uuid, expires_at: DateTime<Utc>) -> Result<(), IdentityError> {
        // Revoking the same token twice is a no-op, not an error.
        sqlx::query(
            r#"
            INSERT INTO revoked_tokens (jti, expires_at)
            VALUES ($1, $2)
            ON CONFLICT (jti) DO NOTHING
            "#,
        )
        .bind(jti)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| IdentityError::Store(e.to_string()))?;
        Ok(())
    }

    async fn is_revoked(&self, jti: Uuid) -> Result<bool, IdentityError> {
        let revoked: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM revoked_tokens
                WHERE jti = $1 AND expires_at > now()
            )
            "#,
        )
        .bind(jti)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| IdentityError::Store(e.to_string()))?;
        Ok(revoked.0)
    }
}
