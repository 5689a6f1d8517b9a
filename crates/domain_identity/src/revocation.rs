//! Token revocation
//!
//! Logout adds a token's `jti` to a revocation set; verification consults
//! the set so the exact token fails before its expiry. The set only needs
//! to remember an identifier until the token would have expired anyway.
//!
//! The in-memory store is process-local. A multi-process deployment must
//! use a shared implementation (the database-backed store in `infra_db`)
//! or logout on one instance will not be seen by the others.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::IdentityError;

/// A set of revoked token identifiers with automatic expiry
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Marks a token identifier as revoked until `expires_at`
    async fn revoke(&self, jti: Uuid, expires_at: DateTime<Utc>) -> Result<(), IdentityError>;

    /// Returns true if the identifier has been revoked and is not yet expired
    async fn is_revoked(&self, jti: Uuid) -> Result<bool, IdentityError>;
}

/// Process-local revocation store
///
/// Entries are pruned opportunistically on each write.
#[derive(Debug, Default)]
pub struct InMemoryRevocationStore {
    entries: RwLock<HashMap<Uuid, DateTime<Utc>>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn revoke(&self, jti: Uuid, expires_at: DateTime<Utc>) -> Result<(), IdentityError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| IdentityError::Store("revocation lock poisoned".to_string()))?;
        let now = Utc::now();
        entries.retain(|_, exp| *exp > now);
        entries.insert(jti, expires_at);
        Ok(())
    }

    async fn is_revoked(&self, jti: Uuid) -> Result<bool, IdentityError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| IdentityError::Store("revocation lock poisoned".to_string()))?;
        Ok(entries.get(&jti).is_some_and(|exp| *exp > Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_revoked_token_is_reported() {
        let store = InMemoryRevocationStore::new();
        let jti = Uuid::new_v4();

        assert!(!store.is_revoked(jti).await.unwrap());
        store
            .revoke(jti, Utc::now() + Duration::hours(1))
            .await
            .unwrap();
        assert!(store.is_revoked(jti).await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_entry_no_longer_counts() {
        let store = InMemoryRevocationStore::new();
        let jti = Uuid::new_v4();

        store
            .revoke(jti, Utc::now() - Duration::seconds(1))
            .await
            .unwrap();
        assert!(!store.is_revoked(jti).await.unwrap());
    }

    #[tokio::test]
    async fn test_revocation_is_per_token() {
        let store = InMemoryRevocationStore::new();
        let revoked = Uuid::new_v4();
        let other = Uuid::new_v4();

        store
            .revoke(revoked, Utc::now() + Duration::hours(1))
            .await
            .unwrap();
        assert!(!store.is_revoked(other).await.unwrap());
    }
}
