//! Comprehensive tests for domain_identity

use chrono::{Duration, Utc};

use domain_identity::{
    decode_token, hash_password, issue_token, verify_login, verify_password, AccountStatus,
    IdentityError, InMemoryRevocationStore, RevocationStore,
};

const SECRET: &str = "integration-secret";

// ============================================================================
// Credential tests
// ============================================================================

#[test]
fn test_signup_then_login_round_trip() {
    // Hash at signup, verify at login, token subject equals the username.
    let hash = hash_password("correct horse").unwrap();
    verify_login("correct horse", &hash, AccountStatus::Active).unwrap();

    let issued = issue_token("alice", SECRET, 3600).unwrap();
    let claims = decode_token(&issued.token, SECRET).unwrap();
    assert_eq!(claims.sub, "alice");
}

#[test]
fn test_inactive_account_never_gets_a_token() {
    let hash = hash_password("correct horse").unwrap();
    let result = verify_login("correct horse", &hash, AccountStatus::Inactive);
    assert!(matches!(result, Err(IdentityError::AccountInactive)));
}

#[test]
fn test_stored_hash_is_not_plaintext() {
    let hash = hash_password("secret").unwrap();
    assert!(!hash.contains("secret"));
    assert!(verify_password("secret", &hash).unwrap());
}

// ============================================================================
// Revocation tests
// ============================================================================

#[tokio::test]
async fn test_logout_revokes_exactly_that_token() {
    let store = InMemoryRevocationStore::new();

    let first = issue_token("alice", SECRET, 3600).unwrap();
    let second = issue_token("alice", SECRET, 3600).unwrap();

    // Logout with the first token.
    store.revoke(first.jti, first.expires_at).await.unwrap();

    // The first token still decodes but must be treated as revoked; the
    // second remains usable.
    let claims = decode_token(&first.token, SECRET).unwrap();
    assert!(store.is_revoked(claims.token_id().unwrap()).await.unwrap());

    let claims = decode_token(&second.token, SECRET).unwrap();
    assert!(!store.is_revoked(claims.token_id().unwrap()).await.unwrap());
}

#[tokio::test]
async fn test_revocation_entry_lives_as_long_as_the_token() {
    let store = InMemoryRevocationStore::new();
    let issued = issue_token("bob", SECRET, 3600).unwrap();

    store.revoke(issued.jti, issued.expires_at).await.unwrap();
    assert!(store.is_revoked(issued.jti).await.unwrap());
    assert!(issued.expires_at > Utc::now() + Duration::minutes(59));
}
