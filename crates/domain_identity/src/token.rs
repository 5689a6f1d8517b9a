//! Bearer token issuance and verification
//!
//! Tokens are HS256 JWTs verifiable without a database round trip. Each
//! token carries a unique `jti` so an individual token can be revoked
//! without affecting others issued to the same subject.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::IdentityError;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (username)
    pub sub: String,
    /// Unique token identifier, used by the revocation list
    pub jti: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

impl TokenClaims {
    /// Returns the `jti` as a UUID
    pub fn token_id(&self) -> Result<Uuid, IdentityError> {
        Uuid::parse_str(&self.jti).map_err(|_| IdentityError::TokenInvalid)
    }

    /// Returns the expiry as a timestamp
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}

/// A freshly issued token together with its identifying claims
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub jti: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Issues a new signed bearer token
///
/// # Arguments
///
/// * `subject` - Username the token identifies
/// * `secret` - HMAC signing secret
/// * `expiration_secs` - Token validity in seconds
pub fn issue_token(
    subject: &str,
    secret: &str,
    expiration_secs: u64,
) -> Result<IssuedToken, IdentityError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);
    let jti = Uuid::new_v4();

    let claims = TokenClaims {
        sub: subject.to_string(),
        jti: jti.to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| IdentityError::TokenInvalid)?;

    Ok(IssuedToken {
        token,
        jti,
        expires_at: exp,
    })
}

/// Decodes and validates a bearer token's signature and expiry
///
/// Revocation is the caller's concern; see
/// [`RevocationStore`](crate::revocation::RevocationStore).
pub fn decode_token(token: &str, secret: &str) -> Result<TokenClaims, IdentityError> {
    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => IdentityError::TokenExpired,
        _ => IdentityError::TokenInvalid,
    })?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_issue_and_decode() {
        let issued = issue_token("alice", SECRET, 3600).unwrap();
        let claims = decode_token(&issued.token, SECRET).unwrap();

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.token_id().unwrap(), issued.jti);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_each_token_gets_unique_jti() {
        let a = issue_token("alice", SECRET, 3600).unwrap();
        let b = issue_token("alice", SECRET, 3600).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issued = issue_token("alice", SECRET, 3600).unwrap();
        let result = decode_token(&issued.token, "other-secret");
        assert!(matches!(result, Err(IdentityError::TokenInvalid)));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            decode_token("not.a.jwt", SECRET),
            Err(IdentityError::TokenInvalid)
        ));
    }
}
