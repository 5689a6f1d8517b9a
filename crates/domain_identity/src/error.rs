//! Identity domain errors

use thiserror::Error;

/// Errors that can occur during identity verification
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is inactive")]
    AccountInactive,

    #[error("Invalid token")]
    TokenInvalid,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token has been revoked")]
    TokenRevoked,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Revocation store error: {0}")]
    Store(String),
}
