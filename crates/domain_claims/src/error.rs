//! Claims domain errors

use thiserror::Error;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid claims code: {0}")]
    InvalidClaimsCode(String),

    #[error("Claim not found: {0}")]
    ClaimNotFound(String),

    #[error("Claims code already exists: {0}")]
    DuplicateClaimsCode(String),
}
