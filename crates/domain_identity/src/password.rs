//! Password hashing
//!
//! Passwords are stored as bcrypt hashes and verified by re-hash-and-compare.
//! The stored string embeds the salt and cost factor.

use crate::error::IdentityError;

/// Hashes a plaintext password for storage
pub fn hash_password(password: &str) -> Result<String, IdentityError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| IdentityError::Hashing(e.to_string()))
}

/// Verifies a plaintext password against a stored hash
///
/// A malformed stored hash is an error, not a mismatch.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, IdentityError> {
    bcrypt::verify(password, stored_hash).map_err(|e| IdentityError::Hashing(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("hunter2").unwrap();
        assert_ne!(hash, "hunter2");
        assert!(verify_password("hunter2", &hash).unwrap());
        assert!(!verify_password("hunter3", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_error() {
        assert!(verify_password("x", "not-a-bcrypt-hash").is_err());
    }
}
