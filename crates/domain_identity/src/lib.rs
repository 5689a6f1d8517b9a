//! Identity Verification Domain
//!
//! This crate implements credential verification and bearer-token identity:
//!
//! - One-way password hashing (bcrypt); plaintext is never stored
//! - Signed, time-bounded bearer tokens carrying the username as subject
//!   and a unique per-token identifier (`jti`) usable for revocation
//! - A revocation store abstraction so logged-out tokens fail verification
//!   before expiry, with an explicit process-local default
//!
//! There is deliberately no credential-free path to a valid token.

pub mod account;
pub mod password;
pub mod token;
pub mod revocation;
pub mod error;

pub use account::{verify_login, AccountStatus};
pub use password::{hash_password, verify_password};
pub use token::{issue_token, decode_token, IssuedToken, TokenClaims};
pub use revocation::{RevocationStore, InMemoryRevocationStore};
pub use error::IdentityError;
