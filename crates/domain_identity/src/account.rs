//! Account status

use serde::{Deserialize, Serialize};

use crate::error::IdentityError;
use crate::password::verify_password;

/// Account status
///
/// Inactive accounts are rejected at login regardless of password
/// correctness. The flag gates login only; tokens already issued for an
/// account remain valid until they expire or are revoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Inactive,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Inactive => "inactive",
        }
    }

    /// Parses a stored status string; unknown values are treated as inactive
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("active") {
            AccountStatus::Active
        } else {
            AccountStatus::Inactive
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, AccountStatus::Active)
    }
}

/// Checks a login attempt against stored credentials
///
/// Password mismatch is reported before the status check, so a wrong
/// password never reveals whether an account is disabled.
pub fn verify_login(
    password: &str,
    stored_hash: &str,
    status: AccountStatus,
) -> Result<(), IdentityError> {
    if !verify_password(password, stored_hash)? {
        return Err(IdentityError::InvalidCredentials);
    }
    if !status.is_active() {
        return Err(IdentityError::AccountInactive);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::hash_password;

    #[test]
    fn test_status_parse() {
        assert_eq!(AccountStatus::parse("active"), AccountStatus::Active);
        assert_eq!(AccountStatus::parse("Active"), AccountStatus::Active);
        assert_eq!(AccountStatus::parse("inactive"), AccountStatus::Inactive);
        assert_eq!(AccountStatus::parse("banned"), AccountStatus::Inactive);
    }

    #[test]
    fn test_verify_login_wrong_password() {
        let hash = hash_password("secret").unwrap();
        let result = verify_login("wrong", &hash, AccountStatus::Active);
        assert!(matches!(result, Err(IdentityError::InvalidCredentials)));
    }

    #[test]
    fn test_verify_login_inactive_account_with_correct_password() {
        let hash = hash_password("secret").unwrap();
        let result = verify_login("secret", &hash, AccountStatus::Inactive);
        assert!(matches!(result, Err(IdentityError::AccountInactive)));
    }

    #[test]
    fn test_verify_login_ok() {
        let hash = hash_password("secret").unwrap();
        assert!(verify_login("secret", &hash, AccountStatus::Active).is_ok());
    }
}
