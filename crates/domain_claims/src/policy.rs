//! Insurance policy types

use serde::{Deserialize, Serialize};

use crate::error::ClaimError;

/// Policy status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyStatus {
    Active,
    Inactive,
}

impl PolicyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyStatus::Active => "active",
            PolicyStatus::Inactive => "inactive",
        }
    }

    /// Parses a stored status string; unknown values count as inactive
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("active") {
            PolicyStatus::Active
        } else {
            PolicyStatus::Inactive
        }
    }
}

/// A claim's reference to an insurance policy, held by value
///
/// This is a lookup relation, not an ownership edge: the insurance code and
/// policy number strings are matched against the insurance table at read
/// time, and an absent match yields empty joined fields rather than an
/// error. One insurance code may map to many policy numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRef {
    pub insurance_code: String,
    pub policy_number: String,
}

impl PolicyRef {
    /// Builds a reference from user-supplied fields, rejecting blanks
    pub fn new(insurance_code: &str, policy_number: &str) -> Result<Self, ClaimError> {
        let insurance_code = insurance_code.trim();
        let policy_number = policy_number.trim();
        if insurance_code.is_empty() {
            return Err(ClaimError::MissingField("insurance_code"));
        }
        if policy_number.is_empty() {
            return Err(ClaimError::MissingField("policy_number"));
        }
        Ok(Self {
            insurance_code: insurance_code.to_string(),
            policy_number: policy_number.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_ref_rejects_blank_fields() {
        assert!(matches!(
            PolicyRef::new("", "POL001"),
            Err(ClaimError::MissingField("insurance_code"))
        ));
        assert!(matches!(
            PolicyRef::new("INS001", "  "),
            Err(ClaimError::MissingField("policy_number"))
        ));
    }

    #[test]
    fn test_policy_ref_trims() {
        let r = PolicyRef::new(" INS001 ", "POL001").unwrap();
        assert_eq!(r.insurance_code, "INS001");
        assert_eq!(r.policy_number, "POL001");
    }
}
