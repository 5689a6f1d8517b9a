//! Strongly-typed identifiers for domain entities
//!
//! Rows are keyed by opaque numeric surrogates in the database. Newtype
//! wrappers prevent accidental mixing of different identifier types in
//! domain code.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps an existing row key
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the underlying row key
            pub fn as_i64(&self) -> i64 {
                self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Strip prefix if present
                let raw = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(raw.parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

// Identity domain identifiers
define_id!(UserId, "USR");

// Insurance / claims domain identifiers
define_id!(InsuranceId, "INS");
define_id!(ClaimId, "CLM");

// Pipeline artifact identifiers
define_id!(PropertyDetailsId, "CPD");
define_id!(PropertyImageId, "CPI");
define_id!(AssessmentId, "CPA");
define_id!(ClaimValueId, "CVL");
define_id!(OverrideId, "OVR");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_id_display() {
        let id = ClaimId::new(42);
        assert_eq!(id.to_string(), "CLM-42");
    }

    #[test]
    fn test_id_parsing_with_and_without_prefix() {
        let original = ClaimId::new(7);
        let parsed: ClaimId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);

        let bare: ClaimId = "7".parse().unwrap();
        assert_eq!(bare, original);
    }

    #[test]
    fn test_i64_conversion() {
        let user_id = UserId::from(9);
        let back: i64 = user_id.into();
        assert_eq!(back, 9);
    }

    proptest::proptest! {
        // Display and FromStr agree for any row key.
        #[test]
        fn prop_display_parse_roundtrip(raw in 0i64..=i64::MAX) {
            let id = InsuranceId::new(raw);
            let parsed: InsuranceId = id.to_string().parse().unwrap();
            proptest::prop_assert_eq!(id, parsed);
        }
    }
}
