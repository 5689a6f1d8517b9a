//! Pre-built Test Fixtures
//!
//! Ready-to-use, predictable test data matching the concrete scenarios the
//! pipeline is specified against.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for identity test data
pub struct UserFixtures;

impl UserFixtures {
    pub fn username() -> &'static str {
        "alice"
    }

    pub fn email() -> &'static str {
        "alice@example.com"
    }

    pub fn password() -> &'static str {
        "correct-horse-battery"
    }
}

/// Fixture for insurance and claim codes
pub struct CodeFixtures;

impl CodeFixtures {
    pub fn insurance_code() -> &'static str {
        "INS001"
    }

    pub fn policy_number() -> &'static str {
        "POL001"
    }

    pub fn claims_code() -> &'static str {
        "CLM001"
    }
}

/// Fixture for valuation inputs
pub struct ValuationFixtures;

impl ValuationFixtures {
    /// The standard rate used across scenario tests
    pub fn rate_per_sqft() -> Decimal {
        dec!(350)
    }

    /// Damage area paired with the standard rate; the expected recommended
    /// value is 3500
    pub fn damage_area() -> Decimal {
        dec!(10)
    }

    pub fn expected_value() -> Decimal {
        dec!(3500)
    }

    /// Exchange rate used when currency conversion is requested
    pub fn exchange_rate() -> Decimal {
        dec!(88)
    }
}
