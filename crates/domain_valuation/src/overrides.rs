//! Manual overrides
//!
//! A reviewer may correct the automated result for a specific image of a
//! claim. Overrides are keyed by (claim, image index); re-submission
//! replaces the stored values in place, last write wins, and the override
//! supersedes the automated result for valuation purposes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reviewer-supplied corrections for one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideValues {
    pub image_filename: Option<String>,
    pub ai_decision: Option<String>,
    pub confidence: f64,
    pub length_ft: f64,
    pub width_ft: f64,
    pub area_sqft: f64,
    pub claim_recommended: Decimal,
    pub crack_detected: bool,
}

impl OverrideValues {
    /// The recommended value to report: the override's when present,
    /// otherwise the automated value
    pub fn effective_value(
        computed: Decimal,
        overridden: Option<&OverrideValues>,
    ) -> Decimal {
        overridden.map(|o| o.claim_recommended).unwrap_or(computed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> OverrideValues {
        OverrideValues {
            image_filename: Some("wall.jpg".to_string()),
            ai_decision: Some("Positive (Crack Detected)".to_string()),
            confidence: 88.0,
            length_ft: 3.0,
            width_ft: 0.2,
            area_sqft: 12.5,
            claim_recommended: dec!(4375),
            crack_detected: true,
        }
    }

    #[test]
    fn test_override_supersedes_automated_result() {
        let o = sample();
        assert_eq!(
            OverrideValues::effective_value(dec!(70), Some(&o)),
            dec!(4375)
        );
    }

    #[test]
    fn test_automated_result_used_without_override() {
        assert_eq!(OverrideValues::effective_value(dec!(70), None), dec!(70));
    }
}
