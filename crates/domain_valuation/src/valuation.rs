//! Recommended value computation and aggregation

use rust_decimal::Decimal;

use crate::error::ValuationError;

/// Computes the recommended claim value
///
/// Exact product, no floor, ceiling, or rounding. Rounding is a
/// presentation concern.
pub fn compute_value(damage_area: Decimal, rate_per_sqft: Decimal) -> Decimal {
    damage_area * rate_per_sqft
}

/// Converts a value into the target currency
///
/// Applied at most once per value, and only when conversion is explicitly
/// requested.
pub fn apply_exchange_rate(
    value: Decimal,
    exchange_rate: Decimal,
) -> Result<Decimal, ValuationError> {
    if exchange_rate <= Decimal::ZERO {
        return Err(ValuationError::InvalidExchangeRate(exchange_rate));
    }
    Ok(value / exchange_rate)
}

/// Mean classifier confidence over successfully classified images
///
/// Failed images are excluded before this is called; an empty slice means
/// no assessment row should be written at all.
pub fn mean_confidence(confidences: &[f64]) -> Option<f64> {
    if confidences.is_empty() {
        return None;
    }
    Some(confidences.iter().sum::<f64>() / confidences.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_value_is_exact_product() {
        assert_eq!(compute_value(dec!(10), dec!(350)), dec!(3500));
        assert_eq!(compute_value(dec!(0.33), dec!(350)), dec!(115.50));
        assert_eq!(compute_value(dec!(0), dec!(350)), dec!(0));
    }

    #[test]
    fn test_exchange_rate_divides_once() {
        let value = compute_value(dec!(10), dec!(350));
        assert_eq!(apply_exchange_rate(value, dec!(88)).unwrap(), dec!(3500) / dec!(88));
    }

    #[test]
    fn test_exchange_rate_must_be_positive() {
        assert!(apply_exchange_rate(dec!(100), dec!(0)).is_err());
        assert!(apply_exchange_rate(dec!(100), dec!(-1)).is_err());
    }

    #[test]
    fn test_mean_confidence() {
        assert_eq!(mean_confidence(&[90.0, 70.0]), Some(80.0));
        assert_eq!(mean_confidence(&[55.5]), Some(55.5));
        assert_eq!(mean_confidence(&[]), None);
    }
}
