//! Valuation domain errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during valuation
#[derive(Debug, Error)]
pub enum ValuationError {
    #[error("Invalid exchange rate: {0}")]
    InvalidExchangeRate(Decimal),
}
