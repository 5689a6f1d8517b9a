//! Claim Valuation Domain
//!
//! Turns measured damage into a recommended monetary value:
//!
//! - `value = damage_area x rate_per_sqft`, exact, no rounding
//! - optional currency conversion, one division, only when requested
//! - manual per-image overrides supersede automated results
//!
//! Value rows accumulate, one per finalizing submission. The aggregation
//! policy over them (the latest row wins, uniformly) is enforced where the
//! rows live, in the persistence layer's queries.

pub mod valuation;
pub mod overrides;
pub mod error;

pub use valuation::{apply_exchange_rate, compute_value, mean_confidence};
pub use overrides::OverrideValues;
pub use error::ValuationError;
