//! Test Utilities Crate
//!
//! Provides shared test infrastructure for the claims-intake test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for common entities
//! - `images`: Synthetic photographs for classifier/measurer tests

pub mod fixtures;
pub mod images;

pub use fixtures::*;
pub use images::*;
