//! Core Kernel - Foundational types for the claims-intake system
//!
//! Strongly-typed row identifiers shared by the domain and infrastructure
//! crates. Each identifier is a transparent `i64` newtype so it serializes
//! as a plain number while preventing accidental mixing in code.

pub mod identifiers;

pub use identifiers::{
    UserId, InsuranceId, ClaimId, PropertyDetailsId, PropertyImageId,
    AssessmentId, ClaimValueId, OverrideId,
};
