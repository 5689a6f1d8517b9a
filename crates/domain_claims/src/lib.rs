//! Claims Domain
//!
//! This crate models the claim filing lifecycle. A claim is created against
//! a policy referenced by value (insurance code and policy number strings),
//! then moves through an implicit submission pipeline:
//!
//! ```text
//! created -> details-pending -> images-submitted -> finalized
//! ```
//!
//! Transitions are driven by distinct submission endpoints; ordering is not
//! strictly enforced and a combined submission may jump straight to
//! finalized. All paths converge on the same persisted data model.

pub mod claim;
pub mod policy;
pub mod error;

pub use claim::{validate_claims_code, ClaimStatus, SubmissionStage};
pub use policy::{PolicyRef, PolicyStatus};
pub use error::ClaimError;
