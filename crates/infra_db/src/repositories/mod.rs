//! Repository implementations for claims-intake entities
//!
//! Each repository wraps the shared pool and owns the SQL for one slice of
//! the schema. Reads run against the pool; the multi-table submission
//! writes take a caller-owned transaction (see [`submission`]).

pub mod claims;
pub mod insurance;
pub mod overrides;
pub mod reports;
pub mod submission;
pub mod users;

pub use claims::{
    ClaimProgressRow, ClaimRow, ClaimSummaryRow, ClaimsRepository, NewClaim, PropertyDetailsRow,
};
pub use insurance::{InsuranceRepository, InsuranceRow, NewInsurance};
pub use overrides::{NewOverride, OverrideRow, OverridesRepository};
pub use reports::{
    AssessmentReportRow, DamageCalculationRow, DashboardRow, ReportRow, ReportsRepository,
};
pub use submission::{NewAssessment, NewPropertyDetails, NewPropertyImage, SubmissionRepository};
pub use users::{NewUser, UserRow, UsersRepository};
