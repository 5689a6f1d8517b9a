//! Insurance policy DTOs

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::InsuranceId;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePolicyRequest {
    #[validate(length(min = 1, max = 64))]
    pub insurance_code: String,
    #[validate(length(min = 1, max = 64))]
    pub policy_number: String,
    pub insurance_from: NaiveDate,
    pub insurance_to: NaiveDate,
    pub insurance_type: Option<String>,
    pub insured: Option<String>,
    pub occupation: Option<String>,
    pub insurance_details: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PolicyResponse {
    pub id: i64,
    pub insurance_code: String,
    pub policy_number: String,
    pub insurance_from: NaiveDate,
    pub insurance_to: NaiveDate,
    pub insurance_type: Option<String>,
    pub insured: Option<String>,
    pub occupation: Option<String>,
    pub insurance_details: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub message: String,
    pub id: InsuranceId,
}

#[derive(Debug, Deserialize)]
pub struct PolicyNumbersQuery {
    pub insurance_code: String,
}

#[derive(Debug, Serialize)]
pub struct PolicyNumbersResponse {
    pub success: bool,
    pub insurance_code: String,
    pub policy_numbers: Vec<String>,
}
