//! Claims DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClaimRequest {
    #[validate(length(min = 1, max = 64))]
    pub claims_code: String,
    #[validate(length(min = 1, max = 64))]
    pub insurance_code: String,
    #[validate(length(min = 1, max = 64))]
    pub policy_number: String,
    pub claim_details: Option<String>,
    pub time_of_loss: Option<NaiveDate>,
    pub situation_of_loss: Option<String>,
    pub cause_of_loss: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClaimSummary {
    pub id: i64,
    pub claims_code: String,
    pub insurance_code: String,
    pub policy_number: String,
    pub claim_details: Option<String>,
    pub time_of_loss: Option<NaiveDate>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub insurance_type: Option<String>,
    pub insured: Option<String>,
    pub claim_recommended: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct ClaimsCodesQuery {
    pub policy_number: String,
}

#[derive(Debug, Serialize)]
pub struct ClaimsCodesResponse {
    pub success: bool,
    pub policy_number: String,
    pub claims_codes: Vec<String>,
}

/// Wizard details step: property information plus the numbers the value is
/// computed from
#[derive(Debug, Deserialize, Validate)]
pub struct PropertyDetailsRequest {
    #[validate(length(min = 1, max = 64))]
    pub claims_code: String,
    pub property_type: Option<String>,
    pub wall_type: Option<String>,
    pub damage_area: f64,
    pub damage_length: f64,
    pub damage_breadth: f64,
    #[serde(default = "default_damage_height")]
    pub damage_height: f64,
    pub rate_per_sqft: Decimal,
    /// Apply the configured exchange rate to the computed value
    #[serde(default)]
    pub convert_currency: bool,
}

fn default_damage_height() -> f64 {
    1.0
}

#[derive(Debug, Serialize)]
pub struct PropertySubmissionResponse {
    pub success: bool,
    pub message: String,
    pub claims_code: String,
    pub claim_recommended: Decimal,
    /// Submission pipeline stage after this step
    pub stage: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewRequest {
    #[validate(length(min = 1, max = 64))]
    pub claims_code: String,
    #[validate(length(min = 1, max = 256))]
    pub user_inference: String,
    pub final_damage_area: f64,
    pub final_damage_cost: Decimal,
}

#[derive(Debug, Deserialize, Validate)]
pub struct OverrideRequest {
    #[validate(length(min = 1, max = 64))]
    pub claims_code: String,
    #[validate(range(min = 0))]
    pub image_index: i32,
    pub image_filename: Option<String>,
    pub ai_decision: Option<String>,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub length_ft: f64,
    #[serde(default)]
    pub width_ft: f64,
    #[serde(default)]
    pub area_sqft: f64,
    #[serde(default)]
    pub claim_recommended: Decimal,
    #[serde(default)]
    pub crack_detected: bool,
}

/// Per-image outcome reported by image-accepting endpoints
#[derive(Debug, Serialize)]
pub struct ImageResult {
    pub filename: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stored_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crack_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_crack_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_ft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_ft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ImageResult {
    /// A successful per-image outcome
    pub fn from_analysis(
        analysis: &crate::pipeline::ImageAnalysis,
        stored_name: Option<String>,
    ) -> Self {
        let c = &analysis.classification;
        let m = &analysis.measurement;
        Self {
            filename: analysis.original_name.clone(),
            success: true,
            stored_name,
            predicted_class: Some(c.predicted_class.clone()),
            confidence: Some(c.confidence),
            crack_percent: Some(c.crack_percent),
            non_crack_percent: Some(c.non_crack_percent),
            length_ft: Some(m.length_ft),
            width_ft: Some(m.width_ft),
            area_sqft: Some(m.area_sqft),
            measurement_status: Some(format!("{:?}", m.status).to_lowercase()),
            error: None,
        }
    }

    /// A recorded per-image failure
    pub fn failed(failure: &crate::pipeline::ImageFailure) -> Self {
        Self {
            filename: failure.original_name.clone(),
            success: false,
            stored_name: None,
            predicted_class: None,
            confidence: None,
            crack_percent: None,
            non_crack_percent: None,
            length_ft: None,
            width_ft: None,
            area_sqft: None,
            measurement_status: None,
            error: Some(failure.error.clone()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitFinalResponse {
    pub success: bool,
    pub message: String,
    pub claims_code: String,
    pub total_images: usize,
    pub processed_images: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_decision: Option<String>,
    pub claim_recommended: Decimal,
    pub results: Vec<ImageResult>,
}

#[derive(Debug, Serialize)]
pub struct WizardImageResponse {
    pub success: bool,
    pub message: String,
    pub claims_code: String,
    /// Submission pipeline stage after this step
    pub stage: String,
    pub result: ImageResult,
}
