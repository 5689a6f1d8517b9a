//! Reporting DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AssessmentQuery {
    pub claims_code: String,
}

#[derive(Debug, Serialize)]
pub struct AssessmentResponse {
    pub success: bool,
    pub claims_code: String,
    pub ai_decision: String,
    pub confidence: f64,
    pub crack_percent: f64,
    pub non_crack_percent: f64,
    pub user_inference: Option<String>,
    pub final_damage_area: Option<f64>,
    pub final_damage_cost: Option<Decimal>,
    pub claim_recommended: Option<Decimal>,
    pub assessed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ReportEntry {
    pub claims_code: String,
    pub insurance_code: String,
    pub policy_number: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub property_type: Option<String>,
    pub wall_type: Option<String>,
    pub damage_area: Option<f64>,
    pub rate_per_sqft: Option<Decimal>,
    pub ai_decision: Option<String>,
    pub confidence: Option<f64>,
    pub claim_recommended: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct DamageCalculationQuery {
    pub claims_id: i64,
}

#[derive(Debug, Serialize)]
pub struct DamageCalculationEntry {
    pub claims_code: String,
    pub damage_area: Option<f64>,
    pub rate_per_sqft: Option<Decimal>,
    pub claim_recommended: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct DashboardStatsResponse {
    pub success: bool,
    pub policy_count: i64,
    pub claim_count: i64,
    pub active_claim_count: i64,
    pub total_recommended: Decimal,
}
