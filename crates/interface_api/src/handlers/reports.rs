//! Reporting and dashboard handlers
//!
//! Read models over the accumulated claim data. The recommended value in
//! every response is the claim's latest value row, and the dashboard total
//! is the sum of those per-claim latest values.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use core_kernel::{ClaimId, UserId};
use domain_identity::TokenClaims;
use domain_valuation::OverrideValues;
use infra_db::{OverridesRepository, ReportsRepository};
use rust_decimal::Decimal;

use crate::dto::reports::{
    AssessmentQuery, AssessmentResponse, DamageCalculationEntry, DamageCalculationQuery,
    DashboardStatsResponse, ReportEntry,
};
use crate::error::ApiError;
use crate::handlers::current_user;
use crate::AppState;

/// Fetches the latest assessment for one of the user's claims
///
/// Manual overrides supersede the automated result: when the claim carries
/// overrides, the most recently saved one provides the reported
/// recommended value.
pub async fn assessment(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Query(query): Query<AssessmentQuery>,
) -> Result<Json<AssessmentResponse>, ApiError> {
    let user = current_user(&state, &claims).await?;
    let row = ReportsRepository::new(state.pool.clone())
        .assessment(UserId::new(user.id), &query.claims_code)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "No assessment found for claim '{}'",
                query.claims_code
            ))
        })?;

    let overrides = OverridesRepository::new(state.pool.clone())
        .list_for_claim(ClaimId::new(row.claims_id))
        .await?;
    let manual = overrides
        .into_iter()
        .max_by_key(|o| o.updated_at)
        .map(|o| OverrideValues {
            image_filename: o.image_filename,
            ai_decision: o.ai_decision,
            confidence: o.confidence,
            length_ft: o.length_ft,
            width_ft: o.width_ft,
            area_sqft: o.area_sqft,
            claim_recommended: o.claim_recommended,
            crack_detected: o.crack_detected,
        });
    let claim_recommended = row
        .claim_recommended
        .map(|v| OverrideValues::effective_value(v, manual.as_ref()));

    Ok(Json(AssessmentResponse {
        success: true,
        claims_code: row.claims_code,
        ai_decision: row.ai_decision,
        confidence: row.confidence,
        crack_percent: row.crack_percent,
        non_crack_percent: row.non_crack_percent,
        user_inference: row.user_inference,
        final_damage_area: row.final_damage_area,
        final_damage_cost: row.final_damage_cost,
        claim_recommended,
        assessed_at: row.assessed_at,
    }))
}

/// Builds the joined claims report for the user
pub async fn report_rows(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
) -> Result<Json<Vec<ReportEntry>>, ApiError> {
    let user = current_user(&state, &claims).await?;
    let rows = ReportsRepository::new(state.pool.clone())
        .report_rows(UserId::new(user.id))
        .await?;

    Ok(Json(
        rows.into_iter()
            .map(|r| ReportEntry {
                claims_code: r.claims_code,
                insurance_code: r.insurance_code,
                policy_number: r.policy_number,
                status: r.status,
                created_at: r.created_at,
                property_type: r.property_type,
                wall_type: r.wall_type,
                damage_area: r.damage_area,
                rate_per_sqft: r.rate_per_sqft,
                ai_decision: r.ai_decision,
                confidence: r.confidence,
                claim_recommended: r.claim_recommended,
            })
            .collect(),
    ))
}

/// Lists the recommended-value history for one of the user's claims
pub async fn damage_calculation(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Query(query): Query<DamageCalculationQuery>,
) -> Result<Json<Vec<DamageCalculationEntry>>, ApiError> {
    let user = current_user(&state, &claims).await?;
    let rows = ReportsRepository::new(state.pool.clone())
        .damage_calculation(UserId::new(user.id), ClaimId::new(query.claims_id))
        .await?;

    Ok(Json(
        rows.into_iter()
            .map(|r| DamageCalculationEntry {
                claims_code: r.claims_code,
                damage_area: r.damage_area,
                rate_per_sqft: r.rate_per_sqft,
                claim_recommended: r.claim_recommended,
                created_at: r.created_at,
            })
            .collect(),
    ))
}

/// Per-user dashboard counters and value total
pub async fn dashboard_stats(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
) -> Result<Json<DashboardStatsResponse>, ApiError> {
    let user = current_user(&state, &claims).await?;
    let row = ReportsRepository::new(state.pool.clone())
        .dashboard_stats(UserId::new(user.id))
        .await?;

    Ok(Json(DashboardStatsResponse {
        success: true,
        policy_count: row.policy_count,
        claim_count: row.claim_count,
        active_claim_count: row.active_claim_count,
        total_recommended: row.total_recommended.unwrap_or(Decimal::ZERO),
    }))
}
