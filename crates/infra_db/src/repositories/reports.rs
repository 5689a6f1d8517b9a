//! Reporting repository implementation
//!
//! Joined read models: assessment lookup, the per-user claims report, the
//! damage-calculation breakdown, and the dashboard counters. Every query
//! that touches `claims_value` takes the latest row per claim (newest
//! `created_at`, highest `id` as tiebreak); the dashboard total is the sum
//! of those per-claim latest values.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use core_kernel::{ClaimId, UserId};

use crate::error::DatabaseError;

/// Latest assessment (and recommended value) for a claim
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AssessmentReportRow {
    pub claims_id: i64,
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

/// One row of the per-user claims report
///
/// Details and assessment fields are NULL for claims that have not reached
/// those stages yet.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReportRow {
    pub claims_id: i64,
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

/// One recommended-value row with the inputs that produced it
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DamageCalculationRow {
    pub value_id: i64,
    pub claims_code: String,
    pub damage_area: Option<f64>,
    pub rate_per_sqft: Option<Decimal>,
    pub claim_recommended: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Per-user dashboard counters
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DashboardRow {
    pub policy_count: i64,
    pub claim_count: i64,
    pub active_claim_count: i64,
    pub total_recommended: Option<Decimal>,
}

/// Repository for joined reporting reads
#[derive(Debug, Clone)]
pub struct ReportsRepository {
    pool: PgPool,
}

impl ReportsRepository {
    /// Creates a new ReportsRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches the latest assessment for a user's claim, if any
    pub async fn assessment(
        &self,
        user_id: UserId,
        claims_code: &str,
    ) -> Result<Option<AssessmentReportRow>, DatabaseError> {
        let row = sqlx::query_as::<_, AssessmentReportRow>(
            r#"
            SELECT c.id AS claims_id, c.claims_code,
                   a.ai_decision, a.confidence, a.crack_percent,
                   a.non_crack_percent, a.user_inference, a.final_damage_area,
                   a.final_damage_cost,
                   v.claim_recommended,
                   a.created_at AS assessed_at
            FROM claims c
            JOIN LATERAL (
                SELECT *
                FROM claim_property_assessment
                WHERE claims_id = c.id
                ORDER BY created_at DESC, id DESC
                LIMIT 1
            ) a ON TRUE
            LEFT JOIN LATERAL (
                SELECT claim_recommended
                FROM claims_value
                WHERE claims_id = c.id
                ORDER BY created_at DESC, id DESC
                LIMIT 1
            ) v ON TRUE
            WHERE c.user_id = $1 AND c.claims_code = $2
            "#,
        )
        .bind(user_id.as_i64())
        .bind(claims_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Builds the joined claims report for a user, newest claim first
    pub async fn report_rows(&self, user_id: UserId) -> Result<Vec<ReportRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT c.id AS claims_id, c.claims_code, c.insurance_code,
                   c.policy_number, c.status, c.created_at,
                   d.property_type, d.wall_type, d.damage_area, d.rate_per_sqft,
                   a.ai_decision, a.confidence,
                   v.claim_recommended
            FROM claims c
            LEFT JOIN LATERAL (
                SELECT property_type, wall_type, damage_area, rate_per_sqft
                FROM claim_property_details
                WHERE claims_id = c.id
                ORDER BY created_at DESC, id DESC
                LIMIT 1
            ) d ON TRUE
            LEFT JOIN LATERAL (
                SELECT ai_decision, confidence
                FROM claim_property_assessment
                WHERE claims_id = c.id
                ORDER BY created_at DESC, id DESC
                LIMIT 1
            ) a ON TRUE
            LEFT JOIN LATERAL (
                SELECT claim_recommended
                FROM claims_value
                WHERE claims_id = c.id
                ORDER BY created_at DESC, id DESC
                LIMIT 1
            ) v ON TRUE
            WHERE c.user_id = $1
            ORDER BY c.created_at DESC, c.id DESC
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Lists the recommended-value history for one of the user's claims
    pub async fn damage_calculation(
        &self,
        user_id: UserId,
        claims_id: ClaimId,
    ) -> Result<Vec<DamageCalculationRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, DamageCalculationRow>(
            r#"
            SELECT v.id AS value_id, v.claims_code,
                   d.damage_area, d.rate_per_sqft,
                   v.claim_recommended, v.created_at
            FROM claims_value v
            JOIN claims c ON c.id = v.claims_id
            LEFT JOIN LATERAL (
                SELECT damage_area, rate_per_sqft
                FROM claim_property_details
                WHERE claims_id = c.id
                ORDER BY created_at DESC, id DESC
                LIMIT 1
            ) d ON TRUE
            WHERE c.user_id = $1 AND v.claims_id = $2
            ORDER BY v.created_at DESC, v.id DESC
            "#,
        )
        .bind(user_id.as_i64())
        .bind(claims_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Computes per-user dashboard counters
    ///
    /// Counts come from subselects rather than joins so a claim with many
    /// value rows is never counted more than once.
    pub async fn dashboard_stats(&self, user_id: UserId) -> Result<DashboardRow, DatabaseError> {
        let row = sqlx::query_as::<_, DashboardRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM insurance WHERE user_id = $1)
                    AS policy_count,
                (SELECT COUNT(*) FROM claims WHERE user_id = $1)
                    AS claim_count,
                (SELECT COUNT(*) FROM claims
                 WHERE user_id = $1 AND status = 'active')
                    AS active_claim_count,
                (SELECT SUM(latest.claim_recommended)
                 FROM claims c
                 JOIN LATERAL (
                     SELECT claim_recommended
                     FROM claims_value
                     WHERE claims_id = c.id
                     ORDER BY created_at DESC, id DESC
                     LIMIT 1
                 ) latest ON TRUE
                 WHERE c.user_id = $1)
                    AS total_recommended
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}
