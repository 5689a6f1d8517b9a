//! Claims repository implementation
//!
//! Database access for claim intake and lookup. The policy reference on a
//! claim is held by value (insurance_code / policy_number strings), so the
//! joins here are LEFT joins and an orphaned reference yields NULL policy
//! fields rather than an error.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use core_kernel::{ClaimId, UserId};

use crate::error::DatabaseError;

/// A claim row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimRow {
    pub id: i64,
    pub user_id: i64,
    pub claims_code: String,
    pub insurance_code: String,
    pub policy_number: String,
    pub claim_details: Option<String>,
    pub time_of_loss: Option<NaiveDate>,
    pub situation_of_loss: Option<String>,
    pub cause_of_loss: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A claim joined with its policy fields and latest recommended value
///
/// Policy fields come from the newest matching insurance row, if any; the
/// recommended value is the latest `claims_value` row per the aggregation
/// policy (newest `created_at`, highest `id` as tiebreak).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimSummaryRow {
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

/// Data for a new claim (first notice of loss)
#[derive(Debug, Clone)]
pub struct NewClaim {
    pub user_id: UserId,
    pub claims_code: String,
    pub insurance_code: String,
    pub policy_number: String,
    pub claim_details: Option<String>,
    pub time_of_loss: Option<NaiveDate>,
    pub situation_of_loss: Option<String>,
    pub cause_of_loss: Option<String>,
}

/// Wizard progress counters for a claim, used to derive its submission stage
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct ClaimProgressRow {
    pub has_details: bool,
    pub image_count: i64,
    pub has_value: bool,
}

/// The latest property-details row attached to a claim
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PropertyDetailsRow {
    pub id: i64,
    pub claims_id: i64,
    pub property_type: Option<String>,
    pub wall_type: Option<String>,
    pub damage_area: f64,
    pub damage_length: f64,
    pub damage_breadth: f64,
    pub damage_height: f64,
    pub rate_per_sqft: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Repository for managing claims
#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: PgPool,
}

impl ClaimsRepository {
    /// Creates a new ClaimsRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new claim and returns its identifier
    ///
    /// Claims start `inactive`; finalization flips the status. A duplicate
    /// `claims_code` surfaces as `DatabaseError::DuplicateEntry` through the
    /// unique constraint, so two concurrent submissions of the same code
    /// resolve in the database with exactly one winner.
    pub async fn create(&self, claim: NewClaim) -> Result<ClaimId, DatabaseError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO claims (
                user_id, claims_code, insurance_code, policy_number,
                claim_details, time_of_loss, situation_of_loss, cause_of_loss
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(claim.user_id.as_i64())
        .bind(&claim.claims_code)
        .bind(&claim.insurance_code)
        .bind(&claim.policy_number)
        .bind(&claim.claim_details)
        .bind(claim.time_of_loss)
        .bind(&claim.situation_of_loss)
        .bind(&claim.cause_of_loss)
        .fetch_one(&self.pool)
        .await?;

        Ok(ClaimId::new(id))
    }

    /// Looks up a user's claim by its claims code
    pub async fn find_by_code(
        &self,
        user_id: UserId,
        claims_code: &str,
    ) -> Result<Option<ClaimRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ClaimRow>(
            r#"
            SELECT id, user_id, claims_code, insurance_code, policy_number,
                   claim_details, time_of_loss, situation_of_loss,
                   cause_of_loss, status, created_at, updated_at
            FROM claims
            WHERE user_id = $1 AND claims_code = $2
            "#,
        )
        .bind(user_id.as_i64())
        .bind(claims_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Retrieves a user's claim by code or returns NotFound
    pub async fn get_by_code(
        &self,
        user_id: UserId,
        claims_code: &str,
    ) -> Result<ClaimRow, DatabaseError> {
        self.find_by_code(user_id, claims_code)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Claim", claims_code))
    }

    /// Lists a user's claims with policy fields and latest recommended value
    pub async fn list_with_values(
        &self,
        user_id: UserId,
    ) -> Result<Vec<ClaimSummaryRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ClaimSummaryRow>(
            r#"
            SELECT c.id, c.claims_code, c.insurance_code, c.policy_number,
                   c.claim_details, c.time_of_loss, c.status, c.created_at,
                   i.insurance_type, i.insured,
                   v.claim_recommended
            FROM claims c
            LEFT JOIN LATERAL (
                SELECT insurance_type, insured
                FROM insurance
                WHERE insurance_code = c.insurance_code
                  AND policy_number = c.policy_number
                ORDER BY created_at DESC, id DESC
                LIMIT 1
            ) i ON TRUE
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

    /// Lists the claims codes a user has filed against one policy number
    pub async fn codes_for_policy(
        &self,
        user_id: UserId,
        policy_number: &str,
    ) -> Result<Vec<String>, DatabaseError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT claims_code
            FROM claims
            WHERE user_id = $1 AND policy_number = $2
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id.as_i64())
        .bind(policy_number)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(c,)| c).collect())
    }

    /// Reports how far a claim has progressed through the submission wizard
    pub async fn progress(&self, claims_id: ClaimId) -> Result<ClaimProgressRow, DatabaseError> {
        let row = sqlx::query_as::<_, ClaimProgressRow>(
            r#"
            SELECT
                EXISTS(SELECT 1 FROM claim_property_details d
                       WHERE d.claims_id = $1) AS has_details,
                (SELECT COUNT(*) FROM claim_property_image img
                 JOIN claim_property_details d ON img.claim_property_details_id = d.id
                 WHERE d.claims_id = $1) AS image_count,
                EXISTS(SELECT 1 FROM claims_value v
                       WHERE v.claims_id = $1) AS has_value
            "#,
        )
        .bind(claims_id.as_i64())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Fetches the latest property-details row attached to a claim
    pub async fn latest_property_details(
        &self,
        claims_id: ClaimId,
    ) -> Result<Option<PropertyDetailsRow>, DatabaseError> {
        let row = sqlx::query_as::<_, PropertyDetailsRow>(
            r#"
            SELECT id, claims_id, property_type, wall_type, damage_area,
                   damage_length, damage_breadth, damage_height, rate_per_sqft,
                   status, created_at
            FROM claim_property_details
            WHERE claims_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(claims_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
