//! Manual override repository implementation
//!
//! Per-image manual corrections keyed by (claims_id, image_index). The
//! unique constraint drives an upsert: saving twice for the same slot
//! rewrites the row in place, last write wins.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use core_kernel::{ClaimId, OverrideId};

use crate::error::DatabaseError;

/// A stored manual override row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OverrideRow {
    pub id: i64,
    pub claims_id: i64,
    pub image_index: i32,
    pub image_filename: Option<String>,
    pub ai_decision: Option<String>,
    pub confidence: f64,
    pub length_ft: f64,
    pub width_ft: f64,
    pub area_sqft: f64,
    pub claim_recommended: Decimal,
    pub crack_detected: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Values to upsert for one image slot
#[derive(Debug, Clone)]
pub struct NewOverride {
    pub claims_id: ClaimId,
    pub image_index: i32,
    pub image_filename: Option<String>,
    pub ai_decision: Option<String>,
    pub confidence: f64,
    pub length_ft: f64,
    pub width_ft: f64,
    pub area_sqft: f64,
    pub claim_recommended: Decimal,
    pub crack_detected: bool,
}

/// Repository for manual per-image overrides
#[derive(Debug, Clone)]
pub struct OverridesRepository {
    pool: PgPool,
}

impl OverridesRepository {
    /// Creates a new OverridesRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts or replaces the override for one (claim, image index) slot,
    /// returning the row identifier
    pub async fn upsert(&self, values: NewOverride) -> Result<OverrideId, DatabaseError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO claim_property_image_override (
                claims_id, image_index, image_filename, ai_decision,
                confidence, length_ft, width_ft, area_sqft,
                claim_recommended, crack_detected
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (claims_id, image_index) DO UPDATE SET
                image_filename = EXCLUDED.image_filename,
                ai_decision = EXCLUDED.ai_decision,
                confidence = EXCLUDED.confidence,
                length_ft = EXCLUDED.length_ft,
                width_ft = EXCLUDED.width_ft,
                area_sqft = EXCLUDED.area_sqft,
                claim_recommended = EXCLUDED.claim_recommended,
                crack_detected = EXCLUDED.crack_detected,
                updated_at = now()
            RETURNING id
            "#,
        )
        .bind(values.claims_id.as_i64())
        .bind(values.image_index)
        .bind(&values.image_filename)
        .bind(&values.ai_decision)
        .bind(values.confidence)
        .bind(values.length_ft)
        .bind(values.width_ft)
        .bind(values.area_sqft)
        .bind(values.claim_recommended)
        .bind(values.crack_detected)
        .fetch_one(&self.pool)
        .await?;

        Ok(OverrideId::new(id))
    }

    /// Lists the overrides recorded for a claim, ordered by image index
    pub async fn list_for_claim(&self, claims_id: ClaimId) -> Result<Vec<OverrideRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, OverrideRow>(
            r#"
            SELECT id, claims_id, image_index, image_filename, ai_decision,
                   confidence, length_ft, width_ft, area_sqft,
                   claim_recommended, crack_detected, created_at, updated_at
            FROM claim_property_image_override
            WHERE claims_id = $1
            ORDER BY image_index
            "#,
        )
        .bind(claims_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
