//! Submission repository implementation
//!
//! Writes produced by the image-analysis pipeline: property details, image
//! rows, the aggregate assessment, the recommended value, and the status
//! flip to `active`. The combined submission persists all of these in one
//! transaction; every method here takes the caller's transaction so a
//! failure anywhere rolls the whole operation back.

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

use core_kernel::{AssessmentId, ClaimId, ClaimValueId, PropertyDetailsId, PropertyImageId};

use crate::error::DatabaseError;

/// Property details captured with a submission
#[derive(Debug, Clone)]
pub struct NewPropertyDetails {
    pub claims_id: ClaimId,
    pub property_type: Option<String>,
    pub wall_type: Option<String>,
    pub damage_area: f64,
    pub damage_length: f64,
    pub damage_breadth: f64,
    pub damage_height: f64,
    pub rate_per_sqft: Decimal,
}

/// A stored image file attached to a property-details record
#[derive(Debug, Clone)]
pub struct NewPropertyImage {
    pub claim_property_details_id: PropertyDetailsId,
    pub file_name: String,
    pub file_location: Option<String>,
    pub file_format: Option<String>,
    pub file_desc: Option<String>,
}

/// The aggregate assessment for a group of processed images
#[derive(Debug, Clone)]
pub struct NewAssessment {
    pub claims_id: ClaimId,
    pub ai_decision: String,
    pub confidence: f64,
    pub crack_percent: f64,
    pub non_crack_percent: f64,
}

/// Repository for pipeline submission writes
#[derive(Debug, Clone)]
pub struct SubmissionRepository {
    pool: PgPool,
}

impl SubmissionRepository {
    /// Creates a new SubmissionRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a transaction for a multi-table submission
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, DatabaseError> {
        Ok(self.pool.begin().await?)
    }

    /// Inserts a property-details row, returning its identifier
    pub async fn insert_property_details(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        details: &NewPropertyDetails,
    ) -> Result<PropertyDetailsId, DatabaseError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO claim_property_details (
                claims_id, property_type, wall_type, damage_area,
                damage_length, damage_breadth, damage_height, rate_per_sqft
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(details.claims_id.as_i64())
        .bind(&details.property_type)
        .bind(&details.wall_type)
        .bind(details.damage_area)
        .bind(details.damage_length)
        .bind(details.damage_breadth)
        .bind(details.damage_height)
        .bind(details.rate_per_sqft)
        .fetch_one(&mut **tx)
        .await?;

        Ok(PropertyDetailsId::new(id))
    }

    /// Updates an existing property-details row in place
    ///
    /// Used by the wizard details step, which runs after the image step has
    /// already created the row.
    pub async fn update_property_details(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        details_id: PropertyDetailsId,
        details: &NewPropertyDetails,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            UPDATE claim_property_details
            SET property_type = $2, wall_type = $3, damage_area = $4,
                damage_length = $5, damage_breadth = $6, damage_height = $7,
                rate_per_sqft = $8
            WHERE id = $1
            "#,
        )
        .bind(details_id.as_i64())
        .bind(&details.property_type)
        .bind(&details.wall_type)
        .bind(details.damage_area)
        .bind(details.damage_length)
        .bind(details.damage_breadth)
        .bind(details.damage_height)
        .bind(details.rate_per_sqft)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Inserts a stored-image row, returning its identifier
    pub async fn insert_image(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        image: &NewPropertyImage,
    ) -> Result<PropertyImageId, DatabaseError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO claim_property_image (
                claim_property_details_id, file_name, file_location,
                file_format, file_desc
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(image.claim_property_details_id.as_i64())
        .bind(&image.file_name)
        .bind(&image.file_location)
        .bind(&image.file_format)
        .bind(&image.file_desc)
        .fetch_one(&mut **tx)
        .await?;

        Ok(PropertyImageId::new(id))
    }

    /// Inserts the aggregate assessment row, returning its identifier
    pub async fn insert_assessment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        assessment: &NewAssessment,
    ) -> Result<AssessmentId, DatabaseError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO claim_property_assessment (
                claims_id, ai_decision, confidence, crack_percent,
                non_crack_percent
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(assessment.claims_id.as_i64())
        .bind(&assessment.ai_decision)
        .bind(assessment.confidence)
        .bind(assessment.crack_percent)
        .bind(assessment.non_crack_percent)
        .fetch_one(&mut **tx)
        .await?;

        Ok(AssessmentId::new(id))
    }

    /// Appends a recommended-value row for a claim
    ///
    /// Rows accumulate; readers take the latest per the aggregation policy.
    pub async fn insert_claim_value(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        claims_id: ClaimId,
        claims_code: &str,
        claim_recommended: Decimal,
    ) -> Result<ClaimValueId, DatabaseError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO claims_value (claims_id, claims_code, claim_recommended)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(claims_id.as_i64())
        .bind(claims_code)
        .bind(claim_recommended)
        .fetch_one(&mut **tx)
        .await?;

        Ok(ClaimValueId::new(id))
    }

    /// Marks a claim active after finalization
    pub async fn activate_claim(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        claims_id: ClaimId,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            UPDATE claims
            SET status = 'active', updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(claims_id.as_i64())
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Records a human review against the latest assessment row for a claim
    ///
    /// Returns NotFound when the claim has no assessment to review.
    pub async fn record_review(
        &self,
        claims_id: ClaimId,
        user_inference: &str,
        final_damage_area: f64,
        final_damage_cost: Decimal,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE claim_property_assessment
            SET user_inference = $2, final_damage_area = $3,
                final_damage_cost = $4
            WHERE id = (
                SELECT id FROM claim_property_assessment
                WHERE claims_id = $1
                ORDER BY created_at DESC, id DESC
                LIMIT 1
            )
            "#,
        )
        .bind(claims_id.as_i64())
        .bind(user_inference)
        .bind(final_damage_area)
        .bind(final_damage_cost)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Assessment for claim", claims_id.as_i64()));
        }
        Ok(())
    }
}
