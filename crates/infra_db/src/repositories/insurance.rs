//! Insurance policy repository implementation
//!
//! Database access for registered policies. One insurance code can carry
//! several policy numbers; claims later reference both by value.

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::{InsuranceId, UserId};
use sqlx::PgPool;

use crate::error::DatabaseError;

/// An insurance policy row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InsuranceRow {
    pub id: i64,
    pub user_id: i64,
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

/// Data for a new policy registration
#[derive(Debug, Clone)]
pub struct NewInsurance {
    pub user_id: UserId,
    pub insurance_code: String,
    pub policy_number: String,
    pub insurance_from: NaiveDate,
    pub insurance_to: NaiveDate,
    pub insurance_type: Option<String>,
    pub insured: Option<String>,
    pub occupation: Option<String>,
    pub insurance_details: Option<String>,
}

/// Repository for managing insurance policies
#[derive(Debug, Clone)]
pub struct InsuranceRepository {
    pool: PgPool,
}

impl InsuranceRepository {
    /// Creates a new InsuranceRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new policy and returns its identifier
    pub async fn create(&self, policy: NewInsurance) -> Result<InsuranceId, DatabaseError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO insurance (
                user_id, insurance_code, policy_number, insurance_from,
                insurance_to, insurance_type, insured, occupation,
                insurance_details
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(policy.user_id.as_i64())
        .bind(&policy.insurance_code)
        .bind(&policy.policy_number)
        .bind(policy.insurance_from)
        .bind(policy.insurance_to)
        .bind(&policy.insurance_type)
        .bind(&policy.insured)
        .bind(&policy.occupation)
        .bind(&policy.insurance_details)
        .fetch_one(&self.pool)
        .await?;

        Ok(InsuranceId::new(id))
    }

    /// Lists all policies registered by a user, newest first
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<InsuranceRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, InsuranceRow>(
            r#"
            SELECT id, user_id, insurance_code, policy_number, insurance_from,
                   insurance_to, insurance_type, insured, occupation,
                   insurance_details, status, created_at
            FROM insurance
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Lists the policy numbers carried by one insurance code for a user
    pub async fn policy_numbers(
        &self,
        user_id: UserId,
        insurance_code: &str,
    ) -> Result<Vec<String>, DatabaseError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT DISTINCT policy_number
            FROM insurance
            WHERE user_id = $1 AND insurance_code = $2
            ORDER BY policy_number
            "#,
        )
        .bind(user_id.as_i64())
        .bind(insurance_code)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(n,)| n).collect())
    }
}
