//! Users repository implementation
//!
//! Database access for user accounts: registration and credential lookup.
//! Password hashes are stored opaque; hashing and verification live in
//! `domain_identity`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::DatabaseError;

/// A user account row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub mobile: Option<String>,
    pub address: Option<String>,
    pub role: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for a new user registration
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub mobile: Option<String>,
    pub address: Option<String>,
}

/// Repository for managing user accounts
#[derive(Debug, Clone)]
pub struct UsersRepository {
    pool: PgPool,
}

impl UsersRepository {
    /// Creates a new UsersRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new user and returns the stored row
    ///
    /// A username or email collision surfaces as
    /// `DatabaseError::DuplicateEntry` via the unique constraints; there is
    /// no pre-check, the constraint is the arbiter.
    pub async fn create(&self, user: NewUser) -> Result<UserRow, DatabaseError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, email, password_hash, name, mobile, address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, username, email, password_hash, name, mobile, address,
                      role, status, created_at, updated_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(&user.mobile)
        .bind(&user.address)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Looks up a user by username
    ///
    /// Returns `Ok(None)` for an unknown username so the caller can
    /// distinguish "no such account" from a failed query.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<UserRow>, DatabaseError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, name, mobile, address,
                   role, status, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Retrieves a user by username or returns NotFound
    pub async fn get_by_username(&self, username: &str) -> Result<UserRow, DatabaseError> {
        self.find_by_username(username)
            .await?
            .ok_or_else(|| DatabaseError::not_found("User", username))
    }
}
