//! Infrastructure Database Layer
//!
//! This crate provides the database infrastructure for the claims-intake
//! system: PostgreSQL pool management, an error taxonomy mapped from
//! Postgres error codes, repositories per entity, and the shared
//! (database-backed) token revocation store.
//!
//! # Architecture
//!
//! The crate follows the repository pattern, providing data access
//! abstractions that hide SQL details from the domain and interface layers.
//! Uniqueness races (duplicate claims codes, usernames) resolve in the
//! database via constraints, never via application-side pre-checks.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool, ClaimsRepository};
//!
//! let pool = create_pool(DatabaseConfig::new(url)).await?;
//! let claims = ClaimsRepository::new(pool.clone());
//! ```

pub mod error;
pub mod pool;
pub mod repositories;
pub mod revocation;

pub use error::DatabaseError;
pub use pool::{create_pool, run_migrations, DatabaseConfig, DatabasePool};
pub use repositories::*;
pub use revocation::PgRevocationStore;
