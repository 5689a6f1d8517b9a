//! API error handling
//!
//! One taxonomy for every handler. Database and internal failures are
//! logged server-side with their cause and surface to the client as a
//! generic message.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain_assessment::AssessmentError;
use domain_claims::ClaimError;
use domain_identity::IdentityError;
use domain_valuation::ValuationError;
use infra_db::DatabaseError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Upstream dependency failed: {0}")]
    Dependency(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// A validation error naming the missing field
    pub fn missing_field(field: &str) -> Self {
        ApiError::Validation(format!("missing required field '{}'", field))
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Unauthorized".to_string(),
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Dependency(msg) => (StatusCode::BAD_GATEWAY, "dependency_error", msg.clone()),
            ApiError::Database(msg) => {
                error!(cause = %msg, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::Internal(msg) => {
                error!(cause = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            success: false,
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ApiError::NotFound(msg),
            DatabaseError::DuplicateEntry(msg) => ApiError::Conflict(msg),
            DatabaseError::ForeignKeyViolation(msg) => {
                ApiError::Validation(format!("referenced record does not exist: {}", msg))
            }
            other => ApiError::Database(other.to_string()),
        }
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::InvalidCredentials => ApiError::Unauthorized,
            IdentityError::AccountInactive => {
                ApiError::Forbidden("Account is inactive".to_string())
            }
            IdentityError::TokenInvalid
            | IdentityError::TokenExpired
            | IdentityError::TokenRevoked => ApiError::Unauthorized,
            IdentityError::Hashing(msg) | IdentityError::Store(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::MissingField(field) => ApiError::missing_field(field),
            ClaimError::InvalidClaimsCode(msg) => ApiError::Validation(msg),
            ClaimError::ClaimNotFound(code) => {
                ApiError::NotFound(format!("Claim '{}' not found", code))
            }
            ClaimError::DuplicateClaimsCode(code) => {
                ApiError::Conflict(format!("Claim '{}' already exists", code))
            }
        }
    }
}

impl From<AssessmentError> for ApiError {
    fn from(err: AssessmentError) -> Self {
        match err {
            AssessmentError::Decode(msg) => {
                ApiError::Validation(format!("invalid image: {}", msg))
            }
            AssessmentError::Classification(msg) => ApiError::Dependency(msg),
        }
    }
}

impl From<ValuationError> for ApiError {
    fn from(err: ValuationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::Validation(format!("malformed multipart body: {}", err))
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_maps_to_conflict() {
        let err = ApiError::from(DatabaseError::duplicate("Claim", "claims_code", "CLM001"));
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn test_inactive_account_maps_to_forbidden() {
        let err = ApiError::from(IdentityError::AccountInactive);
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[test]
    fn test_classifier_failure_maps_to_dependency() {
        let err = ApiError::from(AssessmentError::Classification("model offline".into()));
        assert!(matches!(err, ApiError::Dependency(_)));
    }
}
