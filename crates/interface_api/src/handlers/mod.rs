//! Request handlers

pub mod auth;
pub mod claims;
pub mod detection;
pub mod health;
pub mod insurance;
pub mod reports;

use std::collections::HashMap;

use axum::extract::Multipart;
use domain_identity::TokenClaims;
use infra_db::{UserRow, UsersRepository};

use crate::error::ApiError;
use crate::AppState;

/// Resolves the authenticated user's row from the token subject
///
/// A token can outlive its account; a deleted user's valid token must not
/// reach the handlers as a ghost identity.
pub(crate) async fn current_user(
    state: &AppState,
    claims: &TokenClaims,
) -> Result<UserRow, ApiError> {
    UsersRepository::new(state.pool.clone())
        .find_by_username(&claims.sub)
        .await?
        .ok_or(ApiError::Unauthorized)
}

/// A fully read multipart submission: text fields plus uploaded files
pub(crate) struct MultipartForm {
    pub fields: HashMap<String, String>,
    /// (original filename, bytes), in submission order
    pub files: Vec<(String, Vec<u8>)>,
}

impl MultipartForm {
    pub fn require(&self, field: &str) -> Result<&str, ApiError> {
        self.fields
            .get(field)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ApiError::missing_field(field))
    }

    pub fn optional(&self, field: &str) -> Option<String> {
        self.fields
            .get(field)
            .filter(|v| !v.trim().is_empty())
            .cloned()
    }

    pub fn parse_f64(&self, field: &str) -> Result<f64, ApiError> {
        self.require(field)?
            .parse()
            .map_err(|_| ApiError::Validation(format!("field '{}' must be a number", field)))
    }

    pub fn parse_f64_or(&self, field: &str, default: f64) -> Result<f64, ApiError> {
        match self.optional(field) {
            Some(v) => v
                .parse()
                .map_err(|_| ApiError::Validation(format!("field '{}' must be a number", field))),
            None => Ok(default),
        }
    }
}

/// Drains a multipart body into text fields and file parts
pub(crate) async fn read_multipart(mut multipart: Multipart) -> Result<MultipartForm, ApiError> {
    let mut fields = HashMap::new();
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        match field.file_name().map(str::to_string) {
            Some(filename) => {
                let bytes = field.bytes().await?;
                files.push((filename, bytes.to_vec()));
            }
            None => {
                if let Some(name) = field.name().map(str::to_string) {
                    fields.insert(name, field.text().await?);
                }
            }
        }
    }

    Ok(MultipartForm { fields, files })
}
