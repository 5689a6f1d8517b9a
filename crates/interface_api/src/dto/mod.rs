//! Request/response data transfer objects

pub mod auth;
pub mod claims;
pub mod detection;
pub mod insurance;
pub mod reports;

use serde::Serialize;

/// Generic acknowledgement body for mutating endpoints
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
