//! Assessment domain errors

use thiserror::Error;

/// Errors that can occur during image assessment
///
/// Measurement has no error variant on purpose: it soft-fails through
/// [`Measurement::failure`](crate::measurer::Measurement::failure).
#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("Image decode failed: {0}")]
    Decode(String),

    #[error("Classification failed: {0}")]
    Classification(String),
}
