//! Damage Assessment Domain
//!
//! Two independent analyses run over every uploaded photograph:
//!
//! - **Classification** ([`DamageClassifier`]): is there a crack, and with
//!   what confidence. The classifier is an injectable boundary; the bundled
//!   [`IntensityClassifier`] is a reference implementation so the system
//!   runs without external model weights, and any model satisfying the
//!   contract substitutes without touching orchestration.
//! - **Measurement** ([`GeometricMeasurer`]): physical crack length, width,
//!   and area estimated from pixels via a known pixel-to-length scale.
//!   Measurement soft-fails: an image with no measurable feature yields a
//!   zeroed result with a failure status, never an error, so the pipeline
//!   can continue with classification and persistence.
//!
//! Both consume the same decoded image and have no side effects.

pub mod decode;
pub mod classifier;
pub mod measurer;
pub mod error;

pub use decode::decode_image;
pub use classifier::{Classification, DamageClassifier, IntensityClassifier};
pub use measurer::{ContourMeasurer, GeometricMeasurer, Measurement, MeasurementStatus};
pub use error::AssessmentError;
