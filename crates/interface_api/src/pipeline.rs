//! Image analysis orchestration
//!
//! The per-image pipeline shared by the combined submission, the wizard
//! image step, and the stateless detection endpoints: decode, classify,
//! measure. Batch paths record a per-image failure and continue, so
//! `processed < total` is a valid outcome; single-image paths propagate
//! the failure and the request fails whole.

use domain_assessment::{
    decode_image, Classification, DamageClassifier, GeometricMeasurer, Measurement,
};
use domain_valuation::mean_confidence;
use tracing::warn;

use crate::error::ApiError;

/// Successful analysis of one image
#[derive(Debug, Clone)]
pub struct ImageAnalysis {
    pub original_name: String,
    pub classification: Classification,
    pub measurement: Measurement,
}

/// A recorded per-image failure within a batch
#[derive(Debug, Clone)]
pub struct ImageFailure {
    pub original_name: String,
    pub error: String,
}

/// Outcome of analyzing a group of images
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub analyses: Vec<ImageAnalysis>,
    pub failures: Vec<ImageFailure>,
}

impl BatchOutcome {
    pub fn total(&self) -> usize {
        self.analyses.len() + self.failures.len()
    }

    pub fn processed(&self) -> usize {
        self.analyses.len()
    }

    /// Mean confidence over the successfully classified images
    pub fn mean_confidence(&self) -> Option<f64> {
        let confidences: Vec<f64> = self
            .analyses
            .iter()
            .map(|a| a.classification.confidence)
            .collect();
        mean_confidence(&confidences)
    }

    /// The classification of the last processed image
    ///
    /// Its decision and class percentages stand for the group in the
    /// persisted assessment; it is the cost basis and is preserved exactly.
    pub fn last_classification(&self) -> Option<&Classification> {
        self.analyses.last().map(|a| &a.classification)
    }
}

/// Analyzes one image, propagating any failure
///
/// Decode failures are the client's fault (400); classifier failures are a
/// dependency fault (502). Measurement never fails hard, an unmeasurable
/// image yields a zeroed result with failure status.
pub fn analyze_one(
    classifier: &dyn DamageClassifier,
    measurer: &dyn GeometricMeasurer,
    original_name: &str,
    bytes: &[u8],
) -> Result<ImageAnalysis, ApiError> {
    let image = decode_image(bytes)?;
    let classification = classifier.classify(&image)?;
    let measurement: Measurement = measurer.measure(&image);

    Ok(ImageAnalysis {
        original_name: original_name.to_string(),
        classification,
        measurement,
    })
}

/// Analyzes a group of images, recording failures and continuing
pub fn analyze_batch(
    classifier: &dyn DamageClassifier,
    measurer: &dyn GeometricMeasurer,
    images: &[(String, Vec<u8>)],
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for (name, bytes) in images {
        match analyze_one(classifier, measurer, name, bytes) {
            Ok(analysis) => outcome.analyses.push(analysis),
            Err(e) => {
                warn!(image = %name, error = %e, "image analysis failed, continuing batch");
                outcome.failures.push(ImageFailure {
                    original_name: name.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_assessment::{ContourMeasurer, IntensityClassifier};
    use test_utils::images::{clean_wall_png, crack_image_png};

    fn classifier() -> IntensityClassifier {
        IntensityClassifier::default()
    }

    fn measurer() -> ContourMeasurer {
        ContourMeasurer::default()
    }

    #[test]
    fn test_single_image_analysis() {
        let analysis =
            analyze_one(&classifier(), &measurer(), "crack.png", &crack_image_png()).unwrap();
        assert!(analysis.classification.crack_detected());
        assert!(analysis.measurement.succeeded());
    }

    #[test]
    fn test_garbage_image_fails_single_path() {
        let result = analyze_one(&classifier(), &measurer(), "junk.bin", &[0u8; 512]);
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_batch_continues_past_failures() {
        let images = vec![
            ("crack.png".to_string(), crack_image_png()),
            ("junk.bin".to_string(), vec![0u8; 512]),
            ("wall.png".to_string(), clean_wall_png()),
        ];
        let outcome = analyze_batch(&classifier(), &measurer(), &images);

        assert_eq!(outcome.total(), 3);
        assert_eq!(outcome.processed(), 2);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].original_name, "junk.bin");
    }

    #[test]
    fn test_aggregation_mean_and_last() {
        let images = vec![
            ("crack.png".to_string(), crack_image_png()),
            ("wall.png".to_string(), clean_wall_png()),
        ];
        let outcome = analyze_batch(&classifier(), &measurer(), &images);

        let expected = (outcome.analyses[0].classification.confidence
            + outcome.analyses[1].classification.confidence)
            / 2.0;
        assert!((outcome.mean_confidence().unwrap() - expected).abs() < 1e-9);

        // The last image's decision is the group's decision.
        let last = outcome.last_classification().unwrap();
        assert!(!last.crack_detected());
    }

    #[test]
    fn test_empty_batch_has_no_aggregates() {
        let outcome = analyze_batch(&classifier(), &measurer(), &[]);
        assert_eq!(outcome.total(), 0);
        assert!(outcome.mean_confidence().is_none());
        assert!(outcome.last_classification().is_none());
    }
}
