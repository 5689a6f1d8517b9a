//! Crack classification boundary
//!
//! The contract consumed by the pipeline: given a decoded image, return a
//! class label with per-class probabilities. Deterministic for a fixed
//! implementation and fixed image; no side effects.

use image::DynamicImage;
use serde::Serialize;

use crate::error::AssessmentError;

/// Label reported when a crack is detected
pub const POSITIVE_LABEL: &str = "Positive (Crack Detected)";
/// Label reported when no crack is detected
pub const NEGATIVE_LABEL: &str = "Negative (No Crack)";

/// Classifier output
///
/// Confidences are percentages rounded to two decimals, matching the wire
/// format the upstream model reported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// Winning class label
    pub predicted_class: String,
    /// Confidence in the winning class, percent
    pub confidence: f64,
    /// Probability of the positive (crack) class, percent
    pub crack_percent: f64,
    /// Probability of the negative (no crack) class, percent
    pub non_crack_percent: f64,
}

impl Classification {
    /// Builds a classification from the positive-class probability (0..=1)
    pub fn from_crack_probability(p_crack: f64) -> Self {
        let p_crack = p_crack.clamp(0.0, 1.0);
        let crack_percent = round2(p_crack * 100.0);
        let non_crack_percent = round2(100.0 - crack_percent);
        let (predicted_class, confidence) = if crack_percent >= non_crack_percent {
            (POSITIVE_LABEL.to_string(), crack_percent)
        } else {
            (NEGATIVE_LABEL.to_string(), non_crack_percent)
        };
        Self {
            predicted_class,
            confidence,
            crack_percent,
            non_crack_percent,
        }
    }

    pub fn crack_detected(&self) -> bool {
        self.predicted_class == POSITIVE_LABEL
    }
}

/// Pluggable crack classifier
///
/// Implementations must be pure: same image, same result.
pub trait DamageClassifier: Send + Sync {
    fn classify(&self, image: &DynamicImage) -> Result<Classification, AssessmentError>;
}

/// Reference classifier based on dark-pixel intensity
///
/// Cracks photograph as elongated dark regions against lighter material, so
/// the fraction of pixels below a luminance threshold is a usable stand-in
/// for the trained model in development and tests. The production model is
/// dropped in behind the same trait.
#[derive(Debug, Clone)]
pub struct IntensityClassifier {
    /// Luminance below which a pixel counts as dark (0..=255)
    pub dark_threshold: u8,
    /// Dark-pixel fraction at which crack probability saturates
    pub saturation_ratio: f64,
}

impl Default for IntensityClassifier {
    fn default() -> Self {
        // Cracks are thin: a few percent of dark pixels is already
        // conclusive, so the probability saturates early.
        Self {
            dark_threshold: 80,
            saturation_ratio: 0.05,
        }
    }
}

impl DamageClassifier for IntensityClassifier {
    fn classify(&self, image: &DynamicImage) -> Result<Classification, AssessmentError> {
        let gray = image.to_luma8();
        let total = (gray.width() as u64) * (gray.height() as u64);
        if total == 0 {
            return Err(AssessmentError::Classification(
                "empty image".to_string(),
            ));
        }

        let dark = gray
            .pixels()
            .filter(|p| p.0[0] < self.dark_threshold)
            .count() as f64;
        let ratio = dark / total as f64;
        let p_crack = (ratio / self.saturation_ratio).min(1.0);

        Ok(Classification::from_crack_probability(p_crack))
    }
}

/// Rounds to two decimal places
pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probabilities_sum_to_hundred() {
        let c = Classification::from_crack_probability(0.733);
        assert!((c.crack_percent + c.non_crack_percent - 100.0).abs() < 1e-9);
        assert_eq!(c.crack_percent, 73.3);
    }

    #[test]
    fn test_winning_class_tracks_probability() {
        let crack = Classification::from_crack_probability(0.9);
        assert!(crack.crack_detected());
        assert_eq!(crack.confidence, 90.0);

        let clean = Classification::from_crack_probability(0.1);
        assert!(!clean.crack_detected());
        assert_eq!(clean.confidence, 90.0);
    }

    #[test]
    fn test_probability_is_clamped() {
        let c = Classification::from_crack_probability(1.7);
        assert_eq!(c.crack_percent, 100.0);
        assert_eq!(c.non_crack_percent, 0.0);
    }
}
