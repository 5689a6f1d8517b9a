//! Comprehensive tests for domain_assessment

use domain_assessment::{
    decode_image, ContourMeasurer, DamageClassifier, GeometricMeasurer, IntensityClassifier,
    MeasurementStatus,
};
use test_utils::images::{clean_wall_png, crack_image, crack_image_png};

// ============================================================================
// Decode + classify
// ============================================================================

#[test]
fn test_decode_then_classify_crack() {
    let img = decode_image(&crack_image_png()).unwrap();
    let c = IntensityClassifier::default().classify(&img).unwrap();

    assert!(c.crack_detected());
    assert!(c.crack_percent > c.non_crack_percent);
    assert!((c.crack_percent + c.non_crack_percent - 100.0).abs() < 1e-9);
}

#[test]
fn test_clean_wall_classified_negative() {
    let img = decode_image(&clean_wall_png()).unwrap();
    let c = IntensityClassifier::default().classify(&img).unwrap();

    assert!(!c.crack_detected());
    assert_eq!(c.crack_percent, 0.0);
    assert_eq!(c.confidence, 100.0);
}

#[test]
fn test_classifier_is_deterministic() {
    let img = decode_image(&crack_image_png()).unwrap();
    let classifier = IntensityClassifier::default();
    let a = classifier.classify(&img).unwrap();
    let b = classifier.classify(&img).unwrap();
    assert_eq!(a, b);
}

// ============================================================================
// Classifier and measurer are independent consumers of one image
// ============================================================================

#[test]
fn test_both_analyses_run_over_same_decoded_image() {
    let img = crack_image();

    let classification = IntensityClassifier::default().classify(&img).unwrap();
    let measurement = ContourMeasurer::default().measure(&img);

    assert!(classification.crack_detected());
    assert_eq!(measurement.status, MeasurementStatus::Success);
    assert_eq!(measurement.length_ft, 2.0);
    assert_eq!(measurement.width_ft, 0.1);
    assert_eq!(measurement.area_sqft, 0.2);
}

#[test]
fn test_measurement_soft_failure_leaves_classification_usable() {
    let img = decode_image(&clean_wall_png()).unwrap();

    let measurement = ContourMeasurer::default().measure(&img);
    assert_eq!(measurement.status, MeasurementStatus::Failure);
    assert_eq!(measurement.area_sqft, 0.0);

    // The pipeline continues with classification even when measurement
    // found nothing.
    let classification = IntensityClassifier::default().classify(&img).unwrap();
    assert!(!classification.crack_detected());
}
