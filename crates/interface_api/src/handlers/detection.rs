//! Stateless detection handlers
//!
//! Run the classifier (and optionally the measurer) over uploaded images
//! without touching the claims tables. The visualization variant stores
//! the annotated copy and returns its URL.

use axum::{extract::Multipart, extract::State, Extension, Json};
use domain_identity::TokenClaims;
use tracing::info;

use crate::dto::claims::ImageResult;
use crate::dto::detection::{
    BatchAnalyzeResponse, DetectionResponse, DetectionWithVisualizationResponse,
};
use crate::error::ApiError;
use crate::handlers::read_multipart;
use crate::pipeline::{analyze_batch, analyze_one};
use crate::AppState;

/// Classifies one image
pub async fn detect_crack(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    multipart: Multipart,
) -> Result<Json<DetectionResponse>, ApiError> {
    let form = read_multipart(multipart).await?;
    let (name, bytes) = form
        .files
        .first()
        .ok_or_else(|| ApiError::missing_field("image"))?;

    let analysis = analyze_one(state.classifier.as_ref(), state.measurer.as_ref(), name, bytes)?;
    let c = analysis.classification;

    info!(user = %claims.sub, image = %name, class = %c.predicted_class, "detection");
    Ok(Json(DetectionResponse {
        success: true,
        predicted_class: c.predicted_class,
        confidence: c.confidence,
        crack_percent: c.crack_percent,
        non_crack_percent: c.non_crack_percent,
    }))
}

/// Classifies and measures one image, storing the annotated visualization
pub async fn detect_crack_with_visualization(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    multipart: Multipart,
) -> Result<Json<DetectionWithVisualizationResponse>, ApiError> {
    let form = read_multipart(multipart).await?;
    let (name, bytes) = form
        .files
        .first()
        .ok_or_else(|| ApiError::missing_field("image"))?;

    let analysis = analyze_one(state.classifier.as_ref(), state.measurer.as_ref(), name, bytes)?;
    let c = &analysis.classification;
    let m = &analysis.measurement;

    let visualization_url = match &m.visualization {
        Some(vis) => {
            let stored = state.images.save_visualization(name, vis).await?;
            Some(format!("/uploads/{}", stored))
        }
        None => None,
    };

    info!(user = %claims.sub, image = %name, class = %c.predicted_class, "detection with visualization");
    Ok(Json(DetectionWithVisualizationResponse {
        success: true,
        predicted_class: c.predicted_class.clone(),
        confidence: c.confidence,
        crack_percent: c.crack_percent,
        non_crack_percent: c.non_crack_percent,
        length_ft: m.length_ft,
        width_ft: m.width_ft,
        area_sqft: m.area_sqft,
        measurement_status: format!("{:?}", m.status).to_lowercase(),
        visualization_url,
    }))
}

/// Analyzes a batch of images; item failures do not fail the batch
pub async fn batch_analyze(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    multipart: Multipart,
) -> Result<Json<BatchAnalyzeResponse>, ApiError> {
    let form = read_multipart(multipart).await?;
    if form.files.is_empty() {
        return Err(ApiError::missing_field("images"));
    }

    let outcome = analyze_batch(state.classifier.as_ref(), state.measurer.as_ref(), &form.files);

    let mut results: Vec<ImageResult> = outcome
        .analyses
        .iter()
        .map(|a| ImageResult::from_analysis(a, None))
        .collect();
    results.extend(outcome.failures.iter().map(ImageResult::failed));

    info!(
        user = %claims.sub,
        total = outcome.total(),
        processed = outcome.processed(),
        "batch analysis"
    );
    Ok(Json(BatchAnalyzeResponse {
        success: true,
        total_images: outcome.total(),
        processed_images: outcome.processed(),
        results,
    }))
}
