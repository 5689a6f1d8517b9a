//! Stateless detection DTOs

use serde::Serialize;

use crate::dto::claims::ImageResult;

#[derive(Debug, Serialize)]
pub struct DetectionResponse {
    pub success: bool,
    pub predicted_class: String,
    pub confidence: f64,
    pub crack_percent: f64,
    pub non_crack_percent: f64,
}

#[derive(Debug, Serialize)]
pub struct DetectionWithVisualizationResponse {
    pub success: bool,
    pub predicted_class: String,
    pub confidence: f64,
    pub crack_percent: f64,
    pub non_crack_percent: f64,
    pub length_ft: f64,
    pub width_ft: f64,
    pub area_sqft: f64,
    pub measurement_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visualization_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BatchAnalyzeResponse {
    pub success: bool,
    pub total_images: usize,
    pub processed_images: usize,
    pub results: Vec<ImageResult>,
}
