//! Geometric crack measurement
//!
//! Locates the dark (crack-like) region of an image and estimates physical
//! dimensions from its pixel extent using a configured pixel-to-length
//! scale. Produces an annotated copy of the image with the located region
//! outlined, saved by the caller as the visualization artifact.

use image::{DynamicImage, Rgb, RgbImage};
use serde::Serialize;
use tracing::debug;

use crate::classifier::round2;

/// Outcome of a measurement attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementStatus {
    Success,
    Failure,
}

/// Physical crack measurements derived from pixels
///
/// On `Failure` every measurement field is zero and there is no
/// visualization; callers must check `status` before trusting the numbers.
#[derive(Debug, Clone)]
pub struct Measurement {
    /// Crack length along its major axis, feet
    pub length_ft: f64,
    /// Crack width along its minor axis, feet
    pub width_ft: f64,
    /// Crack area, square feet
    pub area_sqft: f64,
    pub status: MeasurementStatus,
    /// Annotated copy of the input with the region outlined
    pub visualization: Option<RgbImage>,
}

impl Measurement {
    /// The zeroed soft-failure result
    pub fn failure() -> Self {
        Self {
            length_ft: 0.0,
            width_ft: 0.0,
            area_sqft: 0.0,
            status: MeasurementStatus::Failure,
            visualization: None,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.status == MeasurementStatus::Success
    }
}

/// Pluggable geometric measurer
pub trait GeometricMeasurer: Send + Sync {
    /// Measures the crack-like region of an image
    ///
    /// Never errors: an unmeasurable image yields [`Measurement::failure`].
    fn measure(&self, image: &DynamicImage) -> Measurement;
}

/// Threshold-and-bounding-box measurer
///
/// Thresholds the grayscale image, takes the bounding box of all dark
/// pixels as the crack extent, and integrates the dark mask for area.
#[derive(Debug, Clone)]
pub struct ContourMeasurer {
    /// Pixels per foot at the assumed camera distance
    pub pixels_per_foot: f64,
    /// Luminance below which a pixel belongs to the crack mask (0..=255)
    pub dark_threshold: u8,
    /// Minimum mask size in pixels; smaller regions are noise
    pub min_region_pixels: u64,
}

impl Default for ContourMeasurer {
    fn default() -> Self {
        Self {
            pixels_per_foot: 120.0,
            dark_threshold: 80,
            min_region_pixels: 64,
        }
    }
}

impl GeometricMeasurer for ContourMeasurer {
    fn measure(&self, image: &DynamicImage) -> Measurement {
        let gray = image.to_luma8();
        let (width, height) = (gray.width(), gray.height());
        if width == 0 || height == 0 || self.pixels_per_foot <= 0.0 {
            return Measurement::failure();
        }

        let mut mask_pixels: u64 = 0;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (u32::MAX, u32::MAX, 0u32, 0u32);

        for (x, y, p) in gray.enumerate_pixels() {
            if p.0[0] < self.dark_threshold {
                mask_pixels += 1;
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }

        if mask_pixels < self.min_region_pixels {
            debug!(mask_pixels, "no measurable crack region");
            return Measurement::failure();
        }

        let bbox_w = (max_x - min_x + 1) as f64;
        let bbox_h = (max_y - min_y + 1) as f64;
        let major_px = bbox_w.max(bbox_h);
        let minor_px = bbox_w.min(bbox_h);

        let length_ft = round2(major_px / self.pixels_per_foot);
        let width_ft = round2(minor_px / self.pixels_per_foot);
        let area_sqft = round2(mask_pixels as f64 / (self.pixels_per_foot * self.pixels_per_foot));

        let visualization = annotate(&image.to_rgb8(), min_x, min_y, max_x, max_y);

        Measurement {
            length_ft,
            width_ft,
            area_sqft,
            status: MeasurementStatus::Success,
            visualization: Some(visualization),
        }
    }
}

/// Draws a red bounding-box outline onto a copy of the image
fn annotate(image: &RgbImage, min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> RgbImage {
    const BORDER: Rgb<u8> = Rgb([220, 30, 30]);
    const THICKNESS: u32 = 2;

    let mut out = image.clone();
    let (w, h) = (out.width(), out.height());

    for x in min_x..=max_x.min(w.saturating_sub(1)) {
        for t in 0..THICKNESS {
            let top = min_y.saturating_add(t).min(h - 1);
            let bottom = max_y.saturating_sub(t).min(h - 1);
            out.put_pixel(x, top, BORDER);
            out.put_pixel(x, bottom, BORDER);
        }
    }
    for y in min_y..=max_y.min(h.saturating_sub(1)) {
        for t in 0..THICKNESS {
            let left = min_x.saturating_add(t).min(w - 1);
            let right = max_x.saturating_sub(t).min(w - 1);
            out.put_pixel(left, y, BORDER);
            out.put_pixel(right, y, BORDER);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn white_with_dark_stripe(w: u32, h: u32, x0: u32, x1: u32) -> DynamicImage {
        let img = image::GrayImage::from_fn(w, h, |x, _| {
            if (x0..x1).contains(&x) {
                Luma([20u8])
            } else {
                Luma([240u8])
            }
        });
        DynamicImage::ImageLuma8(img)
    }

    #[test]
    fn test_blank_image_soft_fails() {
        let blank = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(64, 64, Luma([240u8])));
        let m = ContourMeasurer::default().measure(&blank);

        assert_eq!(m.status, MeasurementStatus::Failure);
        assert_eq!(m.length_ft, 0.0);
        assert_eq!(m.width_ft, 0.0);
        assert_eq!(m.area_sqft, 0.0);
        assert!(m.visualization.is_none());
    }

    #[test]
    fn test_stripe_measured_against_scale() {
        // 240px tall stripe, 12px wide, at 120 px/ft: 2.0 ft by 0.1 ft.
        let img = white_with_dark_stripe(240, 240, 100, 112);
        let measurer = ContourMeasurer {
            pixels_per_foot: 120.0,
            ..ContourMeasurer::default()
        };
        let m = measurer.measure(&img);

        assert!(m.succeeded());
        assert_eq!(m.length_ft, 2.0);
        assert_eq!(m.width_ft, 0.1);
        // 12 * 240 mask pixels over 120^2 px/sqft.
        assert_eq!(m.area_sqft, 0.2);
        assert!(m.visualization.is_some());
    }

    #[test]
    fn test_visualization_matches_input_dimensions() {
        let img = white_with_dark_stripe(120, 80, 10, 30);
        let m = ContourMeasurer::default().measure(&img);
        let vis = m.visualization.unwrap();
        assert_eq!((vis.width(), vis.height()), (120, 80));
    }

    #[test]
    fn test_tiny_speck_is_noise() {
        let mut img = image::GrayImage::from_pixel(64, 64, Luma([240u8]));
        img.put_pixel(10, 10, Luma([10u8]));
        let m = ContourMeasurer::default().measure(&DynamicImage::ImageLuma8(img));
        assert_eq!(m.status, MeasurementStatus::Failure);
    }
}
