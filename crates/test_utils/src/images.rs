//! Synthetic photographs for assessment tests
//!
//! A "crack" is a dark vertical stripe on a light background; a "clean
//! wall" is uniformly light. Both encode to real PNG bytes so the same
//! fixtures exercise the decode path.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageOutputFormat, Luma};

/// Light wall with a dark vertical stripe
///
/// At the default 120 px/ft scale the 240x240 image with a 12px stripe
/// measures 2.0 ft long, 0.1 ft wide, 0.2 sqft.
pub fn crack_image() -> DynamicImage {
    let img = GrayImage::from_fn(240, 240, |x, _| {
        if (100..112).contains(&x) {
            Luma([20u8])
        } else {
            Luma([240u8])
        }
    });
    DynamicImage::ImageLuma8(img)
}

/// Uniformly light wall, no measurable feature
pub fn clean_wall_image() -> DynamicImage {
    DynamicImage::ImageLuma8(GrayImage::from_pixel(240, 240, Luma([240u8])))
}

/// PNG-encoded bytes of [`crack_image`]
pub fn crack_image_png() -> Vec<u8> {
    encode_png(&crack_image())
}

/// PNG-encoded bytes of [`clean_wall_image`]
pub fn clean_wall_png() -> Vec<u8> {
    encode_png(&clean_wall_image())
}

fn encode_png(image: &DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Png)
        .expect("png encode");
    buf
}
