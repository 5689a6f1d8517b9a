//! Image decoding guards

use image::DynamicImage;

use crate::error::AssessmentError;

/// Maximum accepted upload size before decoding. Prevents OOM on corrupt
/// or adversarial files.
pub const MAX_IMAGE_BYTES: usize = 50 * 1024 * 1024;

/// Smallest byte count that could be a valid image (a minimal PNG is ~67
/// bytes).
pub const MIN_IMAGE_BYTES: usize = 67;

/// Decodes uploaded bytes into an image, with size sanity checks
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, AssessmentError> {
    if bytes.len() < MIN_IMAGE_BYTES {
        return Err(AssessmentError::Decode(format!(
            "image too small: {} bytes",
            bytes.len()
        )));
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(AssessmentError::Decode(format!(
            "image too large: {} bytes",
            bytes.len()
        )));
    }
    image::load_from_memory(bytes).map_err(|e| AssessmentError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_tiny_payload() {
        assert!(decode_image(&[0u8; 10]).is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(decode_image(&[0u8; 512]).is_err());
    }
}
