//! Filesystem image store
//!
//! Uploaded photographs and generated visualizations land under one
//! configured directory. Stored names are collision resistant: a unix
//! timestamp prefix plus the sanitized original name, with the batch index
//! folded in for multi-image posts, so concurrent uploads of identically
//! named files never clobber each other.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use chrono::Utc;
use image::{ImageOutputFormat, RgbImage};
use tracing::debug;

use crate::error::ApiError;

/// Strips path components and hostile characters from a client filename
///
/// Only ASCII alphanumerics, `.`, `-`, and `_` survive; everything else
/// becomes `_`. An empty result falls back to `image`.
pub fn sanitize_filename(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original)
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_matches('.').to_string();
    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned
    }
}

/// Builds the collision-resistant stored name for an upload
pub fn stored_name(original: &str, batch_index: Option<usize>) -> String {
    let ts = Utc::now().timestamp();
    let safe = sanitize_filename(original);
    match batch_index {
        Some(idx) => format!("{}_{}_{}", ts, idx, safe),
        None => format!("{}_{}", ts, safe),
    }
}

/// Returns the lowercase extension of a filename, if any
pub fn file_format(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Filesystem store rooted at the configured upload directory
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes uploaded bytes under the given stored name, returning the
    /// absolute path of the stored file
    pub async fn save(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, ApiError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| ApiError::Internal(format!("upload dir: {}", e)))?;

        let path = self.root.join(name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| ApiError::Internal(format!("store image: {}", e)))?;

        debug!(name, size = bytes.len(), "stored upload");
        Ok(path)
    }

    /// Encodes and stores an annotated visualization as PNG, returning its
    /// stored name
    pub async fn save_visualization(
        &self,
        base_name: &str,
        visualization: &RgbImage,
    ) -> Result<String, ApiError> {
        let mut buf = Cursor::new(Vec::new());
        visualization
            .write_to(&mut buf, ImageOutputFormat::Png)
            .map_err(|e| ApiError::Internal(format!("encode visualization: {}", e)))?;

        let name = format!("vis_{}.png", sanitize_filename(base_name));
        self.save(&name, buf.get_ref()).await?;
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\temp\\wall.jpg"), "wall.jpg");
    }

    #[test]
    fn test_sanitize_replaces_hostile_characters() {
        assert_eq!(sanitize_filename("my wall (1).jpg"), "my_wall__1_.jpg");
    }

    #[test]
    fn test_sanitize_empty_falls_back() {
        assert_eq!(sanitize_filename(""), "image");
        assert_eq!(sanitize_filename("..."), "image");
    }

    #[test]
    fn test_stored_name_carries_batch_index() {
        let a = stored_name("wall.jpg", Some(0));
        let b = stored_name("wall.jpg", Some(1));
        assert!(a.ends_with("_0_wall.jpg"));
        assert!(b.ends_with("_1_wall.jpg"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_file_format() {
        assert_eq!(file_format("wall.JPG"), Some("jpg".to_string()));
        assert_eq!(file_format("wall"), None);
    }

    proptest::proptest! {
        // Sanitized names are never empty and never escape the store root.
        #[test]
        fn prop_sanitized_name_is_safe(original in ".{0,64}") {
            let name = sanitize_filename(&original);
            proptest::prop_assert!(!name.is_empty());
            proptest::prop_assert!(name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')));
            proptest::prop_assert!(!name.starts_with('.'));
        }
    }
}
