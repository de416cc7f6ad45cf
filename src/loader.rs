use image::{DynamicImage, ImageReader};
use std::path::Path;

use crate::error::{AnalysisError, Result};

/// Source of input images for the pipelines
pub trait ImageLoader {
    fn load(&self, path: &Path) -> Result<DynamicImage>;
}

/// Reads images from the filesystem, detecting the format from the file contents
#[derive(Debug, Clone, Copy, Default)]
pub struct FileImageLoader;

impl ImageLoader for FileImageLoader {
    fn load(&self, path: &Path) -> Result<DynamicImage> {
        let load_failure = |reason: String| AnalysisError::LoadFailure {
            path: path.to_path_buf(),
            reason,
        };

        let img = ImageReader::open(path)
            .map_err(|e| load_failure(e.to_string()))?
            .with_guessed_format()
            .map_err(|e| load_failure(e.to_string()))?
            .decode()
            .map_err(|e| load_failure(format!("failed to decode image: {}", e)))?;

        if img.width() == 0 || img.height() == 0 {
            return Err(load_failure("image has no pixels".to_string()));
        }

        log::debug!("Image loaded: {}x{}", img.width(), img.height());
        Ok(img)
    }
}
