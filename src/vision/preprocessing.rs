use image::{DynamicImage, GrayImage, Luma};
use imageproc::edges::canny;

use crate::error::{AnalysisError, Result};

/// Which side of the level a thresholded pixel must fall on to be switched on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdMode {
    /// pixel >= level
    Binary,
    /// pixel < level
    Inverse,
}

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Binarize an intensity image into a 0/255 mask
pub fn threshold(img: &GrayImage, level: u8, mode: ThresholdMode) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        let value = img.get_pixel(x, y)[0];
        let on = match mode {
            ThresholdMode::Binary => value >= level,
            ThresholdMode::Inverse => value < level,
        };
        Luma([if on { 255u8 } else { 0u8 }])
    })
}

/// Apply a Gaussian blur with exactly `kernel_size` taps per axis
///
/// Borders are extended by replicating the edge pixels. Both passes run in
/// floating point and the result is rounded once at the end.
pub fn blur(img: &GrayImage, kernel_size: u32) -> Result<GrayImage> {
    let kernel = gaussian_kernel(kernel_size)?;
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Ok(img.clone());
    }
    let (w, h) = (width as i64, height as i64);
    let half = (kernel.len() / 2) as i64;

    let mut horizontal = vec![0f32; (w * h) as usize];
    for y in 0..h {
        for x in 0..w {
            horizontal[(y * w + x) as usize] = kernel
                .iter()
                .enumerate()
                .map(|(k, weight)| {
                    let sx = (x + k as i64 - half).clamp(0, w - 1);
                    weight * img.get_pixel(sx as u32, y as u32)[0] as f32
                })
                .sum();
        }
    }

    Ok(GrayImage::from_fn(width, height, |x, y| {
        let value: f32 = kernel
            .iter()
            .enumerate()
            .map(|(k, weight)| {
                let sy = (y as i64 + k as i64 - half).clamp(0, h - 1);
                weight * horizontal[(sy * w + x as i64) as usize]
            })
            .sum();
        Luma([value.round().clamp(0.0, 255.0) as u8])
    }))
}

/// Normalized 1-D Gaussian weights; sigma follows the kernel width
pub fn gaussian_kernel(kernel_size: u32) -> Result<Vec<f32>> {
    if kernel_size == 0 || kernel_size % 2 == 0 {
        return Err(AnalysisError::InvalidParameter(format!(
            "blur kernel size must be a positive odd number, got {}",
            kernel_size
        )));
    }

    let sigma = 0.3 * ((kernel_size as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let center = (kernel_size / 2) as f32;
    let weights: Vec<f32> = (0..kernel_size)
        .map(|i| {
            let d = i as f32 - center;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f32 = weights.iter().sum();

    Ok(weights.into_iter().map(|w| w / sum).collect())
}

/// Detect edges using Canny edge detector
pub fn detect_edges(img: &GrayImage, low_threshold: f32, high_threshold: f32) -> Result<GrayImage> {
    if !(low_threshold >= 0.0) || !(high_threshold >= low_threshold) {
        return Err(AnalysisError::InvalidParameter(format!(
            "edge thresholds must satisfy 0 <= low <= high (got {} / {})",
            low_threshold, high_threshold
        )));
    }
    Ok(canny(img, low_threshold, high_threshold))
}
