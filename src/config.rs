use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AnalysisError, Result};
use crate::vision::hough::HoughParams;

/// All tunables of both pipelines
///
/// Every field has a default, so a JSON file only needs to name the values it
/// overrides, e.g. `{"particles": {"circularity_cutoff": 0.75}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub regions: RegionConfig,
    pub particles: ParticleConfig,
}

impl AnalysisConfig {
    /// Load a JSON configuration file and validate it
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text).map_err(|source| AnalysisError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.regions.validate()?;
        self.particles.validate()
    }
}

/// Region Classifier tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    /// Pixels strictly below this intensity are air
    pub air_threshold: u8,
    /// Pixels at or above this intensity are candidate solid
    pub bright_threshold: u8,
    /// Canny hysteresis thresholds for the boundary map
    pub edge_low: f32,
    pub edge_high: f32,
    /// Contours enclosing this area or less are noise and are not filled
    pub min_contour_area: f64,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            air_threshold: 50,
            bright_threshold: 200,
            edge_low: 100.0,
            edge_high: 200.0,
            min_contour_area: 50.0,
        }
    }
}

impl RegionConfig {
    pub fn validate(&self) -> Result<()> {
        validate_edge_thresholds("regions", self.edge_low, self.edge_high)?;
        if self.air_threshold > self.bright_threshold {
            return Err(AnalysisError::InvalidConfig(format!(
                "regions: air_threshold ({}) exceeds bright_threshold ({})",
                self.air_threshold, self.bright_threshold
            )));
        }
        if !(self.min_contour_area >= 0.0) {
            return Err(AnalysisError::InvalidConfig(
                "regions: min_contour_area must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Particle Detector tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Gaussian kernel width applied before edge and circle search (odd)
    pub blur_kernel: u32,
    pub edge_low: f32,
    pub edge_high: f32,
    pub hough: HoughParams,
    /// Contours scoring below this circularity count as non-circular particles
    pub circularity_cutoff: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            blur_kernel: 5,
            edge_low: 50.0,
            edge_high: 150.0,
            hough: HoughParams::default(),
            circularity_cutoff: 0.8,
        }
    }
}

impl ParticleConfig {
    pub fn validate(&self) -> Result<()> {
        if self.blur_kernel == 0 || self.blur_kernel % 2 == 0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "particles: blur_kernel must be a positive odd number, got {}",
                self.blur_kernel
            )));
        }
        validate_edge_thresholds("particles", self.edge_low, self.edge_high)?;
        self.hough
            .validate()
            .map_err(|e| AnalysisError::InvalidConfig(format!("particles.hough: {}", e)))?;
        if !(self.circularity_cutoff >= 0.0) {
            return Err(AnalysisError::InvalidConfig(
                "particles: circularity_cutoff must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_edge_thresholds(section: &str, low: f32, high: f32) -> Result<()> {
    if !(low >= 0.0) || !(high >= low) {
        return Err(AnalysisError::InvalidConfig(format!(
            "{}: edge thresholds must satisfy 0 <= edge_low <= edge_high (got {} / {})",
            section, low, high
        )));
    }
    Ok(())
}
