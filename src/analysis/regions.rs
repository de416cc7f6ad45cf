use image::{DynamicImage, GrayImage};
use std::path::Path;

use crate::config::RegionConfig;
use crate::error::{AnalysisError, Result};
use crate::loader::ImageLoader;
use crate::models::{ContourSet, RegionStatistics};
use crate::render::RenderRequest;
use crate::vision::mask::{and_not, count_on, fill_contour};
use crate::vision::{RetrievalMode, ThresholdMode, detect_edges, extract_contours, threshold, to_grayscale};

/// Per-class masks, congruent with the analysed image
#[derive(Debug, Clone)]
pub struct RegionMasks {
    pub air: GrayImage,
    pub hollow: GrayImage,
    pub non_hollow: GrayImage,
    pub edges: GrayImage,
}

#[derive(Debug, Clone)]
pub struct RegionAnalysis {
    pub statistics: RegionStatistics,
    pub masks: RegionMasks,
    /// Outer boundaries above the area floor that enclose at least one hole
    pub hollow_region_count: usize,
}

impl RegionAnalysis {
    pub fn render_request(&self) -> RenderRequest {
        RenderRequest::new("Region Classification")
            .with_panel("Air (Dark) Regions", DynamicImage::ImageLuma8(self.masks.air.clone()))
            .with_panel("Hollowed-Solid Regions", DynamicImage::ImageLuma8(self.masks.hollow.clone()))
            .with_panel("Non-Hollow-Solid Regions", DynamicImage::ImageLuma8(self.masks.non_hollow.clone()))
            .with_panel("Detected Hollow/Voids", DynamicImage::ImageLuma8(self.masks.edges.clone()))
    }
}

/// Splits a grayscale micrograph into air, hollow-solid, non-hollow-solid and void
#[derive(Debug, Clone, Default)]
pub struct RegionClassifier {
    pub config: RegionConfig,
}

impl RegionClassifier {
    pub fn new(config: RegionConfig) -> Self {
        Self { config }
    }

    /// Load an image through `loader` and classify it; nothing runs if loading fails
    pub fn analyze_file(&self, loader: &dyn ImageLoader, path: &Path) -> Result<RegionAnalysis> {
        let img = loader.load(path)?;
        log::info!("Classifying regions of {}", path.display());
        self.classify(&to_grayscale(&img))
    }

    pub fn classify(&self, gray: &GrayImage) -> Result<RegionAnalysis> {
        let (width, height) = gray.dimensions();
        let total_pixels = width as u64 * height as u64;
        if total_pixels == 0 {
            return Err(AnalysisError::EmptyImage);
        }
        let cfg = &self.config;

        log::debug!("Thresholding air (< {}) and bright (>= {}) pixels", cfg.air_threshold, cfg.bright_threshold);
        let air = threshold(gray, cfg.air_threshold, ThresholdMode::Inverse);
        let bright = threshold(gray, cfg.bright_threshold, ThresholdMode::Binary);

        log::debug!("Detecting edges ({}/{})", cfg.edge_low, cfg.edge_high);
        let edges = detect_edges(gray, cfg.edge_low, cfg.edge_high)?;

        let contours = extract_contours(&edges, RetrievalMode::Tree);
        log::debug!("Found {} contours", contours.len());

        let mut hollow = GrayImage::new(width, height);
        let mut filled = 0;
        for contour in contours.iter() {
            if contour.area() > cfg.min_contour_area {
                fill_contour(&mut hollow, contour);
                filled += 1;
            }
        }
        log::debug!("Filled {} contours above area {}", filled, cfg.min_contour_area);

        let non_hollow = and_not(&bright, &hollow)?;

        let statistics = RegionStatistics::from_counts(
            total_pixels,
            count_on(&air),
            count_on(&hollow),
            count_on(&non_hollow),
        );
        if statistics.void_pixels < 0 {
            log::warn!(
                "Air and hollow masks overlap by at least {} pixels; void share is negative",
                -statistics.void_pixels
            );
        }

        let hollow_region_count = count_hollow_regions(&contours, cfg.min_contour_area);
        log::info!(
            "Regions: air {:.2}%, hollow {:.2}%, non-hollow {:.2}%, void {:.2}% ({} hollow regions)",
            statistics.air_percentage(),
            statistics.hollow_percentage(),
            statistics.non_hollow_percentage(),
            statistics.void_percentage(),
            hollow_region_count
        );

        Ok(RegionAnalysis {
            statistics,
            masks: RegionMasks {
                air,
                hollow,
                non_hollow,
                edges,
            },
            hollow_region_count,
        })
    }
}

fn count_hollow_regions(contours: &ContourSet, min_area: f64) -> usize {
    contours
        .iter()
        .enumerate()
        .filter(|(i, c)| c.is_outer() && c.area() > min_area && !contours.holes_of(*i).is_empty())
        .count()
}
