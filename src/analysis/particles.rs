use image::{DynamicImage, RgbImage};
use std::path::Path;

use crate::config::ParticleConfig;
use crate::error::{AnalysisError, Result};
use crate::loader::ImageLoader;
use crate::models::{CircleCandidate, Contour, ParticleStatistics};
use crate::render::RenderRequest;
use crate::vision::drawing::{GREEN, RED, draw_center_marker, draw_circle_outline, draw_contour_outline};
use crate::vision::{RetrievalMode, blur, detect_edges, extract_contours, hough_circles, to_grayscale};

#[derive(Debug, Clone)]
pub struct ParticleAnalysis {
    pub statistics: ParticleStatistics,
    /// Hough circles, strongest first
    pub circles: Vec<CircleCandidate>,
    /// External contours that fell below the circularity cutoff
    pub non_circular: Vec<Contour>,
    /// Input image with circles in green and non-circular outlines in red
    pub annotated: RgbImage,
}

impl ParticleAnalysis {
    pub fn render_request(&self) -> RenderRequest {
        RenderRequest::new("Particle Detection").with_panel(
            "Detected Particles (Circular: Green, Non-Circular: Red)",
            DynamicImage::ImageRgb8(self.annotated.clone()),
        )
    }
}

/// Counts and sizes particles in a colour micrograph
///
/// Circles come from the Hough search on the blurred image; non-circular
/// particles come from the outer contours of the edge map. The two paths are
/// independent, so one particle can be counted by both.
#[derive(Debug, Clone, Default)]
pub struct ParticleDetector {
    pub config: ParticleConfig,
}

impl ParticleDetector {
    pub fn new(config: ParticleConfig) -> Self {
        Self { config }
    }

    /// Load an image through `loader` and detect particles; nothing runs if loading fails
    pub fn analyze_file(&self, loader: &dyn ImageLoader, path: &Path) -> Result<ParticleAnalysis> {
        let img = loader.load(path)?;
        log::info!("Detecting particles in {}", path.display());
        self.detect(&img)
    }

    pub fn detect(&self, img: &DynamicImage) -> Result<ParticleAnalysis> {
        if img.width() == 0 || img.height() == 0 {
            return Err(AnalysisError::EmptyImage);
        }
        let cfg = &self.config;

        log::debug!("Converting to grayscale and blurring (kernel {})", cfg.blur_kernel);
        let gray = to_grayscale(img);
        let blurred = blur(&gray, cfg.blur_kernel)?;

        log::debug!("Detecting edges ({}/{})", cfg.edge_low, cfg.edge_high);
        let edges = detect_edges(&blurred, cfg.edge_low, cfg.edge_high)?;

        let circles = hough_circles(&blurred, &cfg.hough)?;
        log::debug!("Hough search found {} circles", circles.len());

        let mut annotated = img.to_rgb8();
        let mut circular_area = 0.0;
        let mut diameters = Vec::with_capacity(circles.len());

        for circle in &circles {
            let center = (circle.x.round() as i32, circle.y.round() as i32);
            let radius = circle.radius.round();
            circular_area += std::f64::consts::PI * (radius as f64).powi(2);
            diameters.push(2.0 * radius as f64);

            draw_circle_outline(&mut annotated, center, radius as i32, GREEN);
            draw_center_marker(&mut annotated, center, RED);
        }

        let contours = extract_contours(&edges, RetrievalMode::External);
        log::debug!("Found {} external contours", contours.len());

        let mut non_circular_area = 0.0;
        let mut non_circular = Vec::new();
        for contour in contours {
            let circularity = contour.circularity();
            if circularity < cfg.circularity_cutoff {
                non_circular_area += contour.area();
                draw_contour_outline(&mut annotated, &contour, RED);
                non_circular.push(contour);
            }
        }

        let statistics = ParticleStatistics::from_measurements(
            circles.len(),
            non_circular.len(),
            circular_area,
            non_circular_area,
            &diameters,
        );
        log::info!(
            "Particles: {} circular, {} non-circular, mean diameter {:.2}px",
            statistics.circular_count,
            statistics.non_circular_count,
            statistics.mean_diameter
        );

        Ok(ParticleAnalysis {
            statistics,
            circles,
            non_circular,
            annotated,
        })
    }
}
