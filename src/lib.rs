pub mod analysis;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod render;
pub mod report;
pub mod vision;

pub use analysis::{ParticleAnalysis, ParticleDetector, RegionAnalysis, RegionClassifier, RegionMasks};
pub use config::{AnalysisConfig, ParticleConfig, RegionConfig};
pub use error::{AnalysisError, Result};
pub use loader::{FileImageLoader, ImageLoader};
pub use models::{CircleCandidate, Contour, ContourSet, ParticleStatistics, RegionStatistics};
pub use render::{DirectoryRenderer, Panel, RenderRequest, Renderer};
