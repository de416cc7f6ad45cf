mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from micrograin for tests
pub use micrograin::{
    AnalysisConfig, AnalysisError, Contour, FileImageLoader, ImageLoader, ParticleDetector, RegionClassifier,
    RegionStatistics,
};
