pub mod particles;
pub mod regions;

pub use particles::{ParticleAnalysis, ParticleDetector};
pub use regions::{RegionAnalysis, RegionClassifier, RegionMasks};
