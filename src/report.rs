//! Human-readable summaries of the analysis statistics.

use std::fmt;

use crate::models::{ParticleStatistics, RegionStatistics};

impl fmt::Display for RegionStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Area Percentages (%):")?;
        writeln!(f, "Air (Dark) Regions: {:.2}%", self.air_percentage())?;
        writeln!(f, "Void Regions: {:.2}%", self.void_percentage())?;
        writeln!(f, "Hollowed-Solid Regions: {:.2}%", self.hollow_percentage())?;
        write!(f, "Non-Hollow-Solid Regions: {:.2}%", self.non_hollow_percentage())
    }
}

impl fmt::Display for ParticleStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of circular particles: {}", self.circular_count)?;
        writeln!(f, "Number of non-circular particles: {}", self.non_circular_count)?;
        writeln!(f, "Circular area ratio: {:.2}%", self.circular_area_ratio)?;
        writeln!(f, "Non-circular area ratio: {:.2}%", self.non_circular_area_ratio)?;
        writeln!(f, "Average diameter of circles: {:.2} pixels", self.mean_diameter)?;
        write!(f, "Standard deviation of diameter: {:.2} pixels", self.std_dev_diameter)
    }
}
