use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};

use crate::models::{Contour, ContourSet};

/// Which borders `extract_contours` keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalMode {
    /// Outermost silhouettes only, as a flat list
    External,
    /// Every border with its parent links
    Tree,
}

/// Trace the borders of the non-zero regions of a binary image
pub fn extract_contours(edges: &GrayImage, mode: RetrievalMode) -> ContourSet {
    let traced = find_contours::<i32>(edges);

    let contours = match mode {
        RetrievalMode::Tree => traced
            .into_iter()
            .map(|c| Contour::new(c.points, c.border_type, c.parent))
            .collect(),
        RetrievalMode::External => traced
            .into_iter()
            .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
            .map(|c| Contour::new(c.points, BorderType::Outer, None))
            .collect(),
    };

    ContourSet::new(contours)
}
