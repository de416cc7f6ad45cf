//! Low-level image operations shared by both analysis pipelines.
//!
//! Every function here is pure: inputs are borrowed, outputs are freshly
//! allocated, and nothing is cached between calls.

pub mod contours;
pub mod drawing;
pub mod hough;
pub mod mask;
pub mod preprocessing;

pub use contours::{RetrievalMode, extract_contours};
pub use hough::{HoughParams, hough_circles};
pub use preprocessing::{ThresholdMode, blur, detect_edges, threshold, to_grayscale};
