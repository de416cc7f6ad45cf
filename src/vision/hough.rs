use image::GrayImage;
use imageproc::edges::canny;
use imageproc::gradients::{horizontal_sobel, vertical_sobel};
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::models::CircleCandidate;

/// Gradient Hough circle search parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughParams {
    /// Inverse accumulator resolution; 2.0 means half the image resolution
    pub dp: f32,
    /// Minimum distance between accepted centres
    pub min_dist: f32,
    /// Upper Canny threshold for the internal edge map (lower is half of it)
    pub param1: f32,
    /// Accumulator votes (and edge support) a circle needs
    pub param2: f32,
    pub min_radius: u32,
    pub max_radius: u32,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            dp: 1.2,
            min_dist: 20.0,
            param1: 50.0,
            param2: 30.0,
            min_radius: 5,
            max_radius: 50,
        }
    }
}

impl HoughParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.dp > 0.0) {
            return Err(AnalysisError::InvalidParameter(format!("dp must be positive, got {}", self.dp)));
        }
        if !(self.min_dist >= 0.0) {
            return Err(AnalysisError::InvalidParameter(format!(
                "min_dist must be non-negative, got {}",
                self.min_dist
            )));
        }
        if !(self.param1 > 0.0) || !(self.param2 > 0.0) {
            return Err(AnalysisError::InvalidParameter(
                "param1 and param2 must be positive".to_string(),
            ));
        }
        if self.min_radius > self.max_radius {
            return Err(AnalysisError::InvalidParameter(format!(
                "min_radius ({}) exceeds max_radius ({})",
                self.min_radius, self.max_radius
            )));
        }
        Ok(())
    }
}

/// Find circles in a grayscale image with the gradient Hough transform
///
/// Each edge pixel votes along its gradient line, in both directions, for every
/// radius in range. Accumulator peaks become centre candidates. Each surviving
/// centre is moved onto the ring of edge pixels it voted for by a least-squares
/// fit, then gets the radius best supported by the edge pixels around it.
/// Results are ordered by accumulator votes, strongest first.
pub fn hough_circles(image: &GrayImage, params: &HoughParams) -> Result<Vec<CircleCandidate>> {
    params.validate()?;

    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Ok(Vec::new());
    }

    let edges = canny(image, params.param1 / 2.0, params.param1);
    let gx = horizontal_sobel(image);
    let gy = vertical_sobel(image);

    let inv_dp = 1.0 / params.dp;
    let acc_w = (width as f32 * inv_dp).ceil() as usize + 2;
    let acc_h = (height as f32 * inv_dp).ceil() as usize + 2;
    let mut accumulator = vec![0u32; acc_w * acc_h];
    let mut edge_points: Vec<EdgePoint> = Vec::new();

    for (x, y, pixel) in edges.enumerate_pixels() {
        if pixel[0] == 0 {
            continue;
        }
        let vx = gx.get_pixel(x, y)[0] as f32;
        let vy = gy.get_pixel(x, y)[0] as f32;
        let magnitude = (vx * vx + vy * vy).sqrt();
        if magnitude == 0.0 {
            continue;
        }

        let (ux, uy) = (vx / magnitude, vy / magnitude);
        edge_points.push(EdgePoint {
            x: x as f32,
            y: y as f32,
            ux,
            uy,
        });

        for direction in [1.0f32, -1.0] {
            let mut last_cell = None;
            for r in params.min_radius..=params.max_radius {
                let cx = (x as f32 + direction * ux * r as f32) * inv_dp;
                let cy = (y as f32 + direction * uy * r as f32) * inv_dp;
                if cx < 0.0 || cy < 0.0 {
                    break;
                }
                let (ax, ay) = (cx as usize + 1, cy as usize + 1);
                if ax >= acc_w - 1 || ay >= acc_h - 1 {
                    break;
                }
                let cell = ay * acc_w + ax;
                if last_cell != Some(cell) {
                    accumulator[cell] += 1;
                    last_cell = Some(cell);
                }
            }
        }
    }

    let mut centres = Vec::new();
    for ay in 1..acc_h - 1 {
        for ax in 1..acc_w - 1 {
            let cell = ay * acc_w + ax;
            let votes = accumulator[cell];
            if (votes as f32) > params.param2
                && votes > accumulator[cell - 1]
                && votes >= accumulator[cell + 1]
                && votes > accumulator[cell - acc_w]
                && votes >= accumulator[cell + acc_w]
            {
                centres.push((ax, ay, votes));
            }
        }
    }
    centres.sort_by(|a, b| b.2.cmp(&a.2));

    let mut circles: Vec<CircleCandidate> = Vec::new();
    for (ax, ay, votes) in centres {
        let (x, y) = peak_centroid(&accumulator, acc_w, ax, ay, params.dp);
        if circles.iter().any(|c| c.distance_to(x, y) < params.min_dist) {
            continue;
        }

        let Some((x, y, radius)) = refine_circle(&edge_points, x, y, params) else {
            continue;
        };
        if circles.iter().any(|c| c.distance_to(x, y) < params.min_dist) {
            continue;
        }
        circles.push(CircleCandidate { x, y, radius, votes });
    }

    Ok(circles)
}

/// Least-squares rounds used to pull a peak onto the ring it voted for
const REFINE_ITERATIONS: usize = 4;
/// Edge pixels within this distance of the current radius take part in a fit
const FIT_BAND: f32 = 2.0;
/// cos(45°): an edge pixel supports a centre only if its gradient points roughly at it
const RADIAL_COS: f32 = std::f32::consts::FRAC_1_SQRT_2;

#[derive(Debug, Clone, Copy)]
struct EdgePoint {
    x: f32,
    y: f32,
    /// Unit gradient direction
    ux: f32,
    uy: f32,
}

impl EdgePoint {
    /// Distance to (cx, cy), if the gradient runs along the line to it
    fn radial_distance(&self, cx: f32, cy: f32) -> Option<f32> {
        let (dx, dy) = (self.x - cx, self.y - cy);
        let d = (dx * dx + dy * dy).sqrt();
        if d == 0.0 {
            return None;
        }
        let cos = (dx * self.ux + dy * self.uy) / d;
        (cos.abs() >= RADIAL_COS).then_some(d)
    }
}

/// Vote-weighted centre of the 3×3 accumulator neighbourhood, in image coordinates
fn peak_centroid(accumulator: &[u32], acc_w: usize, ax: usize, ay: usize, dp: f32) -> (f32, f32) {
    let (mut sum, mut sx, mut sy) = (0f32, 0f32, 0f32);
    for ny in ay - 1..=ay + 1 {
        for nx in ax - 1..=ax + 1 {
            let votes = accumulator[ny * acc_w + nx] as f32;
            sum += votes;
            sx += votes * nx as f32;
            sy += votes * ny as f32;
        }
    }
    ((sx / sum - 1.0 + 0.5) * dp, (sy / sum - 1.0 + 0.5) * dp)
}

/// Move a coarse centre onto the ring of edge pixels around it
///
/// Returns (x, y, radius) when the final radius has at least `param2` supporting
/// edge pixels.
fn refine_circle(edge_points: &[EdgePoint], x: f32, y: f32, params: &HoughParams) -> Option<(f32, f32, f32)> {
    let (mut cx, mut cy) = (x, y);
    let (mut radius, _) = estimate_radius(edge_points, cx, cy, params)?;

    for _ in 0..REFINE_ITERATIONS {
        let inliers: Vec<(f32, f32)> = edge_points
            .iter()
            .filter(|p| p.radial_distance(cx, cy).is_some_and(|d| (d - radius).abs() <= FIT_BAND))
            .map(|p| (p.x, p.y))
            .collect();
        let Some((fx, fy)) = fit_circle_center(&inliers) else {
            break;
        };
        let shift = ((fx - cx).powi(2) + (fy - cy).powi(2)).sqrt();
        if shift > radius {
            break;
        }
        cx = fx;
        cy = fy;
        radius = estimate_radius(edge_points, cx, cy, params)?.0;
        if shift < 0.05 {
            break;
        }
    }

    let (radius, support) = estimate_radius(edge_points, cx, cy, params)?;
    ((support as f32) >= params.param2).then_some((cx, cy, radius))
}

/// Algebraic least-squares circle centre through the points
fn fit_circle_center(points: &[(f32, f32)]) -> Option<(f32, f32)> {
    if points.len() < 3 {
        return None;
    }
    let n = points.len() as f64;
    let mx = points.iter().map(|p| p.0 as f64).sum::<f64>() / n;
    let my = points.iter().map(|p| p.1 as f64).sum::<f64>() / n;

    let (mut suu, mut suv, mut svv) = (0f64, 0f64, 0f64);
    let (mut suuu, mut svvv, mut suvv, mut svuu) = (0f64, 0f64, 0f64, 0f64);
    for &(x, y) in points {
        let u = x as f64 - mx;
        let v = y as f64 - my;
        suu += u * u;
        suv += u * v;
        svv += v * v;
        suuu += u * u * u;
        svvv += v * v * v;
        suvv += u * v * v;
        svuu += v * u * u;
    }

    let det = suu * svv - suv * suv;
    if det.abs() < 1e-9 {
        return None;
    }
    let bu = 0.5 * (suuu + suvv);
    let bv = 0.5 * (svvv + svuu);
    let uc = (bu * svv - bv * suv) / det;
    let vc = (suu * bv - suv * bu) / det;

    Some(((uc + mx) as f32, (vc + my) as f32))
}

/// Radius with the most radially aligned edge pixels within ±1 px of it, and that pixel count
fn estimate_radius(edge_points: &[EdgePoint], x: f32, y: f32, params: &HoughParams) -> Option<(f32, usize)> {
    let min_r = params.min_radius as f32;
    let max_r = params.max_radius as f32;

    let mut distances: Vec<f32> = edge_points
        .iter()
        .filter_map(|p| p.radial_distance(x, y))
        .filter(|&d| d >= min_r - 1.0 && d <= max_r + 1.0)
        .collect();
    if distances.is_empty() {
        return None;
    }
    distances.sort_by(|a, b| a.total_cmp(b));

    let mut best: Option<(u32, usize, usize)> = None;
    let (mut lo, mut hi) = (0usize, 0usize);
    for r in params.min_radius..=params.max_radius {
        let rf = r as f32;
        while lo < distances.len() && distances[lo] < rf - 1.0 {
            lo += 1;
        }
        if hi < lo {
            hi = lo;
        }
        while hi < distances.len() && distances[hi] <= rf + 1.0 {
            hi += 1;
        }
        let count = hi - lo;
        if count > 0 && best.is_none_or(|(_, c, _)| count > c) {
            best = Some((r, count, lo));
        }
    }

    let (_, support, start) = best?;
    let window = &distances[start..start + support];
    let radius = window.iter().sum::<f32>() / support as f32;
    Some((radius, support))
}
