use image::{GrayImage, Luma};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point;

use crate::error::{AnalysisError, Result};
use crate::models::Contour;

pub const ON: Luma<u8> = Luma([255]);

/// Number of non-zero pixels
pub fn count_on(mask: &GrayImage) -> u64 {
    mask.pixels().filter(|p| p[0] > 0).count() as u64
}

/// Pixels set in `a` but not in `b`; both masks must have the same dimensions
pub fn and_not(a: &GrayImage, b: &GrayImage) -> Result<GrayImage> {
    if a.dimensions() != b.dimensions() {
        return Err(AnalysisError::InvalidParameter(format!(
            "masks differ in size: {:?} vs {:?}",
            a.dimensions(),
            b.dimensions()
        )));
    }
    Ok(GrayImage::from_fn(a.width(), a.height(), |x, y| {
        if a.get_pixel(x, y)[0] > 0 && b.get_pixel(x, y)[0] == 0 {
            ON
        } else {
            Luma([0])
        }
    }))
}

/// Fill the polygon traced by `contour`, boundary included
pub fn fill_contour(mask: &mut GrayImage, contour: &Contour) {
    let polygon = closed_polygon(&contour.points);

    match polygon.len() {
        0 => {}
        1 => {
            let p = polygon[0];
            if p.x >= 0 && p.y >= 0 && (p.x as u32) < mask.width() && (p.y as u32) < mask.height() {
                mask.put_pixel(p.x as u32, p.y as u32, ON);
            }
        }
        _ => {
            if polygon.len() >= 3 {
                draw_polygon_mut(mask, &polygon, ON);
            }
            for (i, p) in polygon.iter().enumerate() {
                let q = polygon[(i + 1) % polygon.len()];
                draw_line_segment_mut(mask, (p.x as f32, p.y as f32), (q.x as f32, q.y as f32), ON);
            }
        }
    }
}

/// Drop repeated consecutive points and a trailing copy of the first point,
/// which the polygon filler rejects
fn closed_polygon(points: &[Point<i32>]) -> Vec<Point<i32>> {
    let mut polygon: Vec<Point<i32>> = Vec::with_capacity(points.len());
    for &p in points {
        if polygon.last() != Some(&p) {
            polygon.push(p);
        }
    }
    while polygon.len() > 1 && polygon.first() == polygon.last() {
        polygon.pop();
    }
    polygon
}
