use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut};

use crate::models::Contour;

pub const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);

/// Circle outline two pixels wide
pub fn draw_circle_outline(canvas: &mut RgbImage, center: (i32, i32), radius: i32, color: Rgb<u8>) {
    draw_hollow_circle_mut(canvas, center, radius, color);
    if radius > 1 {
        draw_hollow_circle_mut(canvas, center, radius - 1, color);
    }
}

pub fn draw_center_marker(canvas: &mut RgbImage, center: (i32, i32), color: Rgb<u8>) {
    draw_filled_circle_mut(canvas, center, 2, color);
}

/// Closed contour outline two pixels wide
pub fn draw_contour_outline(canvas: &mut RgbImage, contour: &Contour, color: Rgb<u8>) {
    let points = &contour.points;
    if points.is_empty() {
        return;
    }

    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        for (ox, oy) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)] {
            draw_line_segment_mut(
                canvas,
                (p.x as f32 + ox, p.y as f32 + oy),
                (q.x as f32 + ox, q.y as f32 + oy),
                color,
            );
        }
    }
}
