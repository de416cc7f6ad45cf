#![allow(dead_code)]

use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use imageproc::contours::BorderType;
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;
use micrograin::Contour;
use tempfile::NamedTempFile;

pub const BACKGROUND: Rgb<u8> = Rgb([20, 20, 20]);
pub const PARTICLE: Rgb<u8> = Rgb([230, 230, 230]);

/// Creates a grayscale image filled with a single intensity.
pub fn uniform_gray(width: u32, height: u32, value: u8) -> GrayImage {
    GrayImage::from_pixel(width, height, Luma([value]))
}

/// Dark background with a single bright disc.
pub fn disc_image(width: u32, height: u32, center: (i32, i32), radius: i32) -> DynamicImage {
    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);
    draw_filled_circle_mut(&mut img, center, radius, PARTICLE);
    DynamicImage::ImageRgb8(img)
}

/// Dark background with several bright discs, given as (center, radius).
pub fn discs_image(width: u32, height: u32, discs: &[((i32, i32), i32)]) -> DynamicImage {
    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);
    for &(center, radius) in discs {
        draw_filled_circle_mut(&mut img, center, radius, PARTICLE);
    }
    DynamicImage::ImageRgb8(img)
}

/// Bright disc with a dark slot cut in from its right edge toward the centre.
pub fn notched_disc_image(size: u32, radius: i32, slot_width: u32, slot_depth: u32) -> DynamicImage {
    let c = size as i32 / 2;
    let mut img = RgbImage::from_pixel(size, size, BACKGROUND);
    draw_filled_circle_mut(&mut img, (c, c), radius, PARTICLE);
    let slot = Rect::at(c + radius + 1 - slot_depth as i32, c - slot_width as i32 / 2).of_size(slot_depth + 2, slot_width);
    draw_filled_rect_mut(&mut img, slot, BACKGROUND);
    DynamicImage::ImageRgb8(img)
}

/// Dark background with a single bright axis-aligned rectangle.
pub fn rect_image(width: u32, height: u32, x: i32, y: i32, w: u32, h: u32) -> DynamicImage {
    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);
    draw_filled_rect_mut(&mut img, Rect::at(x, y).of_size(w, h), PARTICLE);
    DynamicImage::ImageRgb8(img)
}

/// Bright annulus on a black background: a solid ring enclosing a dark void.
pub fn ring_gray(size: u32, outer: i32, inner: i32) -> GrayImage {
    let mut img = uniform_gray(size, size, 0);
    let c = (size as i32 / 2, size as i32 / 2);
    draw_filled_circle_mut(&mut img, c, outer, Luma([255u8]));
    draw_filled_circle_mut(&mut img, c, inner, Luma([0u8]));
    img
}

/// Horizontal ramp covering every intensity, so all region classes appear.
pub fn gradient_gray(width: u32, height: u32) -> GrayImage {
    ImageBuffer::from_fn(width, height, |x, _| Luma([(x * 255 / (width - 1)) as u8]))
}

/// Sampled circle outline as an integer point sequence.
pub fn circle_points(cx: f64, cy: f64, radius: f64, samples: usize, rotation: f64) -> Vec<Point<i32>> {
    (0..samples)
        .map(|i| {
            let t = rotation + i as f64 * std::f64::consts::TAU / samples as f64;
            Point::new((cx + radius * t.cos()).round() as i32, (cy + radius * t.sin()).round() as i32)
        })
        .collect()
}

pub fn contour(points: Vec<Point<i32>>) -> Contour {
    Contour::new(points, BorderType::Outer, None)
}

/// Saves an image to a temporary PNG and returns the temp file.
/// The file will be automatically cleaned up when dropped.
pub fn save_temp_png(img: &DynamicImage) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("Failed to create temp image file");
    img.save_with_format(file.path(), image::ImageFormat::Png)
        .expect("Failed to save test image");
    file
}

pub fn percentages_sum(stats: &micrograin::RegionStatistics) -> f64 {
    stats.air_percentage() + stats.void_percentage() + stats.hollow_percentage() + stats.non_hollow_percentage()
}
