mod common;

use common::*;
use image::DynamicImage;
use micrograin::ParticleConfig;
use micrograin::vision::drawing::GREEN;
use std::path::Path;

#[test]
fn test_single_disc_is_one_circular_particle() -> anyhow::Result<()> {
    let img = disc_image(200, 200, (100, 100), 30);
    let analysis = ParticleDetector::default().detect(&img)?;
    let stats = &analysis.statistics;

    assert_eq!(stats.circular_count, 1);
    assert_eq!(stats.non_circular_count, 0);
    assert!((stats.mean_diameter - 60.0).abs() <= 2.0, "mean diameter {}", stats.mean_diameter);
    assert_eq!(stats.std_dev_diameter, 0.0);
    assert!((stats.circular_area_ratio - 100.0).abs() < 1e-9);
    assert_eq!(stats.non_circular_area_ratio, 0.0);
    Ok(())
}

#[test]
fn test_disc_is_annotated_in_green() -> anyhow::Result<()> {
    let img = disc_image(200, 200, (100, 100), 30);
    let analysis = ParticleDetector::default().detect(&img)?;

    assert_eq!(analysis.annotated.dimensions(), (200, 200));
    assert!(analysis.annotated.pixels().any(|p| *p == GREEN));
    Ok(())
}

#[test]
fn test_elongated_bar_is_one_non_circular_particle() -> anyhow::Result<()> {
    let img = rect_image(200, 200, 40, 85, 120, 30);
    let analysis = ParticleDetector::default().detect(&img)?;
    let stats = &analysis.statistics;

    assert_eq!(stats.circular_count, 0);
    assert_eq!(stats.non_circular_count, 1);
    assert!(analysis.non_circular[0].circularity() < 0.8);
    assert!((stats.non_circular_area_ratio - 100.0).abs() < 1e-9);
    assert_eq!(stats.mean_diameter, 0.0);
    assert_eq!(stats.std_dev_diameter, 0.0);
    Ok(())
}

#[test]
fn test_large_square_is_one_non_circular_particle() -> anyhow::Result<()> {
    let img = rect_image(300, 300, 75, 75, 150, 150);
    let analysis = ParticleDetector::default().detect(&img)?;
    let stats = &analysis.statistics;

    assert_eq!(stats.circular_count, 0, "circles: {:?}", analysis.circles);
    assert_eq!(stats.non_circular_count, 1);
    let circularity = analysis.non_circular[0].circularity();
    assert!(circularity < 0.8, "circularity {}", circularity);
    assert!((analysis.non_circular[0].area() - 150.0 * 150.0).abs() < 150.0 * 150.0 * 0.1);
    assert!((stats.non_circular_area_ratio - 100.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_notched_disc_is_counted_by_both_paths() -> anyhow::Result<()> {
    let img = notched_disc_image(200, 30, 8, 20);
    let analysis = ParticleDetector::default().detect(&img)?;
    let stats = &analysis.statistics;

    assert_eq!(stats.circular_count, 1, "circles: {:?}", analysis.circles);
    assert_eq!(stats.non_circular_count, 1);
    assert!((stats.mean_diameter - 60.0).abs() <= 2.0, "mean diameter {}", stats.mean_diameter);

    assert!(stats.circular_area > 0.0);
    assert!(stats.non_circular_area > 0.0);
    assert!(stats.circular_area_ratio > 0.0 && stats.non_circular_area_ratio > 0.0);
    assert!((stats.circular_area_ratio + stats.non_circular_area_ratio - 100.0).abs() < 1e-9);
    let expected = 100.0 * stats.circular_area / (stats.circular_area + stats.non_circular_area);
    assert!((stats.circular_area_ratio - expected).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_discs_of_different_sizes_give_diameter_spread() -> anyhow::Result<()> {
    let img = discs_image(300, 300, &[((60, 60), 15), ((200, 70), 22), ((110, 200), 30)]);
    let analysis = ParticleDetector::default().detect(&img)?;
    let stats = &analysis.statistics;

    assert_eq!(stats.circular_count, 3, "circles: {:?}", analysis.circles);

    let mut radii: Vec<f32> = analysis.circles.iter().map(|c| c.radius.round()).collect();
    radii.sort_by(|a, b| a.total_cmp(b));
    for (radius, expected) in radii.iter().zip([15.0f32, 22.0, 30.0]) {
        assert!((radius - expected).abs() <= 1.0, "radii {:?}", radii);
    }

    // diameters 30, 44, 60
    let expected_mean = (30.0 + 44.0 + 60.0) / 3.0;
    assert!((stats.mean_diameter - expected_mean).abs() <= 2.0, "mean diameter {}", stats.mean_diameter);
    assert!(stats.std_dev_diameter > 10.0, "std dev {}", stats.std_dev_diameter);
    assert!((stats.std_dev_diameter - 12.26).abs() <= 2.5, "std dev {}", stats.std_dev_diameter);
    Ok(())
}

#[test]
fn test_blank_image_has_no_particles() -> anyhow::Result<()> {
    let img = DynamicImage::ImageLuma8(uniform_gray(120, 80, 40));
    let stats = ParticleDetector::default().detect(&img)?.statistics;

    assert_eq!(stats.circular_count, 0);
    assert_eq!(stats.non_circular_count, 0);
    assert_eq!(stats.circular_area_ratio, 0.0);
    assert_eq!(stats.non_circular_area_ratio, 0.0);
    assert_eq!(stats.mean_diameter, 0.0);
    assert_eq!(stats.std_dev_diameter, 0.0);
    Ok(())
}

#[test]
fn test_area_ratios_sum_to_hundred_with_particles() -> anyhow::Result<()> {
    let stats = micrograin::ParticleStatistics::from_measurements(2, 3, 150.0, 50.0, &[10.0, 14.0]);

    assert!((stats.circular_area_ratio + stats.non_circular_area_ratio - 100.0).abs() < 1e-9);
    assert!((stats.circular_area_ratio - 75.0).abs() < 1e-9);
    assert!((stats.mean_diameter - 12.0).abs() < 1e-9);
    assert!((stats.std_dev_diameter - 2.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_even_blur_kernel_is_rejected() {
    let detector = ParticleDetector::new(ParticleConfig {
        blur_kernel: 4,
        ..ParticleConfig::default()
    });
    let result = detector.detect(&disc_image(50, 50, (25, 25), 10));
    assert!(matches!(result, Err(AnalysisError::InvalidParameter(_))));
}

#[test]
fn test_missing_file_is_load_failure() {
    let result = ParticleDetector::default().analyze_file(&FileImageLoader, Path::new("/nonexistent/image2.jpg"));
    assert!(matches!(result, Err(AnalysisError::LoadFailure { .. })));
}

#[test]
fn test_undecodable_file_is_load_failure() -> anyhow::Result<()> {
    let file = tempfile::Builder::new().suffix(".png").tempfile()?;
    std::fs::write(file.path(), b"not an image")?;

    let result = ParticleDetector::default().analyze_file(&FileImageLoader, file.path());
    assert!(matches!(result, Err(AnalysisError::LoadFailure { .. })));
    Ok(())
}

#[test]
fn test_report_lists_counts_and_diameters() {
    let stats = micrograin::ParticleStatistics::from_measurements(1, 0, 100.0, 0.0, &[20.0]);
    let text = stats.to_string();

    assert!(text.contains("Number of circular particles: 1"), "{}", text);
    assert!(text.contains("Number of non-circular particles: 0"), "{}", text);
    assert!(text.contains("Circular area ratio: 100.00%"), "{}", text);
    assert!(text.contains("Average diameter of circles: 20.00 pixels"), "{}", text);
    assert!(text.contains("Standard deviation of diameter: 0.00 pixels"), "{}", text);
}
