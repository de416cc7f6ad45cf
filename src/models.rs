use imageproc::contours::BorderType;
use imageproc::point::Point;

/// A traced boundary: ordered pixel coordinates plus its place in the containment tree
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub points: Vec<Point<i32>>,
    pub border_type: BorderType,
    /// Index of the enclosing contour within the owning `ContourSet`
    pub parent: Option<usize>,
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>, border_type: BorderType, parent: Option<usize>) -> Self {
        Self {
            points,
            border_type,
            parent,
        }
    }

    pub fn is_outer(&self) -> bool {
        self.border_type == BorderType::Outer
    }

    /// Polygon area enclosed by the points (shoelace formula, always non-negative)
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }

        let mut twice_area = 0i64;
        for i in 0..n {
            let p = self.points[i];
            let q = self.points[(i + 1) % n];
            twice_area += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
        }

        (twice_area as f64 / 2.0).abs()
    }

    /// Closed arc length, including the segment from the last point back to the first
    pub fn perimeter(&self) -> f64 {
        let n = self.points.len();
        if n < 2 {
            return 0.0;
        }

        (0..n)
            .map(|i| {
                let p = self.points[i];
                let q = self.points[(i + 1) % n];
                let dx = (q.x - p.x) as f64;
                let dy = (q.y - p.y) as f64;
                (dx * dx + dy * dy).sqrt()
            })
            .sum()
    }

    /// Circularity = 4π × area / perimeter²
    ///
    /// 1.0 for a perfect circle, smaller for elongated or ragged outlines.
    /// Degenerate contours (zero perimeter) score 0.
    pub fn circularity(&self) -> f64 {
        let perimeter = self.perimeter();
        if perimeter == 0.0 {
            return 0.0;
        }
        4.0 * std::f64::consts::PI * self.area() / (perimeter * perimeter)
    }

    /// Inclusive bounding box as (min_x, min_y, max_x, max_y)
    pub fn bounding_box(&self) -> Option<(i32, i32, i32, i32)> {
        let first = self.points.first()?;
        Some(self.points.iter().fold(
            (first.x, first.y, first.x, first.y),
            |(min_x, min_y, max_x, max_y), p| {
                (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
            },
        ))
    }
}

/// Contours together with their containment hierarchy
#[derive(Debug, Clone, Default)]
pub struct ContourSet {
    pub contours: Vec<Contour>,
}

impl ContourSet {
    pub fn new(contours: Vec<Contour>) -> Self {
        Self { contours }
    }

    pub fn len(&self) -> usize {
        self.contours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Contour> {
        self.contours.iter()
    }

    /// Indices of contours that nothing encloses
    pub fn roots(&self) -> Vec<usize> {
        self.contours
            .iter()
            .enumerate()
            .filter(|(_, c)| c.parent.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn children(&self, index: usize) -> Vec<usize> {
        self.contours
            .iter()
            .enumerate()
            .filter(|(_, c)| c.parent == Some(index))
            .map(|(i, _)| i)
            .collect()
    }

    /// Hole borders directly inside the contour at `index`
    pub fn holes_of(&self, index: usize) -> Vec<usize> {
        self.children(index)
            .into_iter()
            .filter(|&i| self.contours[i].border_type == BorderType::Hole)
            .collect()
    }

    /// Number of ancestors above the contour at `index` (roots have depth 0)
    pub fn depth(&self, index: usize) -> usize {
        let mut depth = 0;
        let mut current = self.contours.get(index).and_then(|c| c.parent);
        while let Some(parent) = current {
            depth += 1;
            current = self.contours.get(parent).and_then(|c| c.parent);
        }
        depth
    }
}

impl IntoIterator for ContourSet {
    type Item = Contour;
    type IntoIter = std::vec::IntoIter<Contour>;

    fn into_iter(self) -> Self::IntoIter {
        self.contours.into_iter()
    }
}

/// A circle found by the Hough search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleCandidate {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Accumulator votes at the centre cell
    pub votes: u32,
}

impl CircleCandidate {
    pub fn center(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        let dx = self.x - x;
        let dy = self.y - y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Pixel counts per region class and the resulting area shares
#[derive(Debug, Clone, PartialEq)]
pub struct RegionStatistics {
    pub total_pixels: u64,
    pub air_pixels: u64,
    pub hollow_pixels: u64,
    pub non_hollow_pixels: u64,
    /// Residual class; negative when the air and hollow masks overlap
    pub void_pixels: i64,
}

impl RegionStatistics {
    pub fn from_counts(total_pixels: u64, air_pixels: u64, hollow_pixels: u64, non_hollow_pixels: u64) -> Self {
        let void_pixels =
            total_pixels as i64 - (air_pixels as i64 + hollow_pixels as i64 + non_hollow_pixels as i64);
        Self {
            total_pixels,
            air_pixels,
            hollow_pixels,
            non_hollow_pixels,
            void_pixels,
        }
    }

    fn percentage(&self, pixels: f64) -> f64 {
        if self.total_pixels == 0 {
            return 0.0;
        }
        pixels / self.total_pixels as f64 * 100.0
    }

    pub fn air_percentage(&self) -> f64 {
        self.percentage(self.air_pixels as f64)
    }

    pub fn hollow_percentage(&self) -> f64 {
        self.percentage(self.hollow_pixels as f64)
    }

    pub fn non_hollow_percentage(&self) -> f64 {
        self.percentage(self.non_hollow_pixels as f64)
    }

    pub fn void_percentage(&self) -> f64 {
        self.percentage(self.void_pixels as f64)
    }
}

/// Counts, area shares and diameter spread of detected particles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleStatistics {
    pub circular_count: usize,
    pub non_circular_count: usize,
    pub circular_area: f64,
    pub non_circular_area: f64,
    pub circular_area_ratio: f64,
    pub non_circular_area_ratio: f64,
    pub mean_diameter: f64,
    pub std_dev_diameter: f64,
}

impl ParticleStatistics {
    /// Derive ratios and diameter statistics from the accumulated per-path totals
    pub fn from_measurements(
        circular_count: usize,
        non_circular_count: usize,
        circular_area: f64,
        non_circular_area: f64,
        diameters: &[f64],
    ) -> Self {
        let total_area = circular_area + non_circular_area;
        let (circular_area_ratio, non_circular_area_ratio) = if total_area > 0.0 {
            (
                circular_area / total_area * 100.0,
                non_circular_area / total_area * 100.0,
            )
        } else {
            (0.0, 0.0)
        };

        let (mean_diameter, std_dev_diameter) = mean_and_std_dev(diameters);

        Self {
            circular_count,
            non_circular_count,
            circular_area,
            non_circular_area,
            circular_area_ratio,
            non_circular_area_ratio,
            mean_diameter,
            std_dev_diameter,
        }
    }
}

/// Population mean and standard deviation; (0, 0) for an empty slice
pub fn mean_and_std_dev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    (mean, variance.sqrt())
}
