//! Geometry helpers shared by the classifier and the mode controllers.

pub mod safe_cast;

use serde::{Deserialize, Serialize};

/// A 2D point, either normalized or in canvas pixels depending on context
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point halfway between `self` and `other`
    #[must_use]
    pub fn midpoint(&self, other: &Self) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// Axis-aligned rectangle in container-relative normalized coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NormRect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Edges are inclusive
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Horizontal position of `x` along the rectangle, clamped to [0, 1]
    #[must_use]
    pub fn horizontal_fraction(&self, x: f64) -> f64 {
        if self.width <= 0.0 {
            return 0.0;
        }
        ((x - self.x) / self.width).clamp(0.0, 1.0)
    }

    /// Whether the rectangle lies inside the unit square with a positive area
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width > 0.0
            && self.height > 0.0
            && self.x >= 0.0
            && self.y >= 0.0
            && self.x + self.width <= 1.0
            && self.y + self.height <= 1.0
    }
}

/// Map a normalized camera-space point onto a horizontally mirrored canvas
///
/// The preview is shown mirrored, so `x` is flipped as `width - x * width`.
#[must_use]
pub fn mirror_to_canvas(point: Point, width: f64, height: f64) -> Point {
    Point {
        x: width - point.x * width,
        y: point.y * height,
    }
}

/// Mirror a normalized point horizontally, staying in normalized space
#[must_use]
pub fn mirror_normalized(point: Point) -> Point {
    Point {
        x: 1.0 - point.x,
        y: point.y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_and_midpoint() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(a.midpoint(&b), Point::new(1.5, 2.0));
    }

    #[test]
    fn test_rect_contains_edges() {
        let rect = NormRect::new(0.1, 0.1, 0.2, 0.2);
        assert!(rect.contains(Point::new(0.1, 0.1)));
        assert!(rect.contains(Point::new(0.3, 0.3)));
        assert!(rect.contains(Point::new(0.2, 0.25)));
        assert!(!rect.contains(Point::new(0.31, 0.2)));
        assert!(!rect.contains(Point::new(0.2, 0.05)));
    }

    #[test]
    fn test_horizontal_fraction_clamps() {
        let rect = NormRect::new(0.1, 0.6, 0.8, 0.1);
        assert!((rect.horizontal_fraction(0.5) - 0.5).abs() < 1e-12);
        assert_eq!(rect.horizontal_fraction(0.0), 0.0);
        assert_eq!(rect.horizontal_fraction(1.0), 1.0);

        let degenerate = NormRect::new(0.1, 0.1, 0.0, 0.1);
        assert_eq!(degenerate.horizontal_fraction(0.5), 0.0);
    }

    #[test]
    fn test_rect_validity() {
        assert!(NormRect::new(0.0, 0.0, 1.0, 1.0).is_valid());
        assert!(!NormRect::new(0.5, 0.5, 0.6, 0.1).is_valid());
        assert!(!NormRect::new(0.1, 0.1, 0.0, 0.1).is_valid());
    }

    #[test]
    fn test_mirror_to_canvas() {
        let p = mirror_to_canvas(Point::new(0.4, 0.5), 1000.0, 800.0);
        assert!((p.x - 600.0).abs() < 1e-9);
        assert!((p.y - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_mirror_normalized() {
        let p = mirror_normalized(Point::new(0.3, 0.7));
        assert!((p.x - 0.7).abs() < 1e-12);
        assert_eq!(p.y, 0.7);
    }
}
