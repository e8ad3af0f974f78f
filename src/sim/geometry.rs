//! Axis-aligned rectangles in screen space
//!
//! Screen space has y growing downward, so `upper_left` holds the smaller y.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A point in screen space
pub type Position = DVec2;

/// Axis-aligned rectangle defined by two corners
///
/// Corners are stored as given. A rectangle whose `upper_left` lies right of
/// or below `lower_right` is inverted and contains no point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub upper_left: Position,
    pub lower_right: Position,
}

impl Rect {
    pub fn new(upper_left: Position, lower_right: Position) -> Self {
        Self {
            upper_left,
            lower_right,
        }
    }

    /// Inclusive on all four edges
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        !(self.lower_right.y < y
            || self.upper_left.y > y
            || self.upper_left.x > x
            || self.lower_right.x < x)
    }

    #[inline]
    pub fn contains_point(&self, p: Position) -> bool {
        self.contains(p.x, p.y)
    }

    pub fn is_inverted(&self) -> bool {
        self.upper_left.x > self.lower_right.x || self.upper_left.y > self.lower_right.y
    }

    pub fn width(&self) -> f64 {
        self.lower_right.x - self.upper_left.x
    }

    pub fn height(&self) -> f64 {
        self.lower_right.y - self.upper_left.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Rect {
        Rect::new(DVec2::new(10.0, 10.0), DVec2::new(50.0, 50.0))
    }

    #[test]
    fn test_contains_inclusive_corners() {
        let rect = square();
        assert!(rect.contains(10.0, 10.0));
        assert!(rect.contains(50.0, 50.0));
        assert!(rect.contains(10.0, 50.0));
        assert!(rect.contains(30.0, 30.0));
    }

    #[test]
    fn test_contains_outside_each_edge() {
        let rect = square();
        assert!(!rect.contains(9.0, 30.0));
        assert!(!rect.contains(30.0, 9.0));
        assert!(!rect.contains(50.5, 30.0));
        assert!(!rect.contains(30.0, 50.5));
    }

    #[test]
    fn test_inverted_rect_contains_nothing() {
        let rect = Rect::new(DVec2::new(50.0, 10.0), DVec2::new(10.0, 50.0));
        assert!(rect.is_inverted());
        assert!(!rect.contains(30.0, 30.0));
        assert!(!rect.contains(50.0, 10.0));
        assert!(!square().is_inverted());
    }

    #[test]
    fn test_degenerate_rect_is_point_test() {
        let p = DVec2::new(7.0, 3.0);
        let rect = Rect::new(p, p);
        assert!(rect.contains_point(p));
        assert!(!rect.contains(7.0, 3.001));
        assert_eq!(rect.width(), 0.0);
        assert_eq!(rect.height(), 0.0);
    }
}
