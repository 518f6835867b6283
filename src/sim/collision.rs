//! Axis-aligned boxes in page coordinates
//!
//! Origin at the top-left of the play area, y grows downward, like CSS
//! `left`/`top` offsets.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Bounding-box overlap; touching edges count
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right() < other.left()
            || self.left() > other.right()
            || self.bottom() < other.top()
            || self.top() > other.bottom())
    }
}

/// Largest top-left offset that keeps a box of `size` inside `area`
#[inline]
pub fn max_offset(area: Vec2, size: Vec2) -> Vec2 {
    (area - size).max(Vec2::ZERO)
}

/// A usable measured extent, or `None` for missing/degenerate bounds
pub fn measured(width: f32, height: f32) -> Option<Vec2> {
    (width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0)
        .then(|| Vec2::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(a.overlaps(&Rect::new(2.0, 2.0, 1.0, 1.0)));
        assert!(!a.overlaps(&Rect::new(11.0, 0.0, 5.0, 5.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 10.5, 5.0, 5.0)));
    }

    #[test]
    fn test_touching_edges_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(10.0, 0.0, 5.0, 5.0)));
        assert!(a.overlaps(&Rect::new(0.0, 10.0, 5.0, 5.0)));
    }

    #[test]
    fn test_max_offset_never_negative() {
        let area = Vec2::new(100.0, 30.0);
        assert_eq!(max_offset(area, Vec2::new(40.0, 40.0)), Vec2::new(60.0, 0.0));
    }

    #[test]
    fn test_measured_rejects_bad_bounds() {
        assert_eq!(measured(300.0, 200.0), Some(Vec2::new(300.0, 200.0)));
        assert_eq!(measured(0.0, 200.0), None);
        assert_eq!(measured(f32::NAN, 200.0), None);
    }
}
