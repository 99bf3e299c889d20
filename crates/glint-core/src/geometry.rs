//! Pixel-space rectangles.
//!
//! [`IntRect`] uses inclusive pixel-index edges: a rect with
//! `left == right` is one pixel wide. [`Rect`] is its floating-point
//! counterpart used for device-space results.

use std::ops::BitOr;

use glam::DVec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IntPoint {
    pub x: i32,
    pub y: i32,
}

impl IntPoint {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        IntPoint { x, y }
    }

    /// Truncate toward zero, like a C integer cast.
    pub fn from_trunc(point: DVec2) -> Self {
        IntPoint {
            x: point.x as i32,
            y: point.y as i32,
        }
    }
}

/// Integer rectangle with inclusive edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Default for IntRect {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl IntRect {
    /// The inverted "nothing seen yet" rectangle. Any union with a valid
    /// rectangle yields that rectangle.
    pub const EMPTY: Self = Self {
        left: i32::MAX,
        top: i32::MAX,
        right: i32::MIN,
        bottom: i32::MIN,
    };

    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        IntRect {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.left <= self.right && self.top <= self.bottom
    }

    /// Distance between the edges (`right - left`).
    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    /// Distance between the edges (`bottom - top`).
    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Component-wise min/max union.
    pub fn union(&self, other: &IntRect) -> IntRect {
        IntRect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Both rects are valid and share at least one pixel.
    pub fn intersects(&self, other: &IntRect) -> bool {
        self.is_valid()
            && other.is_valid()
            && !(other.left > self.right
                || other.right < self.left
                || other.top > self.bottom
                || other.bottom < self.top)
    }

    pub fn offset_by(&self, offset: IntPoint) -> IntRect {
        IntRect {
            left: self.left.saturating_add(offset.x),
            top: self.top.saturating_add(offset.y),
            right: self.right.saturating_add(offset.x),
            bottom: self.bottom.saturating_add(offset.y),
        }
    }

    /// Move the edges inward by `(dx, dy)`; negative values grow the rect.
    pub fn inset_by(&self, dx: i32, dy: i32) -> IntRect {
        IntRect {
            left: self.left.saturating_add(dx),
            top: self.top.saturating_add(dy),
            right: self.right.saturating_sub(dx),
            bottom: self.bottom.saturating_sub(dy),
        }
    }
}

impl BitOr for IntRect {
    type Output = IntRect;

    fn bitor(self, rhs: IntRect) -> IntRect {
        self.union(&rhs)
    }
}

/// Truncating conversion, edge by edge.
impl From<Rect> for IntRect {
    fn from(rect: Rect) -> Self {
        IntRect {
            left: rect.left as i32,
            top: rect.top as i32,
            right: rect.right as i32,
            bottom: rect.bottom as i32,
        }
    }
}

/// Floating-point rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Rect {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_points(min: DVec2, max: DVec2) -> Self {
        Rect::new(min.x, min.y, max.x, max.y)
    }

    pub fn is_valid(&self) -> bool {
        self.left <= self.right && self.top <= self.bottom
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Corners in `left-top, right-top, right-bottom, left-bottom` order.
    pub fn corners(&self) -> [DVec2; 4] {
        [
            DVec2::new(self.left, self.top),
            DVec2::new(self.right, self.top),
            DVec2::new(self.right, self.bottom),
            DVec2::new(self.left, self.bottom),
        ]
    }

    /// Smallest integer rect covering this one (floor/ceil).
    pub fn round_out(&self) -> IntRect {
        IntRect {
            left: self.left.floor() as i32,
            top: self.top.floor() as i32,
            right: self.right.ceil() as i32,
            bottom: self.bottom.ceil() as i32,
        }
    }
}

impl From<IntRect> for Rect {
    fn from(rect: IntRect) -> Self {
        Rect {
            left: rect.left as f64,
            top: rect.top as f64,
            right: rect.right as f64,
            bottom: rect.bottom as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_invalid() {
        assert!(!IntRect::EMPTY.is_valid());
        assert!(IntRect::new(0, 0, 0, 0).is_valid());
    }

    #[test]
    fn test_union_with_empty() {
        let r = IntRect::new(3, 4, 10, 12);
        assert_eq!(IntRect::EMPTY | r, r);
        assert_eq!(r | IntRect::new(-2, 6, 5, 20), IntRect::new(-2, 4, 10, 20));
    }

    #[test]
    fn test_intersects_edges_are_inclusive() {
        let a = IntRect::new(0, 0, 10, 10);
        assert!(a.intersects(&IntRect::new(10, 10, 20, 20)));
        assert!(!a.intersects(&IntRect::new(11, 0, 20, 10)));
        assert!(!a.intersects(&IntRect::EMPTY));
    }

    #[test]
    fn test_inset_negative_grows() {
        let r = IntRect::new(5, 5, 10, 10).inset_by(-2, -2);
        assert_eq!(r, IntRect::new(3, 3, 12, 12));
    }

    #[test]
    fn test_truncating_conversion() {
        let r = IntRect::from(Rect::new(1.7, -1.7, 9.9, 3.2));
        assert_eq!(r, IntRect::new(1, -1, 9, 3));
        let outer = Rect::new(1.7, -1.7, 9.2, 3.2).round_out();
        assert_eq!(outer, IntRect::new(1, -2, 10, 4));
    }

    #[test]
    fn test_point_truncation() {
        assert_eq!(IntPoint::from_trunc(DVec2::new(2.9, -2.9)), IntPoint::new(2, -2));
    }
}
