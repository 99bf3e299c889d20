//! Stroking of straight lines and rectangle outlines.
//!
//! Only the shapes text decorations and the glyph-bounds overlay need are
//! supported: a single segment with butt ends, and a rectangle frame.

use glam::DVec2;
use glint_core::geometry::Rect;

use crate::{Path, PathBuilder};

/// Quad covering the segment `start -> end` widened by `width`.
///
/// A zero-length segment yields an empty path.
pub fn stroke_line(start: DVec2, end: DVec2, width: f64) -> Path {
    let dir = (end - start).normalize_or_zero();
    if dir == DVec2::ZERO || width <= 0.0 {
        return Path::new();
    }
    let normal = DVec2::new(-dir.y, dir.x) * (width * 0.5);

    PathBuilder::new()
        .move_to(start - normal)
        .line_to(end - normal)
        .line_to(end + normal)
        .line_to(start + normal)
        .close()
        .build()
}

/// Frame of width `width` centred on the edges of `rect`.
///
/// The inner ring is wound opposite to the outer one so non-zero filling
/// leaves the middle open.
pub fn stroke_rect(rect: Rect, width: f64) -> Path {
    if !rect.is_valid() || width <= 0.0 {
        return Path::new();
    }
    let half = width * 0.5;
    let outer = Rect::new(rect.left - half, rect.top - half, rect.right + half, rect.bottom + half);
    let inner = Rect::new(rect.left + half, rect.top + half, rect.right - half, rect.bottom - half);

    let mut builder = PathBuilder::new();
    builder.rect(outer);
    if inner.is_valid() {
        builder
            .move_to(DVec2::new(inner.left, inner.top))
            .line_to(DVec2::new(inner.left, inner.bottom))
            .line_to(DVec2::new(inner.right, inner.bottom))
            .line_to(DVec2::new(inner.right, inner.top))
            .close();
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::signed_area;

    #[test]
    fn test_horizontal_line_is_axis_aligned_quad() {
        let path = stroke_line(DVec2::new(0.5, 22.5), DVec2::new(30.5, 22.5), 1.0);
        let bounds = path.bounds().unwrap();
        assert_eq!(bounds, Rect::new(0.5, 22.0, 30.5, 23.0));
    }

    #[test]
    fn test_degenerate_line_is_empty() {
        assert!(stroke_line(DVec2::ONE, DVec2::ONE, 2.0).is_empty());
        assert!(stroke_line(DVec2::ZERO, DVec2::X, 0.0).is_empty());
    }

    #[test]
    fn test_rect_frame_has_opposite_rings() {
        let path = stroke_rect(Rect::new(0.0, 0.0, 10.0, 10.0), 1.0);
        let polygons = path.polygons();
        assert_eq!(polygons.len(), 2);
        assert!(signed_area(&polygons[0]) * signed_area(&polygons[1]) < 0.0);
    }
}
