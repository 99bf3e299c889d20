//! Contour converter for synthetic ("false") bold.
//!
//! Offsets every closed polygon of a flat path by half the contour width.
//! The offset side is fixed per path from the summed signed area, so outer
//! contours grow while counters (wound the other way) shrink, which is what
//! emboldening a consistently wound glyph outline needs.

use glam::DVec2;

use crate::{Path, PathBuilder};

/// Miter joins longer than this multiple of the half width are beveled.
pub const MITER_LIMIT: f64 = 4.0;

/// Signed shoelace area of a polygon.
pub fn signed_area(points: &[DVec2]) -> f64 {
    let n = points.len();
    let mut sum = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        sum += a.x * b.y - b.x * a.y;
    }
    sum * 0.5
}

/// Offset each closed polygon of the flat `path` by `width / 2`.
///
/// A zero width returns the polygons unchanged.
pub fn contour(path: &Path, width: f64) -> Path {
    let polygons = path.polygons();
    let mut builder = PathBuilder::new();

    let half = width * 0.5;
    let total_area: f64 = polygons.iter().map(|p| signed_area(p)).sum();
    let side = if total_area < 0.0 { -1.0 } else { 1.0 };

    for polygon in &polygons {
        let offset = if half == 0.0 {
            polygon.clone()
        } else {
            offset_polygon(polygon, half * side)
        };
        if let Some((first, rest)) = offset.split_first() {
            builder.move_to(*first);
            for p in rest {
                builder.line_to(*p);
            }
            builder.close();
        }
    }

    builder.build()
}

/// Right-hand unit normal of the edge `a -> b` (outward for positive area).
fn edge_normal(a: DVec2, b: DVec2) -> DVec2 {
    let d = (b - a).normalize_or_zero();
    DVec2::new(d.y, -d.x)
}

fn offset_polygon(points: &[DVec2], distance: f64) -> Vec<DVec2> {
    let n = points.len();
    let mut out = Vec::with_capacity(n + n / 2);

    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let current = points[i];
        let next = points[(i + 1) % n];

        let n0 = edge_normal(prev, current);
        let n1 = edge_normal(current, next);
        let bisector = (n0 + n1).normalize_or_zero();
        let cos_half = bisector.dot(n0);

        if bisector == DVec2::ZERO || cos_half < 1.0 / MITER_LIMIT {
            out.push(current + n0 * distance);
            out.push(current + n1 * distance);
        } else {
            out.push(current + bisector * (distance / cos_half));
        }
    }

    out
}
