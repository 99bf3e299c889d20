//! Ink bounding box accumulation.

use glint_core::geometry::IntRect;

/// Pixel-area bounds of a glyph whose cache bounds are pixel indices.
///
/// The cache reports inclusive pixel indices relative to the glyph origin;
/// placing them at the pen position `(x, y)` and widening by one pixel on
/// the top and on the right/bottom edges turns indices into the area the
/// pixels cover.
pub fn glyph_area_bounds(bounds: IntRect, x: f64, y: f64) -> IntRect {
    IntRect::new(
        (bounds.left as f64 + x) as i32,
        (bounds.top as f64 + y - 1.0) as i32,
        (bounds.right as f64 + x + 1.0) as i32,
        (bounds.bottom as f64 + y + 1.0) as i32,
    )
}

/// Union of every valid rectangle seen so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    rect: IntRect,
}

impl BoundingBox {
    /// Starts out empty (inverted).
    pub fn new() -> Self {
        Self {
            rect: IntRect::EMPTY,
        }
    }

    /// Merge `rect` unless it is inverted.
    pub fn include(&mut self, rect: IntRect) {
        if rect.is_valid() {
            self.rect = self.rect | rect;
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.rect.is_valid()
    }

    pub fn rect(&self) -> IntRect {
        self.rect
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new()
    }
}
