//! Underline and strikeout.
//!
//! Decorations are painted after the glyph pass, one horizontal stroked
//! segment each, spanning the horizontal extent of the accumulated glyph
//! bounds. They never extend the reported bounds.

use glam::DVec2;
use glint_core::geometry::{IntPoint, IntRect};
use glint_geometry::{Path, stroke};

use crate::font::ServerFont;
use crate::raster::{CoveragePath, RasterDispatcher, RasterTarget};

/// Gap between the baseline pixel row and the underline centre.
const UNDERLINE_OFFSET: f64 = 2.5;

/// Fraction of the font height the strikeout sits above the baseline.
const STRIKEOUT_RATIO: f64 = 0.25;

/// Stroke width of both decorations for a font size.
pub fn decoration_width(font_size: f64) -> f64 {
    font_size / 12.0
}

/// A horizontal decoration segment in device space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecorationLine {
    pub start: DVec2,
    pub end: DVec2,
    pub width: f64,
}

impl DecorationLine {
    pub fn to_path(&self) -> Path {
        stroke::stroke_line(self.start, self.end, self.width)
    }
}

/// Device-space base rectangle: the glyph bounds with the bottom moved to
/// the final pen row, shifted by the device origin offset.
fn decoration_base(bounds: IntRect, pen_y: f64, offset: DVec2) -> IntRect {
    let mut base = bounds;
    base.bottom = pen_y as i32;
    base.offset_by(IntPoint::from_trunc(offset))
}

/// Underline centred `2.5` below the base row.
pub fn underline(bounds: IntRect, pen_y: f64, offset: DVec2, font_size: f64) -> DecorationLine {
    let base = decoration_base(bounds, pen_y, offset);
    let y = base.bottom as f64 + UNDERLINE_OFFSET;
    DecorationLine {
        start: DVec2::new(base.left as f64 + 0.5, y),
        end: DVec2::new(base.right as f64 + 0.5, y),
        width: decoration_width(font_size),
    }
}

/// Strikeout a quarter of the font height above the base row, snapped to a
/// pixel centre.
pub fn strikeout(
    bounds: IntRect,
    pen_y: f64,
    offset: DVec2,
    font_size: f64,
    total_font_height: f64,
) -> DecorationLine {
    let base = decoration_base(bounds, pen_y, offset);
    let y = (base.bottom as f64 - total_font_height * STRIKEOUT_RATIO).round() + 0.5;
    DecorationLine {
        start: DVec2::new(base.left as f64 + 0.5, y),
        end: DVec2::new(base.right as f64 + 0.5, y),
        width: decoration_width(font_size),
    }
}

/// Paints the decorations a font's face flags ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecorationPainter {
    pub underline: bool,
    pub strikeout: bool,
}

impl DecorationPainter {
    pub fn for_font(font: &ServerFont) -> Self {
        Self {
            underline: font.is_underlined(),
            strikeout: font.is_struck_out(),
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.underline && !self.strikeout
    }

    /// Lines to draw for a finished run, underline first.
    pub fn lines(
        &self,
        bounds: IntRect,
        pen_y: f64,
        offset: DVec2,
        font: &ServerFont,
    ) -> Vec<DecorationLine> {
        let mut lines = Vec::new();
        if !bounds.is_valid() {
            return lines;
        }
        let size = font.get_size() as f64;
        if self.underline {
            lines.push(underline(bounds, pen_y, offset, size));
        }
        if self.strikeout {
            let total = font.get_height().total() as f64;
            lines.push(strikeout(bounds, pen_y, offset, size, total));
        }
        lines
    }

    /// Stroke and render each line immediately through `route`.
    pub fn paint<T: RasterTarget>(
        &self,
        dispatcher: &mut RasterDispatcher<T>,
        route: CoveragePath,
        bounds: IntRect,
        pen_y: f64,
        offset: DVec2,
        font: &ServerFont,
    ) -> usize {
        let lines = self.lines(bounds, pen_y, offset, font);
        for line in &lines {
            tracing::trace!(y = line.start.y, width = line.width, "painting decoration");
            dispatcher.fill_path(route, &line.to_path());
        }
        lines.len()
    }
}
