//! Box-shaped glyphs sitting on the baseline.
//!
//! A box of `width x height` pixels occupies x in `0..width` and y in
//! `-height..0` relative to the pen, so its inclusive cache bounds are
//! `(0, -height, width - 1, -1)`.

use glam::DVec2;
use glint_core::geometry::{IntRect, Rect};
use glint_geometry::PathBuilder;
use glint_text::{BitmapFormat, CachedGlyph, GlyphBitmap, GlyphData};

/// Cache bounds of a box glyph.
pub fn box_bounds(width: u32, height: u32) -> IntRect {
    IntRect::new(0, -(height as i32), width as i32 - 1, -1)
}

fn bitmap_box(format: BitmapFormat, width: u32, height: u32, fill: u8) -> Option<GlyphBitmap> {
    let stride = format.row_bytes(width);
    GlyphBitmap::new(format, width, height, stride, vec![fill; stride * height as usize]).ok()
}

/// Fully covered grayscale box.
pub fn gray8_box(glyph_id: u32, width: u32, height: u32, advance: f64) -> CachedGlyph {
    let data = bitmap_box(BitmapFormat::Gray8, width, height, 255)
        .map_or(GlyphData::Invalid, GlyphData::Gray8);
    CachedGlyph::new(glyph_id, box_bounds(width, height), data, DVec2::new(advance, 0.0))
}

/// Fully set monochrome box.
pub fn mono_box(glyph_id: u32, width: u32, height: u32, advance: f64) -> CachedGlyph {
    let data = bitmap_box(BitmapFormat::Mono, width, height, 0xff)
        .map_or(GlyphData::Invalid, GlyphData::Mono);
    CachedGlyph::new(glyph_id, box_bounds(width, height), data, DVec2::new(advance, 0.0))
}

/// Fully covered LCD box.
pub fn subpixel_box(glyph_id: u32, width: u32, height: u32, advance: f64) -> CachedGlyph {
    let data = bitmap_box(BitmapFormat::Subpixel, width, height, 255)
        .map_or(GlyphData::Invalid, GlyphData::Subpixel);
    CachedGlyph::new(glyph_id, box_bounds(width, height), data, DVec2::new(advance, 0.0))
}

/// Box outline covering the same pixels as the bitmap boxes.
pub fn outline_box(glyph_id: u32, width: u32, height: u32, advance: f64) -> CachedGlyph {
    let path = PathBuilder::new()
        .rect(Rect::new(0.0, -(height as f64), width as f64, 0.0))
        .build();
    CachedGlyph::new(
        glyph_id,
        box_bounds(width, height),
        GlyphData::Outline(path),
        DVec2::new(advance, 0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_shapes_agree() {
        let gray = gray8_box(1, 5, 8, 6.0);
        let outline = outline_box(1, 5, 8, 6.0);
        assert_eq!(gray.bounds, IntRect::new(0, -8, 4, -1));
        assert_eq!(gray.bounds, outline.bounds);
        assert!(matches!(gray.data, GlyphData::Gray8(_)));
        assert!(matches!(mono_box(2, 9, 1, 10.0).data, GlyphData::Mono(_)));
        assert!(matches!(subpixel_box(3, 2, 2, 3.0).data, GlyphData::Subpixel(_)));

        let GlyphData::Outline(path) = outline.data else {
            panic!("expected an outline");
        };
        assert_eq!(path.bounds(), Some(Rect::new(0.0, -8.0, 5.0, 0.0)));
    }
}
