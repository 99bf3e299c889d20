//! Glyph representations handed over by the glyph cache.

use glam::DVec2;
use glint_core::geometry::IntRect;
use glint_geometry::Path;

use crate::error::{GlintError, GlintResult};

/// Pixel layout of a glyph bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitmapFormat {
    /// 1 bit per pixel, most significant bit first.
    Mono,
    /// 1 byte of coverage per pixel.
    Gray8,
    /// 3 bytes (R, G, B coverage) per pixel.
    Subpixel,
}

impl BitmapFormat {
    /// Minimum bytes needed for one row of `width` pixels.
    pub fn row_bytes(&self, width: u32) -> usize {
        let width = width as usize;
        match self {
            BitmapFormat::Mono => width.div_ceil(8),
            BitmapFormat::Gray8 => width,
            BitmapFormat::Subpixel => width * 3,
        }
    }
}

/// A pre-rendered, upright glyph image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    width: u32,
    height: u32,
    stride: usize,
    data: Vec<u8>,
}

impl GlyphBitmap {
    /// Wrap a pixel buffer, checking it is large enough for `format`.
    pub fn new(
        format: BitmapFormat,
        width: u32,
        height: u32,
        stride: usize,
        data: Vec<u8>,
    ) -> GlintResult<Self> {
        let row = format.row_bytes(width);
        if stride < row {
            return Err(GlintError::InvalidBitmap(format!(
                "stride {} is smaller than the {} bytes a {:?} row of {} pixels needs",
                stride, row, format, width
            )));
        }
        let needed = stride * height as usize;
        if data.len() < needed {
            return Err(GlintError::InvalidBitmap(format!(
                "buffer holds {} bytes, {}x{} with stride {} needs {}",
                data.len(),
                width,
                height,
                stride,
                needed
            )));
        }
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride;
        &self.data[start..start + self.stride]
    }
}

/// The representation the cache produced for a glyph.
#[derive(Debug, Clone, PartialEq)]
pub enum GlyphData {
    /// Binary bitmap, painted without antialiasing.
    Mono(GlyphBitmap),
    /// Grayscale coverage bitmap.
    Gray8(GlyphBitmap),
    /// LCD subpixel coverage bitmap.
    Subpixel(GlyphBitmap),
    /// Vector outline in glyph-local pixel coordinates.
    Outline(Path),
    /// Payload the cache could not classify. Contributes bounds only.
    Invalid,
}

impl GlyphData {
    pub fn is_outline(&self) -> bool {
        matches!(self, GlyphData::Outline(_))
    }
}

/// A cached glyph: its ink bounds relative to the glyph origin (inclusive
/// pixel indices), its data and its advance.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedGlyph {
    pub glyph_id: u32,
    pub bounds: IntRect,
    pub data: GlyphData,
    pub advance: DVec2,
}

impl CachedGlyph {
    pub fn new(glyph_id: u32, bounds: IntRect, data: GlyphData, advance: DVec2) -> Self {
        Self {
            glyph_id,
            bounds,
            data,
            advance,
        }
    }
}
