//! The glyph layout protocol.
//!
//! A layout engine walks a string, resolves each character to a cached glyph
//! and a pen position, and reports them to a [`GlyphConsumer`]:
//! exactly one [`start`](GlyphConsumer::start), then one
//! [`consume_glyph`](GlyphConsumer::consume_glyph) or
//! [`consume_empty_glyph`](GlyphConsumer::consume_empty_glyph) per glyph in
//! logical order, then exactly one [`finish`](GlyphConsumer::finish) with the
//! final pen position. Everything runs synchronously on the caller's stack.

use glam::DVec2;

use crate::font::{EscapementDelta, ServerFont, Spacing};
use crate::glyph::CachedGlyph;

/// Receiver of a laid-out glyph run.
pub trait GlyphConsumer {
    /// Whether glyphs should be supplied as vector outlines because the run
    /// transform is more than a translation.
    fn needs_vector(&self) -> bool;

    fn start(&mut self);

    /// A glyph with no ink (whitespace, missing glyph).
    fn consume_empty_glyph(&mut self, index: usize, char_code: char, x: f64, y: f64);

    /// A glyph with ink at pen position `(x, y)`.
    ///
    /// Returning `false` asks the engine to stop the run early; `finish` is
    /// still called.
    #[allow(clippy::too_many_arguments)]
    fn consume_glyph(
        &mut self,
        index: usize,
        char_code: char,
        glyph: &CachedGlyph,
        x: f64,
        y: f64,
        advance_x: f64,
        advance_y: f64,
    ) -> bool;

    /// End of the run with the pen position after the last glyph.
    fn finish(&mut self, x: f64, y: f64);
}

/// Drives a [`GlyphConsumer`] over a string.
pub trait GlyphLayoutEngine {
    /// Handle the caller can pass to keep a font cache entry alive across
    /// several runs.
    type CacheReference;

    /// Lay out at most `max_glyphs` glyphs of `text`.
    ///
    /// Positions come from advances (plus `delta` per glyph) unless
    /// `offsets` supplies an explicit position for each glyph. Returns
    /// `false` if the font cache could not be used at all.
    #[allow(clippy::too_many_arguments)]
    fn layout_glyphs(
        &mut self,
        consumer: &mut dyn GlyphConsumer,
        font: &ServerFont,
        text: &str,
        max_glyphs: usize,
        delta: Option<&EscapementDelta>,
        spacing: Spacing,
        offsets: Option<&[DVec2]>,
        cache_reference: Option<&mut Self::CacheReference>,
    ) -> bool;
}
