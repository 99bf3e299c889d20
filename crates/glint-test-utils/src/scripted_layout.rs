//! A deterministic layout engine for tests and benches.

use std::collections::HashMap;

use glam::DVec2;
use glint_text::{
    CachedGlyph, EscapementDelta, GlyphConsumer, GlyphLayoutEngine, ServerFont, Spacing,
};

use crate::glyphs;

/// What a character lays out to.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedGlyph {
    /// Handed out while the consumer can take bitmaps.
    pub bitmap: Option<CachedGlyph>,
    /// Handed out when the consumer asks for vector data.
    pub outline: Option<CachedGlyph>,
    pub advance: DVec2,
}

impl ScriptedGlyph {
    /// A glyph with ink, supplied in one representation regardless of what
    /// the consumer asks for.
    pub fn fixed(glyph: CachedGlyph) -> Self {
        Self {
            advance: glyph.advance,
            bitmap: Some(glyph),
            outline: None,
        }
    }

    /// A bitmap glyph with a vector alternative.
    pub fn with_outline(bitmap: CachedGlyph, outline: CachedGlyph) -> Self {
        Self {
            advance: bitmap.advance,
            bitmap: Some(bitmap),
            outline: Some(outline),
        }
    }

    /// No ink, only an advance.
    pub fn empty(advance: f64) -> Self {
        Self {
            bitmap: None,
            outline: None,
            advance: DVec2::new(advance, 0.0),
        }
    }

    fn select(&self, vector: bool) -> Option<&CachedGlyph> {
        if vector {
            self.outline.as_ref().or(self.bitmap.as_ref())
        } else {
            self.bitmap.as_ref().or(self.outline.as_ref())
        }
    }
}

/// Per-engine usage counters, passed as the cache reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutStats {
    pub runs: usize,
    pub glyphs: usize,
    pub vector_runs: usize,
}

/// Replays a fixed glyph per character.
///
/// Positions follow the advances from the origin, plus the escapement
/// delta after each glyph, unless explicit offsets are supplied. Characters
/// with no entry and no fallback become empty glyphs with zero advance.
#[derive(Debug, Clone, Default)]
pub struct ScriptedLayout {
    glyphs: HashMap<char, ScriptedGlyph>,
    fallback: Option<ScriptedGlyph>,
    unusable: bool,
    stats: LayoutStats,
}

impl ScriptedLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every character becomes a `width x height` box with both gray8 and
    /// outline forms, except the space, which is an empty glyph.
    pub fn boxes(advance: f64, width: u32, height: u32) -> Self {
        Self::new()
            .fallback(ScriptedGlyph::with_outline(
                glyphs::gray8_box(1, width, height, advance),
                glyphs::outline_box(1, width, height, advance),
            ))
            .glyph(' ', ScriptedGlyph::empty(advance))
    }

    pub fn glyph(mut self, code: char, glyph: ScriptedGlyph) -> Self {
        self.glyphs.insert(code, glyph);
        self
    }

    pub fn fallback(mut self, glyph: ScriptedGlyph) -> Self {
        self.fallback = Some(glyph);
        self
    }

    /// Make every run fail as if the font cache were unavailable.
    pub fn unusable(mut self) -> Self {
        self.unusable = true;
        self
    }

    /// Totals over every run this engine laid out.
    pub fn stats(&self) -> LayoutStats {
        self.stats
    }

    fn lookup(&self, code: char) -> Option<&ScriptedGlyph> {
        self.glyphs.get(&code).or(self.fallback.as_ref())
    }
}

impl GlyphLayoutEngine for ScriptedLayout {
    type CacheReference = LayoutStats;

    fn layout_glyphs(
        &mut self,
        consumer: &mut dyn GlyphConsumer,
        _font: &ServerFont,
        text: &str,
        max_glyphs: usize,
        delta: Option<&EscapementDelta>,
        spacing: Spacing,
        offsets: Option<&[DVec2]>,
        cache_reference: Option<&mut LayoutStats>,
    ) -> bool {
        if self.unusable {
            return false;
        }

        let vector = consumer.needs_vector();
        tracing::trace!(len = text.len(), vector, ?spacing, "scripted layout");
        consumer.start();

        let mut pen = DVec2::ZERO;
        let mut count = 0;
        for (index, code) in text.chars().take(max_glyphs).enumerate() {
            if let Some(offsets) = offsets {
                match offsets.get(index) {
                    Some(offset) => pen = *offset,
                    None => break,
                }
            }
            count += 1;

            let entry = self.lookup(code);
            let keep_going = match entry.and_then(|entry| entry.select(vector)) {
                Some(glyph) => consumer.consume_glyph(
                    index,
                    code,
                    glyph,
                    pen.x,
                    pen.y,
                    glyph.advance.x,
                    glyph.advance.y,
                ),
                None => {
                    consumer.consume_empty_glyph(index, code, pen.x, pen.y);
                    true
                }
            };

            if let Some(entry) = entry {
                pen += entry.advance;
            }
            if let Some(delta) = delta {
                let extra = if code.is_whitespace() { delta.space } else { delta.nonspace };
                pen.x += extra as f64;
            }
            if !keep_going {
                break;
            }
        }
        consumer.finish(pen.x, pen.y);

        for stats in [Some(&mut self.stats), cache_reference].into_iter().flatten() {
            stats.runs += 1;
            stats.glyphs += count;
            stats.vector_runs += vector as usize;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_text::GlyphData;

    #[derive(Default)]
    struct Log {
        vector: bool,
        events: Vec<String>,
        stop_after: Option<usize>,
    }

    impl GlyphConsumer for Log {
        fn needs_vector(&self) -> bool {
            self.vector
        }

        fn start(&mut self) {
            self.events.push("start".into());
        }

        fn consume_empty_glyph(&mut self, index: usize, _char_code: char, x: f64, y: f64) {
            self.events.push(format!("empty {index} {x} {y}"));
        }

        fn consume_glyph(
            &mut self,
            index: usize,
            _char_code: char,
            glyph: &CachedGlyph,
            x: f64,
            y: f64,
            _advance_x: f64,
            _advance_y: f64,
        ) -> bool {
            self.events.push(format!("{} {index} {x} {y}", kind(&glyph.data)));
            self.stop_after != Some(index)
        }

        fn finish(&mut self, x: f64, y: f64) {
            self.events.push(format!("finish {x} {y}"));
        }
    }

    fn kind(data: &GlyphData) -> &'static str {
        match data {
            GlyphData::Mono(_) => "mono",
            GlyphData::Gray8(_) => "gray8",
            GlyphData::Subpixel(_) => "subpixel",
            GlyphData::Outline(_) => "outline",
            GlyphData::Invalid => "invalid",
        }
    }

    fn run(
        layout: &mut ScriptedLayout,
        log: &mut Log,
        text: &str,
        delta: Option<&EscapementDelta>,
    ) -> bool {
        let font = ServerFont::default();
        layout.layout_glyphs(log, &font, text, usize::MAX, delta, Spacing::Char, None, None)
    }

    #[test]
    fn test_advances_and_whitespace() {
        let mut layout = ScriptedLayout::boxes(6.0, 5, 8);
        let mut log = Log::default();
        assert!(run(&mut layout, &mut log, "a b", None));
        assert_eq!(
            log.events,
            ["start", "gray8 0 0 0", "empty 1 6 0", "gray8 2 12 0", "finish 18 0"]
        );
    }

    #[test]
    fn test_vector_request_swaps_representation() {
        let mut layout = ScriptedLayout::boxes(6.0, 5, 8);
        let mut log = Log {
            vector: true,
            ..Default::default()
        };
        run(&mut layout, &mut log, "a", None);
        assert_eq!(log.events[1], "outline 0 0 0");
        assert_eq!(layout.stats().vector_runs, 1);
    }

    #[test]
    fn test_escapement_delta() {
        let mut layout = ScriptedLayout::boxes(6.0, 5, 8);
        let mut log = Log::default();
        let delta = EscapementDelta { nonspace: 1.0, space: 2.0 };
        run(&mut layout, &mut log, "a b", Some(&delta));
        assert_eq!(log.events[2], "empty 1 7 0");
        assert_eq!(log.events[3], "gray8 2 15 0");
        assert_eq!(log.events[4], "finish 22 0");
    }

    #[test]
    fn test_explicit_offsets_and_cache_reference() {
        let mut layout = ScriptedLayout::boxes(6.0, 5, 8);
        let mut log = Log::default();
        let mut stats = LayoutStats::default();
        let offsets = [DVec2::new(3.0, 4.0), DVec2::new(30.0, 4.0)];
        layout.layout_glyphs(
            &mut log,
            &ServerFont::default(),
            "abc",
            usize::MAX,
            None,
            Spacing::Char,
            Some(&offsets),
            Some(&mut stats),
        );
        assert_eq!(log.events, ["start", "gray8 0 3 4", "gray8 1 30 4", "finish 36 4"]);
        assert_eq!(stats.glyphs, 2);
        assert_eq!(layout.stats().runs, 1);
    }

    #[test]
    fn test_early_stop_still_finishes() {
        let mut layout = ScriptedLayout::boxes(6.0, 5, 8);
        let mut log = Log {
            stop_after: Some(0),
            ..Default::default()
        };
        run(&mut layout, &mut log, "abc", None);
        assert_eq!(log.events, ["start", "gray8 0 0 0", "finish 6 0"]);
    }

    #[test]
    fn test_unusable_layout_reports_failure() {
        let mut layout = ScriptedLayout::boxes(6.0, 5, 8).unusable();
        let mut log = Log::default();
        assert!(!run(&mut layout, &mut log, "a", None));
        assert!(log.events.is_empty());
    }
}
