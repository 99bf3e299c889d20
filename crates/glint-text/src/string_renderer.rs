//! Per-run glyph consumer.
//!
//! A [`StringRenderer`] lives for one `render_string` call. It receives the
//! glyph run from the layout engine, routes every glyph to the right raster
//! path, clips it, accumulates the run's ink bounds and paints the
//! decorations at the end.

use glam::DVec2;
use glint_core::geometry::{IntPoint, IntRect, Rect};
use glint_geometry::{Transform2D, stroke};

use crate::bounds::{BoundingBox, glyph_area_bounds};
use crate::decoration::DecorationPainter;
use crate::font::ServerFont;
use crate::glyph::{BitmapFormat, CachedGlyph, GlyphBitmap, GlyphData};
use crate::layout::GlyphConsumer;
use crate::raster::{RasterDispatcher, RasterTarget};

/// Per-call render flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    /// Glyphs whose device bounds miss this rect are not painted.
    pub clipping_frame: IntRect,
    /// Measure only.
    pub dry_run: bool,
    /// Subpixel antialiasing requested (already ANDed with antialiasing).
    pub subpixel: bool,
    /// Stroke the device bounds of every painted vector glyph.
    pub show_glyph_bounds: bool,
}

impl RunSettings {
    pub fn new(clipping_frame: IntRect) -> Self {
        Self {
            clipping_frame,
            dry_run: false,
            subpixel: false,
            show_glyph_bounds: false,
        }
    }
}

/// Glyph consumer painting one run through a [`RasterDispatcher`].
pub struct StringRenderer<'a, T: RasterTarget> {
    dispatcher: &'a mut RasterDispatcher<T>,
    font: &'a ServerFont,
    transform: Transform2D,
    transform_offset: DVec2,
    settings: RunSettings,
    decorations: DecorationPainter,
    vector: bool,
    bounds: BoundingBox,
    next_pen: Option<DVec2>,
    painted: usize,
    clipped: usize,
}

impl<'a, T: RasterTarget> StringRenderer<'a, T> {
    pub fn new(
        dispatcher: &'a mut RasterDispatcher<T>,
        font: &'a ServerFont,
        transform: Transform2D,
        settings: RunSettings,
    ) -> Self {
        Self {
            dispatcher,
            font,
            transform_offset: transform.translation(),
            transform,
            settings,
            decorations: DecorationPainter::for_font(font),
            vector: false,
            bounds: BoundingBox::new(),
            next_pen: None,
            painted: 0,
            clipped: 0,
        }
    }

    /// Accumulated glyph bounds in glyph space (before the run transform).
    pub fn bounds(&self) -> IntRect {
        self.bounds.rect()
    }

    /// Device-space pen position after the run, once `finish` has run.
    pub fn next_pen(&self) -> Option<DVec2> {
        self.next_pen
    }

    /// Number of glyphs handed to a compositor or rasterizer.
    pub fn painted_glyphs(&self) -> usize {
        self.painted
    }

    /// Number of glyphs skipped because they missed the clipping frame.
    pub fn clipped_glyphs(&self) -> usize {
        self.clipped
    }

    fn device_origin(&self, x: f64, y: f64, bounds: IntRect) -> IntPoint {
        IntPoint::new(
            ((x + self.transform_offset.x).round() as i32).saturating_add(bounds.left),
            ((y + self.transform_offset.y).round() as i32).saturating_add(bounds.top),
        )
    }

    fn blit(&mut self, bitmap: &GlyphBitmap, format: BitmapFormat, origin: IntPoint) {
        let compositor = self.dispatcher.blit(bitmap, format, origin);
        tracing::trace!(?format, ?compositor, x = origin.x, y = origin.y, "blitting glyph bitmap");
    }

    fn paint_outline(
        &mut self,
        glyph: &CachedGlyph,
        outline: &glint_geometry::Path,
        x: f64,
        y: f64,
        device: IntRect,
    ) {
        self.vector = true;
        let route = self.dispatcher.coverage_path(self.settings.subpixel);
        let path = self
            .dispatcher
            .converter()
            .convert(outline, DVec2::new(x, y), &self.transform);
        tracing::trace!(glyph = glyph.glyph_id, ?route, commands = path.len(), "queueing outline");
        self.dispatcher.add_outline(route, &path);

        if self.settings.show_glyph_bounds {
            let frame = Rect::new(
                device.left as f64 + 0.5,
                device.top as f64 + 0.5,
                device.right as f64 + 0.5,
                device.bottom as f64 + 0.5,
            );
            self.dispatcher.add_outline(route, &stroke::stroke_rect(frame, 1.0));
        }
    }
}

impl<T: RasterTarget> GlyphConsumer for StringRenderer<'_, T> {
    fn needs_vector(&self) -> bool {
        !self.transform.is_translation_only()
    }

    fn start(&mut self) {
        self.dispatcher.reset();
    }

    fn consume_empty_glyph(&mut self, _index: usize, _char_code: char, _x: f64, _y: f64) {}

    fn consume_glyph(
        &mut self,
        index: usize,
        char_code: char,
        glyph: &CachedGlyph,
        x: f64,
        y: f64,
        _advance_x: f64,
        _advance_y: f64,
    ) -> bool {
        let area = glyph_area_bounds(glyph.bounds, x, y);
        self.bounds.include(area);

        if self.settings.dry_run {
            return true;
        }

        let device = if glyph.data.is_outline() {
            let width = self.dispatcher.converter().contour_width() as i32;
            let grown = if width != 0 { area.inset_by(-width, -width) } else { area };
            self.transform.transform_bounds(Rect::from(grown)).round_out()
        } else {
            area.offset_by(IntPoint::from_trunc(self.transform_offset))
        };

        if !device.intersects(&self.settings.clipping_frame) {
            tracing::trace!(index, ?char_code, ?device, "glyph outside clipping frame");
            self.clipped += 1;
            return true;
        }

        match &glyph.data {
            GlyphData::Mono(bitmap) => {
                let origin = self.device_origin(x, y, glyph.bounds);
                self.blit(bitmap, BitmapFormat::Mono, origin);
            }
            GlyphData::Gray8(bitmap) => {
                let origin = self.device_origin(x, y, glyph.bounds);
                self.blit(bitmap, BitmapFormat::Gray8, origin);
            }
            GlyphData::Subpixel(bitmap) => {
                let origin = self.device_origin(x, y, glyph.bounds);
                self.blit(bitmap, BitmapFormat::Subpixel, origin);
            }
            GlyphData::Outline(outline) => self.paint_outline(glyph, outline, x, y, device),
            GlyphData::Invalid => return true,
        }
        self.painted += 1;
        true
    }

    fn finish(&mut self, x: f64, y: f64) {
        let route = self.dispatcher.coverage_path(self.settings.subpixel);
        if self.vector {
            self.dispatcher.render(route);
        }

        let mut decorations = 0;
        if !self.settings.dry_run && !self.decorations.is_empty() {
            decorations = self.decorations.paint(
                self.dispatcher,
                route,
                self.bounds.rect(),
                y,
                self.transform_offset,
                self.font,
            );
        }

        self.next_pen = Some(self.transform.transform_point(DVec2::new(x, y)));

        tracing::debug!(
            painted = self.painted,
            clipped = self.clipped,
            decorations,
            vector = self.vector,
            dry_run = self.settings.dry_run,
            "finished glyph run"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontFace;
    use crate::raster::{Compositor, Gamma, RasterizerKind};
    use glint_geometry::{Path, PathBuilder};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Reset(RasterizerKind),
        AddPath(RasterizerKind),
        Render(RasterizerKind, Compositor),
        Blit(BitmapFormat, IntPoint, Compositor),
    }

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<Call>,
        masked: bool,
    }

    impl RasterTarget for Recorder {
        fn reset(&mut self, rasterizer: RasterizerKind) {
            self.calls.push(Call::Reset(rasterizer));
        }

        fn add_path(&mut self, rasterizer: RasterizerKind, _path: &Path) {
            self.calls.push(Call::AddPath(rasterizer));
        }

        fn set_gamma(&mut self, _gamma: Gamma) {}

        fn render_scanlines(&mut self, rasterizer: RasterizerKind, compositor: Compositor) {
            self.calls.push(Call::Render(rasterizer, compositor));
        }

        fn blit_bitmap(
            &mut self,
            _bitmap: &GlyphBitmap,
            format: BitmapFormat,
            origin: IntPoint,
            compositor: Compositor,
        ) {
            self.calls.push(Call::Blit(format, origin, compositor));
        }

        fn has_alpha_mask(&self) -> bool {
            self.masked
        }
    }

    fn gray_glyph() -> CachedGlyph {
        let bitmap = GlyphBitmap::new(BitmapFormat::Gray8, 4, 6, 4, vec![255; 24]).unwrap();
        let advance = DVec2::new(5.0, 0.0);
        CachedGlyph::new(1, IntRect::new(0, -6, 3, -1), GlyphData::Gray8(bitmap), advance)
    }

    fn outline_glyph() -> CachedGlyph {
        let mut builder = PathBuilder::new();
        builder.rect(Rect::new(0.0, -6.0, 4.0, 0.0));
        let data = GlyphData::Outline(builder.build());
        CachedGlyph::new(2, IntRect::new(0, -6, 3, -1), data, DVec2::new(5.0, 0.0))
    }

    fn full_clip() -> RunSettings {
        RunSettings::new(IntRect::new(0, 0, 99, 99))
    }

    #[test]
    fn test_start_resets_both_rasterizers() {
        let mut dispatcher = RasterDispatcher::new(Recorder::default(), 1.0);
        let font = ServerFont::default();
        let mut consumer =
            StringRenderer::new(&mut dispatcher, &font, Transform2D::IDENTITY, full_clip());
        consumer.start();
        drop(consumer);
        assert_eq!(
            dispatcher.target().calls,
            vec![Call::Reset(RasterizerKind::Gray), Call::Reset(RasterizerKind::Subpixel)]
        );
    }

    #[test]
    fn test_bitmap_placed_by_device_offset() {
        let mut dispatcher = RasterDispatcher::new(Recorder::default(), 1.0);
        let font = ServerFont::default();
        let transform = Transform2D::translate(DVec2::new(0.0, 20.0));
        let mut consumer = StringRenderer::new(&mut dispatcher, &font, transform, full_clip());

        consumer.start();
        assert!(consumer.consume_glyph(0, 'A', &gray_glyph(), 2.0, 0.0, 5.0, 0.0));
        consumer.finish(7.0, 0.0);

        assert_eq!(consumer.bounds(), IntRect::new(2, -7, 6, 0));
        assert_eq!(consumer.next_pen(), Some(DVec2::new(7.0, 20.0)));
        assert_eq!(consumer.painted_glyphs(), 1);
        drop(consumer);
        assert_eq!(
            dispatcher.target().calls[2],
            Call::Blit(BitmapFormat::Gray8, IntPoint::new(2, 14), Compositor::Solid)
        );
    }

    #[test]
    fn test_bitmap_origin_saturates_near_i32_max() {
        let mut dispatcher = RasterDispatcher::new(Recorder::default(), 1.0);
        let font = ServerFont::default();
        let bitmap = GlyphBitmap::new(BitmapFormat::Gray8, 4, 6, 4, vec![255; 24]).unwrap();
        let bounds = IntRect::new(2, -6, 5, -1);
        let glyph = CachedGlyph::new(3, bounds, GlyphData::Gray8(bitmap), DVec2::new(5.0, 0.0));
        let settings = RunSettings::new(IntRect::new(0, 0, i32::MAX, 99));
        let mut consumer =
            StringRenderer::new(&mut dispatcher, &font, Transform2D::IDENTITY, settings);

        consumer.start();
        assert!(consumer.consume_glyph(0, 'A', &glyph, 3.0e9, 10.0, 5.0, 0.0));
        consumer.finish(3.0e9 + 5.0, 10.0);

        assert_eq!(consumer.painted_glyphs(), 1);
        drop(consumer);
        assert_eq!(
            dispatcher.target().calls[2],
            Call::Blit(BitmapFormat::Gray8, IntPoint::new(i32::MAX, 4), Compositor::Solid)
        );
    }

    #[test]
    fn test_dry_run_measures_without_painting() {
        let mut dispatcher = RasterDispatcher::new(Recorder::default(), 1.0);
        let font = ServerFont::default().face(FontFace::UNDERSCORE);
        let settings = RunSettings {
            dry_run: true,
            ..full_clip()
        };
        let mut consumer =
            StringRenderer::new(&mut dispatcher, &font, Transform2D::IDENTITY, settings);

        consumer.start();
        consumer.consume_glyph(0, 'A', &gray_glyph(), 0.0, 10.0, 5.0, 0.0);
        consumer.consume_glyph(1, 'B', &outline_glyph(), 5.0, 10.0, 5.0, 0.0);
        consumer.finish(10.0, 10.0);

        assert_eq!(consumer.bounds(), IntRect::new(0, 3, 9, 10));
        drop(consumer);
        assert!(
            dispatcher
                .target()
                .calls
                .iter()
                .all(|call| matches!(call, Call::Reset(_)))
        );
    }

    #[test]
    fn test_clipped_glyph_still_counts_for_bounds() {
        let mut dispatcher = RasterDispatcher::new(Recorder::default(), 1.0);
        let font = ServerFont::default();
        let settings = RunSettings::new(IntRect::new(50, 50, 60, 60));
        let mut consumer =
            StringRenderer::new(&mut dispatcher, &font, Transform2D::IDENTITY, settings);

        consumer.start();
        consumer.consume_glyph(0, 'A', &gray_glyph(), 0.0, 10.0, 5.0, 0.0);
        consumer.finish(5.0, 10.0);

        assert!(consumer.bounds().is_valid());
        assert_eq!(consumer.clipped_glyphs(), 1);
        assert_eq!(consumer.painted_glyphs(), 0);
        drop(consumer);
        assert_eq!(dispatcher.target().calls.len(), 2);
    }

    #[test]
    fn test_outlines_flush_once_in_finish() {
        let mut dispatcher = RasterDispatcher::new(Recorder::default(), 1.0);
        let font = ServerFont::default();
        let transform = Transform2D::rotate(0.1).then_translate(DVec2::new(20.0, 20.0));
        let mut consumer = StringRenderer::new(&mut dispatcher, &font, transform, full_clip());
        assert!(consumer.needs_vector());

        consumer.start();
        consumer.consume_glyph(0, 'A', &outline_glyph(), 0.0, 0.0, 5.0, 0.0);
        consumer.consume_glyph(1, 'B', &outline_glyph(), 5.0, 0.0, 5.0, 0.0);
        consumer.finish(10.0, 0.0);
        drop(consumer);

        let calls = &dispatcher.target().calls;
        assert_eq!(
            calls[2..4],
            [Call::AddPath(RasterizerKind::Gray), Call::AddPath(RasterizerKind::Gray)]
        );
        assert_eq!(calls[4..], [Call::Render(RasterizerKind::Gray, Compositor::Solid)]);
    }

    #[test]
    fn test_mask_overrides_subpixel_for_outlines() {
        let mut dispatcher = RasterDispatcher::new(
            Recorder {
                masked: true,
                ..Default::default()
            },
            1.0,
        );
        let font = ServerFont::default();
        let settings = RunSettings {
            subpixel: true,
            ..full_clip()
        };
        let mut consumer =
            StringRenderer::new(&mut dispatcher, &font, Transform2D::scale(2.0), settings);

        consumer.start();
        consumer.consume_glyph(0, 'A', &outline_glyph(), 10.0, 10.0, 5.0, 0.0);
        consumer.finish(15.0, 10.0);
        drop(consumer);

        let calls = &dispatcher.target().calls;
        assert!(calls.contains(&Call::AddPath(RasterizerKind::Gray)));
        assert_eq!(calls.last(), Some(&Call::Render(RasterizerKind::Gray, Compositor::Masked)));
        assert!(!calls.iter().any(|call| matches!(call, Call::Render(_, Compositor::Subpixel))));
    }

    #[test]
    fn test_glyph_bounds_overlay_joins_the_run() {
        let mut dispatcher = RasterDispatcher::new(Recorder::default(), 1.0);
        let font = ServerFont::default();
        let settings = RunSettings {
            show_glyph_bounds: true,
            ..full_clip()
        };
        let mut consumer =
            StringRenderer::new(&mut dispatcher, &font, Transform2D::scale(2.0), settings);

        consumer.start();
        consumer.consume_glyph(0, 'A', &outline_glyph(), 10.0, 10.0, 5.0, 0.0);
        consumer.finish(15.0, 10.0);
        drop(consumer);

        let adds = dispatcher
            .target()
            .calls
            .iter()
            .filter(|call| matches!(call, Call::AddPath(_)))
            .count();
        assert_eq!(adds, 2);
    }

    #[test]
    fn test_invalid_and_empty_glyphs_paint_nothing() {
        let mut dispatcher = RasterDispatcher::new(Recorder::default(), 1.0);
        let font = ServerFont::default();
        let bounds = IntRect::new(0, -4, 2, 0);
        let invalid = CachedGlyph::new(9, bounds, GlyphData::Invalid, DVec2::new(3.0, 0.0));
        let mut consumer =
            StringRenderer::new(&mut dispatcher, &font, Transform2D::IDENTITY, full_clip());

        consumer.start();
        consumer.consume_empty_glyph(0, ' ', 0.0, 10.0);
        assert!(consumer.consume_glyph(1, '?', &invalid, 3.0, 10.0, 3.0, 0.0));
        consumer.finish(6.0, 10.0);

        assert_eq!(consumer.bounds(), IntRect::new(3, 5, 6, 11));
        assert_eq!(consumer.painted_glyphs(), 0);
    }

    #[test]
    fn test_underline_follows_glyph_pass() {
        let mut dispatcher = RasterDispatcher::new(Recorder::default(), 1.0);
        let font = ServerFont::default().face(FontFace::UNDERSCORE | FontFace::STRIKEOUT);
        let transform = Transform2D::translate(DVec2::new(0.0, 20.0));
        let mut consumer = StringRenderer::new(&mut dispatcher, &font, transform, full_clip());

        consumer.start();
        consumer.consume_glyph(0, 'A', &gray_glyph(), 0.0, 0.0, 5.0, 0.0);
        consumer.finish(5.0, 0.0);
        drop(consumer);

        let calls = &dispatcher.target().calls;
        assert!(matches!(calls[2], Call::Blit(..)));
        assert_eq!(
            calls[3..],
            [
                Call::AddPath(RasterizerKind::Gray),
                Call::Render(RasterizerKind::Gray, Compositor::Solid),
                Call::AddPath(RasterizerKind::Gray),
                Call::Render(RasterizerKind::Gray, Compositor::Solid),
            ]
        );
    }
}
