//! The text renderer root.
//!
//! [`TextRenderer`] owns the font state, the rendering policy flags and the
//! raster target. Each `render_string*` call builds the run transform,
//! drives a layout engine over a fresh [`StringRenderer`] and returns the
//! device-space bounds of the run.

use glam::DVec2;
use glint_core::config::RendererConfig;
use glint_core::geometry::{IntRect, Rect};
use glint_core::profiling::profile_function;
use glint_geometry::Transform2D;

use crate::canvas::Canvas;
use crate::font::{EscapementDelta, ServerFont};
use crate::layout::GlyphLayoutEngine;
use crate::raster::{Gamma, RasterDispatcher, RasterTarget};
use crate::string_renderer::{RunSettings, StringRenderer};

/// Renders glyph runs into a [`RasterTarget`].
#[derive(Debug)]
pub struct TextRenderer<T: RasterTarget> {
    dispatcher: RasterDispatcher<T>,
    config: RendererConfig,
    font: ServerFont,
    embedded_transform: Transform2D,
    view_transform: Transform2D,
}

static_assertions::assert_impl_all!(TextRenderer<Canvas>: Send);

impl<T: RasterTarget> TextRenderer<T> {
    pub fn new(target: T, config: RendererConfig) -> Self {
        let mut dispatcher = RasterDispatcher::new(target, config.approximation_scale);
        dispatcher.set_gamma(Gamma::for_antialiasing(config.antialiasing));

        let mut renderer = Self {
            dispatcher,
            config,
            font: ServerFont::default(),
            embedded_transform: Transform2D::IDENTITY,
            view_transform: Transform2D::IDENTITY,
        };
        renderer.set_font(ServerFont::default());
        renderer
    }

    /// Switch fonts, rebuilding the synthetic shear/rotation transform and
    /// the false-bold contour width.
    pub fn set_font(&mut self, font: ServerFont) {
        let shear = (90.0 - font.get_shear() as f64).to_radians();
        let rotation = -(font.get_rotation() as f64).to_radians();
        self.embedded_transform = Transform2D::IDENTITY
            .then_skew_about(DVec2::ZERO, shear, 0.0)
            .then_rotate_about(DVec2::ZERO, rotation);
        self.dispatcher
            .converter_mut()
            .set_contour_width(2.0 * font.get_false_bold_width() as f64);

        tracing::debug!(
            size = font.get_size(),
            shear = font.get_shear(),
            rotation = font.get_rotation(),
            false_bold = font.get_false_bold_width(),
            "font changed"
        );
        self.font = font;
    }

    pub fn font(&self) -> &ServerFont {
        &self.font
    }

    /// Hinting only affects glyph cache lookups; the flag is kept here for
    /// the layout engine to read.
    pub fn set_hinting(&mut self, hinting: bool) {
        self.config.hinting = hinting;
    }

    pub fn hinting(&self) -> bool {
        self.config.hinting
    }

    /// Toggle antialiasing, which swaps the gray gamma curve.
    pub fn set_antialiasing(&mut self, antialiasing: bool) {
        if self.config.antialiasing != antialiasing {
            self.config.antialiasing = antialiasing;
            self.dispatcher.set_gamma(Gamma::for_antialiasing(antialiasing));
        }
    }

    pub fn antialiasing(&self) -> bool {
        self.config.antialiasing
    }

    pub fn set_subpixel_antialiasing(&mut self, subpixel: bool) {
        self.config.subpixel_antialiasing = subpixel;
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn set_view_transform(&mut self, transform: Transform2D) {
        self.view_transform = transform;
    }

    pub fn view_transform(&self) -> &Transform2D {
        &self.view_transform
    }

    pub fn embedded_transform(&self) -> &Transform2D {
        &self.embedded_transform
    }

    /// Full width of the false-bold contour stroke.
    pub fn contour_width(&self) -> f64 {
        self.dispatcher.converter().contour_width()
    }

    pub fn target(&self) -> &T {
        self.dispatcher.target()
    }

    pub fn target_mut(&mut self) -> &mut T {
        self.dispatcher.target_mut()
    }

    pub fn into_target(self) -> T {
        self.dispatcher.into_target()
    }

    /// Render `text` with advance-based positioning starting at `baseline`.
    ///
    /// Returns the device-space bounds of the glyph ink (invalid for a run
    /// without ink). `next_pen` receives the device-space pen position after
    /// the run.
    #[allow(clippy::too_many_arguments)]
    pub fn render_string<L: GlyphLayoutEngine>(
        &mut self,
        layout: &mut L,
        text: &str,
        baseline: DVec2,
        clip: IntRect,
        dry_run: bool,
        next_pen: Option<&mut DVec2>,
        delta: Option<&EscapementDelta>,
        cache_reference: Option<&mut L::CacheReference>,
    ) -> Rect {
        profile_function!();
        let transform = self
            .embedded_transform
            .then_translate(baseline)
            .then(&self.view_transform);
        self.render_run(
            layout,
            text,
            transform,
            clip,
            dry_run,
            next_pen,
            delta,
            None,
            cache_reference,
        )
    }

    /// Render `text` placing glyph `i` at `offsets[i]`.
    #[allow(clippy::too_many_arguments)]
    pub fn render_string_at_offsets<L: GlyphLayoutEngine>(
        &mut self,
        layout: &mut L,
        text: &str,
        offsets: &[DVec2],
        clip: IntRect,
        dry_run: bool,
        next_pen: Option<&mut DVec2>,
        cache_reference: Option<&mut L::CacheReference>,
    ) -> Rect {
        profile_function!();
        let transform = self.embedded_transform.then(&self.view_transform);
        self.render_run(
            layout,
            text,
            transform,
            clip,
            dry_run,
            next_pen,
            None,
            Some(offsets),
            cache_reference,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn render_run<L: GlyphLayoutEngine>(
        &mut self,
        layout: &mut L,
        text: &str,
        transform: Transform2D,
        clip: IntRect,
        dry_run: bool,
        next_pen: Option<&mut DVec2>,
        delta: Option<&EscapementDelta>,
        offsets: Option<&[DVec2]>,
        cache_reference: Option<&mut L::CacheReference>,
    ) -> Rect {
        self.dispatcher
            .converter_mut()
            .set_approximation_scale(transform.average_scale());

        let settings = RunSettings {
            clipping_frame: clip,
            dry_run,
            subpixel: self.config.effective_subpixel(),
            show_glyph_bounds: self.config.show_glyph_bounds,
        };
        let spacing = self.font.get_spacing();
        let mut consumer =
            StringRenderer::new(&mut self.dispatcher, &self.font, transform, settings);

        let laid_out = layout.layout_glyphs(
            &mut consumer,
            &self.font,
            text,
            usize::MAX,
            delta,
            spacing,
            offsets,
            cache_reference,
        );
        if !laid_out {
            tracing::warn!(len = text.len(), "layout engine could not lay out the run");
        }

        if let (Some(out), Some(pen)) = (next_pen, consumer.next_pen()) {
            *out = pen;
        }
        transform.transform_bounds(Rect::from(consumer.bounds()))
    }
}
