/// Default curve approximation scale before a run derives one from its
/// transform.
pub const DEFAULT_APPROXIMATION_SCALE: f64 = 2.0;

/// Configuration for a text renderer instance.
///
/// Every field is per instance; two renderers never share any of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererConfig {
    /// Request hinted glyphs from the glyph cache.
    pub hinting: bool,
    /// Antialiased coverage. When off, the vector rasterizer uses a hard
    /// 0.5 threshold gamma.
    pub antialiasing: bool,
    /// LCD subpixel coverage. Only effective while `antialiasing` is on.
    pub subpixel_antialiasing: bool,
    /// Initial curve approximation scale.
    pub approximation_scale: f64,
    /// Outline every painted vector glyph's clip bounds (debug aid).
    pub show_glyph_bounds: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        RendererConfig {
            hinting: true,
            antialiasing: true,
            subpixel_antialiasing: false,
            approximation_scale: DEFAULT_APPROXIMATION_SCALE,
            show_glyph_bounds: false,
        }
    }
}

impl RendererConfig {
    pub fn with_hinting(mut self, hinting: bool) -> Self {
        self.hinting = hinting;
        self
    }

    pub fn with_antialiasing(mut self, antialiasing: bool) -> Self {
        self.antialiasing = antialiasing;
        self
    }

    pub fn with_subpixel_antialiasing(mut self, subpixel: bool) -> Self {
        self.subpixel_antialiasing = subpixel;
        self
    }

    pub fn with_approximation_scale(mut self, scale: f64) -> Self {
        self.approximation_scale = scale;
        self
    }

    pub fn with_glyph_bounds(mut self, show: bool) -> Self {
        self.show_glyph_bounds = show;
        self
    }

    /// Whether a run should take the subpixel path.
    pub fn effective_subpixel(&self) -> bool {
        self.subpixel_antialiasing && self.antialiasing
    }
}
