//! Rasterizer and compositor dispatch.
//!
//! The coverage math lives behind [`RasterTarget`]; this module decides
//! which accumulation buffer and which compositor every paint goes to. The
//! choice follows one fixed priority: an active alpha mask wins over
//! subpixel rendering, which wins over plain solid coverage.

use glint_core::geometry::IntPoint;
use glint_core::profiling::profile_function;
use glint_geometry::{OutlineConverter, Path};

use crate::glyph::{BitmapFormat, GlyphBitmap};

/// Which of the two accumulation buffers a path is added to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RasterizerKind {
    /// Single-channel coverage.
    Gray,
    /// Three-channel LCD coverage.
    Subpixel,
}

/// Final blending stage of a paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compositor {
    /// Non-antialiased: a pixel is either painted or not.
    Binary,
    /// Coverage-weighted solid colour.
    Solid,
    /// Per-channel LCD coverage.
    Subpixel,
    /// Solid colour additionally scaled by the alpha mask.
    Masked,
}

/// A rasterizer paired with the compositor that consumes its scanlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoveragePath {
    pub rasterizer: RasterizerKind,
    pub compositor: Compositor,
}

impl CoveragePath {
    /// Route for vector coverage under the mask > subpixel > solid priority.
    pub fn select(masked: bool, subpixel: bool) -> Self {
        if masked {
            CoveragePath {
                rasterizer: RasterizerKind::Gray,
                compositor: Compositor::Masked,
            }
        } else if subpixel {
            CoveragePath {
                rasterizer: RasterizerKind::Subpixel,
                compositor: Compositor::Subpixel,
            }
        } else {
            CoveragePath {
                rasterizer: RasterizerKind::Gray,
                compositor: Compositor::Solid,
            }
        }
    }
}

/// Compositor for a pre-rendered bitmap.
///
/// Mono bitmaps always go through the binary compositor. Subpixel bitmaps
/// fall back to the masked gray path while a mask is active; the mask is
/// applied to their averaged coverage, an approximation of true masked LCD
/// blending.
pub fn bitmap_compositor(format: BitmapFormat, masked: bool) -> Compositor {
    match format {
        BitmapFormat::Mono => Compositor::Binary,
        BitmapFormat::Gray8 | BitmapFormat::Subpixel if masked => Compositor::Masked,
        BitmapFormat::Gray8 => Compositor::Solid,
        BitmapFormat::Subpixel => Compositor::Subpixel,
    }
}

/// Coverage transfer curve of the gray rasterizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gamma {
    /// Coverage below the threshold is dropped, anything else is full.
    Threshold(f64),
    /// `coverage ^ exponent`.
    Power(f64),
}

impl Default for Gamma {
    fn default() -> Self {
        Gamma::Power(1.0)
    }
}

impl Gamma {
    /// Curve used for the given antialiasing setting.
    pub fn for_antialiasing(antialiasing: bool) -> Self {
        if antialiasing {
            Gamma::Power(1.0)
        } else {
            Gamma::Threshold(0.5)
        }
    }

    pub fn apply(&self, coverage: u8) -> u8 {
        let v = coverage as f64 / 255.0;
        match *self {
            Gamma::Threshold(threshold) => {
                if v < threshold {
                    0
                } else {
                    255
                }
            }
            Gamma::Power(exponent) => (v.powf(exponent) * 255.0).round().clamp(0.0, 255.0) as u8,
        }
    }
}

/// The scanline rasterizer and compositing backend.
///
/// Implementations own two accumulation buffers (see [`RasterizerKind`]),
/// the compositors, and optionally an alpha mask. Paths arrive flattened and
/// in device space. Rendering a buffer consumes its accumulated paths.
pub trait RasterTarget {
    /// Drop everything accumulated in `rasterizer`.
    fn reset(&mut self, rasterizer: RasterizerKind);

    /// Accumulate a flat device-space path into `rasterizer`.
    fn add_path(&mut self, rasterizer: RasterizerKind, path: &Path);

    /// Coverage curve of the gray rasterizer.
    fn set_gamma(&mut self, gamma: Gamma);

    /// Render the accumulated coverage through `compositor` and empty the
    /// buffer.
    fn render_scanlines(&mut self, rasterizer: RasterizerKind, compositor: Compositor);

    /// Composite a glyph bitmap whose top-left pixel lands on `origin`.
    fn blit_bitmap(
        &mut self,
        bitmap: &GlyphBitmap,
        format: BitmapFormat,
        origin: IntPoint,
        compositor: Compositor,
    );

    fn has_alpha_mask(&self) -> bool;
}

/// Owns the raster target plus the state that shapes what reaches it: the
/// outline converter and the gray gamma curve.
#[derive(Debug)]
pub struct RasterDispatcher<T: RasterTarget> {
    target: T,
    converter: OutlineConverter,
    gamma: Gamma,
}

impl<T: RasterTarget> RasterDispatcher<T> {
    pub fn new(target: T, approximation_scale: f64) -> Self {
        Self {
            target,
            converter: OutlineConverter::new(approximation_scale),
            gamma: Gamma::default(),
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }

    pub fn converter(&self) -> &OutlineConverter {
        &self.converter
    }

    pub fn converter_mut(&mut self) -> &mut OutlineConverter {
        &mut self.converter
    }

    pub fn gamma(&self) -> Gamma {
        self.gamma
    }

    pub fn set_gamma(&mut self, gamma: Gamma) {
        self.gamma = gamma;
        self.target.set_gamma(gamma);
    }

    /// Vector coverage route for the current mask state.
    pub fn coverage_path(&self, subpixel: bool) -> CoveragePath {
        CoveragePath::select(self.target.has_alpha_mask(), subpixel)
    }

    /// Empty both rasterizers.
    pub fn reset(&mut self) {
        self.target.reset(RasterizerKind::Gray);
        self.target.reset(RasterizerKind::Subpixel);
    }

    /// Queue a device-space outline for the next [`render`](Self::render).
    pub fn add_outline(&mut self, route: CoveragePath, path: &Path) {
        if !path.is_empty() {
            self.target.add_path(route.rasterizer, path);
        }
    }

    /// Flush the route's rasterizer through its compositor.
    pub fn render(&mut self, route: CoveragePath) {
        profile_function!();
        self.target.render_scanlines(route.rasterizer, route.compositor);
    }

    /// Add `path` and render it right away.
    pub fn fill_path(&mut self, route: CoveragePath, path: &Path) {
        self.add_outline(route, path);
        self.render(route);
    }

    /// Composite a bitmap glyph, returning the compositor used.
    pub fn blit(
        &mut self,
        bitmap: &GlyphBitmap,
        format: BitmapFormat,
        origin: IntPoint,
    ) -> Compositor {
        let compositor = bitmap_compositor(format, self.target.has_alpha_mask());
        self.target.blit_bitmap(bitmap, format, origin, compositor);
        compositor
    }
}
