//! Glint Text - glyph run rasterization
//!
//! This crate paints shaped glyph runs onto a raster target:
//! - [`TextRenderer`] owns the font state and exposes the `render_string*`
//!   entry points
//! - a [`GlyphLayoutEngine`] walks the string and feeds a per-run
//!   [`StringRenderer`] through the [`GlyphConsumer`] protocol
//! - every glyph is routed by representation (mono, gray8, subpixel bitmap
//!   or vector outline), clipped, and painted through a [`RasterDispatcher`]
//! - underline and strikeout are painted after the glyphs
//!
//! ## Quick Start
//!
//! ```rust
//! use glint_core::config::RendererConfig;
//! use glint_core::geometry::IntRect;
//! use glint_core::math::DVec2;
//! use glint_test_utils::ScriptedLayout;
//! use glint_text::{Canvas, ServerFont, TextRenderer};
//!
//! let canvas = Canvas::new(64, 32).unwrap();
//! let mut renderer = TextRenderer::new(canvas, RendererConfig::default());
//! renderer.set_font(ServerFont::default().size(12.0));
//!
//! // Every character becomes a 5x8 gray box advancing 6 pixels.
//! let mut layout = ScriptedLayout::boxes(6.0, 5, 8);
//! let mut pen = DVec2::ZERO;
//! let bounds = renderer.render_string(
//!     &mut layout,
//!     "Hi",
//!     DVec2::new(2.0, 20.0),
//!     IntRect::new(0, 0, 63, 31),
//!     false,
//!     Some(&mut pen),
//!     None,
//!     None,
//! );
//! assert!(bounds.is_valid());
//! assert_eq!(pen, DVec2::new(14.0, 20.0));
//! ```
//!
//! ## Raster targets
//!
//! Coverage accumulation and compositing live behind [`RasterTarget`].
//! [`Canvas`] is the software implementation (zeno coverage, RGBA8
//! surface, optional [`AlphaMask`]).

pub mod bounds;
pub mod canvas;
pub mod decoration;
pub mod error;
pub mod font;
pub mod glyph;
pub mod layout;
pub mod raster;
pub mod renderer;
pub mod string_renderer;

pub use bounds::BoundingBox;
pub use canvas::{AlphaMask, Canvas, Color};
pub use decoration::{DecorationLine, DecorationPainter};
pub use error::{GlintError, GlintResult};
pub use font::{EscapementDelta, FontFace, FontHeight, ServerFont, Spacing};
pub use glyph::{BitmapFormat, CachedGlyph, GlyphBitmap, GlyphData};
pub use layout::{GlyphConsumer, GlyphLayoutEngine};
pub use raster::{Compositor, CoveragePath, Gamma, RasterDispatcher, RasterTarget, RasterizerKind};
pub use renderer::TextRenderer;
pub use string_renderer::{RunSettings, StringRenderer};
