//! Test utilities for glint.
//!
//! # Overview
//!
//! - [`ScriptedLayout`] - a deterministic [`GlyphLayoutEngine`] replaying
//!   fixed glyphs per character
//! - [`glyphs`] - builders for box-shaped glyphs in every representation
//! - `MockRasterTarget` - a [`RasterTarget`] recording every call (requires
//!   the `mock` feature)
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use glint_core::config::RendererConfig;
//! use glint_core::geometry::IntRect;
//! use glint_core::math::DVec2;
//! use glint_test_utils::{MockRasterTarget, ScriptedLayout};
//! use glint_text::TextRenderer;
//!
//! let mock = MockRasterTarget::new();
//! let mut renderer = TextRenderer::new(mock.clone(), RendererConfig::default());
//! let mut layout = ScriptedLayout::boxes(6.0, 5, 8);
//!
//! renderer.render_string(
//!     &mut layout,
//!     "ab",
//!     DVec2::new(0.0, 20.0),
//!     IntRect::new(0, 0, 99, 99),
//!     false,
//!     None,
//!     None,
//!     None,
//! );
//!
//! // One blit per glyph
//! assert_eq!(mock.count_blits(), 2);
//! # }
//! ```
//!
//! [`GlyphLayoutEngine`]: glint_text::GlyphLayoutEngine
//! [`RasterTarget`]: glint_text::RasterTarget

pub mod glyphs;
#[cfg(feature = "mock")]
pub mod mock_raster;
pub mod scripted_layout;

#[cfg(feature = "mock")]
pub use mock_raster::*;
pub use scripted_layout::*;
