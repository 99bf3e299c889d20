//! Glint Geometry - vector geometry for glyph rasterization
//!
//! This crate provides:
//! - [`Transform2D`], the affine transform runs are rendered through
//! - [`Path`] and [`PathBuilder`] for glyph outlines and decorations
//! - curve flattening, false-bold contouring and line stroking
//! - [`OutlineConverter`], the glyph outline pipeline tying them together
//!
//! # Example
//!
//! ```
//! use glint_geometry::{OutlineConverter, PathBuilder, Transform2D};
//! use glint_core::geometry::Rect;
//! use glint_core::math::DVec2;
//!
//! let outline = PathBuilder::new().rect(Rect::new(0.0, -8.0, 6.0, 0.0)).build();
//! let converter = OutlineConverter::new(2.0);
//! let device = converter.convert(&outline, DVec2::new(0.0, 20.0), &Transform2D::IDENTITY);
//! assert_eq!(device.bounds().unwrap().bottom, 20.0);
//! ```

pub mod contour;
pub mod curve;
mod outline;
mod path;
pub mod stroke;
mod transform;

pub use outline::*;
pub use path::*;
pub use transform::*;
