//! Math re-exports.
//!
//! The rasterizer works in double precision end to end, so the `D*` types
//! from [`glam`] are the ones used across the workspace.
//!
//! ```
//! use glint_core::math::DVec2;
//!
//! let pen = DVec2::new(10.0, 20.0) + DVec2::new(7.5, 0.0);
//! assert_eq!(pen.x, 17.5);
//! ```

pub use glam::{DAffine2, DMat2, DVec2, IVec2};
