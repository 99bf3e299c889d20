//! Glint Core
//!
//! Shared building blocks for the glint glyph rasterizer: logging setup,
//! profiling hooks, renderer configuration and the integer/float rectangle
//! types every stage of the pipeline speaks.

pub mod config;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
