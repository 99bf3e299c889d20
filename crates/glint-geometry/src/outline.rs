//! Glyph outline conversion pipeline.
//!
//! A vector glyph travels through: placement at its pen position, curve
//! flattening, the optional false-bold contour, and finally the run
//! transform. The transform comes last so flattening and contouring work in
//! untransformed glyph space, with the approximation scale compensating for
//! the later scaling.

use glam::DVec2;

use crate::{Path, Transform2D, contour, curve};

/// Converts cache outlines into flat device-space paths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineConverter {
    approximation_scale: f64,
    contour_width: f64,
}

impl OutlineConverter {
    pub fn new(approximation_scale: f64) -> Self {
        Self {
            approximation_scale,
            contour_width: 0.0,
        }
    }

    pub fn approximation_scale(&self) -> f64 {
        self.approximation_scale
    }

    pub fn set_approximation_scale(&mut self, scale: f64) {
        self.approximation_scale = scale;
    }

    /// Full width of the false-bold contour stroke (0 disables it).
    pub fn contour_width(&self) -> f64 {
        self.contour_width
    }

    pub fn set_contour_width(&mut self, width: f64) {
        self.contour_width = width;
    }

    /// Plain outline: placed, flattened and transformed.
    pub fn transformed_outline(
        &self,
        outline: &Path,
        origin: DVec2,
        transform: &Transform2D,
    ) -> Path {
        curve::flatten(&outline.translated(origin), self.approximation_scale).transformed(transform)
    }

    /// Contoured outline: placed, flattened, emboldened and transformed.
    pub fn transformed_contour(
        &self,
        outline: &Path,
        origin: DVec2,
        transform: &Transform2D,
    ) -> Path {
        let flat = curve::flatten(&outline.translated(origin), self.approximation_scale);
        contour::contour(&flat, self.contour_width).transformed(transform)
    }

    /// Whichever of the two pipelines the current contour width selects.
    pub fn convert(&self, outline: &Path, origin: DVec2, transform: &Transform2D) -> Path {
        if self.contour_width == 0.0 {
            self.transformed_outline(outline, origin, transform)
        } else {
            self.transformed_contour(outline, origin, transform)
        }
    }
}
