//! 2D affine transformations.
//!
//! Composition follows "self, then other": `a.then(&b)` maps a point through
//! `a` first and `b` second. Text runs compose the per-font embedded
//! transform with the caller's view transform this way.

use glam::{DAffine2, DMat2, DVec2};
use glint_core::geometry::Rect;

/// Tolerance for treating matrix components as exact.
pub const AFFINE_EPSILON: f64 = 1e-14;

/// A 2D affine transformation in double precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    affine: DAffine2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    /// Identity transform (no transformation).
    pub const IDENTITY: Self = Self {
        affine: DAffine2::IDENTITY,
    };

    pub fn from_affine(affine: DAffine2) -> Self {
        Self { affine }
    }

    /// Create a translation transform.
    pub fn translate(offset: DVec2) -> Self {
        Self {
            affine: DAffine2::from_translation(offset),
        }
    }

    /// Create a rotation transform (angle in radians).
    pub fn rotate(angle: f64) -> Self {
        Self {
            affine: DAffine2::from_angle(angle),
        }
    }

    /// Create a uniform scale transform.
    pub fn scale(factor: f64) -> Self {
        Self {
            affine: DAffine2::from_scale(DVec2::splat(factor)),
        }
    }

    /// Create a skew transform.
    ///
    /// `skew_x` is the horizontal skew angle in radians: `x' = x + y * tan(skew_x)`.
    /// `skew_y` is the vertical skew angle in radians: `y' = y + x * tan(skew_y)`.
    pub fn skew(skew_x: f64, skew_y: f64) -> Self {
        Self {
            affine: DAffine2::from_mat2(DMat2::from_cols(
                DVec2::new(1.0, skew_y.tan()),
                DVec2::new(skew_x.tan(), 1.0),
            )),
        }
    }

    /// Combine two transforms (self then other).
    pub fn then(&self, other: &Transform2D) -> Self {
        Self {
            affine: other.affine * self.affine,
        }
    }

    /// Add a translation after this transform.
    pub fn then_translate(&self, offset: DVec2) -> Self {
        self.then(&Transform2D::translate(offset))
    }

    /// Add a rotation about `origin` after this transform.
    pub fn then_rotate_about(&self, origin: DVec2, angle: f64) -> Self {
        if angle == 0.0 {
            return *self;
        }
        self.then_translate(-origin)
            .then(&Transform2D::rotate(angle))
            .then_translate(origin)
    }

    /// Add a skew about `origin` after this transform.
    pub fn then_skew_about(&self, origin: DVec2, skew_x: f64, skew_y: f64) -> Self {
        if skew_x == 0.0 && skew_y == 0.0 {
            return *self;
        }
        self.then_translate(-origin)
            .then(&Transform2D::skew(skew_x, skew_y))
            .then_translate(origin)
    }

    /// Transform a point.
    pub fn transform_point(&self, point: DVec2) -> DVec2 {
        self.affine.transform_point2(point)
    }

    /// Axis-aligned bounds of the four transformed corners.
    ///
    /// Invalid (inverted) rectangles are returned untouched.
    pub fn transform_bounds(&self, bounds: Rect) -> Rect {
        if !bounds.is_valid() {
            return bounds;
        }

        let mut min = DVec2::splat(f64::INFINITY);
        let mut max = DVec2::splat(f64::NEG_INFINITY);
        for corner in bounds.corners() {
            let p = self.transform_point(corner);
            min = min.min(p);
            max = max.max(p);
        }
        Rect::from_points(min, max)
    }

    /// True when the linear part is the identity, so only an offset remains.
    pub fn is_translation_only(&self) -> bool {
        let m = self.affine.matrix2;
        (m.x_axis.x - 1.0).abs() <= AFFINE_EPSILON
            && m.x_axis.y.abs() <= AFFINE_EPSILON
            && m.y_axis.x.abs() <= AFFINE_EPSILON
            && (m.y_axis.y - 1.0).abs() <= AFFINE_EPSILON
    }

    pub fn is_identity(&self) -> bool {
        self.is_translation_only()
            && self.affine.translation.x.abs() <= AFFINE_EPSILON
            && self.affine.translation.y.abs() <= AFFINE_EPSILON
    }

    pub fn as_affine(&self) -> &DAffine2 {
        &self.affine
    }

    /// Get the translation component.
    pub fn translation(&self) -> DVec2 {
        self.affine.translation
    }

    /// Average linear scale, as used to pick a curve approximation scale.
    ///
    /// Length of the image of the unit diagonal `(0.7071, 0.7071)`.
    pub fn average_scale(&self) -> f64 {
        const HALF_SQRT2: f64 = std::f64::consts::FRAC_1_SQRT_2;
        let m = self.affine.matrix2;
        let x = HALF_SQRT2 * m.x_axis.x + HALF_SQRT2 * m.y_axis.x;
        let y = HALF_SQRT2 * m.x_axis.y + HALF_SQRT2 * m.y_axis.y;
        (x * x + y * y).sqrt()
    }
}

impl std::ops::Mul<Transform2D> for Transform2D {
    type Output = Transform2D;

    fn mul(self, rhs: Transform2D) -> Transform2D {
        self.then(&rhs)
    }
}

impl std::ops::MulAssign<Transform2D> for Transform2D {
    fn mul_assign(&mut self, rhs: Transform2D) {
        *self = self.then(&rhs);
    }
}
