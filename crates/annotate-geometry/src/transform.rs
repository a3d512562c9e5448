//! 2D affine transforms
//!
//! A transform is the 6-tuple `[a, b, c, d, e, f]` of the matrix
//!
//! ```text
//! | a c e |
//! | b d f |
//! | 0 0 1 |
//! ```
//!
//! Every builder right-multiplies, so `IDENTITY.scale(..).rotate(..).translate(..)`
//! maps a point by translating first, then rotating, then scaling.

use annotate_types::{Point, Rotation};

use crate::error::GeometryError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform(pub [f64; 6]);

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    /// `self × other`
    pub fn multiply(self, other: Transform) -> Self {
        let [a1, b1, c1, d1, e1, f1] = self.0;
        let [a2, b2, c2, d2, e2, f2] = other.0;
        Transform([
            a1 * a2 + c1 * b2,
            b1 * a2 + d1 * b2,
            a1 * c2 + c1 * d2,
            b1 * c2 + d1 * d2,
            a1 * e2 + c1 * f2 + e1,
            b1 * e2 + d1 * f2 + f1,
        ])
    }

    pub fn scale(self, sx: f64, sy: f64) -> Self {
        let [a, b, c, d, e, f] = self.0;
        Transform([a * sx, b * sx, c * sy, d * sy, e, f])
    }

    /// Rotate by an arbitrary angle in degrees.
    ///
    /// Right angles go through [`Transform::rotate_by`] so the result carries
    /// exact zeros and ones instead of `cos(π/2)` noise.
    pub fn rotate(self, degrees: f64) -> Self {
        match Rotation::from_degrees(degrees) {
            Ok(rotation) => self.rotate_by(rotation),
            Err(_) => {
                let (sin, cos) = degrees.to_radians().sin_cos();
                self.rotate_sin_cos(sin, cos)
            }
        }
    }

    pub fn rotate_by(self, rotation: Rotation) -> Self {
        let (sin, cos) = rotation.sin_cos();
        self.rotate_sin_cos(sin, cos)
    }

    fn rotate_sin_cos(self, sin: f64, cos: f64) -> Self {
        let [a, b, c, d, e, f] = self.0;
        Transform([
            a * cos + c * sin,
            b * cos + d * sin,
            c * cos - a * sin,
            d * cos - b * sin,
            e,
            f,
        ])
    }

    pub fn translate(self, tx: f64, ty: f64) -> Self {
        let [a, b, c, d, e, f] = self.0;
        Transform([a, b, c, d, a * tx + c * ty + e, b * tx + d * ty + f])
    }

    pub fn determinant(&self) -> f64 {
        let [a, b, c, d, _, _] = self.0;
        a * d - b * c
    }

    pub fn apply(&self, point: Point) -> Point {
        let [a, b, c, d, e, f] = self.0;
        Point::new(
            point.x * a + point.y * c + e,
            point.x * b + point.y * d + f,
        )
    }

    /// Map a point through the inverse transform.
    ///
    /// # Errors
    /// Returns [`GeometryError::SingularTransform`] when the determinant is zero
    /// or not finite.
    pub fn apply_inverse(&self, point: Point) -> Result<Point, GeometryError> {
        let det = self.checked_determinant()?;
        let [a, b, c, d, e, f] = self.0;
        Ok(Point::new(
            (point.x * d - point.y * c + c * f - e * d) / det,
            (-point.x * b + point.y * a + e * b - f * a) / det,
        ))
    }

    pub fn inverse(&self) -> Result<Transform, GeometryError> {
        let det = self.checked_determinant()?;
        let [a, b, c, d, e, f] = self.0;
        Ok(Transform([
            d / det,
            -b / det,
            -c / det,
            a / det,
            (c * f - d * e) / det,
            (b * e - a * f) / det,
        ]))
    }

    fn checked_determinant(&self) -> Result<f64, GeometryError> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return Err(GeometryError::SingularTransform(det));
        }
        Ok(det)
    }
}
