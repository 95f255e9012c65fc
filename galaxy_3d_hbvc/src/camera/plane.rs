/// Plane: oriented half-space used as a frustum boundary.
///
/// A point P is on the inside when `dot(normal, P) + distance >= 0`.

use glam::{Mat4, Vec3, Vec4};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Normal pointing toward the inside half-space
    pub normal: Vec3,
    /// Signed offset along the normal
    pub distance: f32,
}

impl Plane {
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Plane through `point` facing `normal` (normalized here).
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self { normal, distance: -normal.dot(point) }
    }

    /// Build from the (A, B, C, D) coefficients of `Ax + By + Cz + D = 0`.
    pub fn from_vec4(coefficients: Vec4) -> Self {
        Self { normal: coefficients.truncate(), distance: coefficients.w }
    }

    /// (A, B, C, D) coefficients
    pub fn to_vec4(&self) -> Vec4 {
        self.normal.extend(self.distance)
    }

    /// Signed distance of a point (positive on the inside).
    ///
    /// Exact for a unit normal, scaled by the normal length otherwise.
    #[inline]
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }

    /// Same plane with a unit normal. A zero normal is returned unchanged.
    pub fn normalized(&self) -> Self {
        let length = self.normal.length();
        if length > 0.0 {
            Self { normal: self.normal / length, distance: self.distance / length }
        } else {
            *self
        }
    }

    /// Map the plane by a point transform.
    ///
    /// Returns `None` when the matrix is not invertible.
    pub fn transformed(&self, matrix: &Mat4) -> Option<Self> {
        inverse_transpose(matrix).map(|m| self.transformed_by_inverse_transpose(&m))
    }

    /// Map the plane by a precomputed inverse-transpose, then renormalize.
    pub(crate) fn transformed_by_inverse_transpose(&self, inverse_transpose: &Mat4) -> Self {
        Self::from_vec4(*inverse_transpose * self.to_vec4()).normalized()
    }
}

/// `(M^-1)^T`, the matrix that maps plane coefficients when points are
/// mapped by `M`. `None` for singular or non-finite matrices.
pub(crate) fn inverse_transpose(matrix: &Mat4) -> Option<Mat4> {
    let determinant = matrix.determinant();
    if determinant == 0.0 || !determinant.is_finite() {
        return None;
    }
    Some(matrix.inverse().transpose())
}

#[cfg(test)]
#[path = "plane_tests.rs"]
mod tests;
