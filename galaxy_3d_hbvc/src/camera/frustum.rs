/// Frustum: six clipping planes for visibility culling.
///
/// Each plane's normal points inward (toward the visible volume). A point P
/// is inside the frustum if `plane.signed_distance(P) >= 0` for all planes.
///
/// Cameras build their frustum from projection intrinsics and the world
/// matrix of their scene node. `from_view_projection()` is provided for
/// callers that already hold a combined view-projection matrix.

use glam::{Mat4, Vec3, Vec4};
use crate::bounding::BoundingVolume;
use super::plane::{Plane, inverse_transpose};

/// Result of a 3-way frustum/volume classification.
///
/// Drives the hierarchical culling traversal:
/// - `Outside` → skip the entire subtree
/// - `Inside` → collect the subtree without further testing
/// - `Overlap` → collect the node and test each child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrustumTest {
    /// Volume is entirely outside the frustum
    Outside,
    /// Volume is entirely inside the frustum
    Inside,
    /// Volume straddles at least one plane
    Overlap,
}

/// Frustum plane indices
pub const PLANE_NEAR: usize = 0;
pub const PLANE_FAR: usize = 1;
pub const PLANE_LEFT: usize = 2;
pub const PLANE_RIGHT: usize = 3;
pub const PLANE_TOP: usize = 4;
pub const PLANE_BOTTOM: usize = 5;

/// Six frustum planes for culling.
///
/// Works with both perspective and orthographic projections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// near, far, left, right, top, bottom
    planes: [Plane; 6],
}

impl Frustum {
    /// Create from planes ordered near, far, left, right, top, bottom.
    pub fn new(planes: [Plane; 6]) -> Self {
        Self { planes }
    }

    /// Extract frustum planes from a view-projection matrix.
    ///
    /// Uses the Gribb & Hartmann method with OpenGL clip conventions
    /// (`-w <= z <= w`). Works for both perspective and orthographic
    /// projections.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let m = vp.to_cols_array_2d();
        let row = |i: usize| Vec4::new(m[0][i], m[1][i], m[2][i], m[3][i]);
        let (r0, r1, r2, r3) = (row(0), row(1), row(2), row(3));

        let mut planes = [
            Plane::from_vec4(r3 + r2),  // near
            Plane::from_vec4(r3 - r2),  // far
            Plane::from_vec4(r3 + r0),  // left
            Plane::from_vec4(r3 - r0),  // right
            Plane::from_vec4(r3 - r1),  // top
            Plane::from_vec4(r3 + r1),  // bottom
        ];
        for plane in &mut planes {
            *plane = plane.normalized();
        }

        Self { planes }
    }

    /// All six planes, ordered by the `PLANE_*` indices.
    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    /// Plane at a `PLANE_*` index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 6 or more.
    pub fn plane(&self, index: usize) -> &Plane {
        &self.planes[index]
    }

    /// Map every plane by a point transform (inverse-transpose rule).
    ///
    /// Returns `None` when the matrix is not invertible.
    pub fn transformed(&self, matrix: &Mat4) -> Option<Self> {
        let it = inverse_transpose(matrix)?;
        Some(Self {
            planes: self.planes.map(|p| p.transformed_by_inverse_transpose(&it)),
        })
    }

    /// Whether a point is inside all six planes (boundary included).
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|p| p.signed_distance(point) >= 0.0)
    }

    /// Classify a bounding volume against this frustum.
    pub fn classify<V: BoundingVolume>(&self, volume: &V) -> FrustumTest {
        volume.intersects(self)
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
