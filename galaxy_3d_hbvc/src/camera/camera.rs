/// Camera: projection intrinsics attached to a scene node.
///
/// The camera owns no transform of its own: its placement is the world
/// matrix of the scene node it is attached to. Once per frame the caller
/// runs `calculate_world_space_frustum()`, which rebuilds the six frustum
/// planes in camera-local space and maps them into world space. The cached
/// frustum is then used for every `contains()` query of that frame.
///
/// Cameras look down their node's local -Z axis with +Y up.

use glam::{Mat4, Vec3};
use crate::bounding::BoundingVolume;
use crate::error::Result;
use crate::engine_bail;
use crate::scene::{SceneGraph, SceneNodeKey};
use super::frustum::{Frustum, FrustumTest};
use super::plane::Plane;

/// Projection kind and its intrinsics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Perspective projection.
    ///
    /// `fovy` is the full vertical field of view in radians. The horizontal
    /// field of view is implied by the aspect ratio (width / height).
    Perspective {
        near: f32,
        far: f32,
        fovy: f32,
        aspect: f32,
    },
    /// Orthographic projection with explicit view-space extents.
    Orthographic {
        near: f32,
        far: f32,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
    },
}

impl Projection {
    /// Near clip distance
    pub fn near(&self) -> f32 {
        match *self {
            Projection::Perspective { near, .. } | Projection::Orthographic { near, .. } => near,
        }
    }

    /// Far clip distance
    pub fn far(&self) -> f32 {
        match *self {
            Projection::Perspective { far, .. } | Projection::Orthographic { far, .. } => far,
        }
    }

    /// Why these intrinsics cannot form a frustum, if they cannot.
    fn invalid_reason(&self) -> Option<&'static str> {
        match *self {
            Projection::Perspective { near, far, fovy, aspect } => {
                if !(near > 0.0) {
                    Some("perspective near distance must be positive")
                } else if !(far > near) {
                    Some("far distance must exceed near distance")
                } else if !(fovy > 0.0 && fovy < std::f32::consts::PI) {
                    Some("vertical field of view must be in (0, pi)")
                } else if !(aspect > 0.0) {
                    Some("aspect ratio must be positive")
                } else {
                    None
                }
            }
            Projection::Orthographic { near, far, left, right, bottom, top } => {
                if !(far > near) {
                    Some("far distance must exceed near distance")
                } else if !(right > left) {
                    Some("right extent must exceed left extent")
                } else if !(top > bottom) {
                    Some("top extent must exceed bottom extent")
                } else {
                    None
                }
            }
        }
    }

    /// Horizontal field of view implied by `fovy` and `aspect` (perspective
    /// only).
    pub fn fovx(&self) -> Option<f32> {
        match *self {
            Projection::Perspective { fovy, aspect, .. } => {
                Some(2.0 * ((fovy * 0.5).tan() * aspect).atan())
            }
            Projection::Orthographic { .. } => None,
        }
    }

    /// The six frustum planes in camera-local space.
    pub fn local_frustum(&self) -> Frustum {
        let near_plane = Plane::new(Vec3::NEG_Z, -self.near());
        let far_plane = Plane::new(Vec3::Z, self.far());

        match *self {
            Projection::Perspective { fovy, .. } => {
                let half_y = fovy * 0.5;
                let half_x = self.fovx().unwrap_or(fovy) * 0.5;
                let (sin_x, cos_x) = half_x.sin_cos();
                let (sin_y, cos_y) = half_y.sin_cos();

                // Side planes pass through the eye
                Frustum::new([
                    near_plane,
                    far_plane,
                    Plane::new(Vec3::new(cos_x, 0.0, -sin_x), 0.0),
                    Plane::new(Vec3::new(-cos_x, 0.0, -sin_x), 0.0),
                    Plane::new(Vec3::new(0.0, -cos_y, -sin_y), 0.0),
                    Plane::new(Vec3::new(0.0, cos_y, -sin_y), 0.0),
                ])
            }
            Projection::Orthographic { left, right, bottom, top, .. } => Frustum::new([
                near_plane,
                far_plane,
                Plane::new(Vec3::X, -left),
                Plane::new(Vec3::NEG_X, right),
                Plane::new(Vec3::NEG_Y, top),
                Plane::new(Vec3::Y, -bottom),
            ]),
        }
    }

    /// Projection matrix (right-handed, OpenGL clip space).
    pub fn matrix(&self) -> Mat4 {
        match *self {
            Projection::Perspective { near, far, fovy, aspect } => {
                Mat4::perspective_rh_gl(fovy, aspect, near, far)
            }
            Projection::Orthographic { near, far, left, right, bottom, top } => {
                Mat4::orthographic_rh_gl(left, right, bottom, top, near, far)
            }
        }
    }
}

/// Camera attached to a scene node.
#[derive(Debug, Clone)]
pub struct Camera {
    node: SceneNodeKey,
    projection: Projection,
    /// World-space frustum from the last `calculate_world_space_frustum()`
    frustum: Frustum,
}

impl Camera {
    /// Create a camera attached to `node`.
    ///
    /// Until the first `calculate_world_space_frustum()`, the frustum is
    /// the camera-local one (as if the node sat at the origin).
    pub fn new(node: SceneNodeKey, projection: Projection) -> Self {
        Self {
            node,
            projection,
            frustum: projection.local_frustum(),
        }
    }

    /// Perspective camera. `fovy` is the vertical field of view in radians.
    pub fn perspective(node: SceneNodeKey, near: f32, far: f32, fovy: f32, aspect: f32) -> Self {
        Self::new(node, Projection::Perspective { near, far, fovy, aspect })
    }

    /// Orthographic camera with explicit view-space extents.
    pub fn orthographic(
        node: SceneNodeKey,
        near: f32,
        far: f32,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
    ) -> Self {
        Self::new(node, Projection::Orthographic { near, far, left, right, bottom, top })
    }

    // ===== GETTERS =====

    /// Scene node providing the camera placement
    pub fn node(&self) -> SceneNodeKey {
        self.node
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// World-space frustum computed by the last
    /// `calculate_world_space_frustum()`.
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Projection matrix (right-handed, OpenGL clip space).
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    // ===== SETTERS =====
    // The cached frustum is refreshed by the next calculate_world_space_frustum()

    pub fn set_node(&mut self, node: SceneNodeKey) {
        self.node = node;
    }

    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    // ===== FRAME API =====

    /// Rebuild the world-space frustum from the intrinsics and the current
    /// world matrix of the camera node.
    ///
    /// Planes are mapped by the inverse-transpose of the world matrix and
    /// renormalized, so scaled camera nodes keep metric distances.
    ///
    /// # Errors
    ///
    /// - the camera node is not in `graph`
    /// - the intrinsics are degenerate
    /// - the node's world matrix is singular
    pub fn calculate_world_space_frustum<V: BoundingVolume>(
        &mut self,
        graph: &mut SceneGraph<V>,
    ) -> Result<()> {
        if let Some(reason) = self.projection.invalid_reason() {
            engine_bail!("galaxy3d::Camera", InvalidCamera, "{}", reason);
        }

        let Some(world) = graph.world_matrix(self.node) else {
            engine_bail!("galaxy3d::Camera", InvalidNode,
                "camera node {:?} is not in the scene graph", self.node);
        };

        let Some(frustum) = self.projection.local_frustum().transformed(&world) else {
            engine_bail!("galaxy3d::Camera", InvalidCamera,
                "camera node {:?} has a singular world matrix", self.node);
        };

        self.frustum = frustum;
        Ok(())
    }

    /// Classify a world-space bounding volume against the cached frustum.
    pub fn contains<V: BoundingVolume>(&self, volume: &V) -> FrustumTest {
        volume.intersects(&self.frustum)
    }

    /// View matrix: inverse of the camera node's world matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if the camera node is not in `graph`.
    pub fn view_matrix<V: BoundingVolume>(&self, graph: &mut SceneGraph<V>) -> Result<Mat4> {
        match graph.world_matrix(self.node) {
            Some(world) => Ok(world.inverse()),
            None => engine_bail!("galaxy3d::Camera", InvalidNode,
                "camera node {:?} is not in the scene graph", self.node),
        }
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix<V: BoundingVolume>(&self, graph: &mut SceneGraph<V>) -> Result<Mat4> {
        Ok(self.projection_matrix() * self.view_matrix(graph)?)
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
