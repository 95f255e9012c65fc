/// SceneNode: one element of a SceneGraph.
///
/// Holds the local transform (position / rotation / scale), the tree links,
/// and three lazily recomputed caches, each with its own stale flag:
/// - local matrix
/// - world matrix
/// - world bounding volume
///
/// Nodes are only created and mutated through their SceneGraph, which keeps
/// the stale flags consistent. This type exposes read access.

use glam::{Mat4, Quat, Vec3};
use slotmap::new_key_type;
use crate::bounding::BoundingVolume;
use super::renderable::RenderableKey;

new_key_type! {
    /// Stable key for a SceneNode within a SceneGraph.
    ///
    /// Keys remain valid even after other nodes are removed.
    pub struct SceneNodeKey;
}

#[derive(Debug, Clone)]
pub struct SceneNode<V: BoundingVolume> {
    pub(crate) name: String,
    pub(crate) parent: Option<SceneNodeKey>,
    pub(crate) children: Vec<SceneNodeKey>,
    pub(crate) renderable: Option<RenderableKey>,

    pub(crate) position: Vec3,
    pub(crate) rotation: Quat,
    pub(crate) scale: Vec3,

    pub(crate) local_matrix: Mat4,
    pub(crate) local_stale: bool,
    pub(crate) world_matrix: Mat4,
    pub(crate) world_stale: bool,

    /// Bounds of the attached geometry in node-local space
    pub(crate) leaf_volume: V,
    pub(crate) world_volume: V,
    pub(crate) bound_stale: bool,
}

impl<V: BoundingVolume> SceneNode<V> {
    pub(crate) fn new(name: String, parent: Option<SceneNodeKey>) -> Self {
        Self {
            name,
            parent,
            children: Vec::new(),
            renderable: None,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            local_matrix: Mat4::IDENTITY,
            local_stale: false,
            world_matrix: Mat4::IDENTITY,
            world_stale: true,
            leaf_volume: V::identity(),
            world_volume: V::identity(),
            bound_stale: true,
        }
    }

    // ===== GETTERS =====

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent node (`None` for the root)
    pub fn parent(&self) -> Option<SceneNodeKey> {
        self.parent
    }

    /// Children in insertion order
    pub fn children(&self) -> &[SceneNodeKey] {
        &self.children
    }

    /// Attached renderable, if any
    pub fn renderable(&self) -> Option<RenderableKey> {
        self.renderable
    }

    pub fn local_position(&self) -> Vec3 {
        self.position
    }

    pub fn local_rotation(&self) -> Quat {
        self.rotation
    }

    pub fn local_scale(&self) -> Vec3 {
        self.scale
    }

    /// Bounds of the attached geometry in node-local space
    pub fn leaf_volume(&self) -> &V {
        &self.leaf_volume
    }

    /// Whether the cached world matrix must be recomputed on next read
    pub fn is_world_stale(&self) -> bool {
        self.world_stale
    }

    /// Whether the cached world bounding volume must be recomputed on next read
    pub fn is_bound_stale(&self) -> bool {
        self.bound_stale
    }

    /// Local matrix from the current position / rotation / scale.
    pub(crate) fn compose_local(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}
