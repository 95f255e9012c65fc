/// Renderable: drawable payload attached to a scene node.
///
/// The culling core only reads three things from a renderable:
/// - its geometry, once at attach time, to derive the node's leaf volume
/// - its VISIBLE flag, to decide whether it is emitted
/// - its material id, forwarded in the render queue for batching

use std::fmt;
use std::sync::Arc;
use bitflags::bitflags;
use slotmap::new_key_type;
use crate::resource::Geometry;
use super::scene_node::SceneNodeKey;

new_key_type! {
    /// Stable key for a Renderable within a SceneGraph.
    ///
    /// Keys remain valid even after other renderables are removed.
    pub struct RenderableKey;
}

/// Opaque material identifier, resolved by the draw stage.
pub type MaterialId = u32;

bitflags! {
    /// Renderable flags (bitfield)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RenderableFlags: u32 {
        /// Emitted by cullers when its node is not culled
        const VISIBLE = 1 << 0;
    }
}

impl Default for RenderableFlags {
    fn default() -> Self {
        RenderableFlags::VISIBLE
    }
}

pub struct Renderable {
    geometry: Option<Arc<dyn Geometry>>,
    material: MaterialId,
    flags: RenderableFlags,
    /// Owning node, set by SceneGraph::attach_renderable
    node: Option<SceneNodeKey>,
}

impl Renderable {
    /// Visible renderable without geometry.
    pub fn new(material: MaterialId) -> Self {
        Self {
            geometry: None,
            material,
            flags: RenderableFlags::default(),
            node: None,
        }
    }

    /// Builder: attach geometry before the renderable joins a graph.
    pub fn with_geometry(mut self, geometry: Arc<dyn Geometry>) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Builder: replace all flags.
    pub fn with_flags(mut self, flags: RenderableFlags) -> Self {
        self.flags = flags;
        self
    }

    // ===== GETTERS =====

    pub fn geometry(&self) -> Option<&Arc<dyn Geometry>> {
        self.geometry.as_ref()
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }

    pub fn flags(&self) -> RenderableFlags {
        self.flags
    }

    pub fn is_visible(&self) -> bool {
        self.flags.contains(RenderableFlags::VISIBLE)
    }

    /// Node this renderable is attached to, if any.
    pub fn node(&self) -> Option<SceneNodeKey> {
        self.node
    }

    // ===== SETTERS =====

    pub fn set_material(&mut self, material: MaterialId) {
        self.material = material;
    }

    pub fn set_flags(&mut self, flags: RenderableFlags) {
        self.flags = flags;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.flags.set(RenderableFlags::VISIBLE, visible);
    }

    /// Geometry changes must go through the graph so bounds get invalidated.
    pub(crate) fn set_geometry(&mut self, geometry: Option<Arc<dyn Geometry>>) {
        self.geometry = geometry;
    }

    pub(crate) fn set_node(&mut self, node: Option<SceneNodeKey>) {
        self.node = node;
    }
}

impl fmt::Debug for Renderable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderable")
            .field("vertex_count", &self.geometry.as_ref().map(|g| g.vertex_count()))
            .field("material", &self.material)
            .field("flags", &self.flags)
            .field("node", &self.node)
            .finish()
    }
}

#[cfg(test)]
#[path = "renderable_tests.rs"]
mod tests;
