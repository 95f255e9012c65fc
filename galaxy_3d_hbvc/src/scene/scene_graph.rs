/// SceneGraph: transform hierarchy with lazily cached world data.
///
/// Nodes live in a SlotMap arena addressed by stable SceneNodeKeys. Each
/// node caches its local matrix, world matrix and world bounding volume.
/// Edits never recompute anything; they only mark caches stale:
/// - transform edits and reparenting mark world matrices stale *downward*
///   (the edited node and its descendants)
/// - any change that can move or resize a node's bounds marks bounding
///   volumes stale *upward* (the node and its ancestors)
///
/// Reads (`world_matrix`, `world_bounding_volume`) recompute stale entries
/// on demand and take `&mut self` for that reason.
///
/// Staleness is kept closed under the tree:
/// - a world-stale node has only world-stale descendants
/// - a bound-stale node has only bound-stale ancestors
/// - a world-stale node is always bound-stale
///
/// so both propagations stop at the first node that is already stale.

use std::sync::Arc;
use glam::{Mat4, Quat, Vec3};
use slotmap::SlotMap;
use crate::bounding::{BoundingVolume, DefaultBoundingVolume};
use crate::error::Result;
use crate::resource::Geometry;
use crate::{engine_bail, engine_trace};
use super::renderable::{Renderable, RenderableKey};
use super::scene_node::{SceneNode, SceneNodeKey};

/// Name given to the root node
pub const ROOT_NAME: &str = "root";

pub struct SceneGraph<V: BoundingVolume = DefaultBoundingVolume> {
    nodes: SlotMap<SceneNodeKey, SceneNode<V>>,
    renderables: SlotMap<RenderableKey, Renderable>,
    root: SceneNodeKey,
}

impl<V: BoundingVolume> Default for SceneGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: BoundingVolume> SceneGraph<V> {
    /// Create a graph containing only the root node.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::new(ROOT_NAME.to_string(), None));
        Self {
            nodes,
            renderables: SlotMap::with_key(),
            root,
        }
    }

    // ===== STRUCTURE =====

    /// Create a node under the root.
    pub fn create_node(&mut self, name: &str) -> SceneNodeKey {
        self.insert_child(self.root, name)
    }

    /// Create a node under `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if `parent` is not in the graph.
    pub fn create_child(&mut self, parent: SceneNodeKey, name: &str) -> Result<SceneNodeKey> {
        if !self.nodes.contains_key(parent) {
            engine_bail!("galaxy3d::SceneGraph", InvalidNode,
                "cannot create '{}': parent {:?} not found", name, parent);
        }
        Ok(self.insert_child(parent, name))
    }

    fn insert_child(&mut self, parent: SceneNodeKey, name: &str) -> SceneNodeKey {
        let key = self.nodes.insert(SceneNode::new(name.to_string(), Some(parent)));
        self.nodes[parent].children.push(key);
        self.mark_bounds_stale_upward(parent);
        key
    }

    /// Destroy a node, its whole subtree, and every renderable attached
    /// within it. Returns the number of nodes removed.
    ///
    /// # Errors
    ///
    /// - `key` is not in the graph
    /// - `key` is the root
    pub fn remove_node(&mut self, key: SceneNodeKey) -> Result<usize> {
        if key == self.root {
            engine_bail!("galaxy3d::SceneGraph", StructuralError, "the root node cannot be removed");
        }
        let Some(parent) = self.nodes.get(key).and_then(|n| n.parent) else {
            engine_bail!("galaxy3d::SceneGraph", InvalidNode, "node {:?} not found", key);
        };

        self.unlink(key, parent);

        let subtree = self.collect_subtree(key);
        for &node_key in &subtree {
            if let Some(node) = self.nodes.remove(node_key) {
                if let Some(renderable) = node.renderable {
                    self.renderables.remove(renderable);
                }
            }
        }

        engine_trace!("galaxy3d::SceneGraph", "removed {} node(s) under {:?}", subtree.len(), key);
        Ok(subtree.len())
    }

    /// Move `node` (with its subtree) under `new_parent`, appended last.
    ///
    /// # Errors
    ///
    /// Structural errors leave every link untouched:
    /// - `node` is the root
    /// - `new_parent` is `node` itself or one of its descendants
    ///
    /// Returns an InvalidNode error if either key is not in the graph.
    pub fn set_parent(&mut self, node: SceneNodeKey, new_parent: SceneNodeKey) -> Result<()> {
        if !self.nodes.contains_key(node) || !self.nodes.contains_key(new_parent) {
            engine_bail!("galaxy3d::SceneGraph", InvalidNode,
                "cannot reparent {:?} under {:?}: node not found", node, new_parent);
        }
        if node == self.root {
            engine_bail!("galaxy3d::SceneGraph", StructuralError, "the root node cannot be reparented");
        }
        if node == new_parent {
            engine_bail!("galaxy3d::SceneGraph", StructuralError,
                "node '{}' cannot be its own parent", self.nodes[node].name);
        }
        if self.is_ancestor_of(node, new_parent) {
            engine_bail!("galaxy3d::SceneGraph", StructuralError,
                "node '{}' cannot be moved under its descendant '{}'",
                self.nodes[node].name, self.nodes[new_parent].name);
        }

        if let Some(old_parent) = self.nodes[node].parent {
            self.unlink(node, old_parent);
        }
        self.nodes[node].parent = Some(new_parent);
        self.nodes[new_parent].children.push(node);

        self.mark_world_stale_downward(node);
        self.mark_bounds_stale_upward(new_parent);
        Ok(())
    }

    /// Remove `node` from `parent`'s children and invalidate the old
    /// ancestors' bounds.
    fn unlink(&mut self, node: SceneNodeKey, parent: SceneNodeKey) {
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.retain(|&c| c != node);
        }
        self.mark_bounds_stale_upward(parent);
    }

    /// Pre-order list of `key` and all its descendants.
    fn collect_subtree(&self, key: SceneNodeKey) -> Vec<SceneNodeKey> {
        let mut result = Vec::new();
        let mut stack = vec![key];
        while let Some(k) = stack.pop() {
            if let Some(node) = self.nodes.get(k) {
                result.push(k);
                stack.extend(node.children.iter().rev());
            }
        }
        result
    }

    // ===== QUERIES =====

    pub fn root(&self) -> SceneNodeKey {
        self.root
    }

    pub fn node(&self, key: SceneNodeKey) -> Option<&SceneNode<V>> {
        self.nodes.get(key)
    }

    pub fn contains_node(&self, key: SceneNodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn parent(&self, key: SceneNodeKey) -> Option<SceneNodeKey> {
        self.nodes.get(key).and_then(|n| n.parent)
    }

    pub fn children(&self, key: SceneNodeKey) -> Option<&[SceneNodeKey]> {
        self.nodes.get(key).map(|n| n.children.as_slice())
    }

    /// Whether `ancestor` is a proper ancestor of `key`.
    pub fn is_ancestor_of(&self, ancestor: SceneNodeKey, key: SceneNodeKey) -> bool {
        let mut current = self.parent(key);
        while let Some(k) = current {
            if k == ancestor {
                return true;
            }
            current = self.parent(k);
        }
        false
    }

    /// First direct child of `parent` with the given name.
    pub fn child_by_name(&self, parent: SceneNodeKey, name: &str) -> Option<SceneNodeKey> {
        self.nodes
            .get(parent)?
            .children
            .iter()
            .copied()
            .find(|&c| self.nodes.get(c).is_some_and(|n| n.name == name))
    }

    /// Nearest proper ancestor of `key` with the given name.
    pub fn ancestor_by_name(&self, key: SceneNodeKey, name: &str) -> Option<SceneNodeKey> {
        let mut current = self.parent(key);
        while let Some(k) = current {
            let node = self.nodes.get(k)?;
            if node.name == name {
                return Some(k);
            }
            current = node.parent;
        }
        None
    }

    /// Rename a node. Returns false if the key is invalid.
    pub fn set_name(&mut self, key: SceneNodeKey, name: &str) -> bool {
        match self.nodes.get_mut(key) {
            Some(node) => {
                node.name = name.to_string();
                true
            }
            None => false,
        }
    }

    // ===== LOCAL TRANSFORM =====

    /// Set the position relative to the parent. Returns false if the key is invalid.
    pub fn set_local_position(&mut self, key: SceneNodeKey, position: Vec3) -> bool {
        self.edit_local(key, |node| node.position = position)
    }

    /// Set the rotation relative to the parent. Returns false if the key is invalid.
    pub fn set_local_rotation(&mut self, key: SceneNodeKey, rotation: Quat) -> bool {
        self.edit_local(key, |node| node.rotation = rotation)
    }

    /// Set the scale relative to the parent. Returns false if the key is invalid.
    pub fn set_local_scale(&mut self, key: SceneNodeKey, scale: Vec3) -> bool {
        self.edit_local(key, |node| node.scale = scale)
    }

    /// Offset the local position. Returns false if the key is invalid.
    pub fn translate(&mut self, key: SceneNodeKey, delta: Vec3) -> bool {
        self.edit_local(key, |node| node.position += delta)
    }

    /// Rotate the node so its -Z axis points at `target`, with +Y as close
    /// to `up` as possible. Both are expressed in the parent's space.
    ///
    /// Returns false if the key is invalid, or if `target` coincides with
    /// the node position or lies along `up`.
    pub fn look_at(&mut self, key: SceneNodeKey, target: Vec3, up: Vec3) -> bool {
        let Some(node) = self.nodes.get(key) else {
            return false;
        };
        let forward = target - node.position;
        if forward.cross(up).length_squared() <= f32::EPSILON {
            return false;
        }

        let view = Mat4::look_at_rh(node.position, target, up);
        let (_, rotation, _) = view.inverse().to_scale_rotation_translation();
        self.set_local_rotation(key, rotation.normalize())
    }

    fn edit_local(&mut self, key: SceneNodeKey, edit: impl FnOnce(&mut SceneNode<V>)) -> bool {
        let Some(node) = self.nodes.get_mut(key) else {
            return false;
        };
        edit(node);
        node.local_stale = true;
        self.mark_world_stale_downward(key);
        true
    }

    // ===== INVALIDATION =====

    /// Mark `key` and its descendants world-stale (and therefore
    /// bound-stale), then mark the ancestors' bounds stale.
    fn mark_world_stale_downward(&mut self, key: SceneNodeKey) {
        let mut stack = vec![key];
        while let Some(k) = stack.pop() {
            let Some(node) = self.nodes.get_mut(k) else {
                continue;
            };
            if node.world_stale && k != key {
                continue;
            }
            node.world_stale = true;
            node.bound_stale = true;
            stack.extend(node.children.iter().copied());
        }

        if let Some(parent) = self.parent(key) {
            self.mark_bounds_stale_upward(parent);
        }
    }

    /// Mark `key` and its ancestors bound-stale.
    fn mark_bounds_stale_upward(&mut self, key: SceneNodeKey) {
        let mut current = Some(key);
        while let Some(k) = current {
            let Some(node) = self.nodes.get_mut(k) else {
                return;
            };
            if node.bound_stale && k != key {
                return;
            }
            node.bound_stale = true;
            current = node.parent;
        }
    }

    // ===== CACHED READS =====

    /// Local matrix (scale, then rotation, then translation).
    pub fn local_matrix(&mut self, key: SceneNodeKey) -> Option<Mat4> {
        let node = self.nodes.get_mut(key)?;
        if node.local_stale {
            node.local_matrix = node.compose_local();
            node.local_stale = false;
        }
        Some(node.local_matrix)
    }

    /// World matrix: parent world matrix * local matrix.
    ///
    /// Recomputes the chain of stale ancestors top-down, caching each.
    pub fn world_matrix(&mut self, key: SceneNodeKey) -> Option<Mat4> {
        if !self.nodes.contains_key(key) {
            return None;
        }

        // Stale ancestors of a clean node do not exist, so the chain ends at
        // the first clean node.
        let mut chain = Vec::new();
        let mut current = Some(key);
        while let Some(k) = current {
            let node = &self.nodes[k];
            if !node.world_stale {
                break;
            }
            chain.push(k);
            current = node.parent;
        }

        let mut parent_world = current.map_or(Mat4::IDENTITY, |k| self.nodes[k].world_matrix);
        for k in chain.into_iter().rev() {
            let local = self.local_matrix(k).unwrap_or(Mat4::IDENTITY);
            let node = &mut self.nodes[k];
            node.world_matrix = parent_world * local;
            node.world_stale = false;
            parent_world = node.world_matrix;
        }

        Some(self.nodes[key].world_matrix)
    }

    /// World position (translation of the world matrix).
    pub fn world_position(&mut self, key: SceneNodeKey) -> Option<Vec3> {
        self.world_matrix(key).map(|m| m.col(3).truncate())
    }

    /// World bounding volume: the node's own leaf volume in world space,
    /// grown to contain the world bounding volume of every child.
    ///
    /// Stale descendants are recomputed bottom-up with an explicit stack.
    pub fn world_bounding_volume(&mut self, key: SceneNodeKey) -> Option<V> {
        let node = self.nodes.get(key)?;
        if !node.bound_stale {
            return Some(node.world_volume);
        }

        let mut stack = vec![(key, false)];
        while let Some((k, children_done)) = stack.pop() {
            if children_done {
                self.recompute_bound(k);
                continue;
            }
            stack.push((k, true));
            for &child in &self.nodes[k].children {
                if self.nodes[child].bound_stale {
                    stack.push((child, false));
                }
            }
        }

        Some(self.nodes[key].world_volume)
    }

    /// Recompute one node's bound, assuming its children are up to date.
    fn recompute_bound(&mut self, key: SceneNodeKey) {
        let world = self.world_matrix(key).unwrap_or(Mat4::IDENTITY);

        let node = &self.nodes[key];
        let volume = node
            .children
            .iter()
            .filter_map(|&c| self.nodes.get(c))
            .fold(node.leaf_volume.transform_by(&world), |acc, child| {
                acc.grow_to_contain(&child.world_volume)
            });

        let node = &mut self.nodes[key];
        node.world_volume = volume;
        node.bound_stale = false;
    }

    /// Resolve every cache under `key` in two passes: world matrices
    /// top-down, then bounds bottom-up.
    ///
    /// Afterwards, reads of any node in the subtree hit clean caches.
    /// Returns false if the key is invalid.
    pub fn resolve_caches(&mut self, key: SceneNodeKey) -> bool {
        if !self.nodes.contains_key(key) {
            return false;
        }

        for k in self.collect_subtree(key) {
            self.world_matrix(k);
        }
        self.world_bounding_volume(key);
        true
    }

    // ===== RENDERABLES =====

    /// Attach a renderable to a node and derive the node's leaf volume from
    /// its geometry.
    ///
    /// # Errors
    ///
    /// - `node` is not in the graph
    /// - `node` already carries a renderable
    pub fn attach_renderable(&mut self, node: SceneNodeKey, mut renderable: Renderable) -> Result<RenderableKey> {
        let Some(scene_node) = self.nodes.get(node) else {
            engine_bail!("galaxy3d::SceneGraph", InvalidNode,
                "cannot attach renderable: node {:?} not found", node);
        };
        if scene_node.renderable.is_some() {
            engine_bail!("galaxy3d::SceneGraph", StructuralError,
                "node '{}' already carries a renderable", scene_node.name);
        }

        let leaf = leaf_volume_of::<V>(renderable.geometry());
        renderable.set_node(Some(node));
        let key = self.renderables.insert(renderable);

        let scene_node = &mut self.nodes[node];
        scene_node.renderable = Some(key);
        scene_node.leaf_volume = leaf;
        self.mark_bounds_stale_upward(node);
        Ok(key)
    }

    /// Detach and return the node's renderable. The node's leaf volume
    /// becomes the identity.
    pub fn detach_renderable(&mut self, node: SceneNodeKey) -> Option<Renderable> {
        let key = self.nodes.get_mut(node)?.renderable.take()?;
        self.nodes[node].leaf_volume = V::identity();
        self.mark_bounds_stale_upward(node);

        let mut renderable = self.renderables.remove(key)?;
        renderable.set_node(None);
        Some(renderable)
    }

    /// Replace the geometry of the node's renderable and update its leaf
    /// volume. Returns false if the node is invalid or has no renderable.
    pub fn set_geometry(&mut self, node: SceneNodeKey, geometry: Option<Arc<dyn Geometry>>) -> bool {
        let Some(key) = self.nodes.get(node).and_then(|n| n.renderable) else {
            return false;
        };
        let Some(renderable) = self.renderables.get_mut(key) else {
            return false;
        };

        let leaf = leaf_volume_of::<V>(geometry.as_ref());
        renderable.set_geometry(geometry);
        self.nodes[node].leaf_volume = leaf;
        self.mark_bounds_stale_upward(node);
        true
    }

    pub fn renderable(&self, key: RenderableKey) -> Option<&Renderable> {
        self.renderables.get(key)
    }

    /// Mutable access for material and flags. Geometry changes go through
    /// `set_geometry()`.
    pub fn renderable_mut(&mut self, key: RenderableKey) -> Option<&mut Renderable> {
        self.renderables.get_mut(key)
    }

    /// Iterate over all renderables (key, renderable)
    pub fn renderables(&self) -> impl Iterator<Item = (RenderableKey, &Renderable)> {
        self.renderables.iter()
    }

    pub fn renderable_count(&self) -> usize {
        self.renderables.len()
    }
}

fn leaf_volume_of<V: BoundingVolume>(geometry: Option<&Arc<dyn Geometry>>) -> V {
    geometry.map_or_else(V::identity, |g| V::create_from_geometry(g.as_ref()))
}

#[cfg(test)]
#[path = "scene_graph_tests.rs"]
mod tests;
