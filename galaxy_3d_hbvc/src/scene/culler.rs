/// Scene culling strategies.
///
/// A SceneCuller walks a SceneGraph from a designated node and emits the
/// renderables that must be drawn for a camera into a RenderQueue.
/// Implementations range from brute force (emit everything) to the
/// hierarchical bounding-volume walk.
///
/// The camera's world-space frustum must be up to date
/// (`Camera::calculate_world_space_frustum()`) before culling.

use crate::bounding::BoundingVolume;
use crate::camera::{Camera, FrustumTest};
use crate::error::Result;
use crate::{engine_bail, engine_trace};
use super::render_queue::{RenderQueue, RenderQueueEntry};
use super::scene_graph::SceneGraph;
use super::scene_node::{SceneNode, SceneNodeKey};

/// Strategy for selecting the renderables visible from a camera.
///
/// Called once per frame per camera. Only renderables whose VISIBLE flag is
/// set are emitted.
///
/// `&mut self` allows implementations to keep scratch allocations across
/// frames. No classification result is kept between calls.
pub trait SceneCuller<V: BoundingVolume>: Send + Sync {
    /// Append the renderables selected under `root` to `queue`.
    ///
    /// Statistics accumulate into the queue's CullStats.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is not in `graph`.
    fn cull_into(
        &mut self,
        graph: &mut SceneGraph<V>,
        camera: &Camera,
        root: SceneNodeKey,
        queue: &mut RenderQueue,
    ) -> Result<()>;

    /// Cull into a fresh queue.
    fn cull(
        &mut self,
        graph: &mut SceneGraph<V>,
        camera: &Camera,
        root: SceneNodeKey,
    ) -> Result<RenderQueue> {
        let mut queue = RenderQueue::new();
        self.cull_into(graph, camera, root, &mut queue)?;
        Ok(queue)
    }
}

// ============================================================================
// HIERARCHICAL CULLER
// ============================================================================

/// Hierarchical bounding-volume culler.
///
/// Pre-order depth-first walk; each node's world bounding volume is
/// classified against the camera frustum:
/// - `Outside` → the node and its whole subtree are skipped
/// - `Inside` → the node and its whole subtree are emitted with no further
///   frustum test
/// - `Overlap` → the node's renderable is emitted and each child is
///   classified on its own
///
/// The walk uses explicit stacks, so tree depth is not bounded by the call
/// stack.
#[derive(Debug, Default)]
pub struct HierarchicalCuller {
    /// Pending nodes with the Overlap depth of their parent
    stack: Vec<(SceneNodeKey, u32)>,
    subtree_stack: Vec<SceneNodeKey>,
}

impl HierarchicalCuller {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V: BoundingVolume> SceneCuller<V> for HierarchicalCuller {
    fn cull_into(
        &mut self,
        graph: &mut SceneGraph<V>,
        camera: &Camera,
        root: SceneNodeKey,
        queue: &mut RenderQueue,
    ) -> Result<()> {
        if !graph.contains_node(root) {
            engine_bail!("galaxy3d::HierarchicalCuller", InvalidNode,
                "cull root {:?} not found", root);
        }
        let enqueued_before = queue.len();

        let mut stack = std::mem::take(&mut self.stack);
        stack.clear();
        stack.push((root, 0));

        while let Some((key, depth)) = stack.pop() {
            let Some(volume) = graph.world_bounding_volume(key) else {
                continue;
            };
            queue.stats_mut().cull_tests += 1;

            match camera.contains(&volume) {
                FrustumTest::Outside => {
                    queue.stats_mut().nodes_visited += 1;
                }
                FrustumTest::Inside => {
                    enqueue_subtree(graph, key, queue, &mut self.subtree_stack);
                }
                FrustumTest::Overlap => {
                    let depth = depth + 1;
                    let stats = queue.stats_mut();
                    stats.nodes_visited += 1;
                    stats.max_depth = stats.max_depth.max(depth);

                    if let Some(node) = graph.node(key) {
                        enqueue_node(graph, key, node, queue);
                        stack.extend(node.children().iter().rev().map(|&child| (child, depth)));
                    }
                }
            }
        }

        self.stack = stack;

        let stats = queue.stats();
        engine_trace!("galaxy3d::HierarchicalCuller",
            "enqueued {} renderable(s): {} test(s), {} node(s) visited, max depth {}",
            queue.len() - enqueued_before, stats.cull_tests, stats.nodes_visited, stats.max_depth);
        Ok(())
    }
}

// ============================================================================
// BRUTE-FORCE CULLER
// ============================================================================

/// Brute-force culler. Emits every visible renderable under the root
/// (no actual culling).
///
/// Suitable for small scenes or as a baseline for comparison.
#[derive(Debug, Default)]
pub struct BruteForceCuller {
    stack: Vec<SceneNodeKey>,
}

impl BruteForceCuller {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V: BoundingVolume> SceneCuller<V> for BruteForceCuller {
    fn cull_into(
        &mut self,
        graph: &mut SceneGraph<V>,
        _camera: &Camera,
        root: SceneNodeKey,
        queue: &mut RenderQueue,
    ) -> Result<()> {
        if !graph.contains_node(root) {
            engine_bail!("galaxy3d::BruteForceCuller", InvalidNode,
                "cull root {:?} not found", root);
        }
        enqueue_subtree(graph, root, queue, &mut self.stack);
        Ok(())
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Emit the node's renderable if it has a visible one.
fn enqueue_node<V: BoundingVolume>(
    graph: &SceneGraph<V>,
    key: SceneNodeKey,
    node: &SceneNode<V>,
    queue: &mut RenderQueue,
) {
    let Some(renderable_key) = node.renderable() else {
        return;
    };
    if let Some(renderable) = graph.renderable(renderable_key) {
        if renderable.is_visible() {
            queue.push(RenderQueueEntry {
                renderable: renderable_key,
                node: key,
                material: renderable.material(),
            });
        }
    }
}

/// Emit every visible renderable of a subtree in pre-order, without tests.
fn enqueue_subtree<V: BoundingVolume>(
    graph: &SceneGraph<V>,
    root: SceneNodeKey,
    queue: &mut RenderQueue,
    stack: &mut Vec<SceneNodeKey>,
) {
    stack.clear();
    stack.push(root);
    while let Some(key) = stack.pop() {
        let Some(node) = graph.node(key) else {
            continue;
        };
        queue.stats_mut().nodes_visited += 1;
        enqueue_node(graph, key, node, queue);
        stack.extend(node.children().iter().rev());
    }
}

#[cfg(test)]
#[path = "culler_tests.rs"]
mod tests;
