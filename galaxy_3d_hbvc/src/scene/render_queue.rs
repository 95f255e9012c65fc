/// RenderQueue: output of a culling pass.
///
/// Ephemeral (one per frame per camera): the renderables selected by a
/// SceneCuller, in traversal order, plus statistics about the pass. The
/// queue carries keys only; the draw stage resolves them against the graph.

use rdst::{RadixKey, RadixSort};
use rustc_hash::FxHashMap;
use super::renderable::{MaterialId, RenderableKey};
use super::scene_node::SceneNodeKey;

/// One selected renderable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderQueueEntry {
    pub renderable: RenderableKey,
    /// Node the renderable is attached to
    pub node: SceneNodeKey,
    /// Material id at the time of culling
    pub material: MaterialId,
}

impl RadixKey for RenderQueueEntry {
    const LEVELS: usize = 4;

    #[inline]
    fn get_level(&self, level: usize) -> u8 {
        (self.material >> (level * 8)) as u8
    }
}

/// Statistics of one culling pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CullStats {
    /// Longest chain of Overlap-classified nodes from the traversal root
    pub max_depth: u32,
    /// Number of frustum classifications performed
    pub cull_tests: u32,
    /// Number of nodes reached (classified or fast-pathed)
    pub nodes_visited: u32,
    /// Number of renderables emitted
    pub enqueued: u32,
}

#[derive(Debug, Clone, Default)]
pub struct RenderQueue {
    entries: Vec<RenderQueueEntry>,
    stats: CullStats,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty queue with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            stats: CullStats::default(),
        }
    }

    /// Drop all entries and reset the statistics, keeping the allocation.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = CullStats::default();
    }

    pub(crate) fn push(&mut self, entry: RenderQueueEntry) {
        self.entries.push(entry);
        self.stats.enqueued += 1;
    }

    pub(crate) fn stats_mut(&mut self) -> &mut CullStats {
        &mut self.stats
    }

    // ===== ACCESSORS =====

    pub fn entries(&self) -> &[RenderQueueEntry] {
        &self.entries
    }

    /// Selected renderable keys in queue order
    pub fn keys(&self) -> impl Iterator<Item = RenderableKey> + '_ {
        self.entries.iter().map(|e| e.renderable)
    }

    pub fn contains(&self, key: RenderableKey) -> bool {
        self.entries.iter().any(|e| e.renderable == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> &CullStats {
        &self.stats
    }

    // ===== BATCHING =====

    /// Reorder entries by material id (radix sort, not stable).
    pub fn sort_by_material(&mut self) {
        self.entries.radix_sort_unstable();
    }

    /// Renderable keys grouped by material id, queue order kept per group.
    pub fn group_by_material(&self) -> FxHashMap<MaterialId, Vec<RenderableKey>> {
        let mut groups: FxHashMap<MaterialId, Vec<RenderableKey>> = FxHashMap::default();
        for entry in &self.entries {
            groups.entry(entry.material).or_default().push(entry.renderable);
        }
        groups
    }
}

#[cfg(test)]
#[path = "render_queue_tests.rs"]
mod tests;
