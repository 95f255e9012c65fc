//! Scene module
//!
//! Provides the scene graph (node hierarchy with lazily cached transforms
//! and bounds), renderable attachment, and culling strategies producing
//! render queues.

mod scene_node;
mod scene_graph;
mod renderable;
mod render_queue;
mod culler;

pub use scene_node::{SceneNode, SceneNodeKey};
pub use scene_graph::{SceneGraph, ROOT_NAME};
pub use renderable::{Renderable, RenderableKey, RenderableFlags, MaterialId};
pub use render_queue::{RenderQueue, RenderQueueEntry, CullStats};
pub use culler::{SceneCuller, HierarchicalCuller, BruteForceCuller};
