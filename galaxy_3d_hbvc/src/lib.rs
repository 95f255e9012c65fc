/*!
# Galaxy 3D HBVC

Hierarchical Bounding-Volume Culling for the Galaxy 3D engine.

Once per frame, decides which nodes of a scene graph are fully outside the
camera's view, fully inside it, or straddling its boundary, and produces the
minimal set of renderables to submit downstream.

## Architecture

- **BoundingVolume**: AABB or sphere, a commutative monoid under union
- **Frustum / Plane**: six inward-facing planes and 3-way classification
- **SceneGraph**: node arena with lazily invalidated world matrices and bounds
- **Camera**: projection intrinsics attached to a scene node
- **SceneCuller**: hierarchical traversal emitting a RenderQueue

The bounding volume shape is chosen at build time: `BoundingAabb` by
default, `BoundingSphere` with the `bounding-sphere` feature.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod bounding;
pub mod camera;
pub mod resource;
pub mod scene;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, CaptureLogger};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    // Bounding volume sub-module
    pub mod bounding {
        pub use crate::bounding::*;
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library at crate root
pub use glam;
