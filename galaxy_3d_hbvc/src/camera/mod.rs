//! Camera module: cameras, frustums and planes.
//!
//! Cameras are attached to scene nodes and rebuild their world-space
//! frustum once per frame. They are tools owned and driven by the caller;
//! the engine does not store them.

mod camera;
mod frustum;
mod plane;

pub use camera::{Camera, Projection};
pub use frustum::{
    Frustum, FrustumTest,
    PLANE_NEAR, PLANE_FAR, PLANE_LEFT, PLANE_RIGHT, PLANE_TOP, PLANE_BOTTOM,
};
pub use plane::Plane;
