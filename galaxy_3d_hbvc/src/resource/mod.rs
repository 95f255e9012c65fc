//! Resource module
//!
//! Geometry sources consumed by the scene graph to derive leaf bounding
//! volumes. Meshes, materials and textures belong to the draw stage and are
//! referenced only through these traits and ids.

pub mod geometry;

pub use geometry::{
    Geometry,
    PositionGeometry,
    InterleavedGeometry, InterleavedGeometryDesc,
};
