//! Geometry sources for leaf bounding volumes.
//!
//! The culling core never owns meshes. It only needs to read vertex
//! positions once, when geometry is attached to a renderable, to derive the
//! node's local-space leaf volume. Any mesh type can participate by
//! implementing [`Geometry`].
//!
//! Two implementations are provided:
//! - **PositionGeometry**: an owned list of positions
//! - **InterleavedGeometry**: raw interleaved vertex bytes (as uploaded to
//!   a GPU vertex buffer) with a stride and a position attribute offset

use glam::Vec3;
use crate::error::Result;
use crate::engine_bail;

/// Size in bytes of a position attribute (3 x f32)
const POSITION_SIZE: usize = std::mem::size_of::<[f32; 3]>();

// ============================================================================
// GEOMETRY TRAIT
// ============================================================================

/// Read access to the vertex positions of a mesh.
pub trait Geometry: Send + Sync {
    /// Number of vertices
    fn vertex_count(&self) -> usize;

    /// Position of a vertex in the mesh's local space.
    ///
    /// `index` must be below `vertex_count()`.
    fn vertex_position(&self, index: usize) -> Vec3;
}

impl dyn Geometry + '_ {
    /// Iterate over every vertex position
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        (0..self.vertex_count()).map(move |i| self.vertex_position(i))
    }

    /// Whether the geometry has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }
}

// ============================================================================
// POSITION GEOMETRY
// ============================================================================

/// Geometry backed by an owned list of positions.
#[derive(Debug, Clone, Default)]
pub struct PositionGeometry {
    positions: Vec<Vec3>,
}

impl PositionGeometry {
    pub fn new(positions: Vec<Vec3>) -> Self {
        Self { positions }
    }

    /// Build from a flat `[x0, y0, z0, x1, y1, z1, ...]` array.
    ///
    /// # Errors
    ///
    /// Returns an error if the array length is not a multiple of 3.
    pub fn from_flat(coords: &[f32]) -> Result<Self> {
        if coords.len() % 3 != 0 {
            engine_bail!("galaxy3d::PositionGeometry", InvalidResource,
                "flat position array length {} is not a multiple of 3", coords.len());
        }
        let positions = coords
            .chunks_exact(3)
            .map(|c| Vec3::new(c[0], c[1], c[2]))
            .collect();
        Ok(Self { positions })
    }

    /// Axis-aligned box with 8 corner vertices, centered on the origin.
    pub fn cube(half_size: f32) -> Self {
        let h = half_size;
        let positions = (0..8u8)
            .map(|corner| Vec3::new(
                if corner & 1 == 0 { -h } else { h },
                if corner & 2 == 0 { -h } else { h },
                if corner & 4 == 0 { -h } else { h },
            ))
            .collect();
        Self { positions }
    }

    /// All positions
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }
}

impl Geometry for PositionGeometry {
    fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    fn vertex_position(&self, index: usize) -> Vec3 {
        self.positions[index]
    }
}

// ============================================================================
// INTERLEAVED GEOMETRY
// ============================================================================

/// Descriptor for creating an InterleavedGeometry
#[derive(Debug, Clone)]
pub struct InterleavedGeometryDesc {
    /// Geometry name (diagnostics only)
    pub name: String,
    /// Raw vertex data, `vertex_count * stride` bytes
    pub vertex_data: Vec<u8>,
    /// Size of one vertex in bytes
    pub stride: u32,
    /// Byte offset of the position attribute (3 x f32) within a vertex
    pub position_offset: u32,
}

/// Geometry read straight from interleaved vertex bytes.
///
/// Positions are decoded with unaligned reads, so the byte buffer may come
/// from any source (file, GPU staging copy, procedural generator).
#[derive(Debug, Clone)]
pub struct InterleavedGeometry {
    name: String,
    vertex_data: Vec<u8>,
    stride: usize,
    position_offset: usize,
    vertex_count: usize,
}

impl InterleavedGeometry {
    /// Create from a descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the stride is zero
    /// - the position attribute does not fit inside one vertex
    /// - the data length is not a multiple of the stride
    pub fn from_desc(desc: InterleavedGeometryDesc) -> Result<Self> {
        let stride = desc.stride as usize;
        let position_offset = desc.position_offset as usize;

        if stride == 0 {
            engine_bail!("galaxy3d::InterleavedGeometry", InvalidResource,
                "Geometry '{}': stride must be non-zero", desc.name);
        }
        if position_offset + POSITION_SIZE > stride {
            engine_bail!("galaxy3d::InterleavedGeometry", InvalidResource,
                "Geometry '{}': position at offset {} overflows stride {}",
                desc.name, position_offset, stride);
        }
        if desc.vertex_data.len() % stride != 0 {
            engine_bail!("galaxy3d::InterleavedGeometry", InvalidResource,
                "Geometry '{}': {} bytes is not a multiple of stride {}",
                desc.name, desc.vertex_data.len(), stride);
        }

        let vertex_count = desc.vertex_data.len() / stride;
        Ok(Self {
            name: desc.name,
            vertex_data: desc.vertex_data,
            stride,
            position_offset,
            vertex_count,
        })
    }

    /// Geometry name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size of one vertex in bytes
    pub fn stride(&self) -> usize {
        self.stride
    }
}

impl Geometry for InterleavedGeometry {
    fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    fn vertex_position(&self, index: usize) -> Vec3 {
        let start = index * self.stride + self.position_offset;
        let xyz: [f32; 3] = bytemuck::pod_read_unaligned(
            &self.vertex_data[start..start + POSITION_SIZE],
        );
        Vec3::from_array(xyz)
    }
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
