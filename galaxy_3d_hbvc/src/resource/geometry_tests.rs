/// Unit tests for geometry.rs
///
/// Tests PositionGeometry and InterleavedGeometry decoding and validation.

use glam::Vec3;
use super::*;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Interleaved vertex: position (3 x f32) followed by uv (2 x f32) = 20 bytes
fn create_interleaved_data(positions: &[[f32; 3]]) -> Vec<u8> {
    let mut floats: Vec<f32> = Vec::new();
    for p in positions {
        floats.extend_from_slice(p);
        floats.extend_from_slice(&[0.5, 0.25]);
    }
    bytemuck::cast_slice(&floats).to_vec()
}

// ============================================================================
// POSITION GEOMETRY
// ============================================================================

#[test]
fn test_position_geometry_new() {
    let geometry = PositionGeometry::new(vec![Vec3::ZERO, Vec3::X]);
    assert_eq!(geometry.vertex_count(), 2);
    assert_eq!(geometry.vertex_position(1), Vec3::X);
}

#[test]
fn test_position_geometry_from_flat() {
    let geometry = PositionGeometry::from_flat(&[1.0, 2.0, 3.0, -1.0, -2.0, -3.0]).unwrap();
    assert_eq!(geometry.vertex_count(), 2);
    assert_eq!(geometry.vertex_position(0), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(geometry.vertex_position(1), Vec3::new(-1.0, -2.0, -3.0));
}

#[test]
fn test_position_geometry_from_flat_bad_length() {
    assert!(PositionGeometry::from_flat(&[1.0, 2.0]).is_err());
}

#[test]
fn test_position_geometry_cube_corners() {
    let cube = PositionGeometry::cube(2.0);
    assert_eq!(cube.vertex_count(), 8);
    assert!(cube.positions().contains(&Vec3::new(-2.0, -2.0, -2.0)));
    assert!(cube.positions().contains(&Vec3::new(2.0, 2.0, 2.0)));
    assert!(cube.positions().iter().all(|p| p.abs() == Vec3::splat(2.0)));
}

#[test]
fn test_dyn_geometry_positions_iterator() {
    let geometry = PositionGeometry::new(vec![Vec3::X, Vec3::Y, Vec3::Z]);
    let dyn_geometry: &dyn Geometry = &geometry;

    let collected: Vec<Vec3> = dyn_geometry.positions().collect();
    assert_eq!(collected, vec![Vec3::X, Vec3::Y, Vec3::Z]);
    assert!(!dyn_geometry.is_empty());

    let empty = PositionGeometry::default();
    let dyn_empty: &dyn Geometry = &empty;
    assert!(dyn_empty.is_empty());
}

// ============================================================================
// INTERLEAVED GEOMETRY
// ============================================================================

#[test]
fn test_interleaved_geometry_decodes_positions() {
    let data = create_interleaved_data(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    let geometry = InterleavedGeometry::from_desc(InterleavedGeometryDesc {
        name: "quad".to_string(),
        vertex_data: data,
        stride: 20,
        position_offset: 0,
    }).unwrap();

    assert_eq!(geometry.name(), "quad");
    assert_eq!(geometry.stride(), 20);
    assert_eq!(geometry.vertex_count(), 2);
    assert_eq!(geometry.vertex_position(0), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(geometry.vertex_position(1), Vec3::new(4.0, 5.0, 6.0));
}

#[test]
fn test_interleaved_geometry_position_offset() {
    // uv (2 x f32) first, then position
    let floats: Vec<f32> = vec![0.0, 1.0, 7.0, 8.0, 9.0];
    let geometry = InterleavedGeometry::from_desc(InterleavedGeometryDesc {
        name: "offset".to_string(),
        vertex_data: bytemuck::cast_slice(&floats).to_vec(),
        stride: 20,
        position_offset: 8,
    }).unwrap();

    assert_eq!(geometry.vertex_count(), 1);
    assert_eq!(geometry.vertex_position(0), Vec3::new(7.0, 8.0, 9.0));
}

#[test]
fn test_interleaved_geometry_empty_is_valid() {
    let geometry = InterleavedGeometry::from_desc(InterleavedGeometryDesc {
        name: "empty".to_string(),
        vertex_data: Vec::new(),
        stride: 12,
        position_offset: 0,
    }).unwrap();
    assert_eq!(geometry.vertex_count(), 0);
}

#[test]
fn test_interleaved_geometry_zero_stride_fails() {
    let result = InterleavedGeometry::from_desc(InterleavedGeometryDesc {
        name: "bad".to_string(),
        vertex_data: vec![0u8; 12],
        stride: 0,
        position_offset: 0,
    });
    assert!(result.is_err());
}

#[test]
fn test_interleaved_geometry_position_overflows_stride() {
    let result = InterleavedGeometry::from_desc(InterleavedGeometryDesc {
        name: "bad".to_string(),
        vertex_data: vec![0u8; 16],
        stride: 16,
        position_offset: 8,
    });
    assert!(result.is_err());
}

#[test]
fn test_interleaved_geometry_truncated_data_fails() {
    let result = InterleavedGeometry::from_desc(InterleavedGeometryDesc {
        name: "bad".to_string(),
        vertex_data: vec![0u8; 30],
        stride: 20,
        position_offset: 0,
    });
    assert!(result.is_err());
}
