//! Bounding volumes: conservative envelopes used for hierarchical culling.
//!
//! Two shapes are available, both implementing [`BoundingVolume`]:
//! - [`BoundingAabb`]: axis-aligned box (min/max corners)
//! - [`BoundingSphere`]: center + radius
//!
//! A build uses exactly one of them through [`DefaultBoundingVolume`],
//! selected with the `bounding-sphere` Cargo feature. Scene graphs, cameras
//! and cullers are generic over the shape, so nothing dispatches at runtime.
//!
//! Under [`BoundingVolume::grow_to_contain`] each shape forms a commutative
//! monoid whose identity ("no volume") is the zero-size box or the
//! zero-radius sphere. The identity is returned by empty geometry, absorbed
//! by unions, and always classified `Outside` by frustum tests.

mod aabb;
mod sphere;

pub use aabb::BoundingAabb;
pub use sphere::BoundingSphere;

use std::fmt::Debug;
use glam::{Mat4, Vec3};
use crate::camera::{Frustum, FrustumTest};
use crate::resource::Geometry;

/// Smallest half-extent (box) or radius (sphere) of a non-identity volume.
///
/// A volume built from a single point is inflated to this size so that it
/// contains the point and is never mistaken for the identity.
pub const MIN_EXTENT: f32 = 0.00001;

/// Bounding volume shape used when none is named explicitly.
#[cfg(not(feature = "bounding-sphere"))]
pub type DefaultBoundingVolume = BoundingAabb;

/// Bounding volume shape used when none is named explicitly.
#[cfg(feature = "bounding-sphere")]
pub type DefaultBoundingVolume = BoundingSphere;

/// Common interface of the bounding volume shapes.
///
/// # Laws
///
/// For any volumes `a`, `b`, `c` of the same shape:
/// - `a.grow_to_contain(&identity()) == a` and `identity().grow_to_contain(&a) == a`
/// - `a.grow_to_contain(&b) == b.grow_to_contain(&a)`
/// - `a.grow_to_contain(&b)` contains every point contained by `a` or `b`
pub trait BoundingVolume: Copy + Debug + PartialEq + Default + Send + Sync + 'static {
    /// The "no volume" element.
    fn identity() -> Self;

    /// Smallest non-identity volume around a point.
    fn create_from_point(point: Vec3) -> Self;

    /// Volume enclosing a sphere.
    fn create_from_sphere(center: Vec3, radius: f32) -> Self;

    /// Volume enclosing a box. Corners may be given in any order.
    fn create_from_aabb(min: Vec3, max: Vec3) -> Self;

    /// Volume enclosing every vertex of a geometry.
    ///
    /// Empty or fully degenerate geometry (all vertices equal) yields the
    /// identity.
    fn create_from_geometry(geometry: &dyn Geometry) -> Self;

    /// Whether this is a real volume rather than the identity.
    fn has_volume(&self) -> bool;

    /// Smallest volume of this shape enclosing both operands.
    ///
    /// When neither operand has volume the result is [`identity`](Self::identity).
    fn grow_to_contain(&self, other: &Self) -> Self;

    /// Map into another space by an affine matrix.
    fn transform_by(&self, matrix: &Mat4) -> Self;

    /// Classify against a frustum.
    ///
    /// A point at signed distance exactly zero from a plane lies on the
    /// inside of that plane.
    fn intersects(&self, frustum: &Frustum) -> FrustumTest;

    /// Whether a point lies within the volume. The identity contains nothing.
    fn contains(&self, point: Vec3) -> bool;

    /// Geometric center.
    fn center(&self) -> Vec3;

    /// Union of a sequence of volumes (identity for an empty sequence).
    fn union_all<I>(volumes: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        volumes
            .into_iter()
            .fold(Self::identity(), |acc, volume| acc.grow_to_contain(&volume))
    }
}
