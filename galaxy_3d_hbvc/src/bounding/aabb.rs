/// Axis-aligned bounding box.

use glam::{Mat4, Vec3};
use crate::camera::{Frustum, FrustumTest};
use crate::resource::Geometry;
use super::{BoundingVolume, MIN_EXTENT};

/// Axis-aligned bounding box.
///
/// The identity is the zero-size box at the origin (`min == max == 0`).
/// Any box with `min == max` has no volume; constructors normalize such
/// boxes either to the identity (degenerate geometry) or to a box of
/// half-extent [`MIN_EXTENT`] (explicit point construction).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingAabb {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl BoundingAabb {
    /// Half of the box size along each axis
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Box size along each axis
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Positive and negative vertices relative to a direction.
    ///
    /// The positive vertex is the corner furthest along `normal`, the
    /// negative vertex the corner furthest against it.
    #[inline]
    fn extreme_vertices(&self, normal: Vec3) -> (Vec3, Vec3) {
        let positive = Vec3::select(normal.cmpge(Vec3::ZERO), self.max, self.min);
        let negative = Vec3::select(normal.cmpge(Vec3::ZERO), self.min, self.max);
        (positive, negative)
    }
}

impl BoundingVolume for BoundingAabb {
    fn identity() -> Self {
        Self { min: Vec3::ZERO, max: Vec3::ZERO }
    }

    fn create_from_point(point: Vec3) -> Self {
        let extent = Vec3::splat(MIN_EXTENT);
        Self { min: point - extent, max: point + extent }
    }

    fn create_from_sphere(center: Vec3, radius: f32) -> Self {
        let extent = Vec3::splat(radius.abs().max(MIN_EXTENT));
        Self { min: center - extent, max: center + extent }
    }

    fn create_from_aabb(min: Vec3, max: Vec3) -> Self {
        let lo = min.min(max);
        let hi = min.max(max);
        if lo == hi {
            return Self::create_from_point(lo);
        }
        Self { min: lo, max: hi }
    }

    fn create_from_geometry(geometry: &dyn Geometry) -> Self {
        let mut positions = geometry.positions();
        let Some(first) = positions.next() else {
            return Self::identity();
        };

        let (min, max) = positions.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        if min == max {
            return Self::identity();
        }
        Self { min, max }
    }

    fn has_volume(&self) -> bool {
        self.min != self.max
    }

    fn grow_to_contain(&self, other: &Self) -> Self {
        match (self.has_volume(), other.has_volume()) {
            (false, false) => return Self::identity(),
            (true, false) => return *self,
            (false, true) => return *other,
            (true, true) => {}
        }
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Arvo's method: projects each matrix axis onto the box extents for a
    /// tight result without transforming all 8 corners.
    fn transform_by(&self, matrix: &Mat4) -> Self {
        if !self.has_volume() {
            return Self::identity();
        }

        let translation = matrix.col(3).truncate();
        let mut min = translation;
        let mut max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            min += a.min(b);
            max += a.max(b);
        }

        // A singular matrix can collapse the box to a point
        if min == max {
            return Self::identity();
        }
        Self { min, max }
    }

    /// Positive/negative vertex test.
    ///
    /// - positive vertex behind any plane → `Outside` (early out)
    /// - negative vertex behind a plane → the box straddles it
    /// - no straddled plane → `Inside`
    fn intersects(&self, frustum: &Frustum) -> FrustumTest {
        if !self.has_volume() {
            return FrustumTest::Outside;
        }

        let mut result = FrustumTest::Inside;
        for plane in frustum.planes() {
            let (positive, negative) = self.extreme_vertices(plane.normal);

            if plane.signed_distance(positive) < 0.0 {
                return FrustumTest::Outside;
            }
            if plane.signed_distance(negative) < 0.0 {
                result = FrustumTest::Overlap;
            }
        }
        result
    }

    fn contains(&self, point: Vec3) -> bool {
        self.has_volume()
            && point.cmpge(self.min).all()
            && point.cmple(self.max).all()
    }

    fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

#[cfg(test)]
#[path = "aabb_tests.rs"]
mod tests;
