/// Bounding sphere.

use std::cmp::Ordering;
use glam::{Mat4, Vec3};
use crate::camera::{Frustum, FrustumTest};
use crate::resource::Geometry;
use super::{BoundingVolume, MIN_EXTENT};

/// Bounding sphere.
///
/// The identity is the zero-radius sphere at the origin. Non-identity
/// spheres always have a radius of at least [`MIN_EXTENT`].
///
/// `transform_by` moves the center only; the radius is kept as is, so
/// matrices carrying a scale other than 1 are not reflected in the bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    /// Total order used to pick the "larger" operand of a union.
    ///
    /// Ties on radius are broken by center so that the union does not depend
    /// on operand order.
    fn cmp_for_union(&self, other: &Self) -> Ordering {
        self.radius
            .total_cmp(&other.radius)
            .then_with(|| self.center.x.total_cmp(&other.center.x))
            .then_with(|| self.center.y.total_cmp(&other.center.y))
            .then_with(|| self.center.z.total_cmp(&other.center.z))
    }
}

impl BoundingVolume for BoundingSphere {
    fn identity() -> Self {
        Self { center: Vec3::ZERO, radius: 0.0 }
    }

    fn create_from_point(point: Vec3) -> Self {
        Self { center: point, radius: MIN_EXTENT }
    }

    fn create_from_sphere(center: Vec3, radius: f32) -> Self {
        Self { center, radius: radius.abs().max(MIN_EXTENT) }
    }

    fn create_from_aabb(min: Vec3, max: Vec3) -> Self {
        let center = (min + max) * 0.5;
        let radius = (max - min).length() * 0.5;
        Self::create_from_sphere(center, radius)
    }

    /// Two passes: the center is the middle of the vertex bounding box, the
    /// radius the distance to the furthest vertex.
    fn create_from_geometry(geometry: &dyn Geometry) -> Self {
        let mut positions = geometry.positions();
        let Some(first) = positions.next() else {
            return Self::identity();
        };
        let (min, max) = positions.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        let center = (min + max) * 0.5;

        let radius_squared = geometry
            .positions()
            .map(|p| p.distance_squared(center))
            .fold(0.0f32, f32::max);
        if radius_squared <= 0.0 {
            return Self::identity();
        }
        Self { center, radius: radius_squared.sqrt() }
    }

    fn has_volume(&self) -> bool {
        self.radius != 0.0
    }

    fn grow_to_contain(&self, other: &Self) -> Self {
        match (self.has_volume(), other.has_volume()) {
            (false, false) => return Self::identity(),
            (true, false) => return *self,
            (false, true) => return *other,
            (true, true) => {}
        }

        let (large, small) = match self.cmp_for_union(other) {
            Ordering::Less => (other, self),
            _ => (self, other),
        };

        let offset = small.center - large.center;
        let distance = offset.length();

        // Nested
        if distance + small.radius <= large.radius {
            return *large;
        }

        let direction = offset / distance;
        let far_large = large.center - direction * large.radius;
        let far_small = small.center + direction * small.radius;

        // Padded so rounding never leaves the far edge of `large` outside
        Self {
            center: (far_large + far_small) * 0.5,
            radius: (large.radius + small.radius + distance) * 0.5 + MIN_EXTENT,
        }
    }

    fn transform_by(&self, matrix: &Mat4) -> Self {
        if !self.has_volume() {
            return Self::identity();
        }
        Self {
            center: matrix.transform_point3(self.center),
            radius: self.radius,
        }
    }

    fn intersects(&self, frustum: &Frustum) -> FrustumTest {
        if !self.has_volume() {
            return FrustumTest::Outside;
        }

        let mut result = FrustumTest::Inside;
        for plane in frustum.planes() {
            let distance = plane.signed_distance(self.center);

            if distance + self.radius < 0.0 {
                return FrustumTest::Outside;
            }
            if distance - self.radius < 0.0 {
                result = FrustumTest::Overlap;
            }
        }
        result
    }

    fn contains(&self, point: Vec3) -> bool {
        point.distance_squared(self.center) < self.radius * self.radius
    }

    fn center(&self) -> Vec3 {
        self.center
    }
}

#[cfg(test)]
#[path = "sphere_tests.rs"]
mod tests;
