// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::bounds::Boundable;
use crate::types::aabb::Aabb;
use crate::types::vec3::Vec3;

/// Exact collision shape attached to an ability or probed against entities.
///
/// Concrete shapes (spheres, oriented boxes, rays, disks) live with the game
/// integration; the engine only needs their bounds, their placement, and the
/// two exact intersection tests below.
pub trait Collider: Boundable {
    /// Center of the shape in world space.
    fn position(&self) -> Vec3;

    /// Half-size of the shape's enclosing box on each axis.
    fn half_extents(&self) -> Vec3;

    /// Exact test against another collider of the same family.
    fn intersects(&self, other: &Self) -> bool;

    /// Exact test against an entity's bounding box.
    fn intersects_aabb(&self, aabb: &Aabb) -> bool;
}

impl Collider for Aabb {
    fn position(&self) -> Vec3 {
        self.center()
    }

    fn half_extents(&self) -> Vec3 {
        Self::half_extents(self)
    }

    fn intersects(&self, other: &Self) -> bool {
        Self::intersects(self, other)
    }

    fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        Self::intersects(self, aabb)
    }
}
