// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::types::vec3::Vec3;

/// Axis-aligned bounding box in world coordinates.
///
/// Invariants:
/// - `min` components are less than or equal to `max` components.
/// - Values are `f64` and represent blocks in world space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Constructs an AABB from its minimum and maximum corners.
    ///
    /// # Panics
    /// Panics if any component of `min` is greater than its counterpart in `max`.
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        let a = min.to_array();
        let b = max.to_array();
        assert!(
            a[0] <= b[0] && a[1] <= b[1] && a[2] <= b[2],
            "invalid AABB: min > max"
        );
        Self { min, max }
    }

    /// Constructs an AABB, returning `None` when `min > max` on any axis or a
    /// corner is NaN.
    #[must_use]
    pub fn try_new(min: Vec3, max: Vec3) -> Option<Self> {
        let a = min.to_array();
        let b = max.to_array();
        (a[0] <= b[0] && a[1] <= b[1] && a[2] <= b[2]).then_some(Self { min, max })
    }

    /// Returns the minimum corner.
    #[must_use]
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Returns the maximum corner.
    #[must_use]
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Builds an AABB centered at `center` with half-extents `half`.
    #[must_use]
    pub fn from_center_half_extents(center: Vec3, half: Vec3) -> Self {
        Self::new(center.sub(&half), center.add(&half))
    }

    /// Geometric center of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.min.add(&self.max).scale(0.5)
    }

    /// Half of the box size on each axis.
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        self.max.sub(&self.min).scale(0.5)
    }

    /// Returns the same box translated so its center sits at `center`.
    #[must_use]
    pub fn at(&self, center: Vec3) -> Self {
        Self::from_center_half_extents(center, self.half_extents())
    }

    /// Returns `true` if this AABB overlaps another (inclusive on faces).
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let a_min = self.min.to_array();
        let a_max = self.max.to_array();
        let b_min = other.min.to_array();
        let b_max = other.max.to_array();
        // Inclusive so touching faces still pair up in the broad phase.
        !(a_max[0] < b_min[0]
            || a_min[0] > b_max[0]
            || a_max[1] < b_min[1]
            || a_min[1] > b_max[1]
            || a_max[2] < b_min[2]
            || a_min[2] > b_max[2])
    }

    /// Returns `true` if `point` lies inside the box (inclusive).
    #[must_use]
    pub fn contains(&self, point: &Vec3) -> bool {
        let p = point.to_array();
        let lo = self.min.to_array();
        let hi = self.max.to_array();
        (0..3).all(|i| lo[i] <= p[i] && p[i] <= hi[i])
    }

    /// Returns the exact union of two AABBs (no margin).
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(&other.min),
            max: self.max.max(&other.max),
        }
    }

    /// Inflates the box by a uniform margin `m` in all directions.
    #[must_use]
    pub fn inflate(&self, m: f64) -> Self {
        let delta = Vec3::splat(m);
        Self {
            min: self.min.sub(&delta),
            max: self.max.add(&delta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_at(x: f64, y: f64, z: f64) -> Aabb {
        Aabb::from_center_half_extents(Vec3::new(x, y, z), Vec3::splat(1.0))
    }

    #[test]
    fn touching_faces_overlap() {
        let a = unit_at(0.0, 0.0, 0.0);
        let b = unit_at(2.0, 0.0, 0.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn separated_on_one_axis_does_not_overlap() {
        let a = unit_at(0.0, 0.0, 0.0);
        let b = unit_at(0.0, 2.5, 0.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn try_new_rejects_inverted_corners() {
        assert!(Aabb::try_new(Vec3::splat(1.0), Vec3::ZERO).is_none());
        assert!(Aabb::try_new(Vec3::new(f64::NAN, 0.0, 0.0), Vec3::splat(1.0)).is_none());
        assert!(Aabb::try_new(Vec3::ZERO, Vec3::ZERO).is_some());
    }

    #[test]
    fn at_keeps_extents() {
        let moved = unit_at(0.0, 0.0, 0.0).at(Vec3::new(5.0, 6.0, 7.0));
        assert_eq!(moved.min().to_array(), [4.0, 5.0, 6.0]);
        assert_eq!(moved.max().to_array(), [6.0, 7.0, 8.0]);
    }

    #[test]
    #[should_panic(expected = "invalid AABB")]
    fn new_panics_on_inverted_box() {
        let _ = Aabb::new(Vec3::splat(1.0), Vec3::ZERO);
    }
}
