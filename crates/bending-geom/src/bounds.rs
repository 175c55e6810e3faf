// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::types::aabb::Aabb;

/// Outward margin applied by [`combine`] and [`combine_all`].
///
/// Absorbs floating-point jitter on hierarchy boundaries so that an element
/// touching its parent's face still passes the parent overlap test.
pub const COMBINE_MARGIN: f64 = 0.01;

/// Anything that can report an axis-aligned bounding box.
pub trait Boundable {
    /// Returns the world-space bounds of this value.
    fn bounds(&self) -> Aabb;
}

impl Boundable for Aabb {
    fn bounds(&self) -> Aabb {
        *self
    }
}

impl<T: Boundable + ?Sized> Boundable for &T {
    fn bounds(&self) -> Aabb {
        (**self).bounds()
    }
}

/// Union of two boxes, expanded by [`COMBINE_MARGIN`] on every side.
#[must_use]
pub fn combine(a: &Aabb, b: &Aabb) -> Aabb {
    a.union(b).inflate(COMBINE_MARGIN)
}

/// Union of every box yielded by `boxes`, expanded once by [`COMBINE_MARGIN`].
///
/// Returns `None` when `boxes` is empty.
pub fn combine_all<I>(boxes: I) -> Option<Aabb>
where
    I: IntoIterator,
    I::Item: Boundable,
{
    boxes
        .into_iter()
        .map(|b| b.bounds())
        .reduce(|acc, b| acc.union(&b))
        .map(|u| u.inflate(COMBINE_MARGIN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec3;

    fn close(a: [f64; 3], b: [f64; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-12)
    }

    #[test]
    fn combine_pads_the_union() {
        let a = Aabb::new(Vec3::ZERO, Vec3::splat(1.0));
        let b = Aabb::new(Vec3::splat(2.0), Vec3::splat(3.0));
        let c = combine(&a, &b);
        assert!(close(c.min().to_array(), [-0.01, -0.01, -0.01]));
        assert!(close(c.max().to_array(), [3.01, 3.01, 3.01]));
    }

    #[test]
    fn combine_all_applies_margin_once() {
        let boxes = [
            Aabb::new(Vec3::ZERO, Vec3::splat(1.0)),
            Aabb::new(Vec3::splat(0.5), Vec3::splat(1.5)),
            Aabb::new(Vec3::splat(-1.0), Vec3::splat(0.0)),
        ];
        let c = combine_all(&boxes).unwrap();
        assert!(close(c.min().to_array(), [-1.01, -1.01, -1.01]));
        assert!(close(c.max().to_array(), [1.51, 1.51, 1.51]));
    }

    #[test]
    fn combine_all_of_nothing_is_none() {
        assert!(combine_all(Vec::<Aabb>::new()).is_none());
    }
}
