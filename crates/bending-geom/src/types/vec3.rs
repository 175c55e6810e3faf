// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

/// World-space vector in block units.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Vec3 {
    x: f64,
    y: f64,
    z: f64,
}

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a vector from components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Creates a vector with every component set to `v`.
    #[must_use]
    pub const fn splat(v: f64) -> Self {
        Self::new(v, v, v)
    }

    /// X component.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Y component.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Z component.
    #[must_use]
    pub const fn z(&self) -> f64 {
        self.z
    }

    /// Returns the components as `[x, y, z]`.
    #[must_use]
    pub const fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Component-wise sum.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    /// Component-wise difference.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Multiplies every component by `s`.
    #[must_use]
    pub fn scale(&self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    /// Component-wise minimum.
    #[must_use]
    pub fn min(&self, other: &Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Component-wise maximum.
    #[must_use]
    pub fn max(&self, other: &Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// Squared euclidean distance to `other`.
    #[must_use]
    pub fn distance_sq(&self, other: &Self) -> f64 {
        let d = self.sub(other);
        d.x * d.x + d.y * d.y + d.z * d.z
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_max_are_componentwise() {
        let a = Vec3::new(1.0, -2.0, 3.0);
        let b = Vec3::new(-1.0, 2.0, 3.5);
        assert_eq!(a.min(&b).to_array(), [-1.0, -2.0, 3.0]);
        assert_eq!(a.max(&b).to_array(), [1.0, 2.0, 3.5]);
    }

    #[test]
    fn distance_sq_matches_manual() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(1.0, 2.0, 2.0);
        assert_eq!(a.distance_sq(&b), 9.0);
    }
}
