// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Morton (Z-order) keys for world positions.
//!
//! Each coordinate is shifted by the world border into a non-negative domain,
//! scaled by [`SCALE`] to keep sub-block precision, clamped to
//! `[0, MAX_SCALED]`, and truncated. The three integers are bit-expanded and
//! combined as `x * 4 + y * 2 + z`. All integer arithmetic wraps at 32 bits so
//! the key space is bounded and the encoding is total.
//!
//! Non-finite inputs are not validated: `f64::clamp` keeps a NaN as NaN and the
//! saturating float-to-int cast maps it to `0`, so a NaN coordinate encodes
//! exactly like the lower world boundary.

use crate::types::vec3::Vec3;

/// Offset added to each coordinate before scaling (the world border).
pub const WORLD_BORDER: f64 = 30_000_000.0;
/// Sub-block precision factor.
pub const SCALE: f64 = 10.0;
/// Upper clamp of a scaled coordinate.
pub const MAX_SCALED: f64 = 600_000_000.0;

/// An element that carries a precomputed Morton key.
pub trait MortonEncoded {
    /// The element's Morton key.
    fn morton(&self) -> u32;
}

impl<T: MortonEncoded + ?Sized> MortonEncoded for &T {
    fn morton(&self) -> u32 {
        (**self).morton()
    }
}

/// Encodes a world position into a 32-bit Morton key.
#[must_use]
pub fn encode(x: f64, y: f64, z: f64) -> u32 {
    let xx = expand_bits(quantize(x));
    let yy = expand_bits(quantize(y));
    let zz = expand_bits(quantize(z));
    xx.wrapping_mul(4).wrapping_add(yy.wrapping_mul(2)).wrapping_add(zz)
}

/// Encodes `v` into a 32-bit Morton key.
#[must_use]
pub fn encode_vec(v: Vec3) -> u32 {
    encode(v.x(), v.y(), v.z())
}

fn quantize(coord: f64) -> u32 {
    ((coord + WORLD_BORDER) * SCALE).clamp(0.0, MAX_SCALED) as u32
}

/// Spreads the bits of `v` so that each lands on every third position.
fn expand_bits(v: u32) -> u32 {
    let mut v = v.wrapping_mul(0x0001_0001) & 0xFF00_00FF;
    v = v.wrapping_mul(0x0000_0101) & 0x0F00_F00F;
    v = v.wrapping_mul(0x0000_0011) & 0xC30C_30C3;
    v = v.wrapping_mul(0x0000_0005) & 0x4924_9249;
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_bits_moves_low_bits_to_every_third_position() {
        assert_eq!(expand_bits(0b1), 0b1);
        assert_eq!(expand_bits(0b10), 0b1000);
        assert_eq!(expand_bits(0b11), 0b1001);
        assert_eq!(expand_bits(0x3FF), 0x0924_9249);
    }

    #[test]
    fn quantize_saturates_at_both_ends() {
        assert_eq!(quantize(-1.0e12), 0);
        assert_eq!(quantize(-WORLD_BORDER), 0);
        assert_eq!(quantize(1.0e12), 600_000_000);
        assert_eq!(quantize(WORLD_BORDER), 600_000_000);
    }

    #[test]
    fn nan_encodes_like_lower_boundary() {
        assert_eq!(quantize(f64::NAN), 0);
        assert_eq!(
            encode(f64::NAN, 1.0, 2.0),
            encode(-WORLD_BORDER, 1.0, 2.0)
        );
    }

    #[test]
    fn interleaves_x_above_y_above_z() {
        // Inputs chosen so every scaled coordinate is 0 except one unit step.
        let origin = -WORLD_BORDER;
        let step = 1.0 / SCALE;
        assert_eq!(encode(origin, origin, origin), 0);
        assert_eq!(encode(origin, origin, origin + step), 1);
        assert_eq!(encode(origin, origin + step, origin), 2);
        assert_eq!(encode(origin + step, origin, origin), 4);
    }
}
