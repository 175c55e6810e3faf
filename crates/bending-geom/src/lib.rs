// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Geometry primitives for the Bending collision engine.

This crate provides:
- World-space vectors (`Vec3`) and axis-aligned bounding boxes (`Aabb`).
- The `Boundable` / `MortonEncoded` capabilities every indexed element exposes.
- Morton (Z-order) encoding of world positions into 32-bit keys.
- The `combine` helpers used to build hierarchy bounds.
- The `Collider` contract consumed by the narrow phase and entity dispatch.

Design notes:
- Deterministic: no ambient RNG; identical inputs yield identical keys and bounds.
- Float64 throughout, matching the block-world coordinate space.
"]
#![forbid(unsafe_code)]

/// Bounding capabilities and box union helpers.
pub mod bounds;
/// Collider contract shared by abilities and entity dispatch.
pub mod collider;
/// Morton (Z-order) key encoding.
pub mod morton;
/// Foundational geometric types.
pub mod types;

pub use bounds::{combine, combine_all, Boundable, COMBINE_MARGIN};
pub use collider::Collider;
pub use morton::{encode, encode_vec, MortonEncoded};
pub use types::aabb::Aabb;
pub use types::vec3::Vec3;
