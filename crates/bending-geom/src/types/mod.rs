// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core geometry types used by the collision engine (vectors, AABB).
//!
//! Determinism notes:
//! - Overlap semantics are inclusive on faces so touching colliders still
//!   produce broad-phase candidates.
//! - Coordinates are block-world `f64` values; no fused multiply-add is used.

#[doc = "Axis-aligned bounding boxes (world space)."]
pub mod aabb;
#[doc = "Three-component `f64` vectors."]
pub mod vec3;
