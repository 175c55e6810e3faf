// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Broad phase: a hierarchy rebuilt each tick and the candidate pairs it finds.

/// Karras LBVH over Morton-sorted elements.
pub mod lbvh;
/// Unordered candidate pair set.
pub mod query;

pub use lbvh::{Lbvh, LbvhError, NodeRef};
pub use query::CollisionQuery;
