// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Collision engine for Bending abilities.

This crate provides:
- A linear bounding volume hierarchy (`Lbvh`) rebuilt every tick from
  Morton-keyed elements, and the candidate pairs (`CollisionQuery`) it finds.
- Declarative collision rules (`CollisionPairBuilder`, `CollisionRules`) keyed
  by unordered pairs of ability kinds, with layered defaults.
- The two-sided resolution record (`CollisionResolution`) and its views.
- Entity-overlap dispatch (`dispatch::handle`) over host-game traits.
- The per-tick driver (`CollisionSystem`) tying the above together.

Design notes:
- Single-threaded and synchronous; nothing persists between ticks except the
  rule table.
- Deterministic: identical inputs produce identical candidate order and
  identical outcomes.
"]
#![forbid(unsafe_code)]

/// Broad phase: hierarchy and candidate pairs.
pub mod broad;
/// Ruleset documents loaded through the config service.
pub mod declarations;
/// Entity-overlap dispatch.
pub mod dispatch;
/// Ability keys and entity identities.
pub mod ident;
/// Host-game world, entity, and user traits.
pub mod platform;
/// Collision rules and the layered builder.
pub mod pair;
/// Ability name registry.
pub mod registry;
/// Two-sided resolution record and views.
pub mod resolution;
/// Per-tick evaluation driver.
pub mod system;

pub use broad::{CollisionQuery, Lbvh, LbvhError, NodeRef};
pub use declarations::{CollisionDeclarations, PairDeclaration};
pub use dispatch::{handle, HitOptions};
pub use ident::{make_ability_key, AbilityKey, EntityId};
pub use pair::{CollisionPair, CollisionPairBuilder, CollisionRules, PairKey, RuleError};
pub use registry::AbilityRegistry;
pub use resolution::{CollisionResolution, CollisionView};
pub use system::{Ability, CollisionSystem, TickReport};
