// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Entity-overlap dispatch: invoke a callback for every entity a collider hits.

use crate::platform::{Entity, EntityType, GameMode, User, World};
use bending_geom::{Aabb, Collider};
use tracing::debug;

/// Filtering and short-circuit options for [`handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitOptions {
    /// Only consider living entities.
    pub living_only: bool,
    /// Allow the user's own entity to be hit.
    pub self_collision: bool,
    /// Stop at the first callback that returns `true`.
    pub early_escape: bool,
}

impl Default for HitOptions {
    fn default() -> Self {
        Self {
            living_only: true,
            self_collision: false,
            early_escape: false,
        }
    }
}

impl HitOptions {
    /// Returns a copy with `living_only` set.
    #[must_use]
    pub fn living_only(mut self, on: bool) -> Self {
        self.living_only = on;
        self
    }

    /// Returns a copy with `self_collision` set.
    #[must_use]
    pub fn self_collision(mut self, on: bool) -> Self {
        self.self_collision = on;
        self
    }

    /// Returns a copy with `early_escape` set.
    #[must_use]
    pub fn early_escape(mut self, on: bool) -> Self {
        self.early_escape = on;
        self
    }
}

/// Runs `callback` on every valid entity that `collider` intersects.
///
/// Candidates come from the user's world within the collider's enclosing box.
/// Each is checked against the filter in [`HitOptions`], then against the
/// exact shape, then against build permission at the entity's block.
///
/// Returns `true` if any callback returned `true`. With `early_escape` the
/// first such callback ends the scan. A collider whose enclosing box is
/// invalid (NaN position, negative or NaN half extents) hits nothing.
pub fn handle<U, C, F>(user: &U, collider: &C, mut callback: F, options: HitOptions) -> bool
where
    U: User,
    C: Collider,
    F: FnMut(&<U::World as World>::Entity) -> bool,
{
    let world = user.world();
    let center = collider.position();
    let half = collider.half_extents();
    let Some(area) = Aabb::try_new(center.sub(&half), center.add(&half)) else {
        debug!(?center, ?half, "collider has no valid bounds; skipping entity dispatch");
        return false;
    };
    let mut hit = false;
    for entity in world.nearby_entities(&area) {
        if !is_candidate(user, world, entity, options) {
            continue;
        }
        if !collider.intersects_aabb(&entity.bounds()) || !user.can_build(entity.block()) {
            continue;
        }
        if callback(entity) {
            hit = true;
            if options.early_escape {
                return true;
            }
        }
    }
    hit
}

fn is_candidate<U: User>(user: &U, world: &U::World, entity: &<U::World as World>::Entity, options: HitOptions) -> bool {
    if !options.self_collision && entity.id() == user.id() {
        return false;
    }
    if options.living_only && !entity.is_living() {
        return false;
    }
    match entity.entity_type() {
        EntityType::Player => entity.game_mode() != Some(GameMode::Spectator),
        EntityType::FallingBlock => !world.is_temporary(entity),
        EntityType::ArmorStand => !entity.is_invisible(),
        EntityType::Other => true,
    }
}
