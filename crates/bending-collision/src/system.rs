// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-tick collision evaluation over the active ability instances.
//!
//! Each tick the instances are wrapped into Morton-keyed elements, a fresh
//! [`Lbvh`] is built over them, and every candidate pair it reports is run
//! through the rule table and the narrow phase. Realized pairs get a
//! [`CollisionResolution`]; both sides are notified and flagged sides are
//! destroyed before the next pair is considered.

use crate::broad::Lbvh;
use crate::ident::{AbilityKey, EntityId};
use crate::pair::CollisionRules;
use crate::resolution::{CollisionResolution, CollisionView};
use bending_geom::{combine_all, encode_vec, Aabb, Boundable, Collider, MortonEncoded};
use tracing::{debug, debug_span, trace};

/// A live ability instance taking part in collision evaluation.
pub trait Ability: Sized {
    /// Shape type of the instance's colliders.
    type Collider: Collider + Clone;

    /// Ability kind, used to look up rules.
    fn kind(&self) -> AbilityKey;

    /// Player that cast the instance; instances of the same owner never collide.
    fn owner(&self) -> EntityId;

    /// Current colliders. An instance without colliders is skipped.
    fn colliders(&self) -> &[Self::Collider];

    /// Called once per realized pair; may adjust either remove flag.
    fn on_collision(&mut self, collision: &CollisionView<'_, Self>);

    /// Removes the instance from play.
    fn destroy(&mut self);
}

/// Outcome of one evaluation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Candidate pairs reported by the broad phase.
    pub candidates: usize,
    /// Pairs that passed rule lookup and the narrow phase.
    pub resolved: usize,
    /// Slice indices of destroyed instances, in destruction order.
    pub destroyed: Vec<usize>,
}

/// Per-instance snapshot indexed by the hierarchy.
#[derive(Debug, Clone, Copy)]
struct CachedAbility {
    index: usize,
    kind: AbilityKey,
    owner: EntityId,
    bounds: Aabb,
    morton: u32,
}

impl Boundable for CachedAbility {
    fn bounds(&self) -> Aabb {
        self.bounds
    }
}

impl MortonEncoded for CachedAbility {
    fn morton(&self) -> u32 {
        self.morton
    }
}

/// Drives collision evaluation with a fixed rule table.
#[derive(Debug, Clone, Default)]
pub struct CollisionSystem {
    rules: CollisionRules,
}

impl CollisionSystem {
    /// Creates a system evaluating with `rules`.
    pub fn new(rules: CollisionRules) -> Self {
        Self { rules }
    }

    /// Rules in effect.
    pub fn rules(&self) -> &CollisionRules {
        &self.rules
    }

    /// Swaps in a new rule table. Must not be called mid-evaluation.
    pub fn set_rules(&mut self, rules: CollisionRules) {
        self.rules = rules;
    }

    /// Evaluates one tick over `abilities`.
    pub fn evaluate<A: Ability>(&self, abilities: &mut [A]) -> TickReport {
        let span = debug_span!("collision_tick", instances = abilities.len());
        let _guard = span.enter();

        let mut report = TickReport::default();
        let cached: Vec<CachedAbility> = abilities
            .iter()
            .enumerate()
            .filter_map(|(index, ability)| {
                let bounds = combine_all(ability.colliders())?;
                Some(CachedAbility {
                    index,
                    kind: ability.kind(),
                    owner: ability.owner(),
                    bounds,
                    morton: encode_vec(bounds.center()),
                })
            })
            .collect();
        if cached.len() < 2 {
            return report;
        }
        let Ok(tree) = Lbvh::build(cached) else {
            return report;
        };

        let candidates = tree.query_all();
        report.candidates = candidates.len();
        let mut destroyed = vec![false; abilities.len()];

        for (a, b) in candidates {
            if destroyed[a.index] || destroyed[b.index] || a.owner == b.owner {
                continue;
            }
            let Some((remove_a, remove_b)) = self.rules.rule_for(a.kind, b.kind) else {
                continue;
            };
            let (first, second) = pair_mut(abilities, a.index, b.index);
            let Some((first_hit, second_hit)) = narrow_phase(first.colliders(), second.colliders()) else {
                continue;
            };
            let record = CollisionResolution::new(
                a.index,
                b.index,
                first_hit.clone(),
                second_hit.clone(),
                remove_a,
                remove_b,
            );
            first.on_collision(&record.first_view(&*second));
            second.on_collision(&record.second_view(&*first));
            report.resolved += 1;
            trace!(
                first = a.index,
                second = b.index,
                remove_first = record.remove_first(),
                remove_second = record.remove_second(),
                "collision resolved"
            );

            for idx in record.removed() {
                abilities[idx].destroy();
                destroyed[idx] = true;
                report.destroyed.push(idx);
            }
        }

        debug!(
            candidates = report.candidates,
            resolved = report.resolved,
            destroyed = report.destroyed.len(),
            "collision tick evaluated"
        );
        report
    }
}

/// First collider pair, in declaration order, whose shapes intersect.
fn narrow_phase<'a, C: Collider>(a: &'a [C], b: &'a [C]) -> Option<(&'a C, &'a C)> {
    a.iter()
        .find_map(|ca| b.iter().find(|cb| ca.intersects(cb)).map(|cb| (ca, cb)))
}

// Candidate pairs never repeat an element, so `i != j`.
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    if i < j {
        let (lo, hi) = items.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = items.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bending_geom::Vec3;

    fn cube(x: f64) -> Aabb {
        Aabb::from_center_half_extents(Vec3::new(x, 0.0, 0.0), Vec3::splat(0.5))
    }

    #[test]
    fn narrow_phase_takes_first_intersecting_pair() {
        let a = [cube(100.0), cube(0.0), cube(0.2)];
        let b = [cube(50.0), cube(0.4)];
        let (ca, cb) = narrow_phase(&a, &b).unwrap();
        assert_eq!(*ca, a[1]);
        assert_eq!(*cb, b[1]);
        assert!(narrow_phase(&a[..1], &b).is_none());
    }

    #[test]
    fn pair_mut_returns_requested_order() {
        let mut items = [10, 20, 30];
        let (x, y) = pair_mut(&mut items, 2, 0);
        assert_eq!((*x, *y), (30, 10));
        let (x, y) = pair_mut(&mut items, 0, 1);
        *x += 1;
        *y += 1;
        assert_eq!(items, [11, 21, 30]);
    }
}
