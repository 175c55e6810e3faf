// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Integration tests for the per-tick collision driver and resolution views.

use bending_collision::{
    Ability, AbilityKey, AbilityRegistry, CollisionPairBuilder, CollisionSystem, CollisionView,
    EntityId, TickReport,
};
use bending_geom::{Aabb, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reaction {
    Accept,
    SpareSelf,
    TakeOther,
}

#[derive(Debug)]
struct Spell {
    name: &'static str,
    kind: AbilityKey,
    owner: EntityId,
    colliders: Vec<Aabb>,
    reaction: Reaction,
    seen: Vec<&'static str>,
    destroyed: bool,
}

impl Ability for Spell {
    type Collider = Aabb;

    fn kind(&self) -> AbilityKey {
        self.kind
    }

    fn owner(&self) -> EntityId {
        self.owner
    }

    fn colliders(&self) -> &[Aabb] {
        &self.colliders
    }

    fn on_collision(&mut self, collision: &CollisionView<'_, Self>) {
        self.seen.push(collision.collided_ability().name);
        match self.reaction {
            Reaction::Accept => {}
            Reaction::SpareSelf => collision.set_remove_self(false),
            Reaction::TakeOther => collision.set_remove_other(true),
        }
    }

    fn destroy(&mut self) {
        assert!(!self.destroyed, "{} destroyed twice", self.name);
        self.destroyed = true;
    }
}

struct World {
    registry: AbilityRegistry,
}

impl World {
    fn new() -> Self {
        let mut registry = AbilityRegistry::new();
        registry
            .register_all(["AirSwipe", "FireBlast", "EarthBlast", "Shield"])
            .unwrap();
        Self { registry }
    }

    fn spell(&self, name: &'static str, owner: u128, at: &[f64]) -> Spell {
        Spell {
            name,
            kind: self.registry.get(name).unwrap(),
            owner: EntityId(owner),
            colliders: at
                .iter()
                .map(|&x| Aabb::from_center_half_extents(Vec3::new(x, 64.0, 0.0), Vec3::splat(0.5)))
                .collect(),
            reaction: Reaction::Accept,
            seen: Vec::new(),
            destroyed: false,
        }
    }

    fn system(&self) -> CollisionSystem {
        let mut b = CollisionPairBuilder::new();
        b.layer(["AirSwipe"])
            .layer(["FireBlast"])
            .add(["Shield"], ["AirSwipe", "FireBlast"], false, false);
        CollisionSystem::new(b.build(&self.registry).unwrap())
    }
}

#[test]
fn lower_layer_is_destroyed_and_both_sides_notified() {
    let w = World::new();
    let mut spells = vec![w.spell("AirSwipe", 1, &[0.0]), w.spell("FireBlast", 2, &[0.6])];
    let report = w.system().evaluate(&mut spells);

    assert_eq!(
        report,
        TickReport {
            candidates: 1,
            resolved: 1,
            destroyed: vec![0],
        }
    );
    assert!(spells[0].destroyed);
    assert!(!spells[1].destroyed);
    assert_eq!(spells[0].seen, vec!["FireBlast"]);
    assert_eq!(spells[1].seen, vec!["AirSwipe"]);
}

#[test]
fn same_owner_never_collides() {
    let w = World::new();
    let mut spells = vec![w.spell("AirSwipe", 7, &[0.0]), w.spell("FireBlast", 7, &[0.0])];
    let report = w.system().evaluate(&mut spells);
    assert_eq!(report.candidates, 1);
    assert_eq!(report.resolved, 0);
    assert!(spells.iter().all(|s| s.seen.is_empty() && !s.destroyed));
}

#[test]
fn kinds_without_rule_are_ignored() {
    let w = World::new();
    let mut spells = vec![w.spell("EarthBlast", 1, &[0.0]), w.spell("FireBlast", 2, &[0.2])];
    let report = w.system().evaluate(&mut spells);
    assert_eq!(report.candidates, 1);
    assert_eq!(report.resolved, 0);
    assert!(report.destroyed.is_empty());
}

#[test]
fn callback_can_veto_own_removal() {
    let w = World::new();
    let mut air = w.spell("AirSwipe", 1, &[0.0]);
    air.reaction = Reaction::SpareSelf;
    let mut spells = vec![air, w.spell("FireBlast", 2, &[0.0])];
    let report = w.system().evaluate(&mut spells);
    assert_eq!(report.resolved, 1);
    assert!(report.destroyed.is_empty());
    assert!(!spells[0].destroyed);
}

#[test]
fn callback_can_request_other_removal() {
    let w = World::new();
    let mut shield = w.spell("Shield", 1, &[0.0]);
    shield.reaction = Reaction::TakeOther;
    let mut spells = vec![w.spell("FireBlast", 2, &[0.3]), shield];
    let report = w.system().evaluate(&mut spells);
    assert_eq!(report.destroyed, vec![0]);
    assert!(spells[0].destroyed);
    assert!(!spells[1].destroyed);
}

#[test]
fn destroyed_instance_skips_remaining_pairs() {
    let w = World::new();
    // Both fires overlap the air swipe but not each other.
    let mut spells = vec![
        w.spell("AirSwipe", 1, &[0.0]),
        w.spell("FireBlast", 2, &[0.6]),
        w.spell("FireBlast", 3, &[-0.6]),
    ];
    let report = w.system().evaluate(&mut spells);

    assert_eq!(report.candidates, 2);
    assert_eq!(report.resolved, 1);
    assert_eq!(report.destroyed, vec![0]);
    assert_eq!(spells[0].seen.len(), 1);
    let notified = spells[1].seen.len() + spells[2].seen.len();
    assert_eq!(notified, 1);
}

#[test]
fn broad_overlap_without_shape_contact_is_not_resolved() {
    let w = World::new();
    // Air's combined box spans x in [-0.5, 10.5]; fire sits in the gap.
    let mut spells = vec![w.spell("AirSwipe", 1, &[0.0, 10.0]), w.spell("FireBlast", 2, &[5.0])];
    let report = w.system().evaluate(&mut spells);
    assert_eq!(report.candidates, 1);
    assert_eq!(report.resolved, 0);
}

#[test]
fn instances_without_colliders_are_not_indexed() {
    let w = World::new();
    let mut spells = vec![w.spell("AirSwipe", 1, &[]), w.spell("FireBlast", 2, &[0.0])];
    assert_eq!(w.system().evaluate(&mut spells), TickReport::default());

    let mut none: Vec<Spell> = Vec::new();
    assert_eq!(w.system().evaluate(&mut none), TickReport::default());
}
