// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Host-game abstractions consumed by entity dispatch.
//!
//! The engine never talks to a server API directly; a game integration
//! implements these traits over its own world, entity, and player types.

use crate::ident::EntityId;
use bending_geom::{Aabb, Vec3};

/// Coarse entity classification needed by the dispatch filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    /// A connected player.
    Player,
    /// A falling block entity.
    FallingBlock,
    /// An armour stand.
    ArmorStand,
    /// Anything else.
    Other,
}

/// Player game mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    /// Default survival mode.
    #[default]
    Survival,
    /// Creative mode.
    Creative,
    /// Adventure mode.
    Adventure,
    /// Spectator mode; never collidable.
    Spectator,
}

/// Integer block coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockPos {
    /// Block x.
    pub x: i32,
    /// Block y.
    pub y: i32,
    /// Block z.
    pub z: i32,
}

impl BlockPos {
    /// Creates a block position.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Block containing world position `v` (floor on each axis).
    pub fn containing(v: Vec3) -> Self {
        Self {
            x: v.x().floor() as i32,
            y: v.y().floor() as i32,
            z: v.z().floor() as i32,
        }
    }
}

/// An entity living in a [`World`].
pub trait Entity {
    /// Unique identity.
    fn id(&self) -> EntityId;

    /// Classification used by the dispatch filter.
    fn entity_type(&self) -> EntityType;

    /// World-space bounding box.
    fn bounds(&self) -> Aabb;

    /// Feet position in world space.
    fn location(&self) -> Vec3;

    /// Whether the entity is a living entity (mobs, players).
    fn is_living(&self) -> bool;

    /// Game mode for players; `None` for everything else.
    fn game_mode(&self) -> Option<GameMode> {
        None
    }

    /// Whether the entity is rendered invisible.
    fn is_invisible(&self) -> bool {
        false
    }

    /// Block the entity stands in.
    fn block(&self) -> BlockPos {
        BlockPos::containing(self.location())
    }
}

/// Spatial entity lookup.
pub trait World {
    /// Entity type stored by this world.
    type Entity: Entity;

    /// Entities whose bounds overlap `area`.
    fn nearby_entities(&self, area: &Aabb) -> Vec<&Self::Entity>;

    /// Whether `entity` is a short-lived falling block spawned by an ability.
    fn is_temporary(&self, entity: &Self::Entity) -> bool;
}

/// The player that owns an ability.
pub trait User {
    /// World type the user lives in.
    type World: World;

    /// Identity of the user's own entity.
    fn id(&self) -> EntityId;

    /// World the user is in.
    fn world(&self) -> &Self::World;

    /// Whether region protection lets the user affect `pos`.
    fn can_build(&self, pos: BlockPos) -> bool;
}
