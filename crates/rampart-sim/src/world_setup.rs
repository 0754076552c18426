//! Entity spawn factories.
//!
//! Each entity is a single component bundle built from the configured
//! archetype stats.

use hecs::{Entity, World};

use rampart_core::components::*;
use rampart_core::config::{EnemyStats, TowerStats};
use rampart_core::enums::*;
use rampart_core::types::{grid_to_world, GridCell, Position};

use crate::targeting::ProjectileSpec;

/// Spawn an enemy at the start of the path.
pub fn spawn_enemy(
    world: &mut World,
    id: EnemyId,
    archetype: EnemyArchetype,
    stats: EnemyStats,
    start: Position,
    wave: u32,
) -> Entity {
    world.spawn((Enemy {
        id,
        archetype,
        position: start,
        prev_position: start,
        path_index: 0,
        speed: stats.speed,
        hp: stats.hp,
        alive: true,
        reward: stats.reward,
        wave,
    },))
}

/// Build a tower centered on `cell`.
pub fn spawn_tower(
    world: &mut World,
    id: TowerId,
    archetype: TowerArchetype,
    stats: TowerStats,
    cell: GridCell,
) -> Entity {
    world.spawn((Tower {
        id,
        archetype,
        cell,
        position: grid_to_world(cell),
        range: stats.range,
        damage: stats.damage,
        fire_rate: stats.rate,
        predictive: stats.predictive,
        last_fire_secs: 0.0,
    },))
}

/// Launch a projectile at the tower's position.
pub fn spawn_projectile(world: &mut World, spec: &ProjectileSpec) -> Entity {
    world.spawn((Projectile {
        position: spec.origin,
        prev_position: spec.origin,
        target: spec.aim,
        speed: spec.speed,
        damage: spec.damage,
        alive: true,
        spent: false,
    },))
}
