//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in the simulation
//! crate's pure functions and systems, not here.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{GridCell, Position};

/// Stable identifier assigned to an enemy at spawn time.
///
/// Identifiers grow monotonically, so sorting by id yields spawn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

/// Stable identifier assigned to a tower at placement time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(pub u32);

/// Path-following enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub archetype: EnemyArchetype,
    pub position: Position,
    /// Position at the start of the current tick, for swept collision.
    pub prev_position: Position,
    /// Index of the waypoint most recently passed.
    pub path_index: usize,
    /// World units per second.
    pub speed: f64,
    pub hp: i32,
    pub alive: bool,
    /// Gold paid out when this enemy is killed.
    pub reward: u32,
    /// 1-based wave number that spawned this enemy.
    pub wave: u32,
}

/// Projectile flying toward a fixed point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub position: Position,
    /// Position at the start of the current tick, for swept collision.
    pub prev_position: Position,
    /// Aim point resolved at launch. Never re-aimed.
    pub target: Position,
    pub speed: f64,
    pub damage: i32,
    pub alive: bool,
    /// Set once the projectile has struck an enemy.
    pub spent: bool,
}

/// Stationary tower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tower {
    pub id: TowerId,
    pub archetype: TowerArchetype,
    pub cell: GridCell,
    /// Center of `cell`, fixed at placement.
    pub position: Position,
    pub range: f64,
    pub damage: i32,
    /// Shots per simulation second.
    pub fire_rate: f64,
    /// Aim at the intercept point instead of the current position.
    pub predictive: bool,
    /// Simulation timestamp of the most recent shot.
    pub last_fire_secs: f64,
}
