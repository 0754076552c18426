//! Game state snapshot: the complete visible state sent to the presentation
//! layer after each frame.

use serde::{Deserialize, Serialize};

use crate::components::{EnemyId, TowerId};
use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{GridCell, Position, SimTime};

/// Complete game state broadcast after each frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub speed: SpeedMultiplier,
    pub paused: bool,
    pub wave: WaveView,
    pub gold: u32,
    pub health: u32,
    pub enemies: Vec<EnemyView>,
    pub towers: Vec<TowerView>,
    pub projectiles: Vec<ProjectileView>,
    /// Events emitted since the previous snapshot, oldest first.
    pub events: Vec<GameEvent>,
    pub score: ScoreView,
}

/// Wave progress for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveView {
    /// 1-based number of the latest started wave, 0 before the first.
    pub current: u32,
    pub total: u32,
    pub spawned: u32,
    pub active: bool,
}

/// A live enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EnemyId,
    pub archetype: EnemyArchetype,
    pub position: Position,
    pub hp: i32,
}

/// A placed tower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerView {
    pub id: TowerId,
    pub archetype: TowerArchetype,
    pub cell: GridCell,
    pub position: Position,
    pub range: f64,
}

/// A projectile in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Position,
    pub target: Position,
}

/// Running score for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreView {
    pub enemies_killed: u32,
    pub enemies_leaked: u32,
    pub shots_fired: u32,
    pub towers_built: u32,
}
