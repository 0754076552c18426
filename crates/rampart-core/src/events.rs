//! Events emitted by the simulation for UI feedback.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::{EnemyId, TowerId};
use crate::enums::*;
use crate::types::{GridCell, Position};

/// Something that happened during command processing or a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A wave was announced.
    WaveStarted { wave: u32 },
    /// An enemy entered the path.
    EnemySpawned {
        enemy: EnemyId,
        archetype: EnemyArchetype,
        wave: u32,
    },
    /// An enemy walked off the end of the path.
    EnemyReachedEnd { enemy: EnemyId, health_left: u32 },
    /// An enemy's hit points dropped to zero.
    EnemyKilled { enemy: EnemyId, reward: u32 },
    /// A tower launched a projectile.
    ProjectileFired {
        tower: TowerId,
        target: EnemyId,
        aim: Position,
    },
    /// Every enemy of a wave was spawned and is gone.
    WaveCompleted { wave: u32 },
    /// A tower was built.
    TowerPlaced {
        tower: TowerId,
        archetype: TowerArchetype,
        cell: GridCell,
    },
    /// A command could not be applied.
    CommandRejected { reason: CommandError },
    /// The top-level phase changed.
    PhaseChanged { from: GamePhase, to: GamePhase },
}

/// Reasons a player command is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum CommandError {
    #[error("cell ({}, {}) is outside the grid", .0.gx, .0.gy)]
    OutOfBounds(GridCell),
    #[error("cell ({}, {}) is part of the enemy path", .0.gx, .0.gy)]
    OnPath(GridCell),
    #[error("cell ({}, {}) already holds a tower", .0.gx, .0.gy)]
    Occupied(GridCell),
    #[error("tower costs {cost} gold, only {available} available")]
    InsufficientGold { cost: u32, available: u32 },
    #[error("command not allowed during {0:?}")]
    WrongPhase(GamePhase),
    #[error("every wave has already been started")]
    NoMoreWaves,
}
