//! Player commands sent from the presentation layer to the simulation.
//!
//! Commands are queued and processed at the next frame boundary, before any
//! fixed step of that frame runs.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::GridCell;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Waves ---
    /// Announce the next wave. Spawning starts on the following tick.
    StartWave,

    // --- Building ---
    /// Build a tower on an empty, non-path cell.
    PlaceTower {
        cell: GridCell,
        archetype: TowerArchetype,
    },

    // --- Simulation control ---
    /// Set playback acceleration.
    SetSpeed { multiplier: SpeedMultiplier },
    /// Step through 1x → 2x → 4x → 1x.
    CycleSpeed,
    /// Stop feeding real time into the frame clock.
    Pause,
    /// Resume feeding real time into the frame clock.
    Resume,
    /// Discard the current game and start over from the configuration.
    Restart,
}
