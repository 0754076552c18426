//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy archetype. Stats are looked up in the configured archetype table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyArchetype {
    /// Sturdy walker at the baseline speed.
    #[default]
    Normal,
    /// Half the hit points, much faster.
    Fast,
}

/// Tower archetype. Stats are looked up in the configured archetype table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TowerArchetype {
    /// Short range, fast firing, aims at the target's current position.
    #[default]
    Basic,
    /// Long range, slow firing, aims at the predicted intercept point.
    Sniper,
}

/// Playback acceleration. Scales how many fixed steps run per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeedMultiplier {
    #[default]
    X1,
    X2,
    X4,
}

impl SpeedMultiplier {
    /// Fixed steps executed per drained timestep.
    pub fn steps(self) -> u32 {
        match self {
            Self::X1 => 1,
            Self::X2 => 2,
            Self::X4 => 4,
        }
    }

    /// Same factor as a float, for time-scaling helpers.
    pub fn factor(self) -> f64 {
        self.steps() as f64
    }

    /// Next setting of the speed toggle (1x → 2x → 4x → 1x).
    pub fn cycle(self) -> Self {
        match self {
            Self::X1 => Self::X2,
            Self::X2 => Self::X4,
            Self::X4 => Self::X1,
        }
    }

    /// Parse a numeric factor. Only 1, 2 and 4 are valid.
    pub fn from_factor(factor: u32) -> Option<Self> {
        match factor {
            1 => Some(Self::X1),
            2 => Some(Self::X2),
            4 => Some(Self::X4),
            _ => None,
        }
    }
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first wave to be started.
    #[default]
    Ready,
    /// A wave was announced; spawning begins on the next tick.
    WaveStart,
    /// A wave is spawning or its enemies are still alive.
    Playing,
    /// The last started wave is cleared; waiting for the next start.
    WaveComplete,
    /// Base health reached zero.
    GameOver,
    /// Every wave was cleared.
    Victory,
}

impl GamePhase {
    /// Whether fixed steps advance the world in this phase.
    pub fn is_simulating(self) -> bool {
        matches!(self, Self::WaveStart | Self::Playing | Self::WaveComplete)
    }

    /// Whether the game has ended.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver | Self::Victory)
    }
}
