//! Gold, base health and running score.
//!
//! Stored on `SimulationEngine`, not as ECS entities.

use rampart_core::config::GameConfig;
use rampart_core::events::CommandError;
use rampart_core::state::ScoreView;

/// Player resources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Economy {
    pub gold: u32,
    pub health: u32,
}

impl Economy {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            gold: config.starting_gold,
            health: config.starting_health,
        }
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.gold >= cost
    }

    /// Deduct `cost` gold, or report how much is missing.
    pub fn spend(&mut self, cost: u32) -> Result<(), CommandError> {
        if !self.can_afford(cost) {
            return Err(CommandError::InsufficientGold {
                cost,
                available: self.gold,
            });
        }
        self.gold -= cost;
        Ok(())
    }

    pub fn earn(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Subtract base health. Returns the health left.
    pub fn damage_base(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }
}

/// Running score tracked by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreState {
    pub enemies_killed: u32,
    pub enemies_leaked: u32,
    pub shots_fired: u32,
    pub towers_built: u32,
}

impl ScoreState {
    pub fn view(&self) -> ScoreView {
        ScoreView {
            enemies_killed: self.enemies_killed,
            enemies_leaked: self.enemies_leaked,
            shots_fired: self.shots_fired,
            towers_built: self.towers_built,
        }
    }
}
