//! Game configuration: map, wave table and archetype stats.
//!
//! Everything here is loaded once before a game starts and never mutated
//! afterwards. `GameConfig::default()` reproduces the stock map and waves.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::enums::{EnemyArchetype, TowerArchetype};
use crate::types::GridCell;

/// Stats shared by every enemy of one archetype.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub hp: i32,
    /// World units per second.
    pub speed: f64,
    /// Gold awarded on kill.
    pub reward: u32,
}

/// Stats shared by every tower of one archetype.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TowerStats {
    pub range: f64,
    pub damage: i32,
    /// Shots per simulation second.
    pub rate: f64,
    pub cost: u32,
    /// Aim at the predicted intercept point.
    pub predictive: bool,
}

/// One entry of the wave table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveDefinition {
    pub enemy_count: u32,
    /// Simulation seconds between spawns.
    pub spawn_interval: f64,
    pub enemy_archetype: EnemyArchetype,
}

impl WaveDefinition {
    pub const fn new(enemy_count: u32, spawn_interval: f64, enemy_archetype: EnemyArchetype) -> Self {
        Self {
            enemy_count,
            spawn_interval,
            enemy_archetype,
        }
    }
}

/// Enemy stats keyed by archetype.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyTable {
    pub normal: EnemyStats,
    pub fast: EnemyStats,
}

impl EnemyTable {
    pub fn stats(&self, archetype: EnemyArchetype) -> EnemyStats {
        match archetype {
            EnemyArchetype::Normal => self.normal,
            EnemyArchetype::Fast => self.fast,
        }
    }
}

impl Default for EnemyTable {
    fn default() -> Self {
        Self {
            normal: EnemyStats {
                hp: 10,
                speed: 80.0,
                reward: 10,
            },
            fast: EnemyStats {
                hp: 5,
                speed: 140.0,
                reward: 15,
            },
        }
    }
}

/// Tower stats keyed by archetype.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TowerTable {
    pub basic: TowerStats,
    pub sniper: TowerStats,
}

impl TowerTable {
    pub fn stats(&self, archetype: TowerArchetype) -> TowerStats {
        match archetype {
            TowerArchetype::Basic => self.basic,
            TowerArchetype::Sniper => self.sniper,
        }
    }
}

impl Default for TowerTable {
    fn default() -> Self {
        Self {
            basic: TowerStats {
                range: 80.0,
                damage: 2,
                rate: 1.5,
                cost: 100,
                predictive: false,
            },
            sniper: TowerStats {
                range: 120.0,
                damage: 3,
                rate: 0.8,
                cost: 150,
                predictive: true,
            },
        }
    }
}

/// Complete game configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid_columns: u32,
    pub grid_rows: u32,
    /// Cells the enemies walk through, in order. Waypoints are their centers.
    pub path_cells: Vec<GridCell>,
    pub waves: Vec<WaveDefinition>,
    pub enemies: EnemyTable,
    pub towers: TowerTable,
    pub projectile_speed: f64,
    pub hit_radius: f64,
    pub starting_gold: u32,
    pub starting_health: u32,
    pub leak_damage: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_columns: DEFAULT_GRID_COLUMNS,
            grid_rows: DEFAULT_GRID_ROWS,
            path_cells: default_path_cells(),
            waves: default_waves(),
            enemies: EnemyTable::default(),
            towers: TowerTable::default(),
            projectile_speed: PROJECTILE_SPEED,
            hit_radius: HIT_RADIUS,
            starting_gold: STARTING_GOLD,
            starting_health: STARTING_HEALTH,
            leak_damage: LEAK_DAMAGE,
        }
    }
}

impl GameConfig {
    /// Parse a JSON document and validate it. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every invariant the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path_cells.len() < 2 {
            return Err(ConfigError::PathTooShort {
                len: self.path_cells.len(),
            });
        }
        for (index, pair) in self.path_cells.windows(2).enumerate() {
            if pair[0] == pair[1] {
                return Err(ConfigError::CoincidentWaypoints { index: index + 1 });
            }
        }
        if let Some(cell) = self
            .path_cells
            .iter()
            .find(|cell| cell.gx >= self.grid_columns || cell.gy >= self.grid_rows)
        {
            return Err(ConfigError::PathOutsideGrid { cell: *cell });
        }
        if self.waves.is_empty() {
            return Err(ConfigError::NoWaves);
        }
        for (index, wave) in self.waves.iter().enumerate() {
            if wave.enemy_count == 0 {
                return Err(ConfigError::EmptyWave { wave: index + 1 });
            }
            if !wave.spawn_interval.is_finite() || wave.spawn_interval < 0.0 {
                return Err(ConfigError::InvalidSpawnInterval {
                    wave: index + 1,
                    interval: wave.spawn_interval,
                });
            }
        }
        for archetype in [EnemyArchetype::Normal, EnemyArchetype::Fast] {
            let stats = self.enemies.stats(archetype);
            if !(stats.speed.is_finite() && stats.speed > 0.0) || stats.hp <= 0 {
                return Err(ConfigError::InvalidEnemyStats { archetype });
            }
        }
        for archetype in [TowerArchetype::Basic, TowerArchetype::Sniper] {
            let stats = self.towers.stats(archetype);
            let valid = stats.rate.is_finite()
                && stats.rate > 0.0
                && stats.range.is_finite()
                && stats.range >= 0.0;
            if !valid {
                return Err(ConfigError::InvalidTowerStats { archetype });
            }
        }
        if !(self.projectile_speed.is_finite() && self.projectile_speed > 0.0) {
            return Err(ConfigError::InvalidProjectileSpeed(self.projectile_speed));
        }
        if !(self.hit_radius.is_finite() && self.hit_radius >= 0.0) {
            return Err(ConfigError::InvalidHitRadius(self.hit_radius));
        }
        Ok(())
    }
}

/// Reasons a configuration is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("path needs at least 2 waypoints, got {len}")]
    PathTooShort { len: usize },
    #[error("waypoint {index} coincides with the previous waypoint")]
    CoincidentWaypoints { index: usize },
    #[error("path cell ({}, {}) lies outside the grid", .cell.gx, .cell.gy)]
    PathOutsideGrid { cell: GridCell },
    #[error("wave table is empty")]
    NoWaves,
    #[error("wave {wave} spawns no enemies")]
    EmptyWave { wave: usize },
    #[error("wave {wave} has invalid spawn interval {interval}")]
    InvalidSpawnInterval { wave: usize, interval: f64 },
    #[error("enemy archetype {archetype:?} needs positive hp and speed")]
    InvalidEnemyStats { archetype: EnemyArchetype },
    #[error("tower archetype {archetype:?} needs a positive fire rate and a non-negative range")]
    InvalidTowerStats { archetype: TowerArchetype },
    #[error("projectile speed must be positive, got {0}")]
    InvalidProjectileSpeed(f64),
    #[error("hit radius must be non-negative, got {0}")]
    InvalidHitRadius(f64),
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Stock path: an S-shaped walk from the top-left toward the bottom-right.
pub fn default_path_cells() -> Vec<GridCell> {
    let mut cells = Vec::with_capacity(32);
    cells.extend((1..=8).map(|gx| GridCell::new(gx, 1)));
    cells.extend((2..=6).map(|gy| GridCell::new(8, gy)));
    cells.extend((2..=7).rev().map(|gx| GridCell::new(gx, 6)));
    cells.extend((7..=11).map(|gy| GridCell::new(2, gy)));
    cells.extend((3..=10).map(|gx| GridCell::new(gx, 11)));
    cells
}

/// Stock wave table.
pub fn default_waves() -> Vec<WaveDefinition> {
    vec![
        WaveDefinition::new(5, 2.0, EnemyArchetype::Normal),
        WaveDefinition::new(8, 1.5, EnemyArchetype::Normal),
        // First fast wave
        WaveDefinition::new(6, 1.2, EnemyArchetype::Fast),
        WaveDefinition::new(10, 1.0, EnemyArchetype::Normal),
        WaveDefinition::new(8, 0.8, EnemyArchetype::Fast),
        WaveDefinition::new(15, 0.6, EnemyArchetype::Normal),
    ]
}
