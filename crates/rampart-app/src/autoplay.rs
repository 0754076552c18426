//! Scripted player for unattended runs.
//!
//! Builds an opening defence from the configuration alone, then starts each
//! wave as soon as the previous one is cleared.

use std::collections::HashSet;

use rampart_core::commands::PlayerCommand;
use rampart_core::config::GameConfig;
use rampart_core::enums::{GamePhase, TowerArchetype};
use rampart_core::state::GameStateSnapshot;
use rampart_core::types::{grid_to_world, GridCell};

/// Spend the starting gold on towers, alternating snipers and basics, each on
/// the free cell that covers the most path waypoints.
pub fn opening_build(config: &GameConfig) -> Vec<PlayerCommand> {
    let path: HashSet<GridCell> = config.path_cells.iter().copied().collect();
    let mut free: Vec<GridCell> = (0..config.grid_rows)
        .flat_map(|gy| (0..config.grid_columns).map(move |gx| GridCell::new(gx, gy)))
        .filter(|cell| !path.contains(cell))
        .collect();

    let mut gold = config.starting_gold;
    let mut commands = Vec::new();
    let order = [TowerArchetype::Sniper, TowerArchetype::Basic];

    for turn in 0.. {
        let preferred = order[turn % order.len()];
        let Some(archetype) = [preferred, TowerArchetype::Basic]
            .into_iter()
            .find(|archetype| config.towers.stats(*archetype).cost <= gold)
        else {
            break;
        };
        let Some(index) = best_cell(config, &free, archetype) else {
            break;
        };
        let cell = free.remove(index);
        gold -= config.towers.stats(archetype).cost;
        commands.push(PlayerCommand::PlaceTower { cell, archetype });
    }
    commands
}

/// Index of the free cell covering the most waypoints. Ties keep the first.
fn best_cell(config: &GameConfig, free: &[GridCell], archetype: TowerArchetype) -> Option<usize> {
    let range = config.towers.stats(archetype).range;
    let mut best: Option<(usize, usize)> = None;
    for (index, cell) in free.iter().enumerate() {
        let center = grid_to_world(*cell);
        let coverage = config
            .path_cells
            .iter()
            .filter(|waypoint| center.distance(grid_to_world(**waypoint)) <= range)
            .count();
        if coverage > 0 && best.map_or(true, |(_, most)| coverage > most) {
            best = Some((index, coverage));
        }
    }
    best.map(|(index, _)| index)
}

/// Command the scripted player issues after seeing `snapshot`, if any.
pub fn next_command(snapshot: &GameStateSnapshot) -> Option<PlayerCommand> {
    match snapshot.phase {
        GamePhase::Ready | GamePhase::WaveComplete => Some(PlayerCommand::StartWave),
        _ => None,
    }
}
