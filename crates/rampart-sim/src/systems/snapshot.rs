//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use rampart_core::components::*;
use rampart_core::enums::GamePhase;
use rampart_core::events::GameEvent;
use rampart_core::state::*;
use rampart_core::types::SimTime;

use crate::clock::FrameClock;
use crate::economy::{Economy, ScoreState};
use crate::scheduler::WaveScheduler;

/// Build a complete GameStateSnapshot from the current world state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    clock: &FrameClock,
    scheduler: &WaveScheduler,
    total_waves: usize,
    economy: &Economy,
    score: &ScoreState,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        speed: clock.multiplier,
        paused: clock.paused,
        wave: WaveView {
            current: scheduler.current_wave,
            total: total_waves as u32,
            spawned: scheduler.spawned,
            active: scheduler.active,
        },
        gold: economy.gold,
        health: economy.health,
        enemies: build_enemies(world),
        towers: build_towers(world),
        projectiles: build_projectiles(world),
        events,
        score: score.view(),
    }
}

/// Build EnemyView list from live enemies, in spawn order.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<&Enemy>()
        .iter()
        .filter(|(_, enemy)| enemy.alive)
        .map(|(_, enemy)| EnemyView {
            id: enemy.id,
            archetype: enemy.archetype,
            position: enemy.position,
            hp: enemy.hp,
        })
        .collect();

    enemies.sort_by_key(|e| e.id);
    enemies
}

/// Build TowerView list, in placement order.
fn build_towers(world: &World) -> Vec<TowerView> {
    let mut towers: Vec<TowerView> = world
        .query::<&Tower>()
        .iter()
        .map(|(_, tower)| TowerView {
            id: tower.id,
            archetype: tower.archetype,
            cell: tower.cell,
            position: tower.position,
            range: tower.range,
        })
        .collect();

    towers.sort_by_key(|t| t.id);
    towers
}

/// Build ProjectileView list from projectiles in flight.
fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<&Projectile>()
        .iter()
        .filter(|(_, projectile)| projectile.alive)
        .map(|(_, projectile)| ProjectileView {
            position: projectile.position,
            target: projectile.target,
        })
        .collect()
}
