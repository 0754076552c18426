//! Wave spawning system: feeds the scheduler and spawns what it requests.

use hecs::World;
use tracing::debug;

use rampart_core::components::{Enemy, EnemyId};
use rampart_core::config::GameConfig;
use rampart_core::events::GameEvent;

use crate::path::Path;
use crate::scheduler::{scheduler_tick, SchedulerTick, WaveScheduler};
use crate::world_setup;

/// Advance the scheduler by one step and spawn any requested enemy.
pub fn run(
    world: &mut World,
    path: &Path,
    config: &GameConfig,
    scheduler: &mut WaveScheduler,
    next_enemy_id: &mut u32,
    dt: f64,
    events: &mut Vec<GameEvent>,
) -> SchedulerTick {
    let wave = scheduler.current_wave;
    let alive_in_wave = world
        .query::<&Enemy>()
        .iter()
        .filter(|(_, enemy)| enemy.alive && enemy.wave == wave)
        .count();

    let (next, tick) = scheduler_tick(scheduler, &config.waves, dt, alive_in_wave);
    *scheduler = next;

    if let Some(request) = tick.spawn {
        let id = EnemyId(*next_enemy_id);
        *next_enemy_id += 1;
        world_setup::spawn_enemy(
            world,
            id,
            request.archetype,
            config.enemies.stats(request.archetype),
            path.start(),
            request.wave,
        );
        debug!(enemy = id.0, wave = request.wave, archetype = ?request.archetype, "enemy spawned");
        events.push(GameEvent::EnemySpawned {
            enemy: id,
            archetype: request.archetype,
            wave: request.wave,
        });
    }

    tick
}
