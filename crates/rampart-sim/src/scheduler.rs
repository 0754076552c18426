//! Wave spawn scheduling.
//!
//! The scheduler is idle until a wave is started, then emits one spawn request
//! per elapsed spawn interval until the wave's count is reached. It reports a
//! completed wave once every enemy of that wave is gone. Game phase decisions
//! belong to the engine.

use serde::{Deserialize, Serialize};

use rampart_core::config::WaveDefinition;
use rampart_core::enums::EnemyArchetype;

/// Progress through the wave table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveScheduler {
    /// 1-based number of the latest started wave, 0 before the first.
    pub current_wave: u32,
    /// Enemies spawned so far in the current wave.
    pub spawned: u32,
    /// Seconds until the next spawn.
    pub countdown: f64,
    pub active: bool,
}

/// Request to spawn one enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnRequest {
    pub archetype: EnemyArchetype,
    pub wave: u32,
}

/// What one scheduler update produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerTick {
    pub spawn: Option<SpawnRequest>,
    pub wave_complete: bool,
}

impl WaveScheduler {
    /// Begin the next wave. `None` while a wave is running or once every
    /// wave has been started.
    pub fn start_next_wave(&self, waves: &[WaveDefinition]) -> Option<Self> {
        if self.active || self.waves_remaining(waves) == 0 {
            return None;
        }
        Some(Self {
            current_wave: self.current_wave + 1,
            spawned: 0,
            countdown: 0.0,
            active: true,
        })
    }

    /// Definition of the latest started wave.
    pub fn current_definition<'a>(&self, waves: &'a [WaveDefinition]) -> Option<&'a WaveDefinition> {
        let index = self.current_wave.checked_sub(1)?;
        waves.get(index as usize)
    }

    /// Waves not yet started.
    pub fn waves_remaining(&self, waves: &[WaveDefinition]) -> usize {
        waves.len().saturating_sub(self.current_wave as usize)
    }

    pub fn is_last_wave(&self, waves: &[WaveDefinition]) -> bool {
        self.current_wave > 0 && self.waves_remaining(waves) == 0
    }
}

/// Advance the scheduler by `dt` seconds.
///
/// `alive_in_wave` is the number of live enemies spawned by the current wave
/// before this update. An enemy requested by this update counts as alive.
pub fn scheduler_tick(
    scheduler: &WaveScheduler,
    waves: &[WaveDefinition],
    dt: f64,
    alive_in_wave: usize,
) -> (WaveScheduler, SchedulerTick) {
    let mut next = *scheduler;
    let mut tick = SchedulerTick::default();
    if !scheduler.active {
        return (next, tick);
    }
    let Some(definition) = scheduler.current_definition(waves) else {
        next.active = false;
        return (next, tick);
    };

    next.countdown -= dt;
    if next.countdown <= 0.0 && next.spawned < definition.enemy_count {
        tick.spawn = Some(SpawnRequest {
            archetype: definition.enemy_archetype,
            wave: scheduler.current_wave,
        });
        next.spawned += 1;
        next.countdown = definition.spawn_interval;
    }

    let alive = alive_in_wave + usize::from(tick.spawn.is_some());
    if next.spawned >= definition.enemy_count && alive == 0 {
        next.active = false;
        tick.wave_complete = true;
    }
    (next, tick)
}
