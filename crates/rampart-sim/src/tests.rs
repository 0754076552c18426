//! Tests for the simulation engine: phases, commands, waves, combat and
//! determinism across playback speeds.

use rampart_core::commands::PlayerCommand;
use rampart_core::components::{Enemy, EnemyId, Tower};
use rampart_core::config::{ConfigError, GameConfig, WaveDefinition};
use rampart_core::constants::FIXED_DT;
use rampart_core::enums::*;
use rampart_core::events::{CommandError, GameEvent};
use rampart_core::state::GameStateSnapshot;
use rampart_core::types::GridCell;

use crate::engine::SimulationEngine;

/// Five-cell straight path along the top row.
fn short_config(waves: Vec<WaveDefinition>) -> GameConfig {
    GameConfig {
        path_cells: (0..=4).map(|gx| GridCell::new(gx, 0)).collect(),
        waves,
        ..Default::default()
    }
}

fn engine(config: GameConfig) -> SimulationEngine {
    SimulationEngine::new(config).expect("valid config")
}

/// Tick until `done` holds or `max_ticks` runs out, collecting every event.
fn run_ticks(
    engine: &mut SimulationEngine,
    max_ticks: usize,
    mut done: impl FnMut(&GameStateSnapshot) -> bool,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..max_ticks {
        let snapshot = engine.tick();
        events.extend(snapshot.events.iter().cloned());
        if done(&snapshot) {
            break;
        }
    }
    events
}

fn count(events: &[GameEvent], predicate: impl Fn(&GameEvent) -> bool) -> usize {
    events.iter().filter(|event| predicate(event)).count()
}

// ---- Construction ----

#[test]
fn test_new_rejects_invalid_config() {
    let config = GameConfig {
        waves: Vec::new(),
        ..Default::default()
    };
    assert!(matches!(
        SimulationEngine::new(config),
        Err(ConfigError::NoWaves)
    ));
}

#[test]
fn test_initial_snapshot() {
    let mut engine = engine(GameConfig::default());
    let snapshot = engine.frame(FIXED_DT);
    assert_eq!(snapshot.phase, GamePhase::Ready);
    assert_eq!(snapshot.gold, 250);
    assert_eq!(snapshot.health, 20);
    assert_eq!(snapshot.wave.current, 0);
    assert_eq!(snapshot.wave.total, 6);
    assert_eq!(snapshot.time.tick, 0, "Ready must not simulate");
    assert!(snapshot.events.is_empty());
}

// ---- Waves ----

#[test]
fn test_start_wave_spawns_on_first_tick() {
    let mut engine = engine(GameConfig::default());
    engine.queue_command(PlayerCommand::StartWave);
    let snapshot = engine.tick();

    assert_eq!(snapshot.phase, GamePhase::Playing);
    assert_eq!(snapshot.enemies.len(), 1);
    assert_eq!(snapshot.enemies[0].id, EnemyId(1));
    assert_eq!(
        snapshot.events,
        vec![
            GameEvent::WaveStarted { wave: 1 },
            GameEvent::PhaseChanged {
                from: GamePhase::Ready,
                to: GamePhase::WaveStart
            },
            GameEvent::EnemySpawned {
                enemy: EnemyId(1),
                archetype: EnemyArchetype::Normal,
                wave: 1
            },
            GameEvent::PhaseChanged {
                from: GamePhase::WaveStart,
                to: GamePhase::Playing
            },
        ]
    );
}

#[test]
fn test_start_wave_rejected_while_playing() {
    let mut engine = engine(GameConfig::default());
    engine.queue_command(PlayerCommand::StartWave);
    engine.tick();
    engine.queue_command(PlayerCommand::StartWave);
    let snapshot = engine.tick();

    assert!(snapshot.events.contains(&GameEvent::CommandRejected {
        reason: CommandError::WrongPhase(GamePhase::Playing)
    }));
    assert_eq!(snapshot.wave.current, 1);
}

#[test]
fn test_wave_completion_gating() {
    let mut engine = engine(short_config(vec![WaveDefinition::new(
        5,
        0.1,
        EnemyArchetype::Normal,
    )]));
    engine.queue_command(PlayerCommand::StartWave);

    let mut spawned = 0;
    let mut gone = 0;
    let mut completed = false;
    for _ in 0..2_000 {
        let snapshot = engine.tick();
        for event in &snapshot.events {
            match event {
                GameEvent::EnemySpawned { .. } => spawned += 1,
                GameEvent::EnemyReachedEnd { .. } | GameEvent::EnemyKilled { .. } => gone += 1,
                GameEvent::WaveCompleted { wave } => {
                    assert_eq!(*wave, 1);
                    assert_eq!(spawned, 5, "completed after {spawned} spawns");
                    assert_eq!(gone, 5, "completed with {} enemies alive", 5 - gone);
                    assert!(snapshot.enemies.is_empty());
                    completed = true;
                }
                _ => {}
            }
        }
        if completed {
            break;
        }
        if spawned < 5 || gone < 5 {
            assert!(snapshot.wave.active, "wave ended early");
        }
    }

    assert!(completed, "wave never completed");
    assert_eq!(engine.phase(), GamePhase::Victory);
}

#[test]
fn test_waves_advance_to_victory() {
    let wave = WaveDefinition::new(1, 0.0, EnemyArchetype::Fast);
    let mut engine = engine(short_config(vec![wave, wave]));

    engine.queue_command(PlayerCommand::StartWave);
    run_ticks(&mut engine, 1_000, |s| s.phase == GamePhase::WaveComplete);
    assert_eq!(engine.phase(), GamePhase::WaveComplete);

    engine.queue_command(PlayerCommand::StartWave);
    let events = run_ticks(&mut engine, 1_000, |s| s.phase.is_terminal());
    assert_eq!(engine.phase(), GamePhase::Victory);
    assert!(events.contains(&GameEvent::WaveCompleted { wave: 2 }));

    engine.queue_command(PlayerCommand::StartWave);
    let snapshot = engine.tick();
    assert_eq!(
        snapshot.events,
        vec![GameEvent::CommandRejected {
            reason: CommandError::WrongPhase(GamePhase::Victory)
        }]
    );
}

// ---- Economy ----

#[test]
fn test_leaks_cost_health_once() {
    let mut engine = engine(short_config(vec![WaveDefinition::new(
        4,
        0.2,
        EnemyArchetype::Fast,
    )]));
    engine.queue_command(PlayerCommand::StartWave);
    let events = run_ticks(&mut engine, 2_000, |s| s.phase.is_terminal());

    let leaks = count(&events, |e| matches!(e, GameEvent::EnemyReachedEnd { .. }));
    assert_eq!(leaks, 4);
    assert_eq!(engine.economy().health, 16);
    assert_eq!(engine.score().enemies_leaked, 4);

    let last_leak = events.iter().rev().find_map(|e| match e {
        GameEvent::EnemyReachedEnd { health_left, .. } => Some(*health_left),
        _ => None,
    });
    assert_eq!(last_leak, Some(16));
}

#[test]
fn test_game_over_freezes_world() {
    let config = GameConfig {
        starting_health: 3,
        ..short_config(vec![WaveDefinition::new(5, 0.1, EnemyArchetype::Normal)])
    };
    let mut engine = engine(config);
    engine.queue_command(PlayerCommand::StartWave);
    let events = run_ticks(&mut engine, 2_000, |s| s.phase.is_terminal());

    assert_eq!(engine.phase(), GamePhase::GameOver);
    assert_eq!(engine.economy().health, 0);
    assert_eq!(engine.score().enemies_leaked, 3);
    assert!(events.contains(&GameEvent::PhaseChanged {
        from: GamePhase::Playing,
        to: GamePhase::GameOver
    }));

    let frozen_at = engine.time();
    for _ in 0..60 {
        engine.frame(FIXED_DT);
    }
    assert_eq!(engine.time(), frozen_at);
}

#[test]
fn test_place_tower_validation() {
    let mut engine = engine(GameConfig::default());
    engine.queue_commands([
        PlayerCommand::PlaceTower {
            cell: GridCell::new(1, 1),
            archetype: TowerArchetype::Basic,
        },
        PlayerCommand::PlaceTower {
            cell: GridCell::new(20, 0),
            archetype: TowerArchetype::Basic,
        },
        PlayerCommand::PlaceTower {
            cell: GridCell::new(4, 2),
            archetype: TowerArchetype::Basic,
        },
        PlayerCommand::PlaceTower {
            cell: GridCell::new(4, 2),
            archetype: TowerArchetype::Sniper,
        },
        PlayerCommand::PlaceTower {
            cell: GridCell::new(5, 2),
            archetype: TowerArchetype::Basic,
        },
        PlayerCommand::PlaceTower {
            cell: GridCell::new(6, 2),
            archetype: TowerArchetype::Sniper,
        },
    ]);
    let snapshot = engine.tick();

    let rejections: Vec<CommandError> = snapshot
        .events
        .iter()
        .filter_map(|e| match e {
            GameEvent::CommandRejected { reason } => Some(*reason),
            _ => None,
        })
        .collect();
    assert_eq!(
        rejections,
        vec![
            CommandError::OnPath(GridCell::new(1, 1)),
            CommandError::OutOfBounds(GridCell::new(20, 0)),
            CommandError::Occupied(GridCell::new(4, 2)),
            CommandError::InsufficientGold {
                cost: 150,
                available: 50
            },
        ]
    );
    assert_eq!(snapshot.towers.len(), 2);
    assert_eq!(snapshot.gold, 50);
    assert_eq!(snapshot.score.towers_built, 2);
}

// ---- Combat ----

#[test]
fn test_tower_kills_enemy_walking_at_it() {
    // Enemy walks straight at a tower parked just past the path end.
    let mut config = GameConfig {
        path_cells: (0..=9).map(|gx| GridCell::new(gx, 5)).collect(),
        waves: vec![WaveDefinition::new(1, 1.0, EnemyArchetype::Normal)],
        ..Default::default()
    };
    config.enemies.normal.hp = 2;
    let mut engine = engine(config);
    engine.queue_commands([
        PlayerCommand::PlaceTower {
            cell: GridCell::new(10, 5),
            archetype: TowerArchetype::Basic,
        },
        PlayerCommand::StartWave,
    ]);
    let events = run_ticks(&mut engine, 2_000, |s| s.phase.is_terminal());

    assert_eq!(engine.phase(), GamePhase::Victory);
    assert!(events.contains(&GameEvent::EnemyKilled {
        enemy: EnemyId(1),
        reward: 10
    }));
    assert_eq!(engine.score().enemies_killed, 1);
    assert_eq!(engine.score().enemies_leaked, 0);
    assert_eq!(engine.economy().gold, 250 - 100 + 10);
}

#[test]
fn test_projectiles_never_hit_twice() {
    let mut config = GameConfig {
        starting_gold: 10_000,
        ..Default::default()
    };
    config.enemies.normal.hp = 1_000;
    let mut engine = engine(config);
    for gx in 3..=7 {
        engine.queue_command(PlayerCommand::PlaceTower {
            cell: GridCell::new(gx, 2),
            archetype: TowerArchetype::Basic,
        });
    }
    engine.queue_command(PlayerCommand::StartWave);
    run_ticks(&mut engine, 600, |_| false);

    let shots = engine.score().shots_fired as i32;
    let damage_taken: i32 = engine
        .world()
        .query::<&Enemy>()
        .iter()
        .map(|(_, enemy)| 1_000 - enemy.hp)
        .sum();
    assert!(shots > 0);
    assert!(
        damage_taken <= shots * 2,
        "{damage_taken} damage from {shots} shots"
    );
}

#[test]
fn test_dead_enemies_are_removed_same_tick() {
    let mut engine = engine(GameConfig::default());
    engine.queue_command(PlayerCommand::StartWave);
    engine.tick();
    let id = engine.spawn_test_enemy(EnemyArchetype::Fast);
    for (_, enemy) in engine.world_mut().query_mut::<&mut Enemy>() {
        if enemy.id == id {
            enemy.path_index = 31;
        }
    }
    let snapshot = engine.tick();
    assert!(snapshot.enemies.iter().all(|e| e.id != id));
    assert!(snapshot.events.contains(&GameEvent::EnemyReachedEnd {
        enemy: id,
        health_left: 19
    }));
    assert_eq!(engine.world().query::<&Enemy>().iter().count(), 1);
}

// ---- Playback control ----

#[test]
fn test_pause_and_resume() {
    let mut engine = engine(GameConfig::default());
    engine.queue_commands([PlayerCommand::StartWave, PlayerCommand::Pause]);
    let snapshot = engine.frame(0.1);
    assert!(snapshot.paused);
    assert_eq!(snapshot.time.tick, 0);

    engine.queue_command(PlayerCommand::Resume);
    let snapshot = engine.frame(FIXED_DT);
    assert!(!snapshot.paused);
    assert_eq!(snapshot.time.tick, 1);
}

#[test]
fn test_speed_controls_steps_per_frame() {
    let mut engine = engine(GameConfig::default());
    engine.queue_commands([PlayerCommand::StartWave, PlayerCommand::CycleSpeed]);
    let snapshot = engine.frame(FIXED_DT);
    assert_eq!(snapshot.speed, SpeedMultiplier::X2);
    assert_eq!(snapshot.time.tick, 2);

    engine.queue_command(PlayerCommand::SetSpeed {
        multiplier: SpeedMultiplier::X4,
    });
    let snapshot = engine.frame(FIXED_DT);
    assert_eq!(snapshot.time.tick, 6);

    engine.queue_command(PlayerCommand::CycleSpeed);
    let snapshot = engine.frame(FIXED_DT);
    assert_eq!(snapshot.speed, SpeedMultiplier::X1);
    assert_eq!(snapshot.time.tick, 7);
}

#[test]
fn test_restart_resets_game() {
    let mut engine = engine(GameConfig::default());
    engine.queue_commands([
        PlayerCommand::PlaceTower {
            cell: GridCell::new(4, 2),
            archetype: TowerArchetype::Basic,
        },
        PlayerCommand::SetSpeed {
            multiplier: SpeedMultiplier::X2,
        },
        PlayerCommand::StartWave,
    ]);
    for _ in 0..200 {
        engine.frame(FIXED_DT);
    }

    engine.queue_command(PlayerCommand::Restart);
    let snapshot = engine.frame(FIXED_DT);
    assert_eq!(snapshot.phase, GamePhase::Ready);
    assert_eq!(snapshot.time.tick, 0);
    assert_eq!(snapshot.gold, 250);
    assert_eq!(snapshot.wave.current, 0);
    assert!(snapshot.enemies.is_empty());
    assert!(snapshot.towers.is_empty());
    assert!(snapshot.projectiles.is_empty());
    assert_eq!(snapshot.speed, SpeedMultiplier::X2);
    assert!(snapshot.events.contains(&GameEvent::PhaseChanged {
        from: GamePhase::Playing,
        to: GamePhase::Ready
    }));
}

// ---- Determinism ----

/// Run the same scripted game at `multiplier` for `ticks` simulation steps.
fn scripted_run(multiplier: SpeedMultiplier, ticks: u32) -> (Vec<GameEvent>, GameStateSnapshot, Vec<f64>) {
    let config = GameConfig {
        starting_gold: 10_000,
        ..Default::default()
    };
    let mut engine = engine(config);
    let towers = [
        (GridCell::new(4, 2), TowerArchetype::Basic),
        (GridCell::new(6, 2), TowerArchetype::Sniper),
        (GridCell::new(7, 5), TowerArchetype::Sniper),
        (GridCell::new(3, 7), TowerArchetype::Basic),
        (GridCell::new(5, 10), TowerArchetype::Sniper),
        (GridCell::new(9, 10), TowerArchetype::Basic),
    ];
    engine.queue_commands(
        towers
            .iter()
            .map(|&(cell, archetype)| PlayerCommand::PlaceTower { cell, archetype }),
    );
    engine.queue_commands([
        PlayerCommand::SetSpeed { multiplier },
        PlayerCommand::StartWave,
    ]);

    let frames = ticks / multiplier.steps();
    let mut events = Vec::new();
    let mut last = GameStateSnapshot::default();
    for _ in 0..frames {
        last = engine.frame(FIXED_DT);
        events.append(&mut last.events);
    }

    let mut fire_times: Vec<(u32, f64)> = engine
        .world()
        .query::<&Tower>()
        .iter()
        .map(|(_, tower)| (tower.id.0, tower.last_fire_secs))
        .collect();
    fire_times.sort_by_key(|(id, _)| *id);
    last.speed = SpeedMultiplier::X1;
    (events, last, fire_times.into_iter().map(|(_, t)| t).collect())
}

#[test]
fn test_same_game_at_every_speed() {
    let ticks = 1_800;
    let (events_1x, final_1x, fire_1x) = scripted_run(SpeedMultiplier::X1, ticks);
    assert_eq!(final_1x.time.tick, u64::from(ticks));
    assert!(
        events_1x
            .iter()
            .any(|e| matches!(e, GameEvent::ProjectileFired { .. })),
        "script should exercise the towers"
    );

    for multiplier in [SpeedMultiplier::X2, SpeedMultiplier::X4] {
        let (events, last, fire) = scripted_run(multiplier, ticks);
        assert_eq!(events, events_1x, "{multiplier:?} event stream diverged");
        assert_eq!(fire, fire_1x, "{multiplier:?} fire timing diverged");
        assert_eq!(
            serde_json::to_string(&last).unwrap(),
            serde_json::to_string(&final_1x).unwrap(),
            "{multiplier:?} final snapshot diverged"
        );
    }
}
