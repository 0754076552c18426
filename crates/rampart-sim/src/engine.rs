//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems at a fixed timestep, and produces `GameStateSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use tracing::{debug, info, warn};

use rampart_core::commands::PlayerCommand;
use rampart_core::components::{Tower, TowerId};
use rampart_core::config::{ConfigError, GameConfig};
use rampart_core::enums::{GamePhase, SpeedMultiplier, TowerArchetype};
use rampart_core::events::{CommandError, GameEvent};
use rampart_core::state::GameStateSnapshot;
use rampart_core::types::{GridCell, SimTime};

use crate::clock::FrameClock;
use crate::economy::{Economy, ScoreState};
use crate::path::Path;
use crate::scheduler::WaveScheduler;
use crate::systems;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: GameConfig,
    path: Path,
    world: World,
    time: SimTime,
    phase: GamePhase,
    clock: FrameClock,
    scheduler: WaveScheduler,
    economy: Economy,
    score: ScoreState,
    next_enemy_id: u32,
    next_tower_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create a new engine from a configuration. The configuration is
    /// validated once here and never changes afterwards.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let path = Path::from_cells(&config.path_cells)?;
        let economy = Economy::new(&config);
        Ok(Self {
            config,
            path,
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            clock: FrameClock::default(),
            scheduler: WaveScheduler::default(),
            economy,
            score: ScoreState::default(),
            next_enemy_id: 1,
            next_tower_id: 1,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Queue a player command for processing at the next frame boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Feed one frame of real elapsed time.
    ///
    /// Queued commands are applied first, then as many fixed steps run as the
    /// frame clock releases. Stepping stops early if the game ends.
    pub fn frame(&mut self, real_dt: f64) -> GameStateSnapshot {
        self.process_commands();

        let steps = self.clock.advance(real_dt);
        for _ in 0..steps {
            if !self.phase.is_simulating() {
                break;
            }
            self.step();
        }

        self.snapshot()
    }

    /// Apply queued commands and run exactly one fixed step, ignoring the
    /// frame clock and its pause flag.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();
        if self.phase.is_simulating() {
            self.step();
        }
        self.snapshot()
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn speed(&self) -> SpeedMultiplier {
        self.clock.multiplier
    }

    pub fn is_paused(&self) -> bool {
        self.clock.paused
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn economy(&self) -> Economy {
        self.economy
    }

    pub fn score(&self) -> ScoreState {
        self.score
    }

    pub fn scheduler(&self) -> WaveScheduler {
        self.scheduler
    }

    /// Spawn an enemy of the current wave at the path start (for tests).
    #[cfg(test)]
    pub fn spawn_test_enemy(
        &mut self,
        archetype: rampart_core::enums::EnemyArchetype,
    ) -> rampart_core::components::EnemyId {
        let id = rampart_core::components::EnemyId(self.next_enemy_id);
        self.next_enemy_id += 1;
        world_setup::spawn_enemy(
            &mut self.world,
            id,
            archetype,
            self.config.enemies.stats(archetype),
            self.path.start(),
            self.scheduler.current_wave,
        );
        id
    }

    /// Get a mutable reference to the ECS world (for tests).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn snapshot(&mut self) -> GameStateSnapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.clock,
            &self.scheduler,
            self.config.waves.len(),
            &self.economy,
            &self.score,
            events,
        )
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        let result = match command {
            PlayerCommand::StartWave => self.start_wave(),
            PlayerCommand::PlaceTower { cell, archetype } => self.place_tower(cell, archetype),
            PlayerCommand::SetSpeed { multiplier } => {
                self.clock.multiplier = multiplier;
                Ok(())
            }
            PlayerCommand::CycleSpeed => {
                self.clock.multiplier = self.clock.multiplier.cycle();
                Ok(())
            }
            PlayerCommand::Pause => {
                self.clock.paused = true;
                Ok(())
            }
            PlayerCommand::Resume => {
                self.clock.paused = false;
                Ok(())
            }
            PlayerCommand::Restart => {
                self.restart();
                Ok(())
            }
        };

        if let Err(reason) = result {
            warn!(%reason, "command rejected");
            self.events.push(GameEvent::CommandRejected { reason });
        }
    }

    fn start_wave(&mut self) -> Result<(), CommandError> {
        if !matches!(self.phase, GamePhase::Ready | GamePhase::WaveComplete) {
            return Err(CommandError::WrongPhase(self.phase));
        }
        let scheduler = self
            .scheduler
            .start_next_wave(&self.config.waves)
            .ok_or(CommandError::NoMoreWaves)?;
        self.scheduler = scheduler;

        let wave = scheduler.current_wave;
        info!(wave, total = self.config.waves.len(), "wave started");
        self.events.push(GameEvent::WaveStarted { wave });
        self.set_phase(GamePhase::WaveStart);
        Ok(())
    }

    fn place_tower(&mut self, cell: GridCell, archetype: TowerArchetype) -> Result<(), CommandError> {
        if self.phase.is_terminal() {
            return Err(CommandError::WrongPhase(self.phase));
        }
        if cell.gx >= self.config.grid_columns || cell.gy >= self.config.grid_rows {
            return Err(CommandError::OutOfBounds(cell));
        }
        if self.config.path_cells.contains(&cell) {
            return Err(CommandError::OnPath(cell));
        }
        let occupied = self
            .world
            .query::<&Tower>()
            .iter()
            .any(|(_, tower)| tower.cell == cell);
        if occupied {
            return Err(CommandError::Occupied(cell));
        }

        let stats = self.config.towers.stats(archetype);
        self.economy.spend(stats.cost)?;

        let id = TowerId(self.next_tower_id);
        self.next_tower_id += 1;
        world_setup::spawn_tower(&mut self.world, id, archetype, stats, cell);
        self.score.towers_built += 1;
        debug!(tower = id.0, ?archetype, gx = cell.gx, gy = cell.gy, gold = self.economy.gold, "tower placed");
        self.events.push(GameEvent::TowerPlaced {
            tower: id,
            archetype,
            cell,
        });
        Ok(())
    }

    /// Discard the current game. Playback speed is kept; pause is lifted.
    fn restart(&mut self) {
        self.world.clear();
        self.time = SimTime::default();
        self.clock = FrameClock {
            multiplier: self.clock.multiplier,
            ..Default::default()
        };
        self.scheduler = WaveScheduler::default();
        self.economy = Economy::new(&self.config);
        self.score = ScoreState::default();
        self.next_enemy_id = 1;
        self.next_tower_id = 1;
        info!("game restarted");
        self.set_phase(GamePhase::Ready);
    }

    fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        info!(?from, ?to, "phase changed");
        self.events.push(GameEvent::PhaseChanged { from, to });
    }

    /// Run one fixed step: every system in order, then phase transitions.
    fn step(&mut self) {
        let dt = self.time.dt();

        // 1. Wave scheduler
        let wave_tick = systems::wave_spawner::run(
            &mut self.world,
            &self.path,
            &self.config,
            &mut self.scheduler,
            &mut self.next_enemy_id,
            dt,
            &mut self.events,
        );
        if self.phase == GamePhase::WaveStart && self.scheduler.active {
            self.set_phase(GamePhase::Playing);
        }
        // 2. Enemy movement and leaks
        systems::movement::run_enemies(
            &mut self.world,
            &self.path,
            dt,
            self.config.leak_damage,
            &mut self.economy,
            &mut self.score,
            &mut self.events,
        );
        // 3. Towers
        systems::fire_control::run(
            &mut self.world,
            &self.path,
            self.config.projectile_speed,
            &self.time,
            &mut self.score,
            &mut self.events,
        );
        // 4. Projectile movement
        systems::movement::run_projectiles(&mut self.world, dt);
        // 5. Collision resolution
        systems::collision::run(
            &mut self.world,
            self.config.hit_radius,
            &mut self.economy,
            &mut self.score,
            &mut self.events,
        );
        // 6. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        self.time.advance();

        // 7. Phase transitions
        if wave_tick.wave_complete {
            let wave = self.scheduler.current_wave;
            info!(wave, tick = self.time.tick, "wave complete");
            self.events.push(GameEvent::WaveCompleted { wave });
        }
        if self.economy.is_defeated() {
            self.set_phase(GamePhase::GameOver);
        } else if wave_tick.wave_complete {
            if self.scheduler.is_last_wave(&self.config.waves) {
                self.set_phase(GamePhase::Victory);
            } else {
                self.set_phase(GamePhase::WaveComplete);
            }
        }
    }
}
