//! Game loop: feeds frame deltas into the simulation engine.
//!
//! `spawn_game_loop` runs a real-time loop on its own thread, paced at the
//! tick rate and fed with measured wall-clock deltas. The engine is moved into
//! that thread; commands arrive via `mpsc` channel and snapshots are stored in
//! shared state for polling. `run_headless` drives the same engine with exact
//! fixed deltas and no sleeping, for fast-forward runs and tests.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::{debug, info};

use rampart_core::constants::{FIXED_DT, TICK_RATE};
use rampart_core::enums::GamePhase;
use rampart_core::events::GameEvent;
use rampart_core::state::GameStateSnapshot;
use rampart_sim::SimulationEngine;

use crate::autoplay;
use crate::state::{GameLoopCommand, GameLoopHandle, RunSummary, SharedSnapshot};

/// Nominal duration of one frame.
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// When a loop stops and whether it plays by itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Stop after this many frames.
    pub max_frames: Option<u64>,
    /// Issue `StartWave` whenever the game is waiting for one.
    pub auto_start_waves: bool,
}

impl RunOptions {
    fn finished(&self, snapshot: &GameStateSnapshot, frames: u64) -> bool {
        snapshot.phase.is_terminal() || self.max_frames.is_some_and(|max| frames >= max)
    }
}

/// Spawns the real-time game loop in a new thread.
pub fn spawn_game_loop(engine: SimulationEngine, options: RunOptions) -> anyhow::Result<GameLoopHandle> {
    let (command_tx, command_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot: SharedSnapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let thread = std::thread::Builder::new()
        .name("rampart-game-loop".into())
        .spawn(move || run_game_loop(engine, command_rx, &shared, options))
        .context("failed to spawn game loop thread")?;

    Ok(GameLoopHandle {
        command_tx,
        latest_snapshot,
        thread,
    })
}

/// The real-time loop. Runs until finished, Shutdown, or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    command_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
    options: RunOptions,
) -> RunSummary {
    let mut frames = 0;
    let mut snapshot = GameStateSnapshot::default();
    let mut last_frame = Instant::now();
    let mut next_frame_time = last_frame;

    loop {
        // 1. Drain all pending commands
        loop {
            match command_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(command)) => engine.queue_command(command),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    return RunSummary { frames, snapshot };
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Feed measured real time into the engine
        let now = Instant::now();
        let real_dt = now.duration_since(last_frame).as_secs_f64();
        last_frame = now;
        snapshot = engine.frame(real_dt);
        frames += 1;
        log_events(&snapshot.events);

        // 3. Scripted input for the next frame
        if options.auto_start_waves {
            if let Some(command) = autoplay::next_command(&snapshot) {
                engine.queue_command(command);
            }
        }

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot.clone());
        }

        if options.finished(&snapshot, frames) {
            return RunSummary { frames, snapshot };
        }

        // 5. Sleep until next frame
        next_frame_time += FRAME_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > FRAME_DURATION * 2 {
            // Too far behind; the frame clock clamps the delta anyway
            next_frame_time = now;
        }
    }
}

/// Drive the engine with exact fixed deltas and no sleeping.
///
/// Without auto-start the run also ends as soon as the game waits for a
/// wave command, since nothing else can issue one.
pub fn run_headless(engine: &mut SimulationEngine, options: RunOptions) -> RunSummary {
    let mut frames = 0;
    loop {
        let snapshot = engine.frame(FIXED_DT);
        frames += 1;
        log_events(&snapshot.events);

        if options.finished(&snapshot, frames) {
            return RunSummary { frames, snapshot };
        }
        match autoplay::next_command(&snapshot) {
            Some(command) if options.auto_start_waves => engine.queue_command(command),
            Some(_) => return RunSummary { frames, snapshot },
            None => {}
        }
    }
}

fn log_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::WaveCompleted { wave } => info!(wave, "wave cleared"),
            GameEvent::PhaseChanged {
                to: GamePhase::GameOver,
                ..
            } => info!("base destroyed"),
            GameEvent::PhaseChanged {
                to: GamePhase::Victory,
                ..
            } => info!("all waves cleared"),
            other => debug!(event = ?other),
        }
    }
}
