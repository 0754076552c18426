use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rampart_app::autoplay;
use rampart_app::game_loop::{self, RunOptions};
use rampart_app::state::RunSummary;
use rampart_core::commands::PlayerCommand;
use rampart_core::config::GameConfig;
use rampart_core::enums::SpeedMultiplier;
use rampart_sim::SimulationEngine;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless RAMPART tower-defence runner", long_about = None)]
struct Cli {
    /// Game configuration (JSON). Stock map and waves when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Playback speed: 1, 2 or 4.
    #[arg(long, default_value_t = 1)]
    speed: u32,
    /// Stop after this many frames.
    #[arg(long)]
    max_frames: Option<u64>,
    /// Pace frames against the wall clock instead of fast-forwarding.
    #[arg(long)]
    realtime: bool,
    /// Skip the scripted opening build.
    #[arg(long)]
    no_towers: bool,
    /// Print the final snapshot as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let speed = SpeedMultiplier::from_factor(cli.speed)
        .with_context(|| format!("unsupported speed {}; use 1, 2 or 4", cli.speed))?;

    let mut engine = SimulationEngine::new(config).context("invalid game configuration")?;
    engine.queue_command(PlayerCommand::SetSpeed { multiplier: speed });
    if !cli.no_towers {
        let opening = autoplay::opening_build(engine.config());
        info!(towers = opening.len(), "placing opening build");
        engine.queue_commands(opening);
    }

    let options = RunOptions {
        max_frames: cli.max_frames,
        auto_start_waves: true,
    };
    let summary = if cli.realtime {
        game_loop::spawn_game_loop(engine, options)?.join()?
    } else {
        game_loop::run_headless(&mut engine, options)
    };

    report(&summary);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary.snapshot)?);
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    GameConfig::from_json_str(&text).with_context(|| format!("load config: {}", path.display()))
}

fn report(summary: &RunSummary) {
    let snapshot = &summary.snapshot;
    info!(
        phase = ?snapshot.phase,
        wave = snapshot.wave.current,
        waves = snapshot.wave.total,
        gold = snapshot.gold,
        health = snapshot.health,
        killed = snapshot.score.enemies_killed,
        leaked = snapshot.score.enemies_leaked,
        shots = snapshot.score.shots_fired,
        frames = summary.frames,
        sim_secs = snapshot.time.elapsed_secs,
        "run finished"
    );
}
