//! State shared between the game loop thread and its controller.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use anyhow::anyhow;

use rampart_core::commands::PlayerCommand;
use rampart_core::state::GameStateSnapshot;

/// Commands sent from the controller to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, written by the game loop after every frame.
pub type SharedSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;

/// What a finished game loop reports.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub frames: u64,
    pub snapshot: GameStateSnapshot,
}

/// Controller side of a running game loop thread.
pub struct GameLoopHandle {
    pub command_tx: mpsc::Sender<GameLoopCommand>,
    pub latest_snapshot: SharedSnapshot,
    pub thread: JoinHandle<RunSummary>,
}

impl GameLoopHandle {
    /// Forward a player command. Returns `false` once the loop has exited.
    pub fn send(&self, command: PlayerCommand) -> bool {
        self.command_tx
            .send(GameLoopCommand::PlayerCommand(command))
            .is_ok()
    }

    /// Copy of the most recent snapshot, if any frame has run.
    pub fn latest(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|snapshot| snapshot.clone())
    }

    /// Ask the loop to stop. It exits at the next frame boundary.
    pub fn shutdown(&self) {
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
    }

    /// Wait for the loop to finish on its own.
    pub fn join(self) -> anyhow::Result<RunSummary> {
        // The sender stays alive until the thread is done, so the loop does
        // not mistake the join for a disconnect.
        let GameLoopHandle {
            command_tx, thread, ..
        } = self;
        let summary = thread
            .join()
            .map_err(|_| anyhow!("game loop thread panicked"));
        drop(command_tx);
        summary
    }
}
