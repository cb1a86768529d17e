//! State shared between the CLI thread and the game loop thread.

use std::sync::{Arc, Mutex};

use skyraid_core::commands::PlayerCommand;
use skyraid_core::state::FrameSnapshot;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot published by the game loop, for polling from other threads.
/// `None` until the first tick completes.
pub type LatestSnapshot = Arc<Mutex<Option<FrameSnapshot>>>;

pub fn latest_snapshot() -> LatestSnapshot {
    Arc::new(Mutex::new(None))
}
