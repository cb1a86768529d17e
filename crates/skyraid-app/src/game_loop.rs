//! Game loop thread: runs the frame driver at a fixed rate.
//!
//! The driver is moved into the thread and handed back when the loop ends.
//! Commands arrive via `mpsc` channel. The latest snapshot is stored in
//! shared state for polling.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use skyraid_core::state::FrameSnapshot;

use crate::driver::{DriverError, FrameDriver};
use crate::state::{GameLoopCommand, LatestSnapshot};

/// Wall-clock duration of one tick.
pub fn tick_duration(tick_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(tick_rate.max(1)))
}

/// Simulated seconds per tick.
pub fn tick_dt(tick_rate: u32) -> f32 {
    1.0 / tick_rate.max(1) as f32
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and a handle that yields the driver back once
/// the loop has stopped.
pub fn spawn_game_loop(
    driver: FrameDriver,
    tick_rate: u32,
    latest_snapshot: LatestSnapshot,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<FrameDriver>), DriverError> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("skyraid-game-loop".into())
        .spawn(move || run_game_loop(driver, cmd_rx, tick_rate, &latest_snapshot))
        .map_err(DriverError::LoopSpawn)?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut driver: FrameDriver,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    tick_rate: u32,
    latest_snapshot: &std::sync::Mutex<Option<FrameSnapshot>>,
) -> FrameDriver {
    let period = tick_duration(tick_rate);
    let dt = tick_dt(tick_rate);
    let mut next_tick_time = Instant::now();
    tracing::info!(tick_rate, "game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => driver.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    tracing::info!(tick = driver.engine().time().tick, "game loop stopped");
                    return driver;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one frame (engine handles pause semantics internally)
        let snapshot = driver.step(dt);

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick
        next_tick_time += period;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > period * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            tracing::debug!("game loop behind schedule, resetting clock");
            next_tick_time = now;
        }
    }
}

/// Run `ticks` frames as fast as possible. Returns the last snapshot.
pub fn run_headless(driver: &mut FrameDriver, tick_rate: u32, ticks: u64) -> Option<FrameSnapshot> {
    let dt = tick_dt(tick_rate);
    let mut last = None;
    for _ in 0..ticks {
        last = Some(driver.step(dt));
    }
    last
}
