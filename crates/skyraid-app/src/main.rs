use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use skyraid_app::autopilot::Autopilot;
use skyraid_app::driver::{or_fallback, DriverError, FrameDriver};
use skyraid_app::game_loop;
use skyraid_app::logging::{init_tracing, LogFormat};
use skyraid_app::sinks::{CueRecorder, TracingHud};
use skyraid_app::state::{self, GameLoopCommand};
use skyraid_core::commands::Toggles;
use skyraid_core::config::Tuning;
use skyraid_core::constants::TICK_RATE;
use skyraid_core::ports::{AudioSink, NullAudio};
use skyraid_sim::{SimConfig, SimulationEngine};

/// Headless arcade flight-combat simulation flown by an autopilot.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file overriding any subset of the default tuning
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for cosmetic randomness
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Simulated seconds to fly
    #[arg(long, default_value_t = 30.0)]
    seconds: f32,

    /// Frames per simulated second
    #[arg(long, default_value_t = TICK_RATE)]
    tick_rate: u32,

    /// Log line format; falls back to LOG_FORMAT
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,

    /// Pace frames against the wall clock on a game loop thread
    #[arg(long)]
    realtime: bool,

    /// Record audio cue names to this file
    #[arg(long)]
    audio_log: Option<PathBuf>,

    /// Switch camera mode every this many simulated seconds
    #[arg(long)]
    camera_cycle: Option<f32>,

    /// Start with music switched off
    #[arg(long)]
    mute_music: bool,

    /// Start with sound effects switched off
    #[arg(long)]
    mute_sfx: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_format.unwrap_or_else(LogFormat::from_env));

    let tuning = match &args.config {
        Some(path) => Tuning::load(path)
            .map_err(DriverError::from)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };

    let audio: Box<dyn AudioSink> = match &args.audio_log {
        Some(path) => or_fallback(
            CueRecorder::create(path).map(|r| Box::new(r) as Box<dyn AudioSink>),
            Box::new(NullAudio),
        ),
        None => Box::new(NullAudio),
    };

    let engine = SimulationEngine::new(SimConfig {
        seed: args.seed,
        tuning,
    });
    let mut pilot = Autopilot::new();
    if let Some(period) = args.camera_cycle {
        pilot = pilot.with_camera_cycle(period);
    }
    pilot.raise(Toggles {
        music: args.mute_music,
        sfx: args.mute_sfx,
        ..Default::default()
    });
    let mut driver = FrameDriver::new(
        engine,
        Box::new(pilot),
        audio,
        Box::new(TracingHud::default()),
    );

    let tick_rate = args.tick_rate.max(1);
    let seconds = args.seconds.max(0.0).min(86_400.0);
    let ticks = (seconds * tick_rate as f32).round() as u64;
    tracing::info!(seed = args.seed, seconds, tick_rate, realtime = args.realtime, "sortie started");

    let snapshot = if args.realtime {
        let latest = state::latest_snapshot();
        let (tx, handle) = game_loop::spawn_game_loop(driver, tick_rate, latest.clone())?;
        std::thread::sleep(Duration::from_secs_f32(seconds));
        // The loop may already be gone; joining reports why.
        let _ = tx.send(GameLoopCommand::Shutdown);
        handle
            .join()
            .map_err(|_| anyhow::anyhow!("game loop thread panicked"))?;
        let mut last = latest
            .lock()
            .map_err(|_| anyhow::anyhow!("snapshot lock poisoned"))?;
        last.take()
    } else {
        game_loop::run_headless(&mut driver, tick_rate, ticks)
    };

    let stats = snapshot.map(|s| s.stats).unwrap_or_default();
    tracing::info!(
        score = stats.score,
        hits = stats.hits,
        shots = stats.shots,
        accuracy = stats.accuracy,
        "sortie finished"
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&stats).context("encoding final stats")?
    );
    Ok(())
}
