//! Headless collaborators: a HUD that logs and an audio sink that records
//! cue names instead of playing them.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use skyraid_core::events::AudioCue;
use skyraid_core::ports::{AudioSink, HudSink};
use skyraid_core::state::GameStats;

use crate::driver::DriverError;

/// HUD that reports score changes through `tracing`.
#[derive(Debug, Default)]
pub struct TracingHud {
    last_score: Option<u32>,
}

impl HudSink for TracingHud {
    fn publish(&mut self, stats: &GameStats) {
        if self.last_score != Some(stats.score) {
            tracing::info!(
                score = stats.score,
                hits = stats.hits,
                shots = stats.shots,
                accuracy = stats.accuracy,
                "score"
            );
            self.last_score = Some(stats.score);
        } else {
            tracing::trace!(shots = stats.shots, game_time = stats.game_time, "hud");
        }
    }
}

/// Audio sink that writes one line per cue. A write failure disables it.
pub struct CueRecorder<W: Write + Send> {
    out: Option<W>,
}

impl CueRecorder<BufWriter<File>> {
    /// Record cues to a file, truncating it.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, DriverError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| DriverError::CollaboratorInit {
            name: "audio",
            reason: format!("{}: {e}", path.display()),
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send> CueRecorder<W> {
    pub fn new(out: W) -> Self {
        Self { out: Some(out) }
    }

    fn write_line(&mut self, line: std::fmt::Arguments<'_>) {
        let Some(out) = self.out.as_mut() else {
            return;
        };
        if let Err(err) = out.write_fmt(line).and_then(|()| out.write_all(b"\n")) {
            tracing::warn!(error = %err, "audio recorder failed, disabling it");
            self.out = None;
        }
    }

    pub fn into_inner(self) -> Option<W> {
        self.out
    }
}

impl<W: Write + Send> AudioSink for CueRecorder<W> {
    fn play(&mut self, cue: AudioCue) {
        self.write_line(format_args!("{cue}"));
    }

    fn set_music_enabled(&mut self, enabled: bool) {
        let state = if enabled { "on" } else { "off" };
        self.write_line(format_args!("music {state}"));
    }
}
