//! Frame driver: composes the simulation with its collaborators.
//!
//! Each frame the driver reads the toggles and the control signal, ticks the
//! engine, forwards audio cues and pushes the stats to the HUD. Collaborators
//! are optional in practice: a failed one is swapped for its null version
//! and the simulation runs unchanged.

use thiserror::Error;

use skyraid_core::commands::PlayerCommand;
use skyraid_core::config::ConfigError;
use skyraid_core::ports::{AudioSink, ControlSource, HudSink};
use skyraid_core::state::{FrameSnapshot, GameStats};
use skyraid_sim::SimulationEngine;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("invalid tuning: {0}")]
    Config(#[from] ConfigError),
    #[error("{name} failed to initialize: {reason}")]
    CollaboratorInit { name: &'static str, reason: String },
    #[error("failed to spawn game loop thread: {0}")]
    LoopSpawn(#[source] std::io::Error),
}

/// Use `attempt` if it succeeded, otherwise log the failure and fall back.
pub fn or_fallback<T: ?Sized>(attempt: Result<Box<T>, DriverError>, fallback: Box<T>) -> Box<T> {
    match attempt {
        Ok(collaborator) => collaborator,
        Err(err) => {
            tracing::warn!(error = %err, "collaborator unavailable, continuing without it");
            fallback
        }
    }
}

/// Runs the engine one frame at a time against its collaborators.
pub struct FrameDriver {
    engine: SimulationEngine,
    controls: Box<dyn ControlSource>,
    audio: Box<dyn AudioSink>,
    hud: Box<dyn HudSink>,
    music_enabled: bool,
    sfx_enabled: bool,
    last_published: Option<GameStats>,
}

impl FrameDriver {
    pub fn new(
        engine: SimulationEngine,
        controls: Box<dyn ControlSource>,
        mut audio: Box<dyn AudioSink>,
        hud: Box<dyn HudSink>,
    ) -> Self {
        audio.set_music_enabled(true);
        Self {
            engine,
            controls,
            audio,
            hud,
            music_enabled: true,
            sfx_enabled: true,
            last_published: None,
        }
    }

    /// Queue a command for the next frame.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.engine.queue_command(command);
    }

    /// Run one frame of `dt` seconds.
    pub fn step(&mut self, dt: f32) -> FrameSnapshot {
        let toggles = self.controls.take_toggles();
        if toggles.camera {
            self.engine.queue_command(PlayerCommand::ToggleCamera);
        }
        if toggles.music {
            self.music_enabled = !self.music_enabled;
            self.audio.set_music_enabled(self.music_enabled);
            tracing::debug!(enabled = self.music_enabled, "music toggled");
        }
        if toggles.sfx {
            self.sfx_enabled = !self.sfx_enabled;
            tracing::debug!(enabled = self.sfx_enabled, "sound effects toggled");
        }

        let signal = self.controls.sample(dt);
        let snapshot = self.engine.tick(dt, signal);

        if self.sfx_enabled {
            for cue in &snapshot.audio_events {
                self.audio.play(*cue);
            }
        }

        if self.last_published != Some(snapshot.stats) {
            self.hud.publish(&snapshot.stats);
            self.last_published = Some(snapshot.stats);
        }

        snapshot
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn music_enabled(&self) -> bool {
        self.music_enabled
    }

    pub fn sfx_enabled(&self) -> bool {
        self.sfx_enabled
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use glam::Vec3;

    use skyraid_core::commands::{ControlSignal, Toggles};
    use skyraid_core::constants::DT;
    use skyraid_core::enums::{CameraMode, EntityKind};
    use skyraid_core::events::AudioCue;
    use skyraid_core::ports::{NullAudio, NullHud};
    use skyraid_sim::SimConfig;

    use super::*;
    use crate::autopilot::Autopilot;

    #[derive(Default)]
    struct Log {
        cues: Vec<AudioCue>,
        music: Vec<bool>,
        published: Vec<GameStats>,
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Log>>);

    impl AudioSink for Recorder {
        fn play(&mut self, cue: AudioCue) {
            self.0.lock().unwrap().cues.push(cue);
        }

        fn set_music_enabled(&mut self, enabled: bool) {
            self.0.lock().unwrap().music.push(enabled);
        }
    }

    impl HudSink for Recorder {
        fn publish(&mut self, stats: &GameStats) {
            self.0.lock().unwrap().published.push(*stats);
        }
    }

    /// Fires on the first frame, then holds neutral. Toggles queue up per frame.
    struct Script {
        frame: usize,
        toggles: Vec<Toggles>,
    }

    impl ControlSource for Script {
        fn sample(&mut self, _dt: f32) -> ControlSignal {
            self.frame += 1;
            ControlSignal {
                fire: self.frame == 1,
                ..ControlSignal::NEUTRAL
            }
        }

        fn take_toggles(&mut self) -> Toggles {
            if self.toggles.is_empty() {
                Toggles::default()
            } else {
                self.toggles.remove(0)
            }
        }
    }

    fn range_engine() -> SimulationEngine {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.clear_pool(EntityKind::Adversary);
        engine.place_aircraft(Vec3::new(0.0, 20.0, -10.0), 0.0, 0.0, 0.0);
        engine.spawn_adversary_at(Vec3::new(0.0, 20.0, 0.0));
        engine
    }

    fn driver_with(toggles: Vec<Toggles>) -> (FrameDriver, Recorder) {
        let recorder = Recorder::default();
        let driver = FrameDriver::new(
            range_engine(),
            Box::new(Script { frame: 0, toggles }),
            Box::new(recorder.clone()),
            Box::new(recorder.clone()),
        );
        (driver, recorder)
    }

    #[test]
    fn test_cues_and_hud_follow_a_hit() {
        let (mut driver, recorder) = driver_with(Vec::new());
        for _ in 0..4 {
            driver.step(DT);
        }
        let log = recorder.0.lock().unwrap();
        assert_eq!(
            log.cues,
            vec![AudioCue::Shoot, AudioCue::Explosion, AudioCue::Hit]
        );
        let last = log.published.last().unwrap();
        assert_eq!(last.score, 100);
        assert_eq!(last.hits, 1);
        assert_eq!(last.shots, 1);
        assert_eq!(last.accuracy, 100.0);
        assert_eq!(log.music, vec![true]);
    }

    #[test]
    fn test_sfx_toggle_mutes_cues_only() {
        let (mut driver, recorder) = driver_with(vec![Toggles {
            sfx: true,
            ..Default::default()
        }]);
        for _ in 0..4 {
            driver.step(DT);
        }
        assert!(!driver.sfx_enabled());
        assert!(recorder.0.lock().unwrap().cues.is_empty());
        // Scoring is unaffected.
        assert_eq!(driver.engine().stats().score, 100);
    }

    #[test]
    fn test_music_and_camera_toggles() {
        let toggle_both = Toggles {
            camera: true,
            music: true,
            sfx: false,
        };
        let (mut driver, recorder) = driver_with(vec![toggle_both, Toggles::default(), toggle_both]);

        let snap = driver.step(DT);
        assert_eq!(snap.camera.mode, CameraMode::Free);
        assert!(!driver.music_enabled());
        driver.step(DT);
        let snap = driver.step(DT);
        assert_eq!(snap.camera.mode, CameraMode::Follow);
        assert!(driver.music_enabled());
        assert_eq!(recorder.0.lock().unwrap().music, vec![true, false, true]);
    }

    #[test]
    fn test_autopilot_toggles_reach_the_driver() {
        let recorder = Recorder::default();
        let mut pilot = Autopilot::new().with_camera_cycle(0.5);
        pilot.raise(Toggles {
            music: true,
            sfx: true,
            ..Default::default()
        });
        let mut driver = FrameDriver::new(
            range_engine(),
            Box::new(pilot),
            Box::new(recorder.clone()),
            Box::new(recorder.clone()),
        );

        driver.step(0.25);
        assert!(!driver.music_enabled());
        assert!(!driver.sfx_enabled());
        driver.step(0.25);
        // The cycle toggle raised at 0.5s is read on the following frame.
        let snap = driver.step(0.25);
        assert_eq!(snap.camera.mode, CameraMode::Free);
        assert!(recorder.0.lock().unwrap().cues.is_empty());
    }

    #[test]
    fn test_hud_only_sees_changes() {
        let (mut driver, recorder) = driver_with(Vec::new());
        driver.queue_command(PlayerCommand::Pause);
        for _ in 0..10 {
            driver.step(DT);
        }
        // Paused from the first frame: nothing changes after the first publish.
        assert_eq!(recorder.0.lock().unwrap().published.len(), 1);
    }

    #[test]
    fn test_null_collaborators_match_real_ones() {
        let (mut real, _recorder) = driver_with(Vec::new());
        let mut null = FrameDriver::new(
            range_engine(),
            Box::new(Script {
                frame: 0,
                toggles: Vec::new(),
            }),
            Box::new(NullAudio),
            Box::new(NullHud),
        );
        for _ in 0..120 {
            let a = real.step(DT);
            let b = null.step(DT);
            assert_eq!(a.stats, b.stats);
            assert_eq!(a.aircraft.position, b.aircraft.position);
        }
    }

    #[test]
    fn test_failed_collaborator_falls_back() {
        let attempt: Result<Box<dyn AudioSink>, DriverError> = Err(DriverError::CollaboratorInit {
            name: "audio",
            reason: "no device".into(),
        });
        let mut audio = or_fallback(attempt, Box::new(NullAudio));
        audio.play(AudioCue::Shoot);

        let recorder = Recorder::default();
        let ok: Result<Box<dyn AudioSink>, DriverError> = Ok(Box::new(recorder.clone()));
        let mut audio = or_fallback(ok, Box::new(NullAudio));
        audio.play(AudioCue::Hit);
        assert_eq!(recorder.0.lock().unwrap().cues, vec![AudioCue::Hit]);
    }

    #[test]
    fn test_error_messages() {
        let err = DriverError::CollaboratorInit {
            name: "audio",
            reason: "no device".into(),
        };
        assert_eq!(err.to_string(), "audio failed to initialize: no device");
    }
}
