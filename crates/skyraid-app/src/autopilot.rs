//! Scripted control source for headless runs.

use skyraid_core::commands::{ControlSignal, Toggles};
use skyraid_core::ports::ControlSource;

/// Weaves over the city firing short bursts. A pure function of elapsed
/// time, so runs with the same seed and frame times are repeatable.
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    elapsed: f32,
    pending: Toggles,
    camera_cycle: Option<f32>,
}

/// Burst period and the part of it the trigger is held (seconds).
const BURST_PERIOD: f32 = 1.5;
const BURST_LENGTH: f32 = 0.6;

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch camera mode every `period` seconds of flight. Non-positive or
    /// non-finite periods disable the cycle.
    pub fn with_camera_cycle(mut self, period: f32) -> Self {
        self.camera_cycle = (period.is_finite() && period > 0.0).then_some(period);
        self
    }

    /// Raise toggles to be read on the next frame.
    pub fn raise(&mut self, toggles: Toggles) {
        self.pending.camera |= toggles.camera;
        self.pending.music |= toggles.music;
        self.pending.sfx |= toggles.sfx;
    }

    fn signal_at(t: f32) -> ControlSignal {
        ControlSignal {
            pitch: 0.3 * (0.25 * t).sin(),
            roll: 0.6 * (0.4 * t).sin(),
            throttle: 0.2 * (0.1 * t).sin(),
            fire: t.rem_euclid(BURST_PERIOD) < BURST_LENGTH,
        }
    }
}

impl ControlSource for Autopilot {
    fn sample(&mut self, dt: f32) -> ControlSignal {
        let before = self.elapsed;
        self.elapsed += dt;
        if let Some(period) = self.camera_cycle {
            if (self.elapsed / period).floor() > (before / period).floor() {
                self.raise(Toggles {
                    camera: true,
                    ..Default::default()
                });
            }
        }
        Self::signal_at(self.elapsed)
    }

    fn take_toggles(&mut self) -> Toggles {
        std::mem::take(&mut self.pending)
    }
}
