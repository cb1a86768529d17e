//! Player intent: per-frame control signals and discrete commands.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// Normalized per-frame control intent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlSignal {
    /// Stick pitch in [-1, 1].
    pub pitch: f32,
    /// Stick roll in [-1, 1].
    pub roll: f32,
    /// Throttle in [-1, 1]: negative slows down, positive speeds up.
    pub throttle: f32,
    /// Trigger held.
    pub fire: bool,
}

impl ControlSignal {
    /// Neutral stick, no throttle, trigger released.
    pub const NEUTRAL: Self = Self {
        pitch: 0.0,
        roll: 0.0,
        throttle: 0.0,
        fire: false,
    };

    /// Copy with every axis forced into [-1, 1]. NaN axes become 0.
    pub fn clamped(self) -> Self {
        Self {
            pitch: clamp_axis(self.pitch),
            roll: clamp_axis(self.roll),
            throttle: clamp_axis(self.throttle),
            fire: self.fire,
        }
    }
}

fn clamp_axis(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

/// Edge-triggered toggles collected since the last read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toggles {
    pub camera: bool,
    pub music: bool,
    pub sfx: bool,
}

impl Toggles {
    pub fn any(&self) -> bool {
        self.camera || self.music || self.sfx
    }
}

/// Discrete player actions handled by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Switch between follow and free camera.
    ToggleCamera,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Tear down every pool and start a fresh sortie with the same seed stream.
    Restart,
}
