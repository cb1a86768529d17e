//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Kind of pooled entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Projectile,
    Adversary,
    Explosion,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    Paused,
}

/// Camera operating mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraMode {
    /// Smoothed chase camera behind the aircraft.
    #[default]
    Follow,
    /// Reserved. The rig holds its last transform.
    Free,
}

/// How per-frame smoothing factors are derived from the frame time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmoothingMode {
    /// `min(1, rate * dt)`; only exact at the nominal frame rate.
    #[default]
    Linear,
    /// `1 - exp(-rate * dt)`; frame-rate independent.
    Exponential,
}

/// Coarse airspeed band shown on the HUD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedBand {
    Slow,
    #[default]
    Medium,
    Fast,
}
