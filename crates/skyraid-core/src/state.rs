//! Frame snapshot: the complete visible state handed to collaborators each tick.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::components::{Flash, Particle};
use crate::enums::{CameraMode, GamePhase, SpeedBand};
use crate::events::AudioCue;
use crate::types::{EntityId, SimTime};

/// Complete simulation state produced by one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub stats: GameStats,
    pub aircraft: AircraftView,
    pub camera: CameraView,
    /// Live rounds in spawn order.
    pub projectiles: Vec<ProjectileView>,
    /// Live adversaries in spawn order.
    pub adversaries: Vec<AdversaryView>,
    /// Running explosions in spawn order.
    pub explosions: Vec<ExplosionView>,
    /// Cues raised during this tick, in the order they happened.
    pub audio_events: Vec<AudioCue>,
}

/// Score and accuracy, as shown on the HUD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    pub score: u32,
    pub hits: u32,
    pub shots: u32,
    /// Hit percentage in [0, 100]; 0 before the first shot.
    pub accuracy: f32,
    /// Seconds of active play.
    pub game_time: f32,
}

/// Aircraft pose and gauges.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AircraftView {
    pub position: Vec3,
    pub orientation: Quat,
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
    pub speed: f32,
    pub speed_band: SpeedBand,
    /// Cosmetic propeller angle (radians).
    pub propeller_angle: f32,
}

/// Chase camera transform.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CameraView {
    pub mode: CameraMode,
    pub position: Vec3,
    pub look_at: Vec3,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: EntityId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub age: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AdversaryView {
    pub id: EntityId,
    pub position: Vec3,
    /// Spin angle about the vertical axis.
    pub heading: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionView {
    pub id: EntityId,
    pub position: Vec3,
    pub size: f32,
    /// Fraction of the lifetime elapsed, in [0, 1).
    pub progress: f32,
    pub particles: Vec<Particle>,
    pub flash: Flash,
}
