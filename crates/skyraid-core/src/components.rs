//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::types::{EntityId, VisualHandle};

/// Marks an entity as a round fired by the aircraft.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile;

/// Marks an entity as a hovering adversary craft.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Adversary;

/// Marks an entity as an explosion effect.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Explosion;

/// Lifecycle state shared by every pooled entity.
///
/// `alive` only ever goes from true to false.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Lifecycle {
    pub id: EntityId,
    /// Seconds since spawn.
    pub age: f64,
    /// Auto-expiry age; `None` means the entity dies only when destroyed.
    pub max_lifetime: Option<f32>,
    pub alive: bool,
}

/// Renderer-side visual. A `None` handle is valid and simply means
/// there is nothing to release.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Visual {
    pub handle: Option<VisualHandle>,
}

/// Bounding box about the entity origin, already oriented to the entity.
/// Translated by the entity position for overlap tests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LocalBounds {
    pub min: Vec3,
    pub max: Vec3,
}

/// Hover parameters of an adversary, drawn once at spawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HoverMotion {
    /// Phase accumulator driving bob and sway (radians).
    pub phase: f32,
    /// Phase advance per second.
    pub hover_speed: f32,
    /// Bob amplitude.
    pub hover_height: f32,
    /// Spin about the vertical axis (rad/s).
    pub spin_rate: f32,
    /// Current spin angle (radians).
    pub heading: f32,
}

/// One debris particle of an explosion, relative to the explosion center.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub offset: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
    pub scale: f32,
    pub opacity: f32,
    /// Hue, saturation, lightness in [0, 1].
    pub hsl: [f32; 3],
}

/// The bright flash at the core of an explosion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Flash {
    pub radius: f32,
    pub scale: f32,
    pub opacity: f32,
}

/// Visual state of an explosion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionBurst {
    pub size: f32,
    pub particles: Vec<Particle>,
    pub flash: Flash,
}
