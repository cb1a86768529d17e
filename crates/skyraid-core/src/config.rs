//! Runtime tuning, loadable from TOML.
//!
//! [`Tuning`] mirrors every gameplay constant in [`crate::constants`]. A TOML
//! file may override any subset of it; missing keys fall back to the
//! compile-time defaults, so a minimal file only lists what it changes:
//!
//! ```toml
//! smoothing = "exponential"
//!
//! [projectile]
//! cooldown_secs = 0.1
//! ```
//!
//! `constants.rs` stays the authoritative default source used by
//! `Tuning::default()`.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::enums::SmoothingMode;

/// Errors raised while loading or validating tuning.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("tuning value `{field}` = {value} is outside {range}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        range: &'static str,
    },
}

/// Complete runtime tuning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Smoothing formula shared by the flight model and the camera rig.
    pub smoothing: SmoothingMode,
    pub flight: FlightTuning,
    pub projectile: ProjectileTuning,
    pub adversary: AdversaryTuning,
    pub explosion: ExplosionTuning,
    pub collision: CollisionTuning,
    pub camera: CameraTuning,
    pub world: WorldTuning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightTuning {
    pub initial_speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub throttle_rate: f32,
    pub pitch_limit: f32,
    pub roll_limit: f32,
    pub pitch_sensitivity: f32,
    pub roll_sensitivity: f32,
    pub turn_sensitivity: f32,
    pub auto_level_rate: f32,
    pub deadzone: f32,
    pub sink_rate: f32,
    pub muzzle_offset: f32,
    pub initial_position: Vec3,
    pub initial_pitch: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub cooldown_secs: f32,
    pub speed: f32,
    pub lifetime_secs: f32,
    pub bounds_min: Vec3,
    pub bounds_max: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdversaryTuning {
    pub target_population: usize,
    pub spawn_interval_secs: f32,
    pub spawn_area_fraction: f32,
    pub min_altitude: f32,
    pub max_altitude: f32,
    pub hover_speed_min: f32,
    pub hover_speed_max: f32,
    pub hover_height_min: f32,
    pub hover_height_max: f32,
    pub spin_rate_min: f32,
    pub spin_rate_max: f32,
    pub bounds_min: Vec3,
    pub bounds_max: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionTuning {
    pub lifetime_secs: f32,
    pub min_particles: usize,
    pub max_particles: usize,
    pub gravity: f32,
    pub drag: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionTuning {
    pub hit_radius: f32,
    pub points_per_kill: u32,
    pub explosion_size: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    pub offset: Vec3,
    pub look_offset: Vec3,
    pub smoothing: f32,
    pub initial_position: Vec3,
    pub initial_look_at: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    pub city_radius: f32,
}

impl Default for FlightTuning {
    fn default() -> Self {
        Self {
            initial_speed: AIRCRAFT_INITIAL_SPEED,
            min_speed: AIRCRAFT_MIN_SPEED,
            max_speed: AIRCRAFT_MAX_SPEED,
            throttle_rate: THROTTLE_RATE,
            pitch_limit: PITCH_LIMIT,
            roll_limit: ROLL_LIMIT,
            pitch_sensitivity: PITCH_SENSITIVITY,
            roll_sensitivity: ROLL_SENSITIVITY,
            turn_sensitivity: TURN_SENSITIVITY,
            auto_level_rate: AUTO_LEVEL_RATE,
            deadzone: CONTROL_DEADZONE,
            sink_rate: LOW_SPEED_SINK_RATE,
            muzzle_offset: MUZZLE_OFFSET,
            initial_position: Vec3::from_array(AIRCRAFT_INITIAL_POSITION),
            initial_pitch: AIRCRAFT_INITIAL_PITCH,
        }
    }
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            cooldown_secs: FIRE_COOLDOWN_SECS,
            speed: PROJECTILE_SPEED,
            lifetime_secs: PROJECTILE_LIFETIME_SECS,
            bounds_min: Vec3::from_array(PROJECTILE_BOUNDS_MIN),
            bounds_max: Vec3::from_array(PROJECTILE_BOUNDS_MAX),
        }
    }
}

impl Default for AdversaryTuning {
    fn default() -> Self {
        Self {
            target_population: ADVERSARY_TARGET_POPULATION,
            spawn_interval_secs: ADVERSARY_SPAWN_INTERVAL_SECS,
            spawn_area_fraction: ADVERSARY_SPAWN_AREA_FRACTION,
            min_altitude: ADVERSARY_MIN_ALTITUDE,
            max_altitude: ADVERSARY_MAX_ALTITUDE,
            hover_speed_min: ADVERSARY_HOVER_SPEED_MIN,
            hover_speed_max: ADVERSARY_HOVER_SPEED_MAX,
            hover_height_min: ADVERSARY_HOVER_HEIGHT_MIN,
            hover_height_max: ADVERSARY_HOVER_HEIGHT_MAX,
            spin_rate_min: ADVERSARY_SPIN_RATE_MIN,
            spin_rate_max: ADVERSARY_SPIN_RATE_MAX,
            bounds_min: Vec3::from_array(ADVERSARY_BOUNDS_MIN),
            bounds_max: Vec3::from_array(ADVERSARY_BOUNDS_MAX),
        }
    }
}

impl Default for ExplosionTuning {
    fn default() -> Self {
        Self {
            lifetime_secs: EXPLOSION_LIFETIME_SECS,
            min_particles: EXPLOSION_MIN_PARTICLES,
            max_particles: EXPLOSION_MAX_PARTICLES,
            gravity: PARTICLE_GRAVITY,
            drag: PARTICLE_DRAG,
        }
    }
}

impl Default for CollisionTuning {
    fn default() -> Self {
        Self {
            hit_radius: HIT_RADIUS,
            points_per_kill: POINTS_PER_KILL,
            explosion_size: HIT_EXPLOSION_SIZE,
        }
    }
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            offset: Vec3::from_array(CAMERA_OFFSET),
            look_offset: Vec3::from_array(CAMERA_LOOK_OFFSET),
            smoothing: CAMERA_SMOOTHING,
            initial_position: Vec3::from_array(CAMERA_INITIAL_POSITION),
            initial_look_at: Vec3::from_array(CAMERA_INITIAL_LOOK_AT),
        }
    }
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            city_radius: CITY_RADIUS,
        }
    }
}

impl Tuning {
    /// Parse tuning from TOML text and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = toml::from_str(text)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and parse a tuning file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let f = &self.flight;
        positive("flight.min_speed", f.min_speed)?;
        ordered("flight.max_speed", f.min_speed, f.max_speed)?;
        within(
            "flight.initial_speed",
            f.initial_speed,
            f.min_speed,
            f.max_speed,
            "[flight.min_speed, flight.max_speed]",
        )?;
        non_negative("flight.throttle_rate", f.throttle_rate)?;
        positive("flight.pitch_limit", f.pitch_limit)?;
        positive("flight.roll_limit", f.roll_limit)?;
        non_negative("flight.pitch_sensitivity", f.pitch_sensitivity)?;
        non_negative("flight.roll_sensitivity", f.roll_sensitivity)?;
        finite("flight.turn_sensitivity", f.turn_sensitivity)?;
        non_negative("flight.auto_level_rate", f.auto_level_rate)?;
        within("flight.deadzone", f.deadzone, 0.0, 1.0, "[0, 1]")?;
        non_negative("flight.sink_rate", f.sink_rate)?;
        finite("flight.muzzle_offset", f.muzzle_offset)?;
        finite_vec("flight.initial_position", f.initial_position)?;
        within(
            "flight.initial_pitch",
            f.initial_pitch,
            -f.pitch_limit,
            f.pitch_limit,
            "[-flight.pitch_limit, flight.pitch_limit]",
        )?;

        let p = &self.projectile;
        non_negative("projectile.cooldown_secs", p.cooldown_secs)?;
        positive("projectile.speed", p.speed)?;
        positive("projectile.lifetime_secs", p.lifetime_secs)?;
        bounds("projectile.bounds_max", p.bounds_min, p.bounds_max)?;

        let a = &self.adversary;
        non_negative("adversary.spawn_interval_secs", a.spawn_interval_secs)?;
        within(
            "adversary.spawn_area_fraction",
            a.spawn_area_fraction,
            0.0,
            1.0,
            "[0, 1]",
        )?;
        ordered("adversary.max_altitude", a.min_altitude, a.max_altitude)?;
        ordered("adversary.hover_speed_max", a.hover_speed_min, a.hover_speed_max)?;
        ordered(
            "adversary.hover_height_max",
            a.hover_height_min,
            a.hover_height_max,
        )?;
        ordered("adversary.spin_rate_max", a.spin_rate_min, a.spin_rate_max)?;
        bounds("adversary.bounds_max", a.bounds_min, a.bounds_max)?;

        let e = &self.explosion;
        positive("explosion.lifetime_secs", e.lifetime_secs)?;
        if e.max_particles < e.min_particles {
            return Err(ConfigError::OutOfRange {
                field: "explosion.max_particles",
                value: e.max_particles as f32,
                range: ">= explosion.min_particles",
            });
        }
        finite("explosion.gravity", e.gravity)?;
        within("explosion.drag", e.drag, 0.0, 1.0, "[0, 1]")?;

        positive("collision.hit_radius", self.collision.hit_radius)?;
        positive("collision.explosion_size", self.collision.explosion_size)?;

        let c = &self.camera;
        finite_vec("camera.offset", c.offset)?;
        finite_vec("camera.look_offset", c.look_offset)?;
        within("camera.smoothing", c.smoothing, 0.0, 1.0, "[0, 1]")?;

        positive("world.city_radius", self.world.city_radius)?;
        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            range: "finite numbers",
        })
    }
}

fn finite_vec(field: &'static str, value: Vec3) -> Result<(), ConfigError> {
    for component in value.to_array() {
        finite(field, component)?;
    }
    Ok(())
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            range: "(0, inf)",
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            range: "[0, inf)",
        })
    }
}

fn within(
    field: &'static str,
    value: f32,
    lo: f32,
    hi: f32,
    range: &'static str,
) -> Result<(), ConfigError> {
    if value.is_finite() && value >= lo && value <= hi {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, range })
    }
}

/// `hi` must be finite and not below `lo`.
fn ordered(field: &'static str, lo: f32, hi: f32) -> Result<(), ConfigError> {
    finite(field, lo)?;
    if hi.is_finite() && hi >= lo {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value: hi,
            range: "a value at or above its lower bound",
        })
    }
}

fn bounds(field: &'static str, min: Vec3, max: Vec3) -> Result<(), ConfigError> {
    finite_vec(field, min)?;
    finite_vec(field, max)?;
    for (lo, hi) in min.to_array().into_iter().zip(max.to_array()) {
        ordered(field, lo, hi)?;
    }
    Ok(())
}
