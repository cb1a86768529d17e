//! Simulation constants and tuning defaults.
//!
//! These are the authoritative defaults behind [`crate::config::Tuning`].
//! Distances are scene units, angles are radians, times are seconds.

use std::f32::consts::{FRAC_PI_3, FRAC_PI_4};

/// Nominal frame rate of the host (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the nominal frame rate.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Flight model ---

/// Airspeed at spawn.
pub const AIRCRAFT_INITIAL_SPEED: f32 = 30.0;

pub const AIRCRAFT_MIN_SPEED: f32 = 10.0;

pub const AIRCRAFT_MAX_SPEED: f32 = 50.0;

/// Speed change per second at full throttle deflection.
pub const THROTTLE_RATE: f32 = 20.0;

/// Pitch limit (±60°).
pub const PITCH_LIMIT: f32 = FRAC_PI_3;

/// Roll limit (±45°).
pub const ROLL_LIMIT: f32 = FRAC_PI_4;

pub const PITCH_SENSITIVITY: f32 = 0.8;

pub const ROLL_SENSITIVITY: f32 = 2.0;

/// Yaw rate per radian of bank.
pub const TURN_SENSITIVITY: f32 = 1.5;

/// Rate at which pitch and roll converge on their targets (1/s).
pub const AUTO_LEVEL_RATE: f32 = 2.0;

/// Raw stick deflection below which the axis is treated as centered.
pub const CONTROL_DEADZONE: f32 = 0.1;

/// Sink rate at zero airspeed, scaled down linearly to nothing at max speed.
pub const LOW_SPEED_SINK_RATE: f32 = 0.5;

/// Distance ahead of the aircraft origin where rounds leave the gun.
pub const MUZZLE_OFFSET: f32 = 3.0;

/// Propeller spin per unit of airspeed (rad/s).
pub const PROPELLER_SPIN_FACTOR: f32 = 0.5;

pub const AIRCRAFT_INITIAL_POSITION: [f32; 3] = [-60.0, 25.0, -60.0];

/// Slight nose-down attitude for the approach.
pub const AIRCRAFT_INITIAL_PITCH: f32 = -0.1;

/// Speed band thresholds for the HUD.
pub const SPEED_BAND_SLOW: f32 = 20.0;
pub const SPEED_BAND_MEDIUM: f32 = 35.0;

// --- Projectiles ---

/// Minimum time between two shots.
pub const FIRE_COOLDOWN_SECS: f32 = 0.2;

pub const PROJECTILE_SPEED: f32 = 100.0;

pub const PROJECTILE_LIFETIME_SECS: f32 = 3.0;

/// Local bounding box of a round and its tracer.
pub const PROJECTILE_BOUNDS_MIN: [f32; 3] = [-0.1, -0.1, -0.55];
pub const PROJECTILE_BOUNDS_MAX: [f32; 3] = [0.1, 0.1, 0.1];

// --- Adversaries ---

/// Population the spawner keeps topped up.
pub const ADVERSARY_TARGET_POPULATION: usize = 8;

pub const ADVERSARY_SPAWN_INTERVAL_SECS: f32 = 3.0;

/// Fraction of the city radius used for horizontal spawn placement.
pub const ADVERSARY_SPAWN_AREA_FRACTION: f32 = 0.8;

pub const ADVERSARY_MIN_ALTITUDE: f32 = 15.0;
pub const ADVERSARY_MAX_ALTITUDE: f32 = 35.0;

pub const ADVERSARY_HOVER_SPEED_MIN: f32 = 1.0;
pub const ADVERSARY_HOVER_SPEED_MAX: f32 = 1.5;

pub const ADVERSARY_HOVER_HEIGHT_MIN: f32 = 2.0;
pub const ADVERSARY_HOVER_HEIGHT_MAX: f32 = 5.0;

pub const ADVERSARY_SPIN_RATE_MIN: f32 = 0.5;
pub const ADVERSARY_SPIN_RATE_MAX: f32 = 1.5;

/// Sway: x follows sin(phase * X_FREQ) * X_AMP, z follows cos(phase * Z_FREQ) * Z_AMP.
pub const ADVERSARY_SWAY_X_FREQ: f32 = 0.7;
pub const ADVERSARY_SWAY_X_AMP: f32 = 0.5;
pub const ADVERSARY_SWAY_Z_FREQ: f32 = 0.5;
pub const ADVERSARY_SWAY_Z_AMP: f32 = 0.3;

/// Local bounding box of the saucer: hull, dome and glow ring.
pub const ADVERSARY_BOUNDS_MIN: [f32; 3] = [-4.0, -0.5, -4.0];
pub const ADVERSARY_BOUNDS_MAX: [f32; 3] = [4.0, 1.7, 4.0];

// --- Explosions ---

pub const EXPLOSION_LIFETIME_SECS: f32 = 2.0;

/// Size of the explosion left by a destroyed adversary.
pub const HIT_EXPLOSION_SIZE: f32 = 1.5;

pub const EXPLOSION_MIN_PARTICLES: usize = 15;
pub const EXPLOSION_MAX_PARTICLES: usize = 24;

pub const PARTICLE_RADIUS_MIN: f32 = 0.2;
pub const PARTICLE_RADIUS_MAX: f32 = 0.5;

/// Initial particle offset reaches this many explosion sizes from the center.
pub const PARTICLE_SPREAD: f32 = 2.0;

/// Each velocity component is drawn from ±(PARTICLE_SPEED / 2) * size.
pub const PARTICLE_SPEED: f32 = 20.0;

pub const PARTICLE_GRAVITY: f32 = 15.0;

/// Velocity multiplier applied on every update.
pub const PARTICLE_DRAG: f32 = 0.98;

/// Flash radius in explosion sizes.
pub const FLASH_RADIUS: f32 = 3.0;

pub const FLASH_INITIAL_OPACITY: f32 = 0.8;

/// The flash burns out this many times faster than the explosion.
pub const FLASH_FADE_SPEEDUP: f32 = 4.0;

/// Extra flash scale reached at burn-out.
pub const FLASH_GROWTH: f32 = 2.0;

// --- Collision & scoring ---

/// Center distance below which a round destroys an adversary.
pub const HIT_RADIUS: f32 = 3.0;

pub const POINTS_PER_KILL: u32 = 100;

// --- Camera ---

/// Chase offset in the aircraft frame: above and behind.
pub const CAMERA_OFFSET: [f32; 3] = [0.0, 5.0, -15.0];

/// Look-at point in the aircraft frame: ahead of the nose.
pub const CAMERA_LOOK_OFFSET: [f32; 3] = [0.0, 0.0, 10.0];

/// Per-frame fraction of the remaining distance the camera covers.
pub const CAMERA_SMOOTHING: f32 = 0.1;

pub const CAMERA_INITIAL_POSITION: [f32; 3] = [0.0, 8.0, -15.0];
pub const CAMERA_INITIAL_LOOK_AT: [f32; 3] = [0.0, 2.0, 0.0];

// --- World ---

/// Half-width of the city grid (the grid is 80 x 80 units).
pub const CITY_RADIUS: f32 = 40.0;
