//! Arcade flight model for the player aircraft.
//!
//! Plain data and pure math, no ECS dependency. The aircraft flies along its
//! local +Z axis. Orientation is composed yaw, then pitch, then roll
//! (intrinsic Y-X-Z), so a positive pitch angle rotates the nose toward -Y.

use glam::{Quat, Vec3};

use skyraid_core::commands::ControlSignal;
use skyraid_core::config::FlightTuning;
use skyraid_core::constants::{PROPELLER_SPIN_FACTOR, SPEED_BAND_MEDIUM, SPEED_BAND_SLOW};
use skyraid_core::enums::{SmoothingMode, SpeedBand};
use skyraid_core::state::AircraftView;

use crate::smoothing;

/// Canonical forward axis in the aircraft frame.
pub const FORWARD: Vec3 = Vec3::Z;

/// Compose the aircraft orientation from Euler angles.
pub fn orientation_from_angles(pitch: f32, yaw: f32, roll: f32) -> Quat {
    Quat::from_rotation_y(yaw) * Quat::from_rotation_x(pitch) * Quat::from_rotation_z(roll)
}

/// Target attitude for one stick axis: centered inside the deadzone,
/// otherwise scaled and held within the limit.
pub fn target_angle(input: f32, limit: f32, sensitivity: f32, deadzone: f32) -> f32 {
    if input.abs() < deadzone {
        0.0
    } else {
        (input * limit * sensitivity).clamp(-limit, limit)
    }
}

/// Pose and gauges of the player aircraft.
#[derive(Debug, Clone)]
pub struct FlightModel {
    position: Vec3,
    pitch: f32,
    yaw: f32,
    roll: f32,
    speed: f32,
    orientation: Quat,
    propeller_angle: f32,
    tuning: FlightTuning,
    smoothing: SmoothingMode,
}

impl FlightModel {
    /// Aircraft at its configured starting pose.
    pub fn new(tuning: FlightTuning, smoothing: SmoothingMode) -> Self {
        let pitch = tuning.initial_pitch;
        Self {
            position: tuning.initial_position,
            pitch,
            yaw: 0.0,
            roll: 0.0,
            speed: tuning.initial_speed,
            orientation: orientation_from_angles(pitch, 0.0, 0.0),
            propeller_angle: 0.0,
            tuning,
            smoothing,
        }
    }

    /// Integrate one frame of flight.
    pub fn step(&mut self, dt: f32, signal: &ControlSignal) {
        let t = &self.tuning;
        let signal = signal.clamped();

        self.speed = (self.speed + signal.throttle * t.throttle_rate * dt)
            .clamp(t.min_speed, t.max_speed);

        let target_pitch = target_angle(signal.pitch, t.pitch_limit, t.pitch_sensitivity, t.deadzone);
        let target_roll = target_angle(signal.roll, t.roll_limit, t.roll_sensitivity, t.deadzone);

        let blend = smoothing::rate_factor(self.smoothing, t.auto_level_rate, dt);
        self.pitch += (target_pitch - self.pitch) * blend;
        self.roll += (target_roll - self.roll) * blend;

        // Banking turns: yaw follows the current bank angle, not the stick.
        self.yaw += -self.roll * t.turn_sensitivity * dt;

        self.orientation = orientation_from_angles(self.pitch, self.yaw, self.roll);

        self.position += self.forward() * self.speed * dt;
        // Slow aircraft sink.
        self.position.y -= (1.0 - self.speed / t.max_speed) * t.sink_rate * dt;

        self.propeller_angle = (self.propeller_angle + dt * self.speed * PROPELLER_SPIN_FACTOR)
            .rem_euclid(std::f32::consts::TAU);
    }

    /// Teleport the aircraft, keeping its speed.
    pub fn set_pose(&mut self, position: Vec3, pitch: f32, yaw: f32, roll: f32) {
        let t = &self.tuning;
        self.position = position;
        self.pitch = pitch.clamp(-t.pitch_limit, t.pitch_limit);
        self.yaw = yaw;
        self.roll = roll.clamp(-t.roll_limit, t.roll_limit);
        self.orientation = orientation_from_angles(self.pitch, self.yaw, self.roll);
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn roll(&self) -> f32 {
        self.roll
    }

    /// Unit vector along the nose.
    pub fn forward(&self) -> Vec3 {
        self.orientation * FORWARD
    }

    /// World point where rounds leave the gun.
    pub fn fire_origin(&self) -> Vec3 {
        self.position + self.forward() * self.tuning.muzzle_offset
    }

    pub fn speed_band(&self) -> SpeedBand {
        if self.speed < SPEED_BAND_SLOW {
            SpeedBand::Slow
        } else if self.speed < SPEED_BAND_MEDIUM {
            SpeedBand::Medium
        } else {
            SpeedBand::Fast
        }
    }

    pub fn view(&self) -> AircraftView {
        AircraftView {
            position: self.position,
            orientation: self.orientation,
            pitch: self.pitch,
            yaw: self.yaw,
            roll: self.roll,
            speed: self.speed,
            speed_band: self.speed_band(),
            propeller_angle: self.propeller_angle,
        }
    }
}
