//! Chase camera rig.

use glam::{Quat, Vec3};

use skyraid_core::config::CameraTuning;
use skyraid_core::enums::{CameraMode, SmoothingMode};
use skyraid_core::state::CameraView;

use crate::smoothing;

/// Smoothed chase camera derived from the aircraft pose.
///
/// Offsets are in the aircraft's local frame. Only the position is smoothed;
/// the look target snaps to the aircraft every frame.
#[derive(Debug, Clone)]
pub struct CameraRig {
    mode: CameraMode,
    position: Vec3,
    look_at: Vec3,
    tuning: CameraTuning,
    smoothing: SmoothingMode,
}

impl CameraRig {
    pub fn new(tuning: CameraTuning, smoothing: SmoothingMode) -> Self {
        Self {
            mode: CameraMode::Follow,
            position: tuning.initial_position,
            look_at: tuning.initial_look_at,
            tuning,
            smoothing,
        }
    }

    /// Follow the aircraft for one frame. Free mode holds the last transform.
    pub fn update(&mut self, target: Vec3, orientation: Quat, dt: f32) {
        if self.mode == CameraMode::Free {
            return;
        }
        let ideal = target + orientation * self.tuning.offset;
        let blend = smoothing::frame_factor(self.smoothing, self.tuning.smoothing, dt);
        self.position = self.position.lerp(ideal, blend);
        self.look_at = target + orientation * self.tuning.look_offset;
    }

    pub fn toggle_mode(&mut self) -> CameraMode {
        self.mode = match self.mode {
            CameraMode::Follow => CameraMode::Free,
            CameraMode::Free => CameraMode::Follow,
        };
        self.mode
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn view(&self) -> CameraView {
        CameraView {
            mode: self.mode,
            position: self.position,
            look_at: self.look_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig() -> CameraRig {
        CameraRig::new(CameraTuning::default(), SmoothingMode::Linear)
    }

    #[test]
    fn test_initial_transform() {
        let view = rig().view();
        assert_eq!(view.mode, CameraMode::Follow);
        assert_eq!(view.position, Vec3::new(0.0, 8.0, -15.0));
        assert_eq!(view.look_at, Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_position_closes_ten_percent_per_frame() {
        let mut rig = rig();
        let target = Vec3::new(0.0, 20.0, 100.0);
        rig.update(target, Quat::IDENTITY, 1.0 / 60.0);

        // Ideal point is 5 up and 15 behind.
        let ideal = Vec3::new(0.0, 25.0, 85.0);
        let expected = Vec3::new(0.0, 8.0, -15.0).lerp(ideal, 0.1);
        assert!((rig.view().position - expected).length() < 1e-4);
        assert!((rig.view().look_at - Vec3::new(0.0, 20.0, 110.0)).length() < 1e-5);
    }

    #[test]
    fn test_converges_behind_a_rotated_aircraft() {
        let mut rig = rig();
        let target = Vec3::new(10.0, 30.0, 0.0);
        // Nose along +X.
        let orientation = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        for _ in 0..300 {
            rig.update(target, orientation, 1.0 / 60.0);
        }
        let view = rig.view();
        assert!((view.position - Vec3::new(-5.0, 35.0, 0.0)).length() < 1e-3);
        assert!((view.look_at - Vec3::new(20.0, 30.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_free_mode_holds_transform() {
        let mut rig = rig();
        rig.update(Vec3::new(0.0, 20.0, 0.0), Quat::IDENTITY, 1.0 / 60.0);
        let before = rig.view();

        assert_eq!(rig.toggle_mode(), CameraMode::Free);
        for _ in 0..10 {
            rig.update(Vec3::new(500.0, 0.0, 500.0), Quat::IDENTITY, 1.0 / 60.0);
        }
        assert_eq!(rig.view().position, before.position);
        assert_eq!(rig.view().look_at, before.look_at);

        assert_eq!(rig.toggle_mode(), CameraMode::Follow);
        rig.update(Vec3::new(500.0, 0.0, 500.0), Quat::IDENTITY, 1.0 / 60.0);
        assert_ne!(rig.view().position, before.position);
    }
}
