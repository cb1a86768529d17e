//! Blend factors for exponential-style smoothing toward a target.

use skyraid_core::constants::TICK_RATE;
use skyraid_core::enums::SmoothingMode;

/// Fraction of the remaining gap to close this frame for a rate in 1/s.
///
/// Always in [0, 1], so `x += (target - x) * factor` never overshoots.
pub fn rate_factor(mode: SmoothingMode, rate: f32, dt: f32) -> f32 {
    let k = rate * dt;
    match mode {
        SmoothingMode::Linear => k.clamp(0.0, 1.0),
        SmoothingMode::Exponential => (1.0 - (-k).exp()).clamp(0.0, 1.0),
    }
}

/// Fraction of the remaining gap to close this frame for a factor tuned
/// per frame at the nominal tick rate.
pub fn frame_factor(mode: SmoothingMode, per_frame: f32, dt: f32) -> f32 {
    match mode {
        SmoothingMode::Linear => per_frame.clamp(0.0, 1.0),
        SmoothingMode::Exponential => {
            let frames = dt * TICK_RATE as f32;
            (1.0 - (1.0 - per_frame.clamp(0.0, 1.0)).powf(frames)).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_rate_saturates() {
        assert!((rate_factor(SmoothingMode::Linear, 2.0, 0.1) - 0.2).abs() < 1e-6);
        assert_eq!(rate_factor(SmoothingMode::Linear, 2.0, 1.0), 1.0);
    }

    #[test]
    fn test_exponential_rate_composes() {
        // Two half steps close the same gap as one full step.
        let full = rate_factor(SmoothingMode::Exponential, 2.0, 0.2);
        let half = rate_factor(SmoothingMode::Exponential, 2.0, 0.1);
        let remaining_after_two = (1.0 - half) * (1.0 - half);
        assert!(((1.0 - full) - remaining_after_two).abs() < 1e-6);
    }

    #[test]
    fn test_frame_factor_matches_at_nominal_rate() {
        let dt = 1.0 / TICK_RATE as f32;
        let linear = frame_factor(SmoothingMode::Linear, 0.1, dt);
        let exponential = frame_factor(SmoothingMode::Exponential, 0.1, dt);
        assert!((linear - exponential).abs() < 1e-5);
        // Linear ignores frame time.
        assert_eq!(frame_factor(SmoothingMode::Linear, 0.1, 0.5), 0.1);
    }
}
