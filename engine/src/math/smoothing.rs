//! Exponential smoothing helpers
//!
//! The controller and camera blend toward targets with a fixed factor per
//! frame. `SmoothingMode` decides whether that factor is used as-is
//! (frame-rate dependent, the reference feel) or rescaled by `dt` so the
//! same convergence happens per second at any frame rate.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// How per-frame blend factors are applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SmoothingMode {
    /// Use the blend factor unchanged every frame regardless of `dt`.
    #[default]
    PerFrame,
    /// Treat the blend factor as tuned for `reference_fps` and rescale it by `dt`.
    TimeScaled { reference_fps: f32 },
}

impl SmoothingMode {
    /// Effective blend factor for this frame.
    pub fn factor(&self, factor: f32, dt: f32) -> f32 {
        match *self {
            SmoothingMode::PerFrame => factor,
            SmoothingMode::TimeScaled { reference_fps } => {
                damp_factor(factor, dt * reference_fps)
            }
        }
    }
}

/// Convert a per-frame blend factor into the factor for `frames` frames.
///
/// `1 - (1 - f)^frames`, so two half-frames compose to one full frame.
/// Result is clamped to `[0, 1]`.
#[inline]
pub fn damp_factor(factor: f32, frames: f32) -> f32 {
    let factor = factor.clamp(0.0, 1.0);
    if frames <= 0.0 {
        return 0.0;
    }
    (1.0 - (1.0 - factor).powf(frames)).clamp(0.0, 1.0)
}

/// Move `current` toward `target` by `factor` of the remaining distance.
#[inline]
pub fn lerp_vec3(current: Vec3, target: Vec3, factor: f32) -> Vec3 {
    current + (target - current) * factor
}

/// Rotate a camera-local horizontal direction by `yaw`.
///
/// Uses the standard 2D rotation in the XZ plane:
/// `x' = x cos - z sin`, `z' = x sin + z cos`. Y is dropped.
#[inline]
pub fn rotate_horizontal(local: Vec3, yaw: f32) -> Vec3 {
    let (sin, cos) = yaw.sin_cos();
    Vec3::new(local.x * cos - local.z * sin, 0.0, local.x * sin + local.z * cos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_frame_ignores_dt() {
        let mode = SmoothingMode::PerFrame;
        assert_eq!(mode.factor(0.15, 0.016), 0.15);
        assert_eq!(mode.factor(0.15, 0.5), 0.15);
    }

    #[test]
    fn test_time_scaled_matches_reference_rate() {
        let mode = SmoothingMode::TimeScaled { reference_fps: 60.0 };
        let f = mode.factor(0.15, 1.0 / 60.0);
        assert!((f - 0.15).abs() < 1e-5);
    }

    #[test]
    fn test_time_scaled_composes() {
        // Two half-length frames should blend the same amount as one full frame
        let half = damp_factor(0.2, 0.5);
        let remaining = (1.0 - half) * (1.0 - half);
        assert!(((1.0 - remaining) - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_damp_factor_zero_frames() {
        assert_eq!(damp_factor(0.5, 0.0), 0.0);
    }

    #[test]
    fn test_rotate_horizontal_forward() {
        // Local forward (-Z) at yaw 0 stays -Z
        let dir = rotate_horizontal(Vec3::new(0.0, 0.0, -1.0), 0.0);
        assert!((dir - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);

        // Quarter turn maps -Z onto +X
        let dir = rotate_horizontal(Vec3::new(0.0, 0.0, -1.0), std::f32::consts::FRAC_PI_2);
        assert!((dir - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_lerp_vec3() {
        let v = lerp_vec3(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 0.25);
        assert_eq!(v, Vec3::new(2.5, 0.0, 0.0));
    }
}
