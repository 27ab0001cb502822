//! Over-the-shoulder third-person camera
//!
//! The camera orbits the character at a fixed horizontal distance on the
//! side opposite its view direction: at yaw 0 it sits on +Z and looks
//! toward -Z. Pitch lifts the orbit point rather than tilting the view.
//! Position follows the orbit point with exponential smoothing, and a
//! small two-frequency jitter is layered on top while the character walks.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::math::{SmoothingMode, lerp_vec3};
use crate::physics::Ray;

/// Camera tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Horizontal orbit distance (meters)
    pub distance: f32,
    /// Orbit height above the character's feet (meters)
    pub height: f32,
    /// Vertical lift per unit of `sin(pitch) * distance`
    pub pitch_lift: f32,
    /// Per-frame follow blend toward the orbit point
    pub follow_blend: f32,
    /// Horizontal shake amplitude; vertical is half of it
    pub shake_amplitude: f32,
    /// Angular frequency of the horizontal shake (rad/s)
    pub shake_frequency_x: f32,
    /// Angular frequency of the vertical shake (rad/s)
    pub shake_frequency_y: f32,
    /// Look-at height above the character's feet
    pub look_height: f32,
    /// How far ahead of the character (along the view) the camera looks
    pub look_ahead: f32,
    /// Vertical field of view in radians, used by the renderer
    pub fov_y: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 6.0,
            height: 3.0,
            pitch_lift: 0.5,
            follow_blend: 0.1,
            shake_amplitude: 0.02,
            shake_frequency_x: 15.0,
            shake_frequency_y: 20.0,
            look_height: 1.5,
            look_ahead: 2.0,
            fov_y: 75f32.to_radians(),
        }
    }
}

/// Camera transform handed to the renderer and the interaction resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraPose {
    /// Unit view direction; zero if the camera sits on its look-at point.
    pub fn forward(&self) -> Vec3 {
        (self.look_at - self.position).normalize_or_zero()
    }

    /// Reticle ray through the centre of the screen.
    pub fn forward_ray(&self) -> Ray {
        Ray::new(self.position, self.forward())
    }

    /// Right-handed view matrix (Y up).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, Vec3::Y)
    }
}

/// Smoothed third-person camera state.
#[derive(Debug, Clone)]
pub struct ShoulderCamera {
    config: CameraConfig,
    /// Smoothed position before shake is added
    base_position: Vec3,
    shake_offset: Vec3,
    shake_time: f32,
    look_at: Vec3,
}

impl ShoulderCamera {
    /// Create a camera already settled on the orbit point for the given pose.
    pub fn new(config: CameraConfig, target: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            config,
            base_position: Vec3::ZERO,
            shake_offset: Vec3::ZERO,
            shake_time: 0.0,
            look_at: Vec3::ZERO,
        };
        camera.snap_to(target, yaw, pitch);
        camera
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Point the camera is easing toward.
    pub fn orbit_point(&self, target: Vec3, yaw: f32, pitch: f32) -> Vec3 {
        let c = &self.config;
        let (sin_yaw, cos_yaw) = yaw.sin_cos();
        Vec3::new(
            target.x + sin_yaw * c.distance,
            target.y + c.height + pitch.sin() * c.distance * c.pitch_lift,
            target.z + cos_yaw * c.distance,
        )
    }

    /// Over-the-shoulder aim point: above the character and a little ahead
    /// of it along the view.
    pub fn look_at_point(&self, target: Vec3, yaw: f32) -> Vec3 {
        let (sin_yaw, cos_yaw) = yaw.sin_cos();
        target + Vec3::Y * self.config.look_height
            - Vec3::new(sin_yaw, 0.0, cos_yaw) * self.config.look_ahead
    }

    /// Jump straight to the orbit point, clearing shake.
    pub fn snap_to(&mut self, target: Vec3, yaw: f32, pitch: f32) {
        self.base_position = self.orbit_point(target, yaw, pitch);
        self.look_at = self.look_at_point(target, yaw);
        self.shake_offset = Vec3::ZERO;
        self.shake_time = 0.0;
    }

    /// Advance one frame.
    pub fn update(
        &mut self,
        dt: f32,
        smoothing: SmoothingMode,
        target: Vec3,
        yaw: f32,
        pitch: f32,
        moving: bool,
    ) -> CameraPose {
        let orbit = self.orbit_point(target, yaw, pitch);
        let blend = smoothing.factor(self.config.follow_blend, dt);
        self.base_position = lerp_vec3(self.base_position, orbit, blend);

        self.shake_offset = if moving {
            self.shake_time += dt;
            let a = self.config.shake_amplitude;
            Vec3::new(
                (self.shake_time * self.config.shake_frequency_x).sin() * a,
                (self.shake_time * self.config.shake_frequency_y).cos() * a * 0.5,
                0.0,
            )
        } else {
            Vec3::ZERO
        };

        self.look_at = self.look_at_point(target, yaw);
        self.pose()
    }

    /// Current pose (shake included).
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.base_position + self.shake_offset,
            look_at: self.look_at,
        }
    }

    pub fn shake_offset(&self) -> Vec3 {
        self.shake_offset
    }
}
