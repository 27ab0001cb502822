//! Third-person Character Controller
//!
//! Turns buffered key and pointer input into a character pose and a camera
//! pose once per frame.
//!
//! # Movement Model
//!
//! - Move intent is built in camera-local axes (forward = -Z, right = +X),
//!   normalized, then rotated into world space by the camera yaw so that
//!   "forward" always walks away from the camera.
//! - Velocity blends toward `intent * move_speed` by a fixed factor per
//!   frame (0.15), and toward zero by a faster factor (0.2) with no intent.
//! - Position integrates `velocity * dt` and is clamped to the room square.
//!
//! Mouse look and movement only run while the pointer is captured.
//!
//! # Usage
//!
//! ```rust,ignore
//! use server_room_engine::player::{CharacterController, ControllerConfig};
//! use server_room_engine::input::InputAction;
//!
//! let mut controller = CharacterController::new(ControllerConfig::default(), Default::default());
//! controller.set_captured(true);
//! controller.set_key(InputAction::MoveForward, true);
//! controller.on_mouse_delta(12.0, -3.0);
//!
//! // Each frame:
//! controller.update(delta_time);
//! let state = controller.get_movement_state();
//! ```

use std::f32::consts::PI;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::camera::{CameraConfig, CameraPose, ShoulderCamera};
use crate::input::{InputAction, InputState};
use crate::math::{SmoothingMode, lerp_vec3, rotate_horizontal};
use crate::world::RoomBounds;

/// Largest frame step the controller integrates (seconds).
pub const MAX_FRAME_DT: f32 = 0.1;

/// Below this speed an idle character is considered stopped.
pub const STOP_EPSILON: f32 = 1e-3;

/// Controller tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Top walking speed (m/s)
    pub move_speed: f32,
    /// Per-frame blend toward the target velocity while keys are held
    pub accel_blend: f32,
    /// Per-frame blend toward zero with no keys held
    pub decel_blend: f32,
    /// Radians of yaw/pitch per pixel of pointer motion
    pub mouse_sensitivity: f32,
    pub pitch_min: f32,
    pub pitch_max: f32,
    /// Minimum speed for the facing to follow the velocity
    pub facing_speed_epsilon: f32,
    pub spawn: Vec3,
    pub bounds: RoomBounds,
    pub smoothing: SmoothingMode,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            accel_blend: 0.15,
            decel_blend: 0.2,
            mouse_sensitivity: 0.002,
            pitch_min: -0.5,
            pitch_max: 0.8,
            facing_speed_epsilon: 0.1,
            spawn: Vec3::new(0.0, 0.0, 10.0),
            bounds: RoomBounds::default(),
            smoothing: SmoothingMode::PerFrame,
        }
    }
}

/// Full character state. Lives for the whole session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterPose {
    pub position: Vec3,
    /// Unwrapped; grows without bound as the player turns
    pub yaw: f32,
    /// Clamped to `[pitch_min, pitch_max]`
    pub pitch: f32,
    pub velocity: Vec3,
    pub is_moving: bool,
}

impl CharacterPose {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            velocity: Vec3::ZERO,
            is_moving: false,
        }
    }

    /// Horizontal speed.
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// What the renderer and the cable need from the controller each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementState {
    pub position: Vec3,
    /// Facing angle about Y; 0 faces +Z
    pub rotation: f32,
    pub moving: bool,
}

/// Inertial third-person character controller with its follow camera.
#[derive(Debug, Clone)]
pub struct CharacterController {
    config: ControllerConfig,
    pose: CharacterPose,
    input: InputState,
    camera: ShoulderCamera,
}

impl CharacterController {
    /// Create a controller at the configured spawn point, pointer released.
    pub fn new(config: ControllerConfig, camera_config: CameraConfig) -> Self {
        let pose = CharacterPose::at(config.bounds.clamp(config.spawn));
        let camera = ShoulderCamera::new(camera_config, pose.position, pose.yaw, pose.pitch);
        Self {
            config,
            pose,
            input: InputState::new(),
            camera,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn pose(&self) -> &CharacterPose {
        &self.pose
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn camera_pose(&self) -> CameraPose {
        self.camera.pose()
    }

    pub fn camera(&self) -> &ShoulderCamera {
        &self.camera
    }

    pub fn is_captured(&self) -> bool {
        self.input.mouse.is_captured()
    }

    /// Mirror the host's pointer capture.
    ///
    /// Losing capture drops held keys and pending motion; key releases may
    /// never be delivered while the pointer is elsewhere.
    pub fn set_captured(&mut self, captured: bool) {
        if captured == self.is_captured() {
            return;
        }
        if !captured {
            self.input.clear_buffered();
            self.pose.is_moving = false;
        }
        self.input.mouse.set_captured(captured);
        debug!(captured, "controller capture changed");
    }

    /// Level-sensitive movement key. Non-movement actions are ignored and
    /// return `false`; so are presses while the pointer is released.
    pub fn set_key(&mut self, action: InputAction, pressed: bool) -> bool {
        if !action.is_movement() {
            return false;
        }
        if pressed && !self.is_captured() {
            return false;
        }
        self.input.apply_action(action, pressed)
    }

    /// Buffer relative pointer motion until the next `update`.
    pub fn on_mouse_delta(&mut self, dx: f32, dy: f32) {
        self.input.mouse.accumulate_delta(dx, dy);
    }

    /// Apply pointer motion to yaw and pitch immediately.
    pub fn apply_mouse_look(&mut self, dx: f32, dy: f32) {
        self.pose.yaw -= dx * self.config.mouse_sensitivity;
        self.pose.pitch = (self.pose.pitch - dy * self.config.mouse_sensitivity)
            .clamp(self.config.pitch_min, self.config.pitch_max);
    }

    /// Advance one frame. No-op while the pointer is released.
    pub fn update(&mut self, dt: f32) {
        if !self.is_captured() {
            return;
        }
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };

        let look = self.input.mouse.consume_delta();
        if look != glam::Vec2::ZERO {
            self.apply_mouse_look(look.x, look.y);
        }

        let keys = self.input.movement;
        let intent = Vec3::new(keys.right_axis() as f32, 0.0, -(keys.forward_axis() as f32));
        let smoothing = self.config.smoothing;

        // Opposite keys cancel to a zero intent, which counts as idle
        if let Some(local) = intent.try_normalize() {
            // The camera orbits at +yaw, so its view points along the
            // intent rotated by -yaw; forward stays away from the camera
            let direction = rotate_horizontal(local, -self.pose.yaw);
            let target = direction * self.config.move_speed;
            let blend = smoothing.factor(self.config.accel_blend, dt);
            self.pose.velocity = lerp_vec3(self.pose.velocity, target, blend);
            self.pose.is_moving = true;
        } else {
            let blend = smoothing.factor(self.config.decel_blend, dt);
            self.pose.velocity = lerp_vec3(self.pose.velocity, Vec3::ZERO, blend);
            if self.pose.velocity.length() < STOP_EPSILON {
                self.pose.velocity = Vec3::ZERO;
            }
            self.pose.is_moving = false;
        }

        self.pose.position = self
            .config
            .bounds
            .clamp(self.pose.position + self.pose.velocity * dt);

        self.camera.update(
            dt,
            smoothing,
            self.pose.position,
            self.pose.yaw,
            self.pose.pitch,
            self.pose.is_moving,
        );
    }

    /// Position, facing and moving flag for this frame.
    ///
    /// Faces the velocity while walking fast enough, otherwise faces away
    /// from the camera.
    pub fn get_movement_state(&self) -> MovementState {
        let rotation =
            if self.pose.is_moving && self.pose.speed() > self.config.facing_speed_epsilon {
                self.pose.velocity.x.atan2(self.pose.velocity.z)
            } else {
                self.pose.yaw + PI
            };
        MovementState {
            position: self.pose.position,
            rotation,
            moving: self.pose.is_moving,
        }
    }

    /// Back to the spawn pose with the camera settled. Capture is kept.
    pub fn reset(&mut self) {
        let captured = self.is_captured();
        self.pose = CharacterPose::at(self.config.bounds.clamp(self.config.spawn));
        self.input.reset();
        self.input.mouse.set_captured(captured);
        self.camera
            .snap_to(self.pose.position, self.pose.yaw, self.pose.pitch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn captured_controller() -> CharacterController {
        let mut c = CharacterController::new(ControllerConfig::default(), CameraConfig::default());
        c.set_captured(true);
        c
    }

    #[test]
    fn test_spawn_pose() {
        let c = CharacterController::new(ControllerConfig::default(), CameraConfig::default());
        assert_eq!(c.pose().position, Vec3::new(0.0, 0.0, 10.0));
        assert!(!c.is_captured());
        let state = c.get_movement_state();
        assert!(!state.moving);
        assert!((state.rotation - PI).abs() < 1e-6);
    }

    #[test]
    fn test_forward_walks_away_from_camera() {
        let mut c = captured_controller();
        c.set_key(InputAction::MoveForward, true);
        for _ in 0..30 {
            c.update(DT);
        }
        assert!(c.pose().position.z < 10.0);
        assert!(c.pose().position.x.abs() < 1e-4);
    }

    #[test]
    fn test_forward_follows_yaw() {
        let mut c = captured_controller();
        // Turn a quarter to the right: camera yaw -PI/2
        c.apply_mouse_look(PI / 2.0 / 0.002, 0.0);
        c.set_key(InputAction::MoveForward, true);
        let cam_forward = c.camera().look_at_point(Vec3::ZERO, c.pose().yaw)
            - c.camera().orbit_point(Vec3::ZERO, c.pose().yaw, 0.0);
        for _ in 0..30 {
            c.update(DT);
        }
        let v = c.pose().velocity;
        let dot = v.normalize().dot(Vec3::new(cam_forward.x, 0.0, cam_forward.z).normalize());
        assert!(dot > 0.99);
    }

    #[test]
    fn test_intent_rotates_by_negated_yaw() {
        let mut c = captured_controller();
        // Yaw +PI/2: camera on +X looking toward -X
        c.apply_mouse_look(-PI / 2.0 / 0.002, 0.0);
        assert!((c.pose().yaw - PI / 2.0).abs() < 1e-4);
        let cam = c.camera().orbit_point(Vec3::ZERO, c.pose().yaw, 0.0);
        assert!(cam.x > 5.9);

        c.set_key(InputAction::MoveForward, true);
        for _ in 0..30 {
            c.update(DT);
        }
        let dir = c.pose().velocity.normalize();
        // Forward walks -X, not the +X a rotation by +yaw would give
        assert!((dir - Vec3::NEG_X).length() < 1e-3);
    }

    #[test]
    fn test_first_frame_velocity_blend() {
        let mut c = captured_controller();
        c.set_key(InputAction::MoveForward, true);
        c.update(DT);
        assert!((c.pose().velocity.z + 5.0 * 0.15).abs() < 1e-5);
    }

    #[test]
    fn test_opposite_keys_are_idle() {
        let mut c = captured_controller();
        c.set_key(InputAction::MoveLeft, true);
        c.set_key(InputAction::MoveRight, true);
        c.update(DT);
        assert!(!c.pose().is_moving);
        assert_eq!(c.pose().velocity, Vec3::ZERO);
    }

    #[test]
    fn test_paused_without_capture() {
        let mut c = CharacterController::new(ControllerConfig::default(), CameraConfig::default());
        assert!(!c.set_key(InputAction::MoveForward, true));
        c.on_mouse_delta(100.0, 100.0);
        c.update(DT);
        assert_eq!(c.pose().position, Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(c.pose().yaw, 0.0);
    }

    #[test]
    fn test_capture_loss_clears_held_keys() {
        let mut c = captured_controller();
        c.set_key(InputAction::MoveForward, true);
        c.update(DT);
        c.set_captured(false);
        c.set_captured(true);
        assert!(!c.input().movement.any_pressed());
        for _ in 0..120 {
            c.update(DT);
        }
        assert_eq!(c.pose().velocity, Vec3::ZERO);
    }

    #[test]
    fn test_mouse_look_clamps_pitch() {
        let mut c = captured_controller();
        c.on_mouse_delta(0.0, -10_000.0);
        c.update(DT);
        assert_eq!(c.pose().pitch, 0.8);
        c.on_mouse_delta(0.0, 10_000.0);
        c.update(DT);
        assert_eq!(c.pose().pitch, -0.5);
    }

    #[test]
    fn test_mouse_right_decreases_yaw() {
        let mut c = captured_controller();
        c.on_mouse_delta(50.0, 0.0);
        c.update(DT);
        assert!((c.pose().yaw + 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_facing_follows_velocity() {
        let mut c = captured_controller();
        c.set_key(InputAction::MoveRight, true);
        for _ in 0..20 {
            c.update(DT);
        }
        let state = c.get_movement_state();
        assert!(state.moving);
        assert!((state.rotation - PI / 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_reset_keeps_capture() {
        let mut c = captured_controller();
        c.set_key(InputAction::MoveBack, true);
        for _ in 0..20 {
            c.update(DT);
        }
        c.reset();
        assert!(c.is_captured());
        assert_eq!(c.pose().position, Vec3::new(0.0, 0.0, 10.0));
        assert!(!c.input().movement.any_pressed());
    }
}
