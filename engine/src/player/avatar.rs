//! Character rig state
//!
//! The rendered body does not snap to the controller's facing: it turns
//! toward it a fraction per frame, and drives a simple walk cycle (leg
//! swing and body bob). The cable socket on the back follows the smoothed
//! body, not the raw facing.

use std::f32::consts::{PI, TAU};

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::math::SmoothingMode;
use crate::player::MovementState;

/// Rig tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarConfig {
    /// Per-frame blend of the body yaw toward the reported facing
    pub turn_blend: f32,
    /// Walk cycle advance per second while moving (radians)
    pub walk_cycle_rate: f32,
    /// Peak leg swing (radians)
    pub leg_swing: f32,
    /// Peak body bob (meters)
    pub bob_height: f32,
    /// Cable socket in body space (the back faces -Z)
    pub socket_offset: Vec3,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            turn_blend: 0.1,
            walk_cycle_rate: 8.0,
            leg_swing: 0.4,
            bob_height: 0.05,
            socket_offset: Vec3::new(0.0, 1.3, -0.35),
        }
    }
}

/// Shortest signed angle from `from` to `to`, in `[-PI, PI)`.
pub fn angle_delta(from: f32, to: f32) -> f32 {
    (to - from + PI).rem_euclid(TAU) - PI
}

#[derive(Debug, Clone)]
pub struct Avatar {
    config: AvatarConfig,
    position: Vec3,
    body_yaw: f32,
    walk_cycle: f32,
    moving: bool,
}

impl Avatar {
    /// Rig standing at `state`, already facing its reported direction.
    pub fn new(config: AvatarConfig, state: &MovementState) -> Self {
        Self {
            config,
            position: state.position,
            body_yaw: state.rotation,
            walk_cycle: 0.0,
            moving: state.moving,
        }
    }

    pub fn update(&mut self, dt: f32, smoothing: SmoothingMode, state: &MovementState) {
        self.position = state.position;
        self.moving = state.moving;

        let blend = smoothing.factor(self.config.turn_blend, dt);
        self.body_yaw += angle_delta(self.body_yaw, state.rotation) * blend;

        if state.moving {
            self.walk_cycle += dt * self.config.walk_cycle_rate;
        } else {
            self.walk_cycle = 0.0;
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn body_yaw(&self) -> f32 {
        self.body_yaw
    }

    pub fn walk_cycle(&self) -> f32 {
        self.walk_cycle
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Leg rotation about X; the right leg uses the negated value.
    pub fn leg_swing(&self) -> f32 {
        if self.moving {
            self.walk_cycle.sin() * self.config.leg_swing
        } else {
            0.0
        }
    }

    pub fn body_bob(&self) -> f32 {
        if self.moving {
            (self.walk_cycle * 2.0).sin().abs() * self.config.bob_height
        } else {
            0.0
        }
    }

    /// World position of the cable socket.
    pub fn socket_world_position(&self) -> Vec3 {
        self.position + Quat::from_rotation_y(self.body_yaw) * self.config.socket_offset
    }

    /// Unit vector the body faces.
    pub fn facing_direction(&self) -> Vec3 {
        Vec3::new(self.body_yaw.sin(), 0.0, self.body_yaw.cos())
    }

    pub fn snap_to(&mut self, state: &MovementState) {
        *self = Self::new(self.config, state);
    }
}
