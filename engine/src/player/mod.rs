//! Player Module
//!
//! Character movement and the rig that presents it.
//!
//! # Components
//!
//! - [`CharacterController`] - inertial third-person movement, mouse look and the follow camera
//! - [`Avatar`] - smoothed body facing, walk cycle and the cable socket

pub mod avatar;
pub mod movement_controller;

pub use avatar::{Avatar, AvatarConfig, angle_delta};
pub use movement_controller::{
    CharacterController, CharacterPose, ControllerConfig, MAX_FRAME_DT, MovementState,
    STOP_EPSILON,
};
