//! Controller Tests - Inertia, Bounds and Look Limits
//!
//! Drives the character controller through its public API at a fixed
//! 60 Hz step.

use glam::Vec3;
use server_room_engine::camera::CameraConfig;
use server_room_engine::input::InputAction;
use server_room_engine::player::{CharacterController, ControllerConfig};

const DT: f32 = 1.0 / 60.0;
const EPSILON: f32 = 1e-4;

fn controller() -> CharacterController {
    let mut c = CharacterController::new(ControllerConfig::default(), CameraConfig::default());
    c.set_captured(true);
    c
}

// ============================================================================
// Velocity decay
// ============================================================================

#[test]
fn test_velocity_reaches_zero_without_keys() {
    let mut c = controller();
    c.set_key(InputAction::MoveForward, true);
    c.set_key(InputAction::MoveRight, true);
    for _ in 0..120 {
        c.update(DT);
    }
    assert!(c.pose().speed() > 4.9);

    c.set_key(InputAction::MoveForward, false);
    c.set_key(InputAction::MoveRight, false);

    // 5 * 0.8^n < 1e-3 after 39 frames
    let mut frames = 0;
    while c.pose().velocity != Vec3::ZERO {
        c.update(DT);
        frames += 1;
        assert!(frames < 60, "velocity still {:?}", c.pose().velocity);
    }
    assert!(!c.pose().is_moving);
}

#[test]
fn test_opposite_keys_cancel_to_idle() {
    let mut c = controller();
    c.set_key(InputAction::MoveForward, true);
    c.set_key(InputAction::MoveBack, true);
    for _ in 0..10 {
        c.update(DT);
    }
    assert_eq!(c.pose().velocity, Vec3::ZERO);
    assert!(!c.get_movement_state().moving);
}

// ============================================================================
// Boundary
// ============================================================================

#[test]
fn test_boundary_holds_under_any_input() {
    let config = ControllerConfig {
        move_speed: 400.0,
        accel_blend: 1.0,
        ..ControllerConfig::default()
    };
    let half_width = config.bounds.half_width;
    let mut c = CharacterController::new(config, CameraConfig::default());
    c.set_captured(true);

    let actions = [
        InputAction::MoveForward,
        InputAction::MoveRight,
        InputAction::MoveBack,
        InputAction::MoveLeft,
    ];
    for step in 0..2000 {
        let action = actions[(step / 37) % actions.len()];
        c.set_key(action, step % 3 != 0);
        if step % 11 == 0 {
            c.on_mouse_delta(step as f32 * 7.0, -(step as f32));
        }
        // Includes an oversized frame
        let dt = if step % 101 == 0 { 5.0 } else { DT };
        c.update(dt);

        let p = c.pose().position;
        assert!(p.x.abs() <= half_width + EPSILON, "x escaped: {}", p.x);
        assert!(p.z.abs() <= half_width + EPSILON, "z escaped: {}", p.z);
    }
}

// ============================================================================
// Look limits
// ============================================================================

#[test]
fn test_pitch_stays_clamped() {
    let mut c = controller();
    let (min, max) = (c.config().pitch_min, c.config().pitch_max);

    for dy in [-1.0e6, 3.0, 1.0e6, -250.0, 42.0] {
        c.on_mouse_delta(0.0, dy);
        c.update(DT);
        let pitch = c.pose().pitch;
        assert!(pitch >= min && pitch <= max, "pitch {pitch} out of range");
    }
}

#[test]
fn test_yaw_is_unwrapped() {
    let mut c = controller();
    let turns = 10.0 * std::f32::consts::TAU;
    c.on_mouse_delta(-turns / c.config().mouse_sensitivity, 0.0);
    c.update(DT);
    assert!((c.pose().yaw - turns).abs() < 1e-2);
}

#[test]
fn test_released_pointer_pauses_update() {
    let mut c = controller();
    c.set_key(InputAction::MoveForward, true);
    for _ in 0..30 {
        c.update(DT);
    }
    c.set_captured(false);
    let frozen = c.pose().position;
    for _ in 0..30 {
        c.update(DT);
    }
    assert_eq!(c.pose().position, frozen);
    assert!(!c.get_movement_state().moving);
    assert!(!c.input().movement.any_pressed());
}

// ============================================================================
// Hold forward then release
// ============================================================================

#[test]
fn test_hold_forward_then_release() {
    let mut c = controller();
    let start = c.pose().position;
    let max_speed = c.config().move_speed;
    let half_width = c.config().bounds.half_width;

    c.set_key(InputAction::MoveForward, true);
    let mut last_z = start.z;
    let mut last_speed = 0.0;
    for _ in 0..120 {
        c.update(DT);
        let pose = c.pose();
        // Forward at yaw 0 is -Z
        assert!(pose.position.z < last_z);
        assert!(pose.speed() >= last_speed - EPSILON);
        assert!(pose.speed() <= max_speed + EPSILON);
        assert!(pose.position.x.abs() < EPSILON);
        last_z = pose.position.z;
        last_speed = pose.speed();
    }
    assert!(last_speed > 0.99 * max_speed);

    c.set_key(InputAction::MoveForward, false);
    for _ in 0..120 {
        c.update(DT);
        let pose = c.pose();
        assert!(pose.position.z <= last_z);
        assert!(pose.speed() <= last_speed + EPSILON);
        assert!(pose.position.z >= -half_width);
        last_z = pose.position.z;
        last_speed = pose.speed();
    }
    assert_eq!(c.pose().speed(), 0.0);
}

#[test]
fn test_walking_into_wall_stops_at_boundary() {
    let mut c = controller();
    let half_width = c.config().bounds.half_width;
    c.set_key(InputAction::MoveForward, true);
    for _ in 0..60 * 12 {
        c.update(DT);
        assert!(c.pose().position.z >= -half_width);
    }
    assert!((c.pose().position.z + half_width).abs() < EPSILON);
}

#[test]
fn test_facing_follows_velocity_then_camera() {
    let mut c = controller();
    c.set_key(InputAction::MoveRight, true);
    for _ in 0..30 {
        c.update(DT);
    }
    let state = c.get_movement_state();
    // Strafing right at yaw 0 moves along +X
    assert!((state.rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-3);

    c.set_key(InputAction::MoveRight, false);
    c.update(DT);
    let state = c.get_movement_state();
    assert!((state.rotation - (c.pose().yaw + std::f32::consts::PI)).abs() < 1e-6);
}
