//! Session Tests - Capture, Overlays, Logout and Frame Output
//!
//! Drives a whole walk session over the default server room at 60 Hz.

use server_room_engine::game::{SceneConfig, WalkSession};
use server_room_engine::input::InputAction;
use server_room_engine::interaction::{ActivationOutcome, TargetKind};
use server_room_engine::presentation::{
    CueId, OverlayKind, PresentationEvent, RecordingPresentation,
};

const DT: f32 = 1.0 / 60.0;

fn captured_session(host: &mut RecordingPresentation) -> WalkSession {
    let mut session = WalkSession::new(SceneConfig::default());
    assert_eq!(session.on_primary_click(host), None);
    assert!(session.is_captured());
    session
}

fn target_name(session: &WalkSession) -> Option<String> {
    let id = session.resolver().current_target()?;
    session.registry().target(id).map(|t| t.name.clone())
}

/// Walk forward until something is targeted, then let the character stop.
fn walk_until_targeted(session: &mut WalkSession, host: &mut RecordingPresentation, max_frames: usize) {
    session.handle_action(InputAction::MoveForward, true, host);
    for _ in 0..max_frames {
        if session.tick(DT, host).target.is_some() {
            break;
        }
    }
    session.handle_action(InputAction::MoveForward, false, host);
    for _ in 0..60 {
        session.tick(DT, host);
    }
}

// ============================================================================
// Capture
// ============================================================================

#[test]
fn test_focus_loss_pauses_until_click() {
    let mut host = RecordingPresentation::new();
    let mut session = captured_session(&mut host);
    session.handle_action(InputAction::MoveForward, true, &mut host);
    for _ in 0..30 {
        session.tick(DT, &mut host);
    }

    session.on_focus_lost();
    assert!(!session.is_captured());
    let frozen = session.controller().pose().position;
    for _ in 0..30 {
        let out = session.tick(DT, &mut host);
        assert!(!out.captured);
    }
    assert_eq!(session.controller().pose().position, frozen);
    assert!(!session.movement_state().moving);

    // No capture without focus
    session.on_primary_click(&mut host);
    assert!(!session.is_captured());

    session.on_focus_gained();
    session.on_primary_click(&mut host);
    assert!(session.is_captured());
    // Held key was dropped with the capture
    session.tick(DT, &mut host);
    assert!(!session.movement_state().moving);
}

#[test]
fn test_escape_releases_pointer() {
    let mut host = RecordingPresentation::new();
    let mut session = captured_session(&mut host);
    assert!(session.handle_action(InputAction::Cancel, true, &mut host));
    assert!(!session.is_captured());
    assert!(!session.handle_action(InputAction::Cancel, true, &mut host));
}

#[test]
fn test_mouse_motion_ignored_while_released() {
    let mut host = RecordingPresentation::new();
    let mut session = WalkSession::new(SceneConfig::default());
    session.on_mouse_motion(500.0, 0.0);
    session.tick(DT, &mut host);
    assert_eq!(session.controller().pose().yaw, 0.0);

    session.on_primary_click(&mut host);
    session.on_mouse_motion(500.0, 0.0);
    session.tick(DT, &mut host);
    assert!(session.controller().pose().yaw < 0.0);
}

// ============================================================================
// Targets and overlays
// ============================================================================

#[test]
fn test_walking_forward_acquires_the_core() {
    let mut host = RecordingPresentation::new();
    let mut session = captured_session(&mut host);
    walk_until_targeted(&mut session, &mut host, 240);

    assert_eq!(target_name(&session).as_deref(), Some("chaos_core"));
    let out = session.frame_output();
    assert_eq!(out.prompt, Some("ACCESS"));
    assert_eq!(host.prompt(), Some("ACCESS"));
    assert_eq!(host.cue_count(CueId::DigitalBlip), 1);
}

#[test]
fn test_overlay_releases_and_closing_recaptures() {
    let mut host = RecordingPresentation::new();
    let mut session = captured_session(&mut host);
    walk_until_targeted(&mut session, &mut host, 240);

    let outcome = session.activate(&mut host);
    assert!(matches!(outcome, ActivationOutcome::Opened(open) if open.kind == OverlayKind::Core));
    assert!(!session.is_captured());
    assert_eq!(session.open_overlay(), Some(OverlayKind::Core));
    assert!(session.resolver().activity().is_core_active());

    // Clicks and activation are ignored while the overlay is up
    assert_eq!(session.on_primary_click(&mut host), None);
    assert!(!session.is_captured());
    assert_eq!(session.activate(&mut host), ActivationOutcome::Blocked);

    assert!(session.handle_action(InputAction::Cancel, true, &mut host));
    assert_eq!(session.open_overlay(), None);
    assert!(session.is_captured());
    assert!(!session.resolver().activity().is_core_active());
    assert_eq!(host.events().last(), Some(&PresentationEvent::OverlayClosed(OverlayKind::Core)));
}

#[test]
fn test_activation_without_target_does_nothing() {
    let mut host = RecordingPresentation::new();
    let mut session = captured_session(&mut host);
    session.tick(DT, &mut host);
    assert_eq!(session.on_primary_click(&mut host), Some(ActivationOutcome::NoTarget));
    assert!(host.events().is_empty());
}

#[test]
fn test_logout_confirm_resets_session() {
    let mut host = RecordingPresentation::new();
    let mut session = captured_session(&mut host);
    let spawn = session.controller().pose().position;

    // All the way to the far wall
    session.handle_action(InputAction::MoveForward, true, &mut host);
    for _ in 0..60 * 12 {
        session.tick(DT, &mut host);
    }
    session.handle_action(InputAction::MoveForward, false, &mut host);
    for _ in 0..60 {
        session.tick(DT, &mut host);
    }
    assert_eq!(target_name(&session).as_deref(), Some("logout_door"));
    assert_eq!(host.prompt(), Some("LOG OUT"));

    // Confirm does nothing until the logout overlay is open
    assert!(!session.confirm_logout(&mut host));

    session.activate(&mut host);
    assert_eq!(session.open_overlay(), Some(OverlayKind::Logout));
    assert!(session.handle_action(InputAction::Confirm, true, &mut host));

    assert_eq!(session.open_overlay(), None);
    assert!(!session.is_captured());
    assert_eq!(session.controller().pose().position, spawn);
    assert_eq!(session.resolver().current_target(), None);
    assert_eq!(session.frame_count(), 0);
    assert_eq!(host.prompt(), None);
    assert_eq!(host.open_overlay_kind(), None);
}

#[test]
fn test_logout_cancel_returns_to_room() {
    let mut host = RecordingPresentation::new();
    let mut session = captured_session(&mut host);
    session.handle_action(InputAction::MoveForward, true, &mut host);
    for _ in 0..60 * 12 {
        session.tick(DT, &mut host);
    }
    session.handle_action(InputAction::MoveForward, false, &mut host);
    for _ in 0..60 {
        session.tick(DT, &mut host);
    }
    let position = session.controller().pose().position;

    session.activate(&mut host);
    assert!(session.cancel_logout(&mut host));
    assert!(session.is_captured());
    assert_eq!(session.controller().pose().position, position);
}

// ============================================================================
// Cues and frame output
// ============================================================================

#[test]
fn test_footsteps_follow_cadence() {
    let mut host = RecordingPresentation::new();
    let mut session = captured_session(&mut host);
    session.handle_action(InputAction::MoveRight, true, &mut host);
    for _ in 0..120 {
        session.tick(DT, &mut host);
    }
    // One step per 0.4 s of walking; the last may land on the final frame
    let steps = host.cue_count(CueId::Footstep);
    assert!((4..=5).contains(&steps), "{steps} footsteps");

    session.handle_action(InputAction::MoveRight, false, &mut host);
    host.clear();
    for _ in 0..120 {
        session.tick(DT, &mut host);
    }
    assert_eq!(host.cue_count(CueId::Footstep), 0);
}

#[test]
fn test_audio_disabled_skips_footsteps() {
    let mut config = SceneConfig::default();
    config.audio.enabled = false;
    let mut host = RecordingPresentation::new();
    let mut session = WalkSession::new(config);
    session.on_primary_click(&mut host);
    session.handle_action(InputAction::MoveRight, true, &mut host);
    for _ in 0..120 {
        session.tick(DT, &mut host);
    }
    assert_eq!(host.cue_count(CueId::Footstep), 0);
}

#[test]
fn test_hud_tracks_position() {
    let mut host = RecordingPresentation::new();
    let mut session = captured_session(&mut host);
    session.handle_action(InputAction::MoveRight, true, &mut host);
    for _ in 0..60 {
        session.tick(DT, &mut host);
    }
    session.tick(DT, &mut host);
    let out = session.frame_output();
    let position = session.controller().pose().position;
    assert_eq!(out.hud.x, format!("X: {:.2}", position.x));
    assert_eq!(out.hud.z, "Z: 10.00");
    assert!(position.x > 1.0);
}

#[test]
fn test_minimap_lists_every_target() {
    let session = WalkSession::new(SceneConfig::default());
    let out = session.frame_output();
    let labels: Vec<&str> = out.markers.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(labels, ["P1", "P2", "P3", "CORE", "EXIT"]);

    let exit = &out.markers[4];
    assert_eq!(exit.kind, TargetKind::Logout);
    assert!(exit.z < -25.0);
    assert_eq!(out.markers.len(), session.registry().len());
}

#[test]
fn test_cable_trails_the_character() {
    let mut host = RecordingPresentation::new();
    let mut session = captured_session(&mut host);
    session.handle_action(InputAction::MoveForward, true, &mut host);
    for _ in 0..90 {
        session.tick(DT, &mut host);
    }
    session.tick(DT, &mut host);
    let out = session.frame_output();
    let socket = session.avatar().socket_world_position();
    assert!(out.cable[0].distance(socket) < 1e-4);
    // Walking toward -Z, the cable lies behind on +Z
    let tail = out.cable[out.cable.len() - 1];
    assert!(tail.z > socket.z);
    let floor = session.config().cable.floor_height;
    assert!(session.cable().points().iter().skip(1).all(|p| p.y >= floor));
}

#[test]
fn test_debug_toggle_is_reset_by_logout_reset() {
    let mut host = RecordingPresentation::new();
    let mut session = captured_session(&mut host);
    session.toggle_debug(&mut host);
    assert!(session.tick(DT, &mut host).debug);
    session.reset(&mut host);
    assert!(!session.is_debug());
}
