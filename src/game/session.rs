//! Walk Session Module
//!
//! One server-room visit. Owns every simulated component and advances
//! them in a fixed order each frame:
//!
//! 1. pointer capture is mirrored into the controller
//! 2. the controller integrates movement and moves the follow camera
//! 3. the avatar rig eases toward the reported facing
//! 4. the cable relaxes toward the rig's back socket
//! 5. the reticle target is resolved from the camera's forward ray
//! 6. footstep cues fire on their cadence
//!
//! Host events (keys, clicks, pointer motion, focus) may arrive at any time
//! between ticks.

use std::fmt;

use glam::Vec3;
use tracing::{debug, info, trace};

use crate::camera::CameraPose;
use crate::game::config::SceneConfig;
use crate::game::scene::build_registry;
use crate::input::{CaptureChange, CursorManager, InputAction};
use crate::interaction::{
    ActivationOutcome, InteractionResolver, TargetId, TargetKind, TargetRegistry,
};
use crate::physics::CableSimulator;
use crate::player::{Avatar, CharacterController, MAX_FRAME_DT, MovementState};
use crate::presentation::{CueId, FootstepCadence, OverlayKind, Presentation};

/// Player coordinates as shown on the HUD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudReadout {
    pub x: String,
    pub y: String,
    pub z: String,
}

impl HudReadout {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            x: format!("X: {:.2}", position.x),
            y: format!("Y: {:.2}", position.y),
            z: format!("Z: {:.2}", position.z),
        }
    }
}

impl fmt::Display for HudReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}  {}", self.x, self.y, self.z)
    }
}

/// One target as a point on the host's minimap.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimapMarker {
    pub label: String,
    pub kind: TargetKind,
    pub x: f32,
    pub z: f32,
}

/// Markers for every target: racks numbered `P1`, `P2`... in registry
/// order, then `CORE` and `EXIT`.
fn minimap_markers(registry: &TargetRegistry) -> Vec<MinimapMarker> {
    let mut racks = 0;
    registry
        .list_interactive_targets()
        .iter()
        .map(|target| {
            let label = match target.kind {
                TargetKind::Project => {
                    racks += 1;
                    format!("P{racks}")
                }
                TargetKind::Core => "CORE".to_string(),
                TargetKind::Logout => "EXIT".to_string(),
                TargetKind::Other => target.name.to_uppercase(),
            };
            MinimapMarker {
                label,
                kind: target.kind,
                x: target.position.x,
                z: target.position.z,
            }
        })
        .collect()
}

/// Where and how to draw the character this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterTransform {
    pub position: Vec3,
    /// Smoothed body yaw
    pub body_yaw: f32,
    pub leg_swing: f32,
    pub body_bob: f32,
}

/// Everything the host needs to present one frame.
#[derive(Debug, Clone)]
pub struct FrameOutput<'a> {
    pub frame: u64,
    pub camera: CameraPose,
    pub character: CharacterTransform,
    /// Sampled cable curve, socket first
    pub cable: &'a [Vec3],
    pub target: Option<TargetId>,
    pub prompt: Option<&'static str>,
    pub hud: HudReadout,
    /// Fixed for the session
    pub markers: &'a [MinimapMarker],
    pub debug: bool,
    pub captured: bool,
    pub overlay: Option<OverlayKind>,
}

pub struct WalkSession {
    config: SceneConfig,
    registry: TargetRegistry,
    markers: Vec<MinimapMarker>,
    cursor: CursorManager,
    controller: CharacterController,
    avatar: Avatar,
    cable: CableSimulator,
    resolver: InteractionResolver,
    footsteps: FootstepCadence,
    /// Seconds of unpaused session time
    elapsed: f32,
    debug: bool,
    frame: u64,
}

impl WalkSession {
    /// Build the room described by `config`. The pointer starts released.
    pub fn new(config: SceneConfig) -> Self {
        let registry = build_registry(&config.targets);
        let markers = minimap_markers(&registry);
        let controller = CharacterController::new(config.controller, config.camera);
        let state = controller.get_movement_state();
        let avatar = Avatar::new(config.avatar, &state);
        let cable = CableSimulator::trailing(
            config.cable,
            avatar.socket_world_position(),
            -avatar.facing_direction(),
        );
        let resolver = InteractionResolver::new(config.interaction);
        let footsteps = FootstepCadence::new(config.audio.footstep_interval);

        info!(
            targets = registry.len(),
            parts = registry.parts().len(),
            cable_points = cable.points().len(),
            "walk session created"
        );

        Self {
            config,
            registry,
            markers,
            cursor: CursorManager::new(),
            controller,
            avatar,
            cable,
            resolver,
            footsteps,
            elapsed: 0.0,
            debug: false,
            frame: 0,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    pub fn minimap_markers(&self) -> &[MinimapMarker] {
        &self.markers
    }

    pub fn cursor(&self) -> &CursorManager {
        &self.cursor
    }

    /// Mutable access for the host to clear the cursor dirty flag.
    pub fn cursor_mut(&mut self) -> &mut CursorManager {
        &mut self.cursor
    }

    pub fn controller(&self) -> &CharacterController {
        &self.controller
    }

    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    pub fn cable(&self) -> &CableSimulator {
        &self.cable
    }

    pub fn resolver(&self) -> &InteractionResolver {
        &self.resolver
    }

    pub fn is_captured(&self) -> bool {
        self.cursor.is_captured()
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn open_overlay(&self) -> Option<OverlayKind> {
        self.resolver.gate().current().map(|open| open.kind)
    }

    pub fn movement_state(&self) -> MovementState {
        self.controller.get_movement_state()
    }

    /// One-line hint for the host's status area.
    pub fn status_message(&self) -> &'static str {
        match self.open_overlay() {
            Some(OverlayKind::Logout) => "ENTER to log out, ESC to stay",
            Some(_) => "ESC to close",
            None => self.cursor.status_message(),
        }
    }

    fn sync_capture(&mut self) {
        let captured = self.cursor.is_captured();
        if captured != self.controller.is_captured() {
            info!(captured, "pointer capture changed");
            self.controller.set_captured(captured);
        }
    }

    /// Route a bound key. Movement keys are level-sensitive; the rest act
    /// on press. Returns `true` when the event changed anything.
    pub fn handle_action(
        &mut self,
        action: InputAction,
        pressed: bool,
        presentation: &mut dyn Presentation,
    ) -> bool {
        if action.is_movement() {
            return self.controller.set_key(action, pressed);
        }
        if !pressed {
            return false;
        }
        match action {
            InputAction::Activate => matches!(
                self.activate(presentation),
                ActivationOutcome::Opened(_)
                    | ActivationOutcome::AlreadyActive(_)
                    | ActivationOutcome::NoAction(_)
            ),
            InputAction::Cancel => self.cancel(presentation),
            InputAction::Confirm => self.confirm_logout(presentation),
            InputAction::ToggleDebug => {
                self.toggle_debug(presentation);
                true
            }
            _ => false,
        }
    }

    /// Primary click: captures the pointer when released, activates
    /// otherwise. Ignored while an overlay is open.
    ///
    /// Returns the activation outcome, or `None` if the click only
    /// acquired capture or was ignored.
    pub fn on_primary_click(
        &mut self,
        presentation: &mut dyn Presentation,
    ) -> Option<ActivationOutcome> {
        if self.resolver.gate().is_open() {
            return None;
        }
        if !self.cursor.is_captured() {
            if self.cursor.handle_primary_click() == CaptureChange::Acquired {
                self.sync_capture();
            }
            return None;
        }
        Some(self.activate(presentation))
    }

    pub fn on_mouse_motion(&mut self, dx: f32, dy: f32) {
        if self.controller.is_captured() {
            self.controller.on_mouse_delta(dx, dy);
        }
    }

    pub fn on_focus_lost(&mut self) {
        if self.cursor.handle_focus_lost() == CaptureChange::Released {
            debug!("focus lost");
            self.sync_capture();
        }
    }

    pub fn on_focus_gained(&mut self) {
        self.cursor.handle_focus_gained();
    }

    /// Act on the reticle target. Opening an overlay releases the pointer.
    pub fn activate(&mut self, presentation: &mut dyn Presentation) -> ActivationOutcome {
        if !self.cursor.is_captured() && !self.resolver.gate().is_open() {
            return ActivationOutcome::NoTarget;
        }
        let outcome = self.resolver.on_activate(&self.registry, presentation);
        if let ActivationOutcome::Opened(_) = outcome {
            self.cursor.release();
            self.sync_capture();
        }
        debug!(?outcome, "activation");
        outcome
    }

    /// Close the overlay of `kind` and take the pointer back.
    pub fn close_overlay(&mut self, kind: OverlayKind, presentation: &mut dyn Presentation) -> bool {
        if !self.resolver.close_overlay(kind, presentation) {
            return false;
        }
        self.cursor.acquire();
        self.sync_capture();
        true
    }

    /// Escape: closes the open overlay if there is one, otherwise releases
    /// the pointer.
    pub fn cancel(&mut self, presentation: &mut dyn Presentation) -> bool {
        if self.resolver.cancel(presentation).is_some() {
            self.cursor.acquire();
            self.sync_capture();
            return true;
        }
        let released = self.cursor.handle_escape() == CaptureChange::Released;
        self.sync_capture();
        released
    }

    /// Confirm on the logout overlay: back to the startup state.
    pub fn confirm_logout(&mut self, presentation: &mut dyn Presentation) -> bool {
        if !self.resolver.gate().is_open_kind(OverlayKind::Logout) {
            return false;
        }
        info!("logout confirmed");
        self.reset(presentation);
        true
    }

    pub fn cancel_logout(&mut self, presentation: &mut dyn Presentation) -> bool {
        self.close_overlay(OverlayKind::Logout, presentation)
    }

    pub fn toggle_debug(&mut self, presentation: &mut dyn Presentation) {
        self.debug = !self.debug;
        info!(debug = self.debug, "debug view toggled");
        presentation.play_cue(CueId::DigitalBlip);
    }

    /// Everything back to how `new` left it.
    pub fn reset(&mut self, presentation: &mut dyn Presentation) {
        self.resolver.reset(presentation);
        self.cursor.release();
        self.sync_capture();
        self.controller.reset();
        let state = self.controller.get_movement_state();
        self.avatar.snap_to(&state);
        self.cable.reset_trailing(
            self.avatar.socket_world_position(),
            -self.avatar.facing_direction(),
        );
        self.footsteps.reset();
        self.elapsed = 0.0;
        self.debug = false;
        self.frame = 0;
        info!("session reset");
    }

    /// Advance one frame of `dt` seconds.
    pub fn tick(&mut self, dt: f32, presentation: &mut dyn Presentation) -> FrameOutput<'_> {
        self.sync_capture();
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        self.frame += 1;
        if self.controller.is_captured() {
            self.elapsed += dt;
        }

        self.controller.update(dt);
        let state = self.controller.get_movement_state();
        self.avatar
            .update(dt, self.config.controller.smoothing, &state);
        self.cable.update(self.avatar.socket_world_position());

        let camera = self.controller.camera_pose();
        self.resolver
            .update(&self.registry, state.position, &camera, presentation);

        if self.config.audio.enabled && self.footsteps.tick(self.elapsed, state.moving) {
            presentation.play_cue(CueId::Footstep);
        }

        trace!(
            frame = self.frame,
            x = state.position.x,
            z = state.position.z,
            moving = state.moving,
            "tick"
        );

        self.frame_output()
    }

    /// Output for the current state without advancing it.
    pub fn frame_output(&self) -> FrameOutput<'_> {
        let position = self.controller.pose().position;
        FrameOutput {
            frame: self.frame,
            camera: self.controller.camera_pose(),
            character: CharacterTransform {
                position: self.avatar.position(),
                body_yaw: self.avatar.body_yaw(),
                leg_swing: self.avatar.leg_swing(),
                body_bob: self.avatar.body_bob(),
            },
            cable: self.cable.curve(),
            target: self.resolver.current_target(),
            prompt: self.resolver.prompt_text(&self.registry),
            hud: HudReadout::from_position(position),
            markers: &self.markers,
            debug: self.debug,
            captured: self.cursor.is_captured(),
            overlay: self.open_overlay(),
        }
    }
}
