//! Reticle targeting and activation
//!
//! Each frame the camera's forward ray is tested against every registered
//! part. Hits resolve to their owning target through the registry table;
//! targets farther than the threshold from the *player* (not the camera)
//! are dropped, and the nearest survivor wins. Equal distances keep the
//! earlier hit along the ray.
//!
//! Presentation callbacks fire only when the selected target changes.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ActivityState, InteractiveTarget, OpenOverlay, OverlayGate, TargetId, TargetKind, TargetRegistry};
use crate::camera::CameraPose;
use crate::physics::Ray;
use crate::presentation::{CueId, OverlayKind, OverlayPayload, Presentation};

/// Default interaction range (meters).
pub const DEFAULT_INTERACTION_DISTANCE: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Targets must be strictly closer than this to the player
    pub distance_threshold: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            distance_threshold: DEFAULT_INTERACTION_DISTANCE,
        }
    }
}

/// Result of an activation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// Nothing under the reticle
    NoTarget,
    /// Another overlay is already open
    Blocked,
    /// The project rack is already running
    AlreadyActive(TargetId),
    /// Target has no action attached
    NoAction(TargetId),
    Opened(OpenOverlay),
}

#[derive(Debug, Clone)]
pub struct InteractionResolver {
    config: InteractionConfig,
    current: Option<TargetId>,
    gate: OverlayGate,
    activity: ActivityState,
}

impl InteractionResolver {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            current: None,
            gate: OverlayGate::new(),
            activity: ActivityState::new(),
        }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn distance_threshold(&self) -> f32 {
        self.config.distance_threshold
    }

    pub fn current_target(&self) -> Option<TargetId> {
        self.current
    }

    pub fn current_target_in<'r>(&self, registry: &'r TargetRegistry) -> Option<&'r InteractiveTarget> {
        self.current.and_then(|id| registry.target(id))
    }

    /// Prompt for the current target.
    pub fn prompt_text(&self, registry: &TargetRegistry) -> Option<&'static str> {
        self.current_target_in(registry).map(|t| t.kind.prompt_text())
    }

    pub fn gate(&self) -> &OverlayGate {
        &self.gate
    }

    pub fn activity(&self) -> &ActivityState {
        &self.activity
    }

    /// Nearest in-range target along `ray`, without touching state.
    pub fn resolve(&self, registry: &TargetRegistry, player_position: Vec3, ray: &Ray) -> Option<TargetId> {
        let mut best: Option<(TargetId, f32)> = None;
        for hit in registry.raycast(ray) {
            let Some(target) = registry.owner_of(hit.part) else {
                continue;
            };
            let distance = player_position.distance(target.position);
            if distance < self.config.distance_threshold
                && best.is_none_or(|(_, nearest)| distance < nearest)
            {
                best = Some((target.id, distance));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Re-evaluate the target for this frame.
    pub fn update(
        &mut self,
        registry: &TargetRegistry,
        player_position: Vec3,
        camera: &CameraPose,
        presentation: &mut dyn Presentation,
    ) -> Option<TargetId> {
        let selected = self.resolve(registry, player_position, &camera.forward_ray());
        if selected != self.current {
            self.current = selected;
            match self.current_target_in(registry) {
                Some(target) => {
                    debug!(name = %target.name, kind = target.kind.as_str(), "target acquired");
                    presentation.notify_target_acquired(target.kind);
                    presentation.play_cue(CueId::DigitalBlip);
                }
                None => {
                    debug!("target lost");
                    presentation.notify_target_lost();
                }
            }
        }
        self.current
    }

    /// Act on the current target.
    pub fn on_activate(
        &mut self,
        registry: &TargetRegistry,
        presentation: &mut dyn Presentation,
    ) -> ActivationOutcome {
        if self.gate.is_open() {
            return ActivationOutcome::Blocked;
        }
        let Some(target) = self.current_target_in(registry) else {
            return ActivationOutcome::NoTarget;
        };
        let id = target.id;

        let outcome = match (OverlayKind::for_target(target.kind), &target.project) {
            (Some(OverlayKind::Project), Some(project)) => {
                if self.activity.activate_rack(id) {
                    self.open(OverlayPayload::Project(project.clone()), id, presentation)
                } else {
                    ActivationOutcome::AlreadyActive(id)
                }
            }
            (Some(OverlayKind::Core), _) => {
                self.activity.set_core_active(true);
                self.open(OverlayPayload::Core, id, presentation)
            }
            (Some(OverlayKind::Logout), _) => self.open(OverlayPayload::Logout, id, presentation),
            // Other tags, and project racks without a record
            _ => ActivationOutcome::NoAction(id),
        };

        presentation.play_cue(CueId::MechanicalClunk);
        outcome
    }

    fn open(
        &mut self,
        payload: OverlayPayload,
        target: TargetId,
        presentation: &mut dyn Presentation,
    ) -> ActivationOutcome {
        let kind = payload.kind();
        if !self.gate.try_open(kind, target) {
            return ActivationOutcome::Blocked;
        }
        info!(?kind, target_id = target.0, "overlay opened");
        presentation.open_overlay(kind, &payload);
        ActivationOutcome::Opened(OpenOverlay { kind, target })
    }

    /// Close the overlay of `kind` if it is open. Closing the project
    /// overlay stops its rack; closing the core overlay stops the core.
    pub fn close_overlay(&mut self, kind: OverlayKind, presentation: &mut dyn Presentation) -> bool {
        let Some(closed) = self.gate.close(kind) else {
            return false;
        };
        self.finish_close(closed, presentation);
        true
    }

    /// Close whichever overlay is open.
    pub fn cancel(&mut self, presentation: &mut dyn Presentation) -> Option<OverlayKind> {
        let closed = self.gate.close_any()?;
        self.finish_close(closed, presentation);
        Some(closed.kind)
    }

    fn finish_close(&mut self, closed: OpenOverlay, presentation: &mut dyn Presentation) {
        match closed.kind {
            OverlayKind::Project => {
                self.activity.deactivate_rack(closed.target);
            }
            OverlayKind::Core => self.activity.set_core_active(false),
            OverlayKind::Logout => {}
        }
        info!(kind = ?closed.kind, "overlay closed");
        presentation.close_overlay(closed.kind);
    }

    /// Back to the startup state, telling the host about anything that was shown.
    pub fn reset(&mut self, presentation: &mut dyn Presentation) {
        self.cancel(presentation);
        self.activity.reset();
        if self.current.take().is_some() {
            presentation.notify_target_lost();
        }
    }
}
