//! Presentation boundary
//!
//! The core never owns UI or audio state. It reports what happened through
//! the [`Presentation`] trait and the host decides how to show it: DOM-like
//! overlays, a window title, a log, or a recorder in tests.

pub mod footsteps;
pub mod recording;

pub use footsteps::{FOOTSTEP_INTERVAL, FootstepCadence};
pub use recording::{PresentationEvent, RecordingPresentation, TracingPresentation};

use serde::{Deserialize, Serialize};

use crate::interaction::{ProjectInfo, TargetKind};

/// Audio cues the core can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CueId {
    /// Target acquired, debug toggled
    DigitalBlip,
    /// Target activated
    MechanicalClunk,
    Footstep,
}

impl CueId {
    /// Name of the sound asset.
    pub fn asset_name(&self) -> &'static str {
        match self {
            CueId::DigitalBlip => "digitalBlip",
            CueId::MechanicalClunk => "mechanicalClunk",
            CueId::Footstep => "footstep",
        }
    }
}

/// Overlay panels. Each target kind with an action has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    Project,
    Core,
    Logout,
}

impl OverlayKind {
    /// Overlay opened by activating a target of `kind`.
    pub fn for_target(kind: TargetKind) -> Option<Self> {
        match kind {
            TargetKind::Project => Some(OverlayKind::Project),
            TargetKind::Core => Some(OverlayKind::Core),
            TargetKind::Logout => Some(OverlayKind::Logout),
            TargetKind::Other => None,
        }
    }
}

/// Content handed to the host when an overlay opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayPayload {
    Project(ProjectInfo),
    Core,
    Logout,
}

impl OverlayPayload {
    pub fn kind(&self) -> OverlayKind {
        match self {
            OverlayPayload::Project(_) => OverlayKind::Project,
            OverlayPayload::Core => OverlayKind::Core,
            OverlayPayload::Logout => OverlayKind::Logout,
        }
    }
}

/// Fire-and-forget callbacks from the core to the host.
pub trait Presentation {
    /// A new target is under the reticle and in range.
    fn notify_target_acquired(&mut self, kind: TargetKind);

    /// Nothing is targeted any more.
    fn notify_target_lost(&mut self);

    fn play_cue(&mut self, cue: CueId);

    fn open_overlay(&mut self, kind: OverlayKind, payload: &OverlayPayload);

    fn close_overlay(&mut self, kind: OverlayKind);
}

/// Host that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresentation;

impl Presentation for NullPresentation {
    fn notify_target_acquired(&mut self, _kind: TargetKind) {}
    fn notify_target_lost(&mut self) {}
    fn play_cue(&mut self, _cue: CueId) {}
    fn open_overlay(&mut self, _kind: OverlayKind, _payload: &OverlayPayload) {}
    fn close_overlay(&mut self, _kind: OverlayKind) {}
}
