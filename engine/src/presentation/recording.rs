//! Presentation hosts that keep or log events instead of drawing them.

use tracing::info;

use super::{CueId, OverlayKind, OverlayPayload, Presentation};
use crate::interaction::TargetKind;

/// One callback, as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentationEvent {
    TargetAcquired(TargetKind),
    TargetLost,
    Cue(CueId),
    OverlayOpened(OverlayPayload),
    OverlayClosed(OverlayKind),
}

/// Records every callback in order. Also tracks the prompt and the open
/// overlay the way a real host would.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresentation {
    events: Vec<PresentationEvent>,
    prompt: Option<&'static str>,
    open_overlay: Option<OverlayKind>,
}

impl RecordingPresentation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[PresentationEvent] {
        &self.events
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&mut self) -> Vec<PresentationEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Prompt text currently shown, if any.
    pub fn prompt(&self) -> Option<&'static str> {
        self.prompt
    }

    pub fn open_overlay_kind(&self) -> Option<OverlayKind> {
        self.open_overlay
    }

    /// Number of acquire/lose notifications recorded.
    pub fn transition_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    PresentationEvent::TargetAcquired(_) | PresentationEvent::TargetLost
                )
            })
            .count()
    }

    pub fn cue_count(&self, cue: CueId) -> usize {
        self.events
            .iter()
            .filter(|e| **e == PresentationEvent::Cue(cue))
            .count()
    }
}

impl Presentation for RecordingPresentation {
    fn notify_target_acquired(&mut self, kind: TargetKind) {
        self.prompt = Some(kind.prompt_text());
        self.events.push(PresentationEvent::TargetAcquired(kind));
    }

    fn notify_target_lost(&mut self) {
        self.prompt = None;
        self.events.push(PresentationEvent::TargetLost);
    }

    fn play_cue(&mut self, cue: CueId) {
        self.events.push(PresentationEvent::Cue(cue));
    }

    fn open_overlay(&mut self, kind: OverlayKind, payload: &OverlayPayload) {
        self.open_overlay = Some(kind);
        self.events
            .push(PresentationEvent::OverlayOpened(payload.clone()));
    }

    fn close_overlay(&mut self, kind: OverlayKind) {
        if self.open_overlay == Some(kind) {
            self.open_overlay = None;
        }
        self.events.push(PresentationEvent::OverlayClosed(kind));
    }
}

/// Logs every callback at `info`. Used by the headless run.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingPresentation;

impl Presentation for TracingPresentation {
    fn notify_target_acquired(&mut self, kind: TargetKind) {
        info!(target_kind = kind.as_str(), prompt = kind.prompt_text(), "target acquired");
    }

    fn notify_target_lost(&mut self) {
        info!("target lost");
    }

    fn play_cue(&mut self, cue: CueId) {
        info!(cue = cue.asset_name(), "cue");
    }

    fn open_overlay(&mut self, kind: OverlayKind, payload: &OverlayPayload) {
        match payload {
            OverlayPayload::Project(project) => {
                info!(?kind, title = %project.title, link = %project.link, "overlay opened")
            }
            _ => info!(?kind, "overlay opened"),
        }
    }

    fn close_overlay(&mut self, kind: OverlayKind) {
        info!(?kind, "overlay closed");
    }
}
