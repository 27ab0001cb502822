//! Overlay gating and activation state
//!
//! At most one overlay is open at a time. Opening needs the gate to be
//! closed; closing is by kind (the overlay's own close action) or by
//! cancel, which closes whatever is open.
//!
//! `ActivityState` holds the scene-side flags that activation toggles: which
//! project racks are running and whether the core visualization is on.

use std::collections::HashSet;

use super::TargetId;
use crate::presentation::OverlayKind;

/// The overlay currently shown and the target that opened it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenOverlay {
    pub kind: OverlayKind,
    pub target: TargetId,
}

#[derive(Debug, Clone, Default)]
pub struct OverlayGate {
    open: Option<OpenOverlay>,
}

impl OverlayGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn is_open_kind(&self, kind: OverlayKind) -> bool {
        self.open.is_some_and(|o| o.kind == kind)
    }

    pub fn current(&self) -> Option<OpenOverlay> {
        self.open
    }

    /// Open an overlay. Refused while another one is open.
    pub fn try_open(&mut self, kind: OverlayKind, target: TargetId) -> bool {
        if self.open.is_some() {
            return false;
        }
        self.open = Some(OpenOverlay { kind, target });
        true
    }

    /// Close the overlay of `kind`, if it is the one open.
    pub fn close(&mut self, kind: OverlayKind) -> Option<OpenOverlay> {
        if self.is_open_kind(kind) {
            self.open.take()
        } else {
            None
        }
    }

    /// Close whatever is open.
    pub fn close_any(&mut self) -> Option<OpenOverlay> {
        self.open.take()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityState {
    active_racks: HashSet<TargetId>,
    core_active: bool,
}

impl ActivityState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a rack active. Returns `false` if it already was.
    pub fn activate_rack(&mut self, rack: TargetId) -> bool {
        self.active_racks.insert(rack)
    }

    pub fn deactivate_rack(&mut self, rack: TargetId) -> bool {
        self.active_racks.remove(&rack)
    }

    pub fn is_rack_active(&self, rack: TargetId) -> bool {
        self.active_racks.contains(&rack)
    }

    pub fn active_rack_count(&self) -> usize {
        self.active_racks.len()
    }

    pub fn set_core_active(&mut self, active: bool) {
        self.core_active = active;
    }

    pub fn is_core_active(&self) -> bool {
        self.core_active
    }

    pub fn reset(&mut self) {
        self.active_racks.clear();
        self.core_active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_single_overlay() {
        let mut gate = OverlayGate::new();
        assert!(gate.try_open(OverlayKind::Core, TargetId(1)));
        assert!(!gate.try_open(OverlayKind::Logout, TargetId(2)));
        assert!(gate.is_open_kind(OverlayKind::Core));
    }

    #[test]
    fn test_gate_close_by_kind() {
        let mut gate = OverlayGate::new();
        gate.try_open(OverlayKind::Project, TargetId(0));
        assert!(gate.close(OverlayKind::Core).is_none());
        assert!(gate.is_open());
        let closed = gate.close(OverlayKind::Project).unwrap();
        assert_eq!(closed.target, TargetId(0));
        assert!(!gate.is_open());
        assert!(gate.close_any().is_none());
    }

    #[test]
    fn test_rack_activation_once() {
        let mut activity = ActivityState::new();
        assert!(activity.activate_rack(TargetId(3)));
        assert!(!activity.activate_rack(TargetId(3)));
        assert!(activity.deactivate_rack(TargetId(3)));
        assert!(activity.activate_rack(TargetId(3)));
    }
}
