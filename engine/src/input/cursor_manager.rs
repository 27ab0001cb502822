//! Cursor Manager Module
//!
//! Tracks pointer capture for the third-person view. The host environment
//! owns the real capture and may revoke it at any time (focus loss, a
//! system key); this struct mirrors the state and reports transitions so
//! the session can pause and resume mouse-look and movement.
//!
//! # Usage
//!
//! ```rust,ignore
//! use server_room_engine::input::{CursorManager, CaptureChange};
//!
//! let mut cursor = CursorManager::new();
//!
//! // Primary click while released: request capture
//! if cursor.handle_primary_click() == CaptureChange::Acquired {
//!     // apply to window
//! }
//!
//! // Host revoked capture
//! cursor.handle_focus_lost();
//! ```

/// Capture transition reported by the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureChange {
    /// Nothing changed
    None,
    /// Pointer is now captured
    Acquired,
    /// Pointer is now released
    Released,
}

/// Pointer capture state.
#[derive(Debug, Clone)]
pub struct CursorManager {
    /// Whether the pointer is captured (hidden, relative motion)
    captured: bool,
    /// Whether the window currently has focus
    has_focus: bool,
    /// Tracks if state changed and needs to be applied to the window
    state_dirty: bool,
}

impl Default for CursorManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorManager {
    /// Create a manager with the pointer released.
    ///
    /// Capture needs a user gesture, so the session always starts released.
    pub fn new() -> Self {
        Self {
            captured: false,
            has_focus: true,
            state_dirty: true,
        }
    }

    /// Check if the pointer is currently captured.
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Check if the window has focus.
    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// Check if cursor state needs to be applied to the window.
    pub fn is_dirty(&self) -> bool {
        self.state_dirty
    }

    /// Clear the dirty flag after applying state.
    pub fn clear_dirty(&mut self) {
        self.state_dirty = false;
    }

    /// Request capture. Refused while the window has no focus.
    pub fn acquire(&mut self) -> CaptureChange {
        if self.captured || !self.has_focus {
            return CaptureChange::None;
        }
        self.captured = true;
        self.state_dirty = true;
        CaptureChange::Acquired
    }

    /// Release capture.
    pub fn release(&mut self) -> CaptureChange {
        if !self.captured {
            return CaptureChange::None;
        }
        self.captured = false;
        self.state_dirty = true;
        CaptureChange::Released
    }

    /// Escape releases the pointer.
    pub fn handle_escape(&mut self) -> CaptureChange {
        self.release()
    }

    /// A primary click while released re-captures the pointer.
    pub fn handle_primary_click(&mut self) -> CaptureChange {
        self.acquire()
    }

    /// Focus loss revokes capture.
    pub fn handle_focus_lost(&mut self) -> CaptureChange {
        self.has_focus = false;
        self.release()
    }

    /// Focus gain does not re-capture on its own; the user has to click.
    pub fn handle_focus_gained(&mut self) {
        self.has_focus = true;
        self.state_dirty = true;
    }

    /// Whether the cursor should be visible.
    pub fn should_cursor_be_visible(&self) -> bool {
        !self.captured
    }

    /// Get a human-readable status message for the current cursor state.
    pub fn status_message(&self) -> &'static str {
        if self.captured {
            "ESC to release cursor"
        } else {
            "Click to enter"
        }
    }
}
