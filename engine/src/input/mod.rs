//! Input Module
//!
//! Platform-agnostic input state for the walk-around. Host events
//! (keyboard, pointer motion, clicks) are buffered here between frame
//! ticks: movement keys are level-sensitive, pointer motion accumulates
//! and is read-and-cleared once per tick.
//!
//! # Example
//!
//! ```rust,ignore
//! use server_room_engine::input::{InputAction, InputState};
//!
//! let mut input = InputState::new();
//! input.mouse.set_captured(true);
//! input.apply_action(InputAction::MoveForward, true);
//! input.mouse.accumulate_delta(4.0, -2.0);
//!
//! // Once per frame
//! let delta = input.mouse.consume_delta();
//! ```

pub mod bindings;
pub mod cursor_manager;
pub mod keyboard;
pub mod mouse_state;

pub use bindings::{InputAction, KeyBindings};
pub use cursor_manager::{CaptureChange, CursorManager};
pub use keyboard::{KeyCode, MovementKeys};
pub use mouse_state::FpsMouseState;

/// Buffered input consumed by the character controller.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub movement: MovementKeys,
    pub mouse: FpsMouseState,
}

impl InputState {
    /// Create a new input state with all inputs in their default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a movement action. Returns `false` for non-movement actions.
    pub fn apply_action(&mut self, action: InputAction, pressed: bool) -> bool {
        self.movement.apply_action(action, pressed)
    }

    /// Drop everything buffered: held keys and pending pointer motion.
    ///
    /// Called when capture is lost, since key releases may never arrive.
    pub fn clear_buffered(&mut self) {
        self.movement.reset();
        let _ = self.mouse.consume_delta();
    }

    /// Reset all input state to defaults.
    pub fn reset(&mut self) {
        self.movement.reset();
        self.mouse.reset();
    }
}
