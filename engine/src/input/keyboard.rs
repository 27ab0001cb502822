//! Keyboard Input Module
//!
//! Generic key codes and the four-direction movement intent record.
//! Decoupled from winit so the controller can be driven from tests or a
//! scripted headless run.

use super::InputAction;

/// Generic key codes, independent of windowing system.
///
/// Only the keys the walk-around binds are listed; everything else maps to
/// `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Movement keys
    W,
    A,
    S,
    D,

    // Arrow keys (aliases for movement)
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Discrete actions
    E,
    Escape,
    Enter,
    Backquote,
    F3,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Level-sensitive movement intents.
///
/// Held keys stay `true` until released; the controller samples them once
/// per frame tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementKeys {
    /// Walk away from the camera
    pub forward: bool,
    /// Walk toward the camera
    pub backward: bool,
    /// Strafe left
    pub left: bool,
    /// Strafe right
    pub right: bool,
}

impl MovementKeys {
    /// Create a new movement keys state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update movement state from a bound action.
    ///
    /// Returns `true` if the action was a movement action.
    pub fn apply_action(&mut self, action: InputAction, pressed: bool) -> bool {
        match action {
            InputAction::MoveForward => self.forward = pressed,
            InputAction::MoveBack => self.backward = pressed,
            InputAction::MoveLeft => self.left = pressed,
            InputAction::MoveRight => self.right = pressed,
            _ => return false,
        }
        true
    }

    /// Check if any movement key is currently pressed.
    pub fn any_pressed(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Reset all movement keys to released state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Get the forward/backward movement direction (-1, 0, or 1).
    pub fn forward_axis(&self) -> i32 {
        (self.forward as i32) - (self.backward as i32)
    }

    /// Get the left/right movement direction (-1, 0, or 1).
    pub fn right_axis(&self) -> i32 {
        (self.right as i32) - (self.left as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys_default() {
        let keys = MovementKeys::new();
        assert!(!keys.any_pressed());
        assert_eq!(keys.forward_axis(), 0);
        assert_eq!(keys.right_axis(), 0);
    }

    #[test]
    fn test_movement_keys_forward() {
        let mut keys = MovementKeys::new();
        assert!(keys.apply_action(InputAction::MoveForward, true));
        assert!(keys.forward);
        assert!(keys.any_pressed());
        assert_eq!(keys.forward_axis(), 1);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut keys = MovementKeys::new();
        keys.apply_action(InputAction::MoveForward, true);
        keys.apply_action(InputAction::MoveBack, true);
        assert_eq!(keys.forward_axis(), 0);
        assert!(keys.any_pressed());

        keys.apply_action(InputAction::MoveRight, true);
        assert_eq!(keys.right_axis(), 1);
    }

    #[test]
    fn test_non_movement_action() {
        let mut keys = MovementKeys::new();
        assert!(!keys.apply_action(InputAction::Cancel, true));
        assert!(!keys.any_pressed());
    }

    #[test]
    fn test_reset() {
        let mut keys = MovementKeys::new();
        keys.apply_action(InputAction::MoveLeft, true);
        keys.reset();
        assert_eq!(keys, MovementKeys::default());
    }
}
