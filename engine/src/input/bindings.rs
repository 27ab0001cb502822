//! Input Bindings Module
//!
//! Maps physical keys to logical actions. Several keys may share one action
//! (WASD and the arrow keys both drive movement).

use std::collections::HashMap;

use super::KeyCode;

/// Logical input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Move forward (default: W, ArrowUp)
    MoveForward,
    /// Move backward (default: S, ArrowDown)
    MoveBack,
    /// Strafe left (default: A, ArrowLeft)
    MoveLeft,
    /// Strafe right (default: D, ArrowRight)
    MoveRight,
    /// Act on the current target (default: E, also primary click)
    Activate,
    /// Close the open overlay / release the pointer (default: Escape)
    Cancel,
    /// Confirm the open prompt (default: Enter)
    Confirm,
    /// Toggle the debug wireframe (default: F3, Backquote)
    ToggleDebug,
}

impl InputAction {
    /// Movement actions are level-sensitive; everything else fires on press.
    pub fn is_movement(self) -> bool {
        matches!(
            self,
            InputAction::MoveForward
                | InputAction::MoveBack
                | InputAction::MoveLeft
                | InputAction::MoveRight
        )
    }
}

/// Maps physical keys to logical actions.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    /// Map from physical key to logical action
    key_to_action: HashMap<KeyCode, InputAction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Create a new KeyBindings instance with default key mappings.
    pub fn new() -> Self {
        let mut bindings = Self::empty();

        bindings.bind(KeyCode::W, InputAction::MoveForward);
        bindings.bind(KeyCode::ArrowUp, InputAction::MoveForward);
        bindings.bind(KeyCode::S, InputAction::MoveBack);
        bindings.bind(KeyCode::ArrowDown, InputAction::MoveBack);
        bindings.bind(KeyCode::A, InputAction::MoveLeft);
        bindings.bind(KeyCode::ArrowLeft, InputAction::MoveLeft);
        bindings.bind(KeyCode::D, InputAction::MoveRight);
        bindings.bind(KeyCode::ArrowRight, InputAction::MoveRight);
        bindings.bind(KeyCode::E, InputAction::Activate);
        bindings.bind(KeyCode::Escape, InputAction::Cancel);
        bindings.bind(KeyCode::Enter, InputAction::Confirm);
        bindings.bind(KeyCode::F3, InputAction::ToggleDebug);
        bindings.bind(KeyCode::Backquote, InputAction::ToggleDebug);

        bindings
    }

    /// Bindings with nothing bound.
    pub fn empty() -> Self {
        Self {
            key_to_action: HashMap::new(),
        }
    }

    /// Bind a physical key to a logical action, replacing any previous binding for that key.
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.key_to_action.insert(key, action);
    }

    /// Get the action bound to a physical key, if any.
    pub fn get_action(&self, key: KeyCode) -> Option<InputAction> {
        self.key_to_action.get(&key).copied()
    }
}
