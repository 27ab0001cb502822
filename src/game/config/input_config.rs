//! Input Configuration
//!
//! Translates winit physical keys into engine key codes and then, through
//! the engine's `KeyBindings`, into walk-around actions. Keys the
//! walk-around does not use map to nothing.

use winit::keyboard::KeyCode as WinitKey;

use crate::input::{InputAction, KeyBindings, KeyCode};

/// Engine key for a winit key.
pub fn engine_key(key: WinitKey) -> KeyCode {
    match key {
        WinitKey::KeyW => KeyCode::W,
        WinitKey::KeyA => KeyCode::A,
        WinitKey::KeyS => KeyCode::S,
        WinitKey::KeyD => KeyCode::D,
        WinitKey::ArrowUp => KeyCode::ArrowUp,
        WinitKey::ArrowDown => KeyCode::ArrowDown,
        WinitKey::ArrowLeft => KeyCode::ArrowLeft,
        WinitKey::ArrowRight => KeyCode::ArrowRight,
        WinitKey::KeyE => KeyCode::E,
        WinitKey::Escape => KeyCode::Escape,
        WinitKey::Enter | WinitKey::NumpadEnter => KeyCode::Enter,
        WinitKey::Backquote => KeyCode::Backquote,
        WinitKey::F3 => KeyCode::F3,
        _ => KeyCode::Unknown,
    }
}

/// Key bindings for the windowed run.
#[derive(Clone, Debug)]
pub struct InputConfig {
    pub bindings: KeyBindings,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            bindings: KeyBindings::new(),
        }
    }
}

impl InputConfig {
    /// Action bound to a winit key, if any.
    pub fn action_for(&self, key: WinitKey) -> Option<InputAction> {
        match engine_key(key) {
            KeyCode::Unknown => None,
            code => self.bindings.get_action(code),
        }
    }
}
