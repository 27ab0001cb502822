//! Pointer-motion accumulator
//!
//! Relative pointer motion arrives asynchronously from the host's event
//! loop, possibly several times per frame. Deltas accumulate here and the
//! controller reads-and-clears them once per tick.

use glam::Vec2;

/// Accumulated relative pointer motion with capture tracking.
///
/// Motion reported while the pointer is not captured is dropped, and
/// releasing capture discards anything pending so the view does not jump
/// when capture comes back.
#[derive(Debug, Clone, Default)]
pub struct FpsMouseState {
    /// Accumulated delta since last consume.
    delta: Vec2,
    /// Whether the pointer is currently captured.
    captured: bool,
}

impl FpsMouseState {
    /// Create a new mouse state with zero delta and pointer not captured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate raw pointer motion. Ignored while not captured.
    #[inline]
    pub fn accumulate_delta(&mut self, dx: f32, dy: f32) {
        if self.captured {
            self.delta += Vec2::new(dx, dy);
        }
    }

    /// Return the accumulated delta and reset it to zero.
    #[inline]
    pub fn consume_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.delta)
    }

    /// Current accumulated delta without consuming it.
    #[inline]
    pub fn peek_delta(&self) -> Vec2 {
        self.delta
    }

    /// Set whether the pointer is captured. Releasing clears pending motion.
    #[inline]
    pub fn set_captured(&mut self, captured: bool) {
        self.captured = captured;
        if !captured {
            self.delta = Vec2::ZERO;
        }
    }

    /// Check if the pointer is currently captured.
    #[inline]
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Reset all state to defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
