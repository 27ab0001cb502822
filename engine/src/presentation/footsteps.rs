//! Footstep cadence
//!
//! While the character walks, a footstep cue may fire once the interval has
//! elapsed since the last one. Time is session time, so pausing the
//! session also pauses the cadence.

use serde::{Deserialize, Serialize};

/// Minimum seconds between footsteps.
pub const FOOTSTEP_INTERVAL: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FootstepCadence {
    interval: f32,
    last_step: f32,
}

impl Default for FootstepCadence {
    fn default() -> Self {
        Self::new(FOOTSTEP_INTERVAL)
    }
}

impl FootstepCadence {
    pub fn new(interval: f32) -> Self {
        Self {
            interval: interval.max(0.0),
            last_step: 0.0,
        }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Returns `true` when a footstep should play at `elapsed` seconds.
    pub fn tick(&mut self, elapsed: f32, moving: bool) -> bool {
        if moving && elapsed - self.last_step > self.interval {
            self.last_step = elapsed;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.last_step = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_step_when_idle() {
        let mut cadence = FootstepCadence::default();
        assert!(!cadence.tick(5.0, false));
    }

    #[test]
    fn test_steps_spaced_by_interval() {
        let mut cadence = FootstepCadence::default();
        let mut steps = 0;
        // Two seconds at 60 Hz
        for frame in 1..=120 {
            if cadence.tick(frame as f32 / 60.0, true) {
                steps += 1;
            }
        }
        assert!((4..=5).contains(&steps));
    }

    #[test]
    fn test_first_step_waits_for_interval() {
        let mut cadence = FootstepCadence::default();
        assert!(!cadence.tick(0.3, true));
        assert!(cadence.tick(0.41, true));
        assert!(!cadence.tick(0.5, true));
    }
}
