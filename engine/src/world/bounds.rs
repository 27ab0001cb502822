//! Room Bounds
//!
//! The walkable floor is a square centred on the origin. Positions are
//! kept inside it by clamping X and Z independently; there is no collision
//! response beyond that.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Default half-width of the walkable square (meters).
pub const DEFAULT_HALF_WIDTH: f32 = 27.0;

/// Square walkable area `[-half_width, half_width]` on X and Z.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomBounds {
    pub half_width: f32,
}

impl Default for RoomBounds {
    fn default() -> Self {
        Self {
            half_width: DEFAULT_HALF_WIDTH,
        }
    }
}

impl RoomBounds {
    pub fn new(half_width: f32) -> Self {
        Self {
            half_width: half_width.abs(),
        }
    }

    /// Clamp X and Z into the square. Y is preserved.
    pub fn clamp(&self, pos: Vec3) -> Vec3 {
        clamp_to_room(pos, self.half_width)
    }

    /// Check whether a position lies inside (or on the edge of) the square.
    pub fn contains(&self, pos: Vec3) -> bool {
        pos.x.abs() <= self.half_width && pos.z.abs() <= self.half_width
    }

    /// The four floor corners, counter-clockwise from (-B, -B).
    pub fn corners(&self, y: f32) -> [Vec3; 4] {
        let b = self.half_width;
        [
            Vec3::new(-b, y, -b),
            Vec3::new(b, y, -b),
            Vec3::new(b, y, b),
            Vec3::new(-b, y, b),
        ]
    }
}

/// Clamp a position to a square of the given half-width (free function).
pub fn clamp_to_room(pos: Vec3, half_width: f32) -> Vec3 {
    Vec3::new(
        pos.x.clamp(-half_width, half_width),
        pos.y,
        pos.z.clamp(-half_width, half_width),
    )
}
