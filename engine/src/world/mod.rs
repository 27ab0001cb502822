//! World Module
//!
//! World-space limits for the server room.

pub mod bounds;

pub use bounds::{DEFAULT_HALF_WIDTH, RoomBounds, clamp_to_room};
