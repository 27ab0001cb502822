//! Physics module
//!
//! Ray hit-tests for targeting and a one-pass relaxation for the trailing
//! cable. There is no rigid-body simulation and no collision response
//! beyond the room boundary clamp.
//!
//! # Unit System
//!
//! **1 unit = 1 meter**. Velocities are in m/s; the cable's gravity step is
//! a per-update displacement, not an acceleration.
//!
//! # Submodules
//!
//! - [`collision`] - `Ray`, `Bounds`, ray/AABB (slab) and ray/sphere tests
//! - [`cable`] - the trailing cable chain and its rendered curve

pub mod cable;
pub mod collision;

pub use cable::{CableConfig, CableSimulator};
pub use collision::{Bounds, Ray, ray_aabb_intersect, ray_sphere_intersect};
