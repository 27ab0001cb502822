//! Scene Module
//!
//! The server room's interactive targets and the wireframe view of a frame.

pub mod catalog;
pub mod view;

pub use catalog::{TargetSpec, build_registry, default_projects, default_targets, rack_parts};
pub use view::build_wireframe;
