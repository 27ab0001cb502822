//! Spatial Math Module
//!
//! Small vector helpers shared by the controller, camera, cable and
//! interaction code, plus Catmull-Rom curve evaluation for the cable.
//!
//! All types are `glam` types; this module only adds the handful of
//! operations the engine needs on top of them.

pub mod curve;
pub mod smoothing;

pub use curve::{CatmullRomCurve, CurveType};
pub use smoothing::{SmoothingMode, damp_factor, lerp_vec3, rotate_horizontal};
