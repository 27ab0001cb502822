//! Camera Module
//!
//! Third-person camera state and math. Window-system agnostic: the renderer
//! only reads the resulting [`CameraPose`].

pub mod shoulder_camera;

pub use shoulder_camera::{CameraConfig, CameraPose, ShoulderCamera};
