//! Config Module
//!
//! Scene tuning (loadable from JSON) and windowed key bindings.

pub mod input_config;
pub mod scene_config;

pub use input_config::{InputConfig, engine_key};
pub use scene_config::{AudioConfig, ConfigError, SceneConfig};
