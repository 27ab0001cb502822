//! Game Module
//!
//! The server room itself, built on top of the engine: configuration, the
//! target catalog, and the per-frame session that wires everything up.

pub mod config;
pub mod scene;
pub mod session;

pub use config::{AudioConfig, ConfigError, InputConfig, SceneConfig};
pub use scene::{TargetSpec, build_registry, build_wireframe, default_targets};
pub use session::{CharacterTransform, FrameOutput, HudReadout, MinimapMarker, WalkSession};
