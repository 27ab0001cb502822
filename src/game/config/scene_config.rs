//! Scene Configuration
//!
//! Every tunable of the walk-around in one serde struct. `Default` matches
//! the reference feel; a JSON file may override any subset of fields.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::camera::CameraConfig;
use crate::game::scene::{TargetSpec, default_targets};
use crate::interaction::{InteractionConfig, TargetKind};
use crate::math::SmoothingMode;
use crate::physics::CableConfig;
use crate::player::{AvatarConfig, ControllerConfig};
use crate::presentation::FOOTSTEP_INTERVAL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scene config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid scene config: {0}")]
    Invalid(String),
}

/// Sound settings. Only cue timing matters to the core.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    /// Minimum seconds between footstep cues
    pub footstep_interval: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            footstep_interval: FOOTSTEP_INTERVAL,
        }
    }
}

/// Central configuration for a walk-around session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub controller: ControllerConfig,
    pub camera: CameraConfig,
    pub avatar: AvatarConfig,
    pub cable: CableConfig,
    pub interaction: InteractionConfig,
    pub audio: AudioConfig,
    pub targets: Vec<TargetSpec>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            controller: ControllerConfig::default(),
            camera: CameraConfig::default(),
            avatar: AvatarConfig::default(),
            cable: CableConfig::default(),
            interaction: InteractionConfig::default(),
            audio: AudioConfig::default(),
            targets: default_targets(),
        }
    }
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}

fn check_blend(name: &str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be in (0, 1], got {value}")))
    }
}

fn check_positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be positive, got {value}")))
    }
}

impl SceneConfig {
    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        info!(path = %path.display(), targets = config.targets.len(), "scene config loaded");
        Ok(config)
    }

    /// Parse and validate JSON. Missing fields take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        debug!(smoothing = ?config.controller.smoothing, "scene config parsed");
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.controller;
        check_positive("controller.move_speed", c.move_speed)?;
        check_blend("controller.accel_blend", c.accel_blend)?;
        check_blend("controller.decel_blend", c.decel_blend)?;
        check_positive("controller.mouse_sensitivity", c.mouse_sensitivity)?;
        check_positive("controller.bounds.half_width", c.bounds.half_width)?;
        if c.pitch_min >= c.pitch_max {
            return Err(invalid(format!(
                "controller pitch range is empty: [{}, {}]",
                c.pitch_min, c.pitch_max
            )));
        }
        if let SmoothingMode::TimeScaled { reference_fps } = c.smoothing {
            check_positive("controller.smoothing.reference_fps", reference_fps)?;
        }

        check_positive("camera.distance", self.camera.distance)?;
        check_blend("camera.follow_blend", self.camera.follow_blend)?;
        check_positive("camera.fov_y", self.camera.fov_y)?;
        check_blend("avatar.turn_blend", self.avatar.turn_blend)?;

        let cable = &self.cable;
        if cable.point_count < 2 {
            return Err(invalid(format!(
                "cable.point_count must be at least 2, got {}",
                cable.point_count
            )));
        }
        check_positive("cable.rest_length", cable.rest_length)?;
        check_blend("cable.correction", cable.correction)?;
        if cable.gravity_step < 0.0 {
            return Err(invalid("cable.gravity_step must not be negative"));
        }
        if cable.curve_segments == 0 {
            return Err(invalid("cable.curve_segments must be at least 1"));
        }

        check_positive(
            "interaction.distance_threshold",
            self.interaction.distance_threshold,
        )?;
        if self.audio.footstep_interval < 0.0 {
            return Err(invalid("audio.footstep_interval must not be negative"));
        }

        for target in &self.targets {
            if target.parts.is_empty() {
                return Err(invalid(format!("target '{}' has no hit-test parts", target.name)));
            }
            if target.kind == TargetKind::Project && target.project.is_none() {
                return Err(invalid(format!(
                    "project target '{}' has no project record",
                    target.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SceneConfig::default();
        config.validate().unwrap();
        assert_eq!(config.controller.move_speed, 5.0);
        assert_eq!(config.cable.point_count, 30);
        assert_eq!(config.interaction.distance_threshold, 8.0);
        assert_eq!(config.targets.len(), 5);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SceneConfig::from_json_str(
            r#"{ "controller": { "move_speed": 7.5 }, "interaction": { "distance_threshold": 4.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.controller.move_speed, 7.5);
        assert_eq!(config.controller.accel_blend, 0.15);
        assert_eq!(config.interaction.distance_threshold, 4.0);
        assert_eq!(config.targets.len(), 5);
    }

    #[test]
    fn test_time_scaled_smoothing_from_json() {
        let config = SceneConfig::from_json_str(
            r#"{ "controller": { "smoothing": { "mode": "time_scaled", "reference_fps": 60.0 } } }"#,
        )
        .unwrap();
        assert_eq!(
            config.controller.smoothing,
            SmoothingMode::TimeScaled { reference_fps: 60.0 }
        );
    }

    #[test]
    fn test_rejects_inverted_pitch() {
        let mut config = SceneConfig::default();
        config.controller.pitch_min = 1.0;
        config.controller.pitch_max = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_short_cable_and_bad_blend() {
        let mut config = SceneConfig::default();
        config.cable.point_count = 1;
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.controller.decel_blend = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            SceneConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SceneConfig::load("/nonexistent/server_room.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_json_round_trip_keeps_targets() {
        let config = SceneConfig::default();
        let text = config.to_json_pretty().unwrap();
        let back = SceneConfig::from_json_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
