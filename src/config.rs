//! Authored tuning, loaded from TOML
//!
//! The file named by `VIGNETTE_CONFIG`, or `./vignette.toml` when present.
//! Every table is optional; missing tables keep their defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::info;

use vignette_core::TimeConfig;
use vignette_game::{MovementConfig, RevealConfig, TriggerConfig};
use vignette_world::WorldConfig;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "VIGNETTE_CONFIG";
/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "vignette.toml";

/// Host loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Target frames per second
    pub frame_rate: f32,
    /// Sleep between frames and use measured deltas; otherwise step a fixed
    /// delta as fast as possible
    pub realtime: bool,
    /// Seconds the autopilot waits between dialogue clicks
    pub advance_interval: f32,
    /// Seconds the autopilot spends walking to one NPC before giving up
    pub leg_timeout: f32,
    /// Stop after this many frames
    pub max_frames: Option<u64>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            realtime: true,
            advance_interval: 0.6,
            leg_timeout: 90.0,
            max_frames: None,
        }
    }
}

/// Everything tunable about the vignette
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VignetteConfig {
    /// World raster; a generated map is used when unset
    pub raster_path: Option<PathBuf>,
    /// Where the player wakes up
    pub spawn: Vec2,
    pub time: TimeConfig,
    pub world: WorldConfig,
    pub movement: MovementConfig,
    pub reveal: RevealConfig,
    pub trigger: TriggerConfig,
    pub host: HostConfig,
}

impl Default for VignetteConfig {
    fn default() -> Self {
        Self {
            raster_path: None,
            spawn: Vec2::ZERO,
            time: TimeConfig::default(),
            world: WorldConfig::default(),
            movement: MovementConfig::default(),
            reveal: RevealConfig::default(),
            trigger: TriggerConfig::default(),
            host: HostConfig::default(),
        }
    }
}

impl VignetteConfig {
    /// Load from `VIGNETTE_CONFIG` (which must exist) or `./vignette.toml`
    /// (which may not).
    pub fn load() -> Result<Self> {
        if let Some(path) = env::var_os(CONFIG_ENV) {
            return Self::load_from(Path::new(&path));
        }

        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::load_from(path)
        } else {
            info!("No {} found, using default tuning", DEFAULT_CONFIG_FILE);
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config = Self::parse(&content).with_context(|| format!("Invalid config {:?}", path))?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use vignette_core::GameTime;
    use vignette_game::{DialogueEngine, FrictionMode, TriggerMode};

    #[test]
    fn test_defaults_match_reference_tuning() {
        let config = VignetteConfig::default();
        assert!((config.movement.move_speed - 1.2).abs() < 1e-6);
        assert!((config.movement.friction - 0.88).abs() < 1e-6);
        assert_eq!(config.movement.move_steps, 10);
        assert!((config.world.cell_size - 0.125).abs() < 1e-6);
        assert_eq!(config.world.layers.len(), 3);
        assert!((config.trigger.radius - 0.5).abs() < 1e-6);
        assert_eq!(config.spawn, Vec2::ZERO);
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = VignetteConfig::parse("").unwrap();
        assert!(config.raster_path.is_none());
        assert_eq!(config.host.frame_rate, 60.0);
    }

    #[test]
    fn test_partial_override() {
        let config = VignetteConfig::parse(
            r#"
            raster_path = "maps/forest.png"

            [movement]
            move_speed = 2.0
            friction = 0.9
            move_steps = 10
            friction_mode = { TimeScaled = { reference_rate = 60.0 } }

            [trigger]
            radius = 0.5
            mode = "Level"
            "#,
        )
        .unwrap();
        assert_eq!(config.raster_path, Some(PathBuf::from("maps/forest.png")));
        assert_eq!(config.movement.move_speed, 2.0);
        assert_eq!(
            config.movement.friction_mode,
            FrictionMode::TimeScaled {
                reference_rate: 60.0
            }
        );
        assert_eq!(config.trigger.mode, TriggerMode::Level);
        assert!((config.world.probe_half_width - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_config_errors() {
        assert!(VignetteConfig::parse("spawn = \"nowhere\"").is_err());
        assert!(VignetteConfig::load_from(Path::new("/definitely/not/here.toml")).is_err());
    }

    #[test]
    fn test_out_of_range_time_config_is_harmless() {
        let config = VignetteConfig::parse(
            r#"
            [time]
            time_scale = -1.0
            max_delta_time = -0.5
            "#,
        )
        .unwrap();
        let mut time = GameTime::new(config.time);
        time.update(0.016);
        assert_eq!(time.delta(), Duration::ZERO);
    }

    #[test]
    fn test_reveal_config_bounds() {
        // Durations are unsigned
        assert!(VignetteConfig::parse(
            r#"
            [reveal]
            start_delay = { secs = -1, nanos = 0 }
            letter_delay = { secs = 0, nanos = 0 }
            punctuation_delay = { secs = 0, nanos = 0 }
            punctuation = []
            "#,
        )
        .is_err());

        // Zero delays reveal a whole message in a single update
        let config = VignetteConfig::parse(
            r#"
            [reveal]
            start_delay = { secs = 0, nanos = 0 }
            letter_delay = { secs = 0, nanos = 0 }
            punctuation_delay = { secs = 0, nanos = 0 }
            punctuation = []
            "#,
        )
        .unwrap();
        let mut engine = DialogueEngine::with_config(config.reveal);
        engine.open(vec!["Hello.".to_string()]);
        engine.update(Duration::ZERO);
        assert_eq!(engine.reveal_index(), 6);
    }
}
