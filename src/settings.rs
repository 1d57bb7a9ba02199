//! Player preferences with persistence
//!
//! Settings are saved to `~/.config/vignette/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All persisted preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    #[serde(default)]
    pub input: InputSettings,
}

/// Keyboard preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSettings {
    /// Use the Dvorak movement letters (`, a o e`) instead of `w a s d`
    #[serde(default)]
    pub alternate_layout: bool,
}

impl GameSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vignette"))
    }

    /// Load settings, writing the defaults out if no file exists yet
    pub fn load_or_init() -> Self {
        let Some(dir) = Self::config_dir() else {
            warn!("Could not determine config directory, using default settings");
            return Self::default();
        };

        let path = dir.join("settings.toml");
        if path.exists() {
            return Self::load_from(&path);
        }

        info!("No settings file found, writing defaults");
        let settings = Self::default();
        if let Err(e) = settings.save_to(&path) {
            warn!("Failed to write default settings: {:#}", e);
        }
        settings
    }

    /// Load settings from a file, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to a file, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}
