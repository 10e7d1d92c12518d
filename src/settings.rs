//! Scanner settings with persistence
//!
//! Settings are saved to `~/.config/inspector/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use inspector_capture::CaptureConfig;
use inspector_mesh::ReconstructionConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All scanner settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorSettings {
    pub reconstruction: ReconstructionConfig,
    pub capture: CaptureConfig,
}

impl InspectorSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("inspector"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load settings from a specific file, falling back to defaults when the
    /// file is missing, unreadable, or holds invalid values.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        let settings: Self = match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => settings,
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    return Self::default();
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                return Self::default();
            }
        };

        if let Err(e) = settings.validate() {
            warn!("Invalid settings in {:?}: {}, using defaults", path, e);
            return Self::default();
        }

        info!("Loaded settings from {:?}", path);
        settings
    }

    /// Check every section for values the pipeline cannot use
    pub fn validate(&self) -> anyhow::Result<()> {
        self.reconstruction.validate()?;
        self.capture.validate()?;
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };
        self.save_to(&dir.join("settings.toml"))
    }

    /// Save settings to a specific file, creating parent directories
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
