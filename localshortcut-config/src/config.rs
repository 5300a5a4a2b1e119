//! Config file loading, saving and path resolution.

use crate::error::ConfigError;
use crate::types::{LogLevel, ShortcutBinding};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutConfig {
    /// Number of windows opened at startup
    #[serde(default = "crate::defaults::initial_windows")]
    pub initial_windows: usize,

    /// Title prefix for opened windows
    #[serde(default = "crate::defaults::window_title")]
    pub window_title: String,

    #[serde(default)]
    pub log_level: LogLevel,

    /// Shortcuts registered at startup
    #[serde(default = "crate::defaults::shortcuts")]
    pub shortcuts: Vec<ShortcutBinding>,
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            initial_windows: crate::defaults::initial_windows(),
            window_title: crate::defaults::window_title(),
            log_level: LogLevel::default(),
            shortcuts: crate::defaults::shortcuts(),
        }
    }
}

impl ShortcutConfig {
    /// Load configuration from the default path, or defaults if it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Config path: {:?}", path);

        if !path.exists() {
            log::info!("No config file found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(ConfigError::from)?;
        let config: ShortcutConfig =
            serde_yaml_ng::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        log::info!(
            "Loaded config with {} shortcut(s) from {:?}",
            config.shortcuts.len(),
            path
        );
        Ok(config)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::from)?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::from)?;

        // Atomic save: write to temp file then rename
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(ConfigError::from)?;
        fs::rename(&temp_path, path).map_err(ConfigError::from)?;

        log::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Check field values that serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_windows == 0 {
            return Err(ConfigError::Validation(
                "initial_windows must be at least 1".to_string(),
            ));
        }
        for binding in &self.shortcuts {
            if binding.accelerator.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "shortcut accelerator must not be empty".to_string(),
                ));
            }
            if let Some(index) = binding.window
                && index >= self.initial_windows
            {
                return Err(ConfigError::Validation(format!(
                    "shortcut '{}' targets window {} but only {} window(s) are opened",
                    binding.accelerator, index, self.initial_windows
                )));
            }
        }
        Ok(())
    }

    /// Get the configuration directory.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("localshortcut"))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get the configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }
}
