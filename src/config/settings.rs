//! Configuration settings for the Game of Life simulator

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub grid: GridConfig,
    pub display: DisplayConfig,
    pub persistence: PersistenceConfig,
    pub playback: PlaybackConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Grid columns
    pub width: usize,
    /// Grid rows
    pub height: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Edge length of one cell in pixels, used to map pointer positions to cells
    pub cell_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    pub save_path: PathBuf,
    pub decode_policy: DecodePolicy,
}

/// How the board decoder treats characters other than '0' and '1'
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodePolicy {
    /// Anything that is not '0' is a live cell
    #[default]
    Permissive,
    /// Anything that is not '0' or '1' is rejected
    Strict,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub tick_interval_ms: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 40,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { cell_size: 20 }
    }
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from("lifegame.txt"),
            decode_policy: DecodePolicy::Permissive,
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
        }
    }
}

impl PlaybackConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `path`, falling back to defaults when the file is absent
    pub fn from_file_or_default(path: &PathBuf) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::warn!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.grid.width == 0 || self.grid.height == 0 {
            anyhow::bail!(
                "Grid dimensions must be positive, got {}x{}",
                self.grid.width,
                self.grid.height
            );
        }

        if self.display.cell_size == 0 {
            anyhow::bail!("Cell size must be positive");
        }

        if self.playback.tick_interval_ms == 0 {
            anyhow::bail!("Tick interval must be positive");
        }

        if self.persistence.save_path.as_os_str().is_empty() {
            anyhow::bail!("Save path cannot be empty");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref save_path) = cli_overrides.save_path {
            self.persistence.save_path = save_path.clone();
        }
        if let Some(tick_interval_ms) = cli_overrides.tick_interval_ms {
            self.playback.tick_interval_ms = tick_interval_ms;
        }
        if let Some(decode_policy) = cli_overrides.decode_policy {
            self.persistence.decode_policy = decode_policy;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub save_path: Option<PathBuf>,
    pub tick_interval_ms: Option<u64>,
    pub decode_policy: Option<DecodePolicy>,
}
