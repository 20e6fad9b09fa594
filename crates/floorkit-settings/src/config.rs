//! Configuration management for the FloorKit editor
//!
//! Provides configuration file handling, defaults, and validation.
//! Supports JSON and TOML file formats stored in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - History settings (undo depth)
//! - Label defaults (colour, font, background)
//! - Floor topology defaults (corner and wall appearance)
//! - Event bus sizing

use floorkit_core::EventBusConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Undo/redo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of commands kept on the undo stack
    pub max_stack_size: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { max_stack_size: 50 }
    }
}

/// Defaults applied to newly created labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSettings {
    /// Text colour as a CSS hex string
    pub default_color: String,
    /// Font size in pixels
    pub font_size: u16,
    /// Background colour as a CSS hex string
    pub background_color: String,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            default_color: "#ffffff".to_string(),
            font_size: 16,
            background_color: "#000000".to_string(),
        }
    }
}

/// Appearance of corners and walls in the floor editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorSettings {
    /// Radius of corner handles
    pub corner_radius: f64,
    /// Fill colour of corner handles (0xRRGGBB)
    pub corner_color: u32,
    /// Stroke colour of walls (0xRRGGBB)
    pub wall_color: u32,
    /// Stroke width of walls
    pub wall_width: f64,
    /// Where a corner lands when no position is given
    pub default_corner_position: (f64, f64),
}

impl Default for FloorSettings {
    fn default() -> Self {
        Self {
            corner_radius: 20.0,
            corner_color: 0xffffff,
            wall_color: 0xffffff,
            wall_width: 10.0,
            default_corner_position: (100.0, 100.0),
        }
    }
}

/// Event bus sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventSettings {
    /// Broadcast channel capacity
    pub channel_capacity: usize,
    /// Recent events kept for late subscribers (0 = none)
    pub journal_size: usize,
}

impl Default for EventSettings {
    fn default() -> Self {
        let bus = EventBusConfig::default();
        Self {
            channel_capacity: bus.channel_capacity,
            journal_size: bus.journal_size,
        }
    }
}

impl EventSettings {
    /// Build the event bus configuration described by these settings
    pub fn bus_config(&self) -> EventBusConfig {
        EventBusConfig {
            channel_capacity: self.channel_capacity,
            journal_size: self.journal_size,
        }
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EditorConfig {
    /// Undo/redo history
    pub history: HistorySettings,
    /// Label defaults
    pub labels: LabelSettings,
    /// Floor topology defaults
    pub floor: FloorSettings,
    /// Event bus sizing
    pub events: EventSettings,
}

impl EditorConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform default location of the config file
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string())
        })?;
        Ok(dir.join("floorkit").join("config.toml"))
    }

    /// Load the config at `path`, falling back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::Directory {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, content).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.history.max_stack_size == 0 {
            return Err(invalid("history.max_stack_size", "must be > 0"));
        }

        if self.labels.font_size == 0 {
            return Err(invalid("labels.font_size", "must be > 0"));
        }
        if !is_hex_color(&self.labels.default_color) {
            return Err(invalid("labels.default_color", "must be a #rrggbb colour"));
        }
        if !is_hex_color(&self.labels.background_color) {
            return Err(invalid("labels.background_color", "must be a #rrggbb colour"));
        }

        if self.floor.corner_radius <= 0.0 {
            return Err(invalid("floor.corner_radius", "must be > 0"));
        }
        if self.floor.wall_width <= 0.0 {
            return Err(invalid("floor.wall_width", "must be > 0"));
        }

        if self.events.channel_capacity == 0 {
            return Err(invalid("events.channel_capacity", "must be > 0"));
        }

        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )
            .into()),
        }
    }
}

fn invalid(key: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidSetting {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}
