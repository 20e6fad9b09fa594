//! FloorKit Settings Crate
//!
//! Handles editor configuration: defaults, validation and persistence.

pub mod config;
pub mod error;

pub use config::{EditorConfig, EventSettings, FloorSettings, HistorySettings, LabelSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
