//! User settings for fontswap
//!
//! Manages user preferences including the source folder name, how often the
//! source folder is polled, and which backup layout new runs use.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths::{SwapPaths, DEFAULT_SOURCE_FOLDER_NAME};
use crate::error::FontSwapError;

/// How replace runs lay out their backups under `Fonts.old`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackupLayout {
    /// One `Fonts.old/<timestamp>` folder per run (default)
    #[default]
    Timestamped,
    /// Files go straight into `Fonts.old` (single session)
    Flat,
}

/// User settings for fontswap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Name of the folder next to the program that holds the custom font
    #[serde(default = "default_source_folder_name")]
    pub source_folder_name: String,

    /// Seconds between polls of the source folder
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Backup layout for new replace runs
    #[serde(default)]
    pub backup_layout: BackupLayout,

    /// Phrase the console must receive before replace or restore
    #[serde(default = "default_confirmation_phrase")]
    pub confirmation_phrase: String,

    /// Whether runs are appended to the operation journal
    #[serde(default = "default_journal_enabled")]
    pub journal_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_source_folder_name() -> String {
    DEFAULT_SOURCE_FOLDER_NAME.to_string()
}

fn default_poll_interval_secs() -> u64 {
    5
}

fn default_confirmation_phrase() -> String {
    "YES".to_string()
}

fn default_journal_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            source_folder_name: default_source_folder_name(),
            poll_interval_secs: default_poll_interval_secs(),
            backup_layout: BackupLayout::default(),
            confirmation_phrase: default_confirmation_phrase(),
            journal_enabled: default_journal_enabled(),
        }
    }
}

impl Settings {
    /// Poll interval as a Duration, never shorter than one second
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &SwapPaths) -> Result<Self, FontSwapError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                FontSwapError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FontSwapError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SwapPaths) -> Result<(), FontSwapError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            FontSwapError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            FontSwapError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
