//! Path management for fontswap
//!
//! Resolves where fontswap keeps its own state (settings and the operation
//! journal) and where the running program lives.
//!
//! ## Path Resolution Order
//!
//! 1. `FONTSWAP_HOME` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/fontswap`, `~/Library/Application Support/fontswap`,
//!    `%APPDATA%\fontswap\config`)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::FontSwapError;

/// Name of the folder, next to the program, that holds the replacement font
pub const DEFAULT_SOURCE_FOLDER_NAME: &str = "PLACE YOUR CUSTOM FONT HERE";

/// Manages all paths used by fontswap
#[derive(Debug, Clone)]
pub struct SwapPaths {
    /// Base directory for settings and the journal
    base_dir: PathBuf,
}

impl SwapPaths {
    /// Create a new SwapPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, FontSwapError> {
        let base_dir = if let Ok(custom) = std::env::var("FONTSWAP_HOME") {
            PathBuf::from(custom)
        } else {
            ProjectDirs::from("", "", "fontswap")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    FontSwapError::Config("Could not determine a home directory".into())
                })?
        };

        Ok(Self { base_dir })
    }

    /// Create SwapPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the operation journal
    pub fn journal_file(&self) -> PathBuf {
        self.base_dir.join("journal.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), FontSwapError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FontSwapError::Io(format!("Failed to create base directory: {}", e)))
    }
}

/// Canonical path of the running executable
pub fn program_path() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.canonicalize().unwrap_or(exe))
}

/// Directory containing the running executable
pub fn program_dir() -> Result<PathBuf, FontSwapError> {
    program_path()
        .as_deref()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .ok_or_else(|| FontSwapError::Config("Could not determine the program's directory".into()))
}

/// Default source folder: `<program dir>/<folder name>`
pub fn default_source_dir(folder_name: &str) -> Result<PathBuf, FontSwapError> {
    Ok(program_dir()?.join(folder_name))
}
