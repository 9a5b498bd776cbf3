//! Backup session identifiers and metadata
//!
//! Sessions live under `<target>/Fonts.old`. Each replace run gets its own
//! `Fonts.old/YYYY-MM-DD_HH-MM-SS` folder; older installs kept a single flat
//! `Fonts.old` folder, which is exposed here as the `Legacy` session.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::FontSwapError;

/// Name of the backup root inside a target directory
pub const BACKUP_ROOT_NAME: &str = "Fonts.old";

/// strftime format of timestamped session folder names
pub const SESSION_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Identifies one backup session under `Fonts.old`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum BackupSessionId {
    /// Files stored directly in `Fonts.old`
    Legacy,
    /// A `Fonts.old/<timestamp>` folder
    Timestamped(NaiveDateTime),
}

impl BackupSessionId {
    /// Parse a timestamped folder name, returning None for anything else
    pub fn from_folder_name(name: &str) -> Option<Self> {
        // Reject names chrono would accept loosely (e.g. single-digit fields)
        if name.len() != 19 {
            return None;
        }
        NaiveDateTime::parse_from_str(name, SESSION_TIMESTAMP_FORMAT)
            .ok()
            .map(Self::Timestamped)
    }

    /// Creation time, if the session carries one
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Legacy => None,
            Self::Timestamped(ts) => Some(*ts),
        }
    }

    /// Directory of this session under a backup root
    pub fn path_in(&self, backup_root: &Path) -> PathBuf {
        match self {
            Self::Legacy => backup_root.to_path_buf(),
            Self::Timestamped(ts) => backup_root.join(ts.format(SESSION_TIMESTAMP_FORMAT).to_string()),
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy)
    }
}

impl fmt::Display for BackupSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => write!(f, "{}", BACKUP_ROOT_NAME),
            Self::Timestamped(ts) => write!(f, "{}", ts.format(SESSION_TIMESTAMP_FORMAT)),
        }
    }
}

impl FromStr for BackupSessionId {
    type Err = FontSwapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("legacy") || s == BACKUP_ROOT_NAME {
            return Ok(Self::Legacy);
        }
        Self::from_folder_name(s).ok_or_else(|| FontSwapError::InvalidSessionId(s.to_string()))
    }
}

impl From<BackupSessionId> for String {
    fn from(id: BackupSessionId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for BackupSessionId {
    type Error = FontSwapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Metadata about one backup session on disk
#[derive(Debug, Clone, Serialize)]
pub struct BackupSession {
    pub id: BackupSessionId,
    /// Full path to the session directory
    pub path: PathBuf,
    /// Number of regular files held
    pub file_count: usize,
    /// Total size of those files in bytes
    pub size_bytes: u64,
}

impl BackupSession {
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        self.id.created_at()
    }

    pub fn is_empty(&self) -> bool {
        self.file_count == 0
    }
}
