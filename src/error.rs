//! Custom error types for fontswap
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Every variant that concerns the filesystem
//! carries the exact path involved so front ends can show it to the user.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Why a target directory was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetProblem {
    /// Nothing exists at the path
    Missing,
    /// The path exists but is not a directory
    NotADirectory,
    /// The directory exists but cannot be written to
    NotWritable,
}

impl fmt::Display for TargetProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetProblem::Missing => write!(f, "does not exist"),
            TargetProblem::NotADirectory => write!(f, "is not a directory"),
            TargetProblem::NotWritable => write!(f, "is not writable"),
        }
    }
}

/// The main error type for fontswap operations
#[derive(Error, Debug)]
pub enum FontSwapError {
    /// The source folder could not be created or read
    #[error("Source folder unavailable at {}: {reason}", .path.display())]
    SourceDirectoryUnavailable { path: PathBuf, reason: String },

    /// The source folder does not hold exactly one file
    #[error(
        "Expected exactly one file in source folder {}, found {found}",
        .directory.display()
    )]
    AmbiguousSource { directory: PathBuf, found: usize },

    /// The target directory failed validation
    #[error("Target folder {} {problem}", .path.display())]
    InvalidTarget { path: PathBuf, problem: TargetProblem },

    /// No target directory has been chosen yet
    #[error("No target folder selected")]
    NoTargetSelected,

    /// A backup session with the same name already exists
    #[error("Backup session already exists: {}", .path.display())]
    BackupSessionExists { path: PathBuf },

    /// There is no backup to restore from
    #[error("No backup found at {}", .path.display())]
    NoBackupFound { path: PathBuf },

    /// The selected session does not exist
    #[error("Backup session '{id}' not found under {}", .root.display())]
    SessionNotFound { id: String, root: PathBuf },

    /// A session identifier could not be parsed
    #[error("Invalid backup session id '{0}' (expected YYYY-MM-DD_HH-MM-SS, 'latest' or 'legacy')")]
    InvalidSessionId(String),

    /// The selected session holds no files
    #[error("Backup session {} is empty, nothing to restore", .path.display())]
    EmptyBackup { path: PathBuf },

    /// Refused to delete a session directory that still has entries
    #[error("Refusing to remove {}: {remaining} item(s) still present", .path.display())]
    SessionNotEmpty { path: PathBuf, remaining: usize },

    /// A move, copy, delete, or listing failed
    #[error("Failed to {operation} {}: {source}", .path.display())]
    Filesystem {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The caller did not confirm a destructive operation
    #[error("{operation} requires confirmation")]
    ConfirmationRequired { operation: &'static str },

    /// The caller cancelled a running operation
    #[error("Operation cancelled")]
    Cancelled,

    /// A replace or restore stopped partway through
    #[error("{operation} stopped after {completed} file(s): {source}")]
    Interrupted {
        operation: &'static str,
        completed: usize,
        skipped: usize,
        #[source]
        source: Box<FontSwapError>,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors outside the font directories (settings, journal)
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl FontSwapError {
    /// Wrap an I/O error with the operation and path that produced it
    pub fn fs(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Wrap an error raised partway through a multi-file operation
    pub fn interrupted(
        operation: &'static str,
        completed: usize,
        skipped: usize,
        source: FontSwapError,
    ) -> Self {
        Self::Interrupted {
            operation,
            completed,
            skipped,
            source: Box::new(source),
        }
    }

    /// Check if some files were already processed before the failure
    pub fn is_partial(&self) -> bool {
        matches!(self, Self::Interrupted { completed, .. } if *completed > 0)
    }

    /// The innermost error, looking through `Interrupted`
    pub fn root_cause(&self) -> &FontSwapError {
        match self {
            Self::Interrupted { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Check if this error means a destructive operation must not start
    pub fn blocks_destructive_operation(&self) -> bool {
        matches!(
            self,
            Self::AmbiguousSource { .. }
                | Self::SourceDirectoryUnavailable { .. }
                | Self::InvalidTarget { .. }
                | Self::NoTargetSelected
                | Self::ConfirmationRequired { .. }
        )
    }
}

impl From<std::io::Error> for FontSwapError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FontSwapError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for fontswap operations
pub type FontSwapResult<T> = Result<T, FontSwapError>;
