//! Journal entry data structures
//!
//! Defines the structure of journal entries: which operation ran, against
//! which target and session, and how it ended.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FontSwapError;

/// Types of operations that are journaled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Fonts were backed up and replaced
    Replace,
    /// Fonts were moved back from a backup session
    Restore,
    /// An emptied backup session was deleted
    Cleanup,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Replace => write!(f, "REPLACE"),
            Operation::Restore => write!(f, "RESTORE"),
            Operation::Cleanup => write!(f, "CLEANUP"),
        }
    }
}

/// How an operation ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    /// Every file was processed
    Completed,
    /// Stopped partway; earlier files stay processed
    Interrupted { error: String },
    /// Failed before changing anything
    Failed { error: String },
}

impl Outcome {
    /// Classify an error by whether it left partial work behind
    pub fn from_error(err: &FontSwapError) -> Self {
        let error = err.to_string();
        if err.is_partial() {
            Outcome::Interrupted { error }
        } else {
            Outcome::Failed { error }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Completed)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Completed => write!(f, "completed"),
            Outcome::Interrupted { error } => write!(f, "interrupted: {}", error),
            Outcome::Failed { error } => write!(f, "failed: {}", error),
        }
    }
}

/// A single journal entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique id of this run
    pub run_id: Uuid,

    /// When the operation finished (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Target directory acted on
    pub target: PathBuf,

    /// Backup session created or used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,

    /// Replacement file (replace only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,

    /// Files replaced or restored
    #[serde(default)]
    pub processed: usize,

    /// Entries skipped (replace only)
    #[serde(default)]
    pub skipped: usize,

    pub outcome: Outcome,
}

impl JournalEntry {
    /// Start an entry for an operation on `target`
    pub fn new(operation: Operation, target: impl Into<PathBuf>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            operation,
            target: target.into(),
            session: None,
            source: None,
            processed: 0,
            skipped: 0,
            outcome: Outcome::Completed,
        }
    }

    pub fn with_session(mut self, session: impl ToString) -> Self {
        self.session = Some(session.to_string());
        self
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_counts(mut self, processed: usize, skipped: usize) -> Self {
        self.processed = processed;
        self.skipped = skipped;
        self
    }

    /// Record a failure, taking counts from an `Interrupted` error
    pub fn failed(mut self, err: &FontSwapError) -> Self {
        if let FontSwapError::Interrupted {
            completed, skipped, ..
        } = err
        {
            self.processed = *completed;
            self.skipped = *skipped;
        }
        self.outcome = Outcome::from_error(err);
        self
    }

    /// One-line summary for display
    pub fn summary(&self) -> String {
        let mut line = format!(
            "{} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.operation,
            self.target.display()
        );
        if let Some(session) = &self.session {
            line.push_str(&format!(" [{}]", session));
        }
        line.push_str(&format!(" {} file(s), {}", self.processed, self.outcome));
        line
    }
}
