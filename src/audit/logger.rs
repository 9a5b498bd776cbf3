//! Append-only operation journal
//!
//! Each replace, restore, or cleanup run is written as a single JSON line and
//! flushed immediately.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{FontSwapError, FontSwapResult};

use super::entry::JournalEntry;

/// Writes journal entries to a JSONL file
pub struct AuditLogger {
    /// Path to the journal file
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a new AuditLogger that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry, creating the journal and its folder if needed
    pub fn log(&self, entry: &JournalEntry) -> FontSwapResult<()> {
        if let Some(parent) = self.log_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                FontSwapError::Io(format!("Failed to create journal directory: {}", e))
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| FontSwapError::Io(format!("Failed to open journal: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| FontSwapError::Json(format!("Failed to serialize journal entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| FontSwapError::Io(format!("Failed to write journal entry: {}", e)))?;

        file.flush()
            .map_err(|e| FontSwapError::Io(format!("Failed to flush journal: {}", e)))?;

        tracing::debug!(run_id = %entry.run_id, operation = %entry.operation, "journaled");
        Ok(())
    }

    /// Read all entries, oldest first
    pub fn read_all(&self) -> FontSwapResult<Vec<JournalEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| FontSwapError::Io(format!("Failed to open journal: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                FontSwapError::Io(format!("Failed to read journal line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: JournalEntry = serde_json::from_str(&line).map_err(|e| {
                FontSwapError::Json(format!(
                    "Failed to parse journal entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read the most recent N entries, oldest first
    pub fn read_recent(&self, count: usize) -> FontSwapResult<Vec<JournalEntry>> {
        let all_entries = self.read_all()?;
        let start = all_entries.len().saturating_sub(count);
        Ok(all_entries[start..].to_vec())
    }

    /// Get the number of entries in the journal
    pub fn entry_count(&self) -> FontSwapResult<usize> {
        if !self.log_path.exists() {
            return Ok(0);
        }

        let file = File::open(&self.log_path)
            .map_err(|e| FontSwapError::Io(format!("Failed to open journal: {}", e)))?;

        let count = BufReader::new(file)
            .lines()
            .map_while(Result::ok)
            .filter(|l| !l.trim().is_empty())
            .count();

        Ok(count)
    }

    /// Get the path to the journal file
    pub fn path(&self) -> &Path {
        &self.log_path
    }
}
