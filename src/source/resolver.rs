//! Source folder resolution
//!
//! Finds the single replacement file in the source folder. Creating the
//! folder when it is missing is the only change this ever makes on disk, so
//! it is safe to call repeatedly from a poll loop.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{FontSwapError, FontSwapResult};
use crate::models::{SourceCandidate, SourceState};

/// Looks for the replacement file in one folder
#[derive(Debug, Clone)]
pub struct SourceResolver {
    directory: PathBuf,
}

impl SourceResolver {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// The folder being resolved
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Inspect the folder and report its state
    pub fn resolve(&self) -> FontSwapResult<SourceState> {
        let entries = match fs::read_dir(&self.directory) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return self.create_missing(),
            Err(e) => return Err(self.unavailable(e)),
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| self.unavailable(e))?;
            // Follows symlinks, so a link to a font counts as a file
            let is_file = fs::metadata(entry.path())
                .map(|m| m.is_file())
                .unwrap_or(false);
            if is_file {
                files.push(entry.path());
            }
        }

        let state = match files.len() {
            0 => SourceState::Waiting {
                directory: self.directory.clone(),
            },
            1 => {
                let path = files.remove(0);
                let path = path.canonicalize().unwrap_or(path);
                SourceState::Ready {
                    candidate: SourceCandidate::new(path),
                }
            }
            found => SourceState::Ambiguous {
                directory: self.directory.clone(),
                found,
            },
        };

        tracing::debug!(directory = %self.directory.display(), ?state, "resolved source folder");
        Ok(state)
    }

    /// Resolve and require exactly one file
    pub fn require_candidate(&self) -> FontSwapResult<SourceCandidate> {
        self.resolve()?.require_candidate().cloned()
    }

    fn create_missing(&self) -> FontSwapResult<SourceState> {
        fs::create_dir_all(&self.directory).map_err(|e| self.unavailable(e))?;
        tracing::info!(directory = %self.directory.display(), "created source folder");
        Ok(SourceState::NeedsPopulation {
            directory: self.directory.clone(),
        })
    }

    fn unavailable(&self, err: std::io::Error) -> FontSwapError {
        FontSwapError::SourceDirectoryUnavailable {
            path: self.directory.clone(),
            reason: err.to_string(),
        }
    }
}
