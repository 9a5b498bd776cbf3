//! Source folder state
//!
//! The source folder must hold exactly one regular file: the replacement font.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{FontSwapError, FontSwapResult};

/// The single file that will overwrite existing fonts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceCandidate {
    path: PathBuf,
}

impl SourceCandidate {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Absolute path of the replacement file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for display
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// What the resolver found in the source folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SourceState {
    /// The folder was missing and has just been created; the user must add a file
    NeedsPopulation { directory: PathBuf },
    /// The folder exists but holds no files
    Waiting { directory: PathBuf },
    /// Exactly one file is present
    Ready { candidate: SourceCandidate },
    /// More than one file is present
    Ambiguous { directory: PathBuf, found: usize },
}

impl SourceState {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    /// The candidate, if the folder held exactly one file
    pub fn candidate(&self) -> Option<&SourceCandidate> {
        match self {
            Self::Ready { candidate } => Some(candidate),
            _ => None,
        }
    }

    /// The candidate, or the error that blocks a replace
    pub fn require_candidate(&self) -> FontSwapResult<&SourceCandidate> {
        match self {
            Self::Ready { candidate } => Ok(candidate),
            Self::NeedsPopulation { directory } | Self::Waiting { directory } => {
                Err(FontSwapError::AmbiguousSource {
                    directory: directory.clone(),
                    found: 0,
                })
            }
            Self::Ambiguous { directory, found } => Err(FontSwapError::AmbiguousSource {
                directory: directory.clone(),
                found: *found,
            }),
        }
    }
}

impl fmt::Display for SourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NeedsPopulation { directory } => write!(
                f,
                "Created source folder {}. Put ONE font file in it and try again.",
                directory.display()
            ),
            Self::Waiting { directory } => {
                write!(f, "No file found in source folder {}", directory.display())
            }
            Self::Ready { candidate } => {
                write!(f, "Source file: {}", candidate.path().display())
            }
            Self::Ambiguous { directory, found } => write!(
                f,
                "{} files found in source folder {}; keep only ONE",
                found,
                directory.display()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_candidate() {
        let ready = SourceState::Ready {
            candidate: SourceCandidate::new(PathBuf::from("/src/custom.ttf")),
        };
        assert_eq!(
            ready.require_candidate().unwrap().path(),
            Path::new("/src/custom.ttf")
        );
        assert_eq!(ready.candidate().unwrap().file_name(), "custom.ttf");

        let waiting = SourceState::Waiting {
            directory: PathBuf::from("/src"),
        };
        assert!(matches!(
            waiting.require_candidate(),
            Err(FontSwapError::AmbiguousSource { found: 0, .. })
        ));

        let ambiguous = SourceState::Ambiguous {
            directory: PathBuf::from("/src"),
            found: 3,
        };
        assert!(ambiguous.candidate().is_none());
        assert!(matches!(
            ambiguous.require_candidate(),
            Err(FontSwapError::AmbiguousSource { found: 3, .. })
        ));
    }

    #[test]
    fn test_display_names_directory() {
        let state = SourceState::Ambiguous {
            directory: PathBuf::from("/src"),
            found: 2,
        };
        assert_eq!(
            state.to_string(),
            "2 files found in source folder /src; keep only ONE"
        );
    }
}
