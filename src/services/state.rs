//! Session-scoped swap state
//!
//! Holds what a front end has chosen so far: where the source folder is,
//! what was last found there, the target folder and the selected backup.
//! Every workflow takes this explicitly instead of reading globals.

use std::path::{Path, PathBuf};

use crate::config::paths::default_source_dir;
use crate::config::Settings;
use crate::error::{FontSwapError, FontSwapResult};
use crate::models::{BackupSessionId, SourceState, TargetDirectory};
use crate::source::{SourceResolver, SourceUpdate};

/// Choices made by the user during one run of a front end
#[derive(Debug, Clone)]
pub struct SwapState {
    source_dir: PathBuf,
    source: Option<SourceState>,
    target: Option<TargetDirectory>,
    selected_session: Option<BackupSessionId>,
}

impl SwapState {
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            source: None,
            target: None,
            selected_session: None,
        }
    }

    /// State using the configured source folder next to the program
    pub fn from_settings(settings: &Settings) -> FontSwapResult<Self> {
        Ok(Self::new(default_source_dir(&settings.source_folder_name)?))
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Resolver for the current source folder
    pub fn resolver(&self) -> SourceResolver {
        SourceResolver::new(&self.source_dir)
    }

    /// Resolve the source folder now and remember the result
    pub fn refresh_source(&mut self) -> FontSwapResult<&SourceState> {
        let state = self.resolver().resolve()?;
        Ok(self.source.insert(state))
    }

    /// Take a result published by a `SourceWatcher`
    pub fn apply_update(&mut self, update: &SourceUpdate) {
        self.source = match update {
            SourceUpdate::State(state) => Some(state.clone()),
            SourceUpdate::Error(_) => None,
        };
    }

    /// Last known source state, if the folder has been resolved
    pub fn source(&self) -> Option<&SourceState> {
        self.source.as_ref()
    }

    /// Validate and select a target folder
    ///
    /// Choosing a different folder clears the selected backup session,
    /// since session ids only make sense for the target they came from.
    pub fn set_target(&mut self, path: impl AsRef<Path>) -> FontSwapResult<&TargetDirectory> {
        let target = TargetDirectory::validate(path)?;
        if self.target.as_ref().map(|t| t.path()) != Some(target.path()) {
            self.selected_session = None;
        }
        Ok(self.target.insert(target))
    }

    pub fn target(&self) -> Option<&TargetDirectory> {
        self.target.as_ref()
    }

    /// The selected target, or the error that blocks replace and restore
    pub fn require_target(&self) -> FontSwapResult<&TargetDirectory> {
        self.target.as_ref().ok_or(FontSwapError::NoTargetSelected)
    }

    pub fn select_session(&mut self, id: Option<BackupSessionId>) {
        self.selected_session = id;
    }

    pub fn selected_session(&self) -> Option<BackupSessionId> {
        self.selected_session
    }
}
