//! Replace and restore workflows
//!
//! Drives the engines through a `Frontend`: check the preconditions, show
//! what will happen, ask, run, and journal the result.

use std::path::PathBuf;

use serde::Serialize;

use crate::audit::{AuditLogger, JournalEntry, Operation};
use crate::backup::{RestoreEngine, RestoreResult};
use crate::config::paths::program_path;
use crate::config::Settings;
use crate::engine::{CancellationToken, ReplaceEngine, ReplaceOptions, ReplaceReport};
use crate::error::{FontSwapError, FontSwapResult};
use crate::frontend::{ConfirmKind, ConfirmPrompt, Frontend, FrontendSink};
use crate::models::{BackupSession, BACKUP_ROOT_NAME};

use super::state::SwapState;

/// What happened to an emptied backup session after a restore
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "cleanup", rename_all = "snake_case")]
pub enum CleanupStatus {
    /// Files are still left in the session, so nothing was offered
    NotOffered,
    Declined,
    Removed { path: PathBuf },
    Failed { error: String },
}

/// Result of a confirmed restore
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestoreOutcome {
    pub result: RestoreResult,
    pub cleanup: CleanupStatus,
}

/// Runs workflows against the engines
pub struct SwapService {
    settings: Settings,
    journal: Option<AuditLogger>,
    protected_paths: Vec<PathBuf>,
    cancel: CancellationToken,
}

impl SwapService {
    /// Create a service; `journal` is ignored when the settings disable it
    pub fn new(settings: Settings, journal: Option<AuditLogger>) -> Self {
        let journal = journal.filter(|_| settings.journal_enabled);
        Self {
            settings,
            journal,
            protected_paths: program_path().into_iter().collect(),
            cancel: CancellationToken::new(),
        }
    }

    /// Replace the set of files a replace run must never touch
    pub fn with_protected_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.protected_paths = paths;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Token that stops a running workflow between files
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Engine configured from the settings
    pub fn replace_engine(&self) -> ReplaceEngine {
        ReplaceEngine::new(ReplaceOptions {
            layout: self.settings.backup_layout,
            protected_paths: self.protected_paths.clone(),
        })
        .with_cancellation(self.cancel.clone())
    }

    /// Backup sessions of the selected target, newest first
    pub fn sessions(&self, state: &SwapState) -> FontSwapResult<Vec<BackupSession>> {
        let target = state.require_target()?.clone();
        RestoreEngine::new(target).manager().list_sessions()
    }

    /// Back up and replace every font in the selected target
    ///
    /// Returns `Ok(None)` when the user declines. A missing target or a
    /// source folder without exactly one file fails before anything is asked.
    pub fn replace(
        &self,
        state: &mut SwapState,
        frontend: &mut dyn Frontend,
    ) -> FontSwapResult<Option<ReplaceReport>> {
        let target = state.require_target()?.clone();
        let source = state.refresh_source()?.require_candidate()?.clone();

        let engine = self.replace_engine();
        let plan = engine.plan(&source, &target)?;

        let prompt = ConfirmPrompt::new(ConfirmKind::Replace, "Confirmation")
            .detail(format!("Target Folder: {}", target.path().display()))
            .detail(format!("Source File:   {}", source.path().display()))
            .detail(format!(
                "{} font file(s) will be moved to '{}' and replaced; {} item(s) will be skipped.",
                plan.replace_count(),
                BACKUP_ROOT_NAME,
                plan.skip_count()
            ));
        if !frontend.confirm(&prompt)? {
            tracing::info!("replace declined");
            return Ok(None);
        }

        let result = engine.run(&source, &target, true, &mut FrontendSink(&mut *frontend));

        let entry = JournalEntry::new(Operation::Replace, target.path()).with_source(source.path());
        let entry = match &result {
            Ok(report) => {
                let entry = entry.with_counts(report.replaced, report.skipped);
                match report.session {
                    Some(id) => entry.with_session(id),
                    None => entry,
                }
            }
            Err(e) => entry.failed(e),
        };
        self.record(&entry);

        result.map(Some)
    }

    /// Move a backup session back into the selected target
    ///
    /// Uses the session already selected in `state`, or asks the front end to
    /// pick one. When the restore empties the session, the front end is asked
    /// whether to delete it. Returns `Ok(None)` when the user backs out.
    pub fn restore(
        &self,
        state: &mut SwapState,
        frontend: &mut dyn Frontend,
    ) -> FontSwapResult<Option<RestoreOutcome>> {
        let target = state.require_target()?.clone();
        let engine = RestoreEngine::new(target.clone()).with_cancellation(self.cancel.clone());

        let id = match state.selected_session() {
            Some(id) => id,
            None => {
                let sessions = engine.manager().list_sessions()?;
                match frontend.select_session(&sessions)? {
                    Some(id) => id,
                    None => return Ok(None),
                }
            }
        };
        state.select_session(Some(id));

        let plan = engine.plan(id)?;
        let prompt = ConfirmPrompt::new(ConfirmKind::Restore, "Restore Confirmation")
            .detail(format!("Target Folder: {}", target.path().display()))
            .detail(format!("Backup:        {}", plan.session.path.display()))
            .detail(format!(
                "{} file(s) will be moved back, overwriting the current files.",
                plan.files.len()
            ));
        if !frontend.confirm(&prompt)? {
            tracing::info!(session = %id, "restore declined");
            return Ok(None);
        }

        let result = engine.restore(id, true, &mut FrontendSink(&mut *frontend));

        let entry = JournalEntry::new(Operation::Restore, target.path()).with_session(id);
        let entry = match &result {
            Ok(done) => entry.with_counts(done.restored, 0),
            Err(e) => entry.failed(e),
        };
        self.record(&entry);

        let result = result?;
        state.select_session(None);

        let cleanup = if result.session_empty {
            self.offer_cleanup(&engine, &result, frontend)
        } else {
            CleanupStatus::NotOffered
        };

        Ok(Some(RestoreOutcome { result, cleanup }))
    }

    fn offer_cleanup(
        &self,
        engine: &RestoreEngine,
        result: &RestoreResult,
        frontend: &mut dyn Frontend,
    ) -> CleanupStatus {
        let prompt = ConfirmPrompt::new(ConfirmKind::Cleanup, "Cleanup").detail(format!(
            "The backup folder '{}' is now empty.",
            result.session_path.display()
        ));

        match frontend.confirm(&prompt) {
            Ok(true) => {}
            Ok(false) | Err(FontSwapError::Cancelled) => return CleanupStatus::Declined,
            Err(e) => return CleanupStatus::Failed { error: e.to_string() },
        }

        let cleaned = engine.cleanup(result.session, &mut FrontendSink(&mut *frontend));

        let entry = JournalEntry::new(Operation::Cleanup, engine.manager().backup_root())
            .with_session(result.session);
        match cleaned {
            Ok(path) => {
                self.record(&entry);
                CleanupStatus::Removed { path }
            }
            Err(e) => {
                tracing::warn!(session = %result.session, error = %e, "cleanup failed");
                self.record(&entry.failed(&e));
                CleanupStatus::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    fn record(&self, entry: &JournalEntry) {
        let Some(journal) = &self.journal else {
            return;
        };
        // The run already happened; a journal failure must not hide its result
        if let Err(e) = journal.log(entry) {
            tracing::warn!(journal = %journal.path().display(), error = %e, "could not write journal");
        }
    }
}
