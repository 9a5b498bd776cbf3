//! Replace engine
//!
//! Moves each font file in the target into a new backup session, then copies
//! the source file into the vacated path. Work is strictly sequential: a file's
//! move finishes before its copy starts, and a failure stops the run with the
//! files processed so far left as they are.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::backup::BackupSessionManager;
use crate::config::paths::program_path;
use crate::config::settings::BackupLayout;
use crate::error::{FontSwapError, FontSwapResult};
use crate::models::{is_font_path, BackupSessionId, SourceCandidate, TargetDirectory};

use super::cancel::CancellationToken;
use super::fsops::{copy_with_metadata, move_file};
use super::progress::{ProgressEvent, ProgressSink, SkipReason};

const OPERATION: &str = "replace";

/// Settings for a replace run
#[derive(Debug, Clone)]
pub struct ReplaceOptions {
    /// Backup layout for the session this run creates
    pub layout: BackupLayout,
    /// Files that must never be moved, such as the running program
    pub protected_paths: Vec<PathBuf>,
}

impl Default for ReplaceOptions {
    fn default() -> Self {
        Self {
            layout: BackupLayout::default(),
            protected_paths: program_path().into_iter().collect(),
        }
    }
}

/// What a replace run would do, computed without touching anything
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplacePlan {
    /// Font files that would be backed up and replaced
    pub fonts: Vec<PathBuf>,
    /// Entries that would be left alone
    pub skipped: Vec<(String, SkipReason)>,
}

impl ReplacePlan {
    pub fn replace_count(&self) -> usize {
        self.fonts.len()
    }

    pub fn skip_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Outcome of a completed replace run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplaceReport {
    pub replaced: usize,
    pub skipped: usize,
    /// Session created by this run; None when no font was found
    pub session: Option<BackupSessionId>,
    pub session_path: Option<PathBuf>,
}

/// One entry of the target directory, classified
#[derive(Debug)]
struct ScannedEntry {
    name: OsString,
    path: PathBuf,
    action: EntryAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryAction {
    Replace,
    Skip(SkipReason),
}

/// Replaces font files in a target directory
#[derive(Debug, Clone, Default)]
pub struct ReplaceEngine {
    options: ReplaceOptions,
    cancel: Option<CancellationToken>,
}

impl ReplaceEngine {
    pub fn new(options: ReplaceOptions) -> Self {
        Self {
            options,
            cancel: None,
        }
    }

    /// Check `token` between files and stop when it is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Preview which entries would be replaced or skipped
    pub fn plan(
        &self,
        source: &SourceCandidate,
        target: &TargetDirectory,
    ) -> FontSwapResult<ReplacePlan> {
        let mut plan = ReplacePlan::default();
        for entry in self.scan(source, target)? {
            match entry.action {
                EntryAction::Replace => plan.fonts.push(entry.path),
                EntryAction::Skip(reason) => plan
                    .skipped
                    .push((entry.name.to_string_lossy().to_string(), reason)),
            }
        }
        Ok(plan)
    }

    /// Back up and replace every font file in `target` with `source`
    ///
    /// Nothing is touched unless `confirmed` is true. On a mid-run failure the
    /// error is `Interrupted`, carrying the counts reached before it.
    pub fn run(
        &self,
        source: &SourceCandidate,
        target: &TargetDirectory,
        confirmed: bool,
        sink: &mut dyn ProgressSink,
    ) -> FontSwapResult<ReplaceReport> {
        if !confirmed {
            return Err(FontSwapError::ConfirmationRequired {
                operation: OPERATION,
            });
        }

        // Snapshot first so the backup folder created below is not visited
        let entries = self.scan(source, target)?;
        let manager = BackupSessionManager::new(target);
        let mut report = ReplaceReport::default();

        tracing::info!(
            source = %source.path().display(),
            target = %target.path().display(),
            entries = entries.len(),
            "starting replace"
        );

        for entry in entries {
            if self.is_cancelled() {
                return Err(self.interrupted(&report, FontSwapError::Cancelled));
            }

            let name = entry.name.to_string_lossy().to_string();

            if let EntryAction::Skip(reason) = entry.action {
                tracing::debug!(name = %name, %reason, "skipping");
                report.skipped += 1;
                sink.emit(ProgressEvent::Skipped { name, reason });
                continue;
            }

            let session_dir = match &report.session_path {
                Some(dir) => dir.clone(),
                None => {
                    let (id, dir) = manager
                        .create_session(self.options.layout)
                        .map_err(|e| self.interrupted(&report, e))?;
                    sink.emit(ProgressEvent::SessionCreated { path: dir.clone() });
                    report.session = Some(id);
                    report.session_path = Some(dir.clone());
                    dir
                }
            };

            let backup = session_dir.join(&entry.name);
            move_file(&entry.path, &backup)
                .map_err(|e| self.interrupted(&report, FontSwapError::fs("move", &entry.path, e)))?;
            copy_with_metadata(source.path(), &entry.path)
                .map_err(|e| self.interrupted(&report, FontSwapError::fs("copy", &entry.path, e)))?;

            tracing::debug!(name = %name, backup = %backup.display(), "replaced");
            report.replaced += 1;
            sink.emit(ProgressEvent::Replaced { name, backup });
        }

        tracing::info!(
            replaced = report.replaced,
            skipped = report.skipped,
            "replace finished"
        );
        sink.emit(ProgressEvent::ReplaceFinished {
            replaced: report.replaced,
            skipped: report.skipped,
        });
        Ok(report)
    }

    /// List and classify the target's entries, sorted by name
    fn scan(
        &self,
        source: &SourceCandidate,
        target: &TargetDirectory,
    ) -> FontSwapResult<Vec<ScannedEntry>> {
        let dir = target.path();
        let protected: Vec<PathBuf> = self
            .options
            .protected_paths
            .iter()
            .map(|p| canonical(p))
            .collect();
        let source_path = canonical(source.path());

        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| FontSwapError::fs("read", dir, e))? {
            let entry = entry.map_err(|e| FontSwapError::fs("read", dir, e))?;
            let path = entry.path();
            let action = classify(&path, &protected, &source_path);
            entries.push(ScannedEntry {
                name: entry.file_name(),
                path,
                action,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|t| t.is_cancelled())
    }

    fn interrupted(&self, report: &ReplaceReport, err: FontSwapError) -> FontSwapError {
        tracing::warn!(
            replaced = report.replaced,
            skipped = report.skipped,
            error = %err,
            "replace interrupted"
        );
        FontSwapError::interrupted(OPERATION, report.replaced, report.skipped, err)
    }
}

fn classify(path: &Path, protected: &[PathBuf], source: &Path) -> EntryAction {
    if path.is_dir() {
        return EntryAction::Skip(SkipReason::Directory);
    }
    let resolved = canonical(path);
    if protected.iter().any(|p| *p == resolved) {
        return EntryAction::Skip(SkipReason::ProgramFile);
    }
    if resolved == source {
        return EntryAction::Skip(SkipReason::SourceFile);
    }
    if !is_font_path(path) {
        return EntryAction::Skip(SkipReason::NotAFont);
    }
    EntryAction::Replace
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
