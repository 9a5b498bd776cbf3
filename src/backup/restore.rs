//! Backup restoration for fontswap
//!
//! Moves the files of one backup session back into the target directory.
//! Whatever currently sits at each destination is overwritten without
//! comparison; the point of a restore is to return to the backed-up state.

use std::path::PathBuf;

use serde::Serialize;

use crate::engine::fsops::move_file;
use crate::engine::{CancellationToken, ProgressEvent, ProgressSink};
use crate::error::{FontSwapError, FontSwapResult};
use crate::models::{BackupSession, BackupSessionId, TargetDirectory};

use super::manager::BackupSessionManager;

const OPERATION: &str = "restore";

/// What a restore would move, computed without touching anything
#[derive(Debug, Clone, Serialize)]
pub struct RestorePlan {
    pub session: BackupSession,
    /// Files in the session, in the order they will be moved
    pub files: Vec<PathBuf>,
}

/// Result of a restore operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestoreResult {
    pub session: BackupSessionId,
    pub session_path: PathBuf,
    /// Number of files moved back
    pub restored: usize,
    /// Whether the session folder has nothing left in it
    pub session_empty: bool,
}

impl RestoreResult {
    /// Get a summary of what was restored
    pub fn summary(&self) -> String {
        format!(
            "Restored {} file(s) from backup session {}",
            self.restored, self.session
        )
    }
}

/// Handles restoring from backup sessions
pub struct RestoreEngine {
    target: TargetDirectory,
    manager: BackupSessionManager,
    cancel: Option<CancellationToken>,
}

impl RestoreEngine {
    /// Create a new RestoreEngine for a validated target
    pub fn new(target: TargetDirectory) -> Self {
        let manager = BackupSessionManager::new(&target);
        Self {
            target,
            manager,
            cancel: None,
        }
    }

    /// Check `token` between files and stop when it is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The session manager for this target
    pub fn manager(&self) -> &BackupSessionManager {
        &self.manager
    }

    /// Validate a session and list what it would restore
    pub fn plan(&self, id: BackupSessionId) -> FontSwapResult<RestorePlan> {
        let session = self.manager.session(id)?;
        let files = self.manager.session_files(id)?;
        if files.is_empty() {
            return Err(FontSwapError::EmptyBackup { path: session.path });
        }
        Ok(RestorePlan { session, files })
    }

    /// Move every file of session `id` back into the target
    ///
    /// Validation happens before the confirmation check, so an empty or
    /// missing session is reported as such even when unconfirmed. Nothing is
    /// moved unless `confirmed` is true.
    pub fn restore(
        &self,
        id: BackupSessionId,
        confirmed: bool,
        sink: &mut dyn ProgressSink,
    ) -> FontSwapResult<RestoreResult> {
        let plan = self.plan(id)?;

        if !confirmed {
            return Err(FontSwapError::ConfirmationRequired {
                operation: OPERATION,
            });
        }

        tracing::info!(
            session = %id,
            target = %self.target.path().display(),
            files = plan.files.len(),
            "starting restore"
        );

        let mut restored = 0usize;
        for file in &plan.files {
            if self.cancel.as_ref().is_some_and(|t| t.is_cancelled()) {
                return Err(FontSwapError::interrupted(
                    OPERATION,
                    restored,
                    0,
                    FontSwapError::Cancelled,
                ));
            }

            let Some(name) = file.file_name() else {
                continue;
            };
            let destination = self.target.path().join(name);

            move_file(file, &destination).map_err(|e| {
                tracing::warn!(restored, file = %file.display(), error = %e, "restore interrupted");
                FontSwapError::interrupted(OPERATION, restored, 0, FontSwapError::fs("move", file, e))
            })?;

            restored += 1;
            sink.emit(ProgressEvent::Restored {
                name: name.to_string_lossy().to_string(),
                destination,
            });
        }

        let session_empty = std::fs::read_dir(&plan.session.path)
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(false);

        tracing::info!(restored, session_empty, "restore finished");
        sink.emit(ProgressEvent::RestoreFinished { restored });

        Ok(RestoreResult {
            session: id,
            session_path: plan.session.path,
            restored,
            session_empty,
        })
    }

    /// Delete the emptied session folder; the caller decides whether to ask
    pub fn cleanup(&self, id: BackupSessionId, sink: &mut dyn ProgressSink) -> FontSwapResult<PathBuf> {
        let path = self.manager.remove_session(id)?;
        sink.emit(ProgressEvent::SessionRemoved { path: path.clone() });
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::BackupLayout;
    use crate::engine::{NullSink, ReplaceEngine, ReplaceOptions};
    use crate::models::SourceCandidate;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_env() -> (RestoreEngine, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let fonts = temp_dir.path().join("fonts");
        fs::create_dir(&fonts).unwrap();
        fs::write(fonts.join("A.ttf"), b"original A").unwrap();
        fs::write(fonts.join("B.woff2"), b"original B").unwrap();
        fs::write(temp_dir.path().join("custom.ttf"), b"custom").unwrap();

        let target = TargetDirectory::validate(&fonts).unwrap();
        (RestoreEngine::new(target), temp_dir)
    }

    fn replace(engine: &RestoreEngine, temp: &TempDir) -> BackupSessionId {
        let source = SourceCandidate::new(temp.path().join("custom.ttf"));
        ReplaceEngine::new(ReplaceOptions {
            layout: BackupLayout::Timestamped,
            protected_paths: Vec::new(),
        })
        .run(&source, &engine.target, true, &mut NullSink)
        .unwrap()
        .session
        .unwrap()
    }

    #[test]
    fn test_replace_then_restore_round_trip() {
        let (engine, temp) = create_test_env();
        let id = replace(&engine, &temp);
        let fonts = engine.target.path().to_path_buf();
        assert_eq!(fs::read(fonts.join("A.ttf")).unwrap(), b"custom");

        let mut events = Vec::new();
        let result = engine.restore(id, true, &mut events).unwrap();

        assert_eq!(result.restored, 2);
        assert!(result.session_empty);
        assert_eq!(fs::read(fonts.join("A.ttf")).unwrap(), b"original A");
        assert_eq!(fs::read(fonts.join("B.woff2")).unwrap(), b"original B");
        assert_eq!(
            events.last().unwrap(),
            &ProgressEvent::RestoreFinished { restored: 2 }
        );
    }

    #[test]
    fn test_restore_overwrites_manual_edits() {
        let (engine, temp) = create_test_env();
        let id = replace(&engine, &temp);
        let a = engine.target.path().join("A.ttf");
        fs::write(&a, b"hand edited").unwrap();

        engine.restore(id, true, &mut NullSink).unwrap();

        assert_eq!(fs::read(&a).unwrap(), b"original A");
    }

    #[test]
    fn test_empty_session_is_rejected_without_changes() {
        let (engine, _temp) = create_test_env();
        let ts = NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let (id, path) = engine.manager().create_session_at(ts).unwrap();

        let err = engine.restore(id, true, &mut NullSink).unwrap_err();

        assert!(matches!(err, FontSwapError::EmptyBackup { .. }));
        assert!(path.is_dir());
        assert_eq!(
            fs::read(engine.target.path().join("A.ttf")).unwrap(),
            b"original A"
        );
    }

    #[test]
    fn test_unconfirmed_restore_moves_nothing() {
        let (engine, temp) = create_test_env();
        let id = replace(&engine, &temp);

        let err = engine.restore(id, false, &mut NullSink).unwrap_err();

        assert!(matches!(err, FontSwapError::ConfirmationRequired { .. }));
        assert_eq!(engine.plan(id).unwrap().files.len(), 2);
    }

    #[test]
    fn test_missing_session() {
        let (engine, temp) = create_test_env();
        replace(&engine, &temp);
        let missing: BackupSessionId = "2001-01-01_00-00-00".parse().unwrap();

        assert!(matches!(
            engine.restore(missing, true, &mut NullSink),
            Err(FontSwapError::SessionNotFound { .. })
        ));
    }

    #[test]
    fn test_no_backup_root() {
        let (engine, _temp) = create_test_env();
        assert!(matches!(
            engine.plan(BackupSessionId::Legacy),
            Err(FontSwapError::NoBackupFound { .. })
        ));
    }

    #[test]
    fn test_cleanup_after_restore() {
        let (engine, temp) = create_test_env();
        let id = replace(&engine, &temp);
        let result = engine.restore(id, true, &mut NullSink).unwrap();

        let removed = engine.cleanup(id, &mut NullSink).unwrap();

        assert_eq!(removed, result.session_path);
        assert!(!removed.exists());
        // Multi-session cleanup leaves the backup root in place
        assert!(engine.target.backup_root().is_dir());
    }

    #[test]
    fn test_legacy_restore_and_cleanup() {
        let (engine, _temp) = create_test_env();
        let root = engine.target.backup_root();
        fs::create_dir(&root).unwrap();
        fs::write(root.join("A.ttf"), b"legacy A").unwrap();

        let session = engine.manager().latest_session().unwrap();
        assert!(session.id.is_legacy());

        let result = engine.restore(session.id, true, &mut NullSink).unwrap();
        assert_eq!(result.restored, 1);
        assert!(result.session_empty);
        assert_eq!(
            fs::read(engine.target.path().join("A.ttf")).unwrap(),
            b"legacy A"
        );

        engine.cleanup(session.id, &mut NullSink).unwrap();
        assert!(!root.exists());
    }

    #[test]
    fn test_cancelled_restore_reports_progress() {
        let (engine, temp) = create_test_env();
        let id = replace(&engine, &temp);
        let token = CancellationToken::new();
        token.cancel();
        let engine = engine.with_cancellation(token);

        let err = engine.restore(id, true, &mut NullSink).unwrap_err();
        assert!(matches!(
            err,
            FontSwapError::Interrupted { completed: 0, .. }
        ));
        assert_eq!(engine.plan(id).unwrap().files.len(), 2);
    }

    #[test]
    fn test_failure_on_second_file_keeps_first_restored() {
        let (engine, temp) = create_test_env();
        let id = replace(&engine, &temp);
        let fonts = engine.target.path().to_path_buf();
        fs::remove_file(fonts.join("B.woff2")).unwrap();
        fs::create_dir(fonts.join("B.woff2")).unwrap();

        let mut events = Vec::new();
        let err = engine.restore(id, true, &mut events).unwrap_err();

        assert!(err.is_partial());
        assert!(matches!(
            err,
            FontSwapError::Interrupted { completed: 1, .. }
        ));
        assert_eq!(fs::read(fonts.join("A.ttf")).unwrap(), b"original A");
        assert!(fonts.join("B.woff2").is_dir());

        let remaining = engine.manager().session_files(id).unwrap();
        assert_eq!(remaining.len(), 1);
        assert!(remaining[0].ends_with("B.woff2"));
        assert_eq!(fs::read(&remaining[0]).unwrap(), b"original B");
        assert_eq!(events.len(), 1);
        assert!(!events
            .iter()
            .any(|e| matches!(e, ProgressEvent::RestoreFinished { .. })));
    }

    #[test]
    fn test_restore_result_summary() {
        let result = RestoreResult {
            session: "2025-01-02_03-04-05".parse().unwrap(),
            session_path: PathBuf::from("/fonts/Fonts.old/2025-01-02_03-04-05"),
            restored: 4,
            session_empty: true,
        };
        assert_eq!(
            result.summary(),
            "Restored 4 file(s) from backup session 2025-01-02_03-04-05"
        );
    }
}
