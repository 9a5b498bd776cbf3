//! Backup session manager for fontswap
//!
//! Creates, lists, and removes backup sessions under `<target>/Fonts.old`.
//! Session folder names are timestamps, so sorting names sorts sessions by
//! creation time.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime, Timelike};

use crate::config::settings::BackupLayout;
use crate::error::{FontSwapError, FontSwapResult};
use crate::models::{is_font_path, BackupSession, BackupSessionId, TargetDirectory};

/// Manages the backup sessions of one target directory
#[derive(Debug, Clone)]
pub struct BackupSessionManager {
    /// `<target>/Fonts.old`
    backup_root: PathBuf,
}

impl BackupSessionManager {
    /// Create a manager for a validated target
    pub fn new(target: &TargetDirectory) -> Self {
        Self {
            backup_root: target.backup_root(),
        }
    }

    /// Get the backup root (`Fonts.old`) path
    pub fn backup_root(&self) -> &Path {
        &self.backup_root
    }

    /// Create a session for a new replace run using the given layout
    pub fn create_session(&self, layout: BackupLayout) -> FontSwapResult<(BackupSessionId, PathBuf)> {
        match layout {
            BackupLayout::Timestamped => self.create_session_at(Local::now().naive_local()),
            BackupLayout::Flat => self.create_flat_session(),
        }
    }

    /// Create `Fonts.old/<timestamp>`, failing if that folder already exists
    pub fn create_session_at(
        &self,
        timestamp: NaiveDateTime,
    ) -> FontSwapResult<(BackupSessionId, PathBuf)> {
        fs::create_dir_all(&self.backup_root)
            .map_err(|e| FontSwapError::fs("create backup folder", &self.backup_root, e))?;

        // Folder names have one-second resolution
        let id = BackupSessionId::Timestamped(
            timestamp.with_nanosecond(0).unwrap_or(timestamp),
        );
        let path = id.path_in(&self.backup_root);

        fs::create_dir(&path).map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                FontSwapError::BackupSessionExists { path: path.clone() }
            } else {
                FontSwapError::fs("create backup session", &path, e)
            }
        })?;

        tracing::info!(session = %id, path = %path.display(), "created backup session");
        Ok((id, path))
    }

    /// Use `Fonts.old` itself as the session
    ///
    /// Refused when `Fonts.old` already holds fonts or timestamped sessions.
    /// Loose files are not listed next to timestamped sessions, so a flat
    /// backup made beside them could never be found again.
    fn create_flat_session(&self) -> FontSwapResult<(BackupSessionId, PathBuf)> {
        fs::create_dir_all(&self.backup_root)
            .map_err(|e| FontSwapError::fs("create backup folder", &self.backup_root, e))?;

        let (timestamped, loose_fonts) = self.scan_root()?;
        if let Some(newest) = timestamped.iter().max() {
            return Err(FontSwapError::BackupSessionExists {
                path: newest.path_in(&self.backup_root),
            });
        }
        if loose_fonts > 0 {
            return Err(FontSwapError::BackupSessionExists {
                path: self.backup_root.clone(),
            });
        }

        Ok((BackupSessionId::Legacy, self.backup_root.clone()))
    }

    /// List sessions, newest first
    ///
    /// Timestamped subfolders take precedence. Only when there are none is a
    /// `Fonts.old` holding font files directly reported as one legacy session.
    pub fn list_sessions(&self) -> FontSwapResult<Vec<BackupSession>> {
        if !self.backup_root.is_dir() {
            return Err(self.no_backup());
        }

        let (mut ids, loose_fonts) = self.scan_root()?;

        if ids.is_empty() && loose_fonts > 0 {
            ids.push(BackupSessionId::Legacy);
        }

        if ids.is_empty() {
            return Err(self.no_backup());
        }

        // Sort by date, newest first
        ids.sort_by(|a, b| b.cmp(a));

        ids.into_iter().map(|id| self.describe(id)).collect()
    }

    /// Get the most recent session
    pub fn latest_session(&self) -> FontSwapResult<BackupSession> {
        self.list_sessions()?
            .into_iter()
            .next()
            .ok_or_else(|| self.no_backup())
    }

    /// Resolve `latest`, a timestamp, or `legacy`/`Fonts.old` to a session
    pub fn resolve_session(&self, selector: &str) -> FontSwapResult<BackupSession> {
        if selector.trim().eq_ignore_ascii_case("latest") {
            return self.latest_session();
        }
        let id: BackupSessionId = selector.parse()?;
        self.session(id)
    }

    /// Look up one session by id
    pub fn session(&self, id: BackupSessionId) -> FontSwapResult<BackupSession> {
        if !self.backup_root.is_dir() {
            return Err(self.no_backup());
        }
        let path = id.path_in(&self.backup_root);
        if !path.is_dir() {
            return Err(FontSwapError::SessionNotFound {
                id: id.to_string(),
                root: self.backup_root.clone(),
            });
        }
        self.describe(id)
    }

    /// Regular files held by a session, sorted by name
    pub fn session_files(&self, id: BackupSessionId) -> FontSwapResult<Vec<PathBuf>> {
        let dir = id.path_in(&self.backup_root);
        let entries = fs::read_dir(&dir).map_err(|e| FontSwapError::fs("read", &dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| FontSwapError::fs("read", &dir, e))?;
            let path = entry.path();
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Delete an emptied session folder
    ///
    /// A timestamped session removes only its own folder and leaves `Fonts.old`
    /// in place. The legacy session removes `Fonts.old` itself. Either way a
    /// folder that still has entries is never deleted.
    pub fn remove_session(&self, id: BackupSessionId) -> FontSwapResult<PathBuf> {
        let path = id.path_in(&self.backup_root);
        let remaining = fs::read_dir(&path)
            .map_err(|e| FontSwapError::fs("read", &path, e))?
            .count();

        if remaining > 0 {
            return Err(FontSwapError::SessionNotEmpty { path, remaining });
        }

        fs::remove_dir(&path).map_err(|e| FontSwapError::fs("remove", &path, e))?;
        tracing::info!(session = %id, path = %path.display(), "removed backup session");
        Ok(path)
    }

    fn describe(&self, id: BackupSessionId) -> FontSwapResult<BackupSession> {
        let files = self.session_files(id)?;
        let size_bytes = files
            .iter()
            .filter_map(|f| fs::metadata(f).ok())
            .map(|m| m.len())
            .sum();

        Ok(BackupSession {
            id,
            path: id.path_in(&self.backup_root),
            file_count: files.len(),
            size_bytes,
        })
    }

    /// Timestamped session folders and the number of font files directly in `Fonts.old`
    fn scan_root(&self) -> FontSwapResult<(Vec<BackupSessionId>, usize)> {
        let mut ids = Vec::new();
        let mut loose_fonts = 0usize;

        for entry in self.read_root()? {
            let path = entry.path();
            if path.is_dir() {
                if let Some(id) = entry
                    .file_name()
                    .to_str()
                    .and_then(BackupSessionId::from_folder_name)
                {
                    ids.push(id);
                }
            } else if path.is_file() && is_font_path(&path) {
                loose_fonts += 1;
            }
        }

        Ok((ids, loose_fonts))
    }

    fn read_root(&self) -> FontSwapResult<Vec<fs::DirEntry>> {
        fs::read_dir(&self.backup_root)
            .map_err(|e| FontSwapError::fs("read", &self.backup_root, e))?
            .map(|entry| entry.map_err(|e| FontSwapError::fs("read", &self.backup_root, e)))
            .collect()
    }

    fn no_backup(&self) -> FontSwapError {
        FontSwapError::NoBackupFound {
            path: self.backup_root.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_manager() -> (BackupSessionManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let target = TargetDirectory::validate(temp_dir.path()).unwrap();
        (BackupSessionManager::new(&target), temp_dir)
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 27)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_create_session() {
        let (manager, _temp) = create_test_manager();

        let (id, path) = manager.create_session_at(at(14, 30, 22)).unwrap();
        assert!(path.is_dir());
        assert!(path.ends_with("Fonts.old/2025-11-27_14-30-22"));
        assert_eq!(id.to_string(), "2025-11-27_14-30-22");
    }

    #[test]
    fn test_create_session_now() {
        let (manager, _temp) = create_test_manager();

        let (id, path) = manager.create_session(BackupLayout::Timestamped).unwrap();
        assert!(path.is_dir());
        assert!(!id.is_legacy());
    }

    #[test]
    fn test_same_second_collides() {
        let (manager, _temp) = create_test_manager();

        manager.create_session_at(at(14, 30, 22)).unwrap();
        let err = manager.create_session_at(at(14, 30, 22)).unwrap_err();
        assert!(matches!(err, FontSwapError::BackupSessionExists { .. }));
    }

    #[test]
    fn test_list_sessions_newest_first() {
        let (manager, _temp) = create_test_manager();

        manager.create_session_at(at(9, 0, 0)).unwrap();
        manager.create_session_at(at(11, 0, 0)).unwrap();
        manager.create_session_at(at(10, 0, 0)).unwrap();

        let sessions = manager.list_sessions().unwrap();
        let names: Vec<String> = sessions.iter().map(|s| s.id.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "2025-11-27_11-00-00",
                "2025-11-27_10-00-00",
                "2025-11-27_09-00-00"
            ]
        );
        assert_eq!(manager.latest_session().unwrap().id, sessions[0].id);
    }

    #[test]
    fn test_missing_backup_root() {
        let (manager, _temp) = create_test_manager();
        assert!(matches!(
            manager.list_sessions(),
            Err(FontSwapError::NoBackupFound { .. })
        ));
    }

    #[test]
    fn test_empty_backup_root() {
        let (manager, _temp) = create_test_manager();
        fs::create_dir(manager.backup_root()).unwrap();
        fs::create_dir(manager.backup_root().join("misc")).unwrap();

        assert!(matches!(
            manager.list_sessions(),
            Err(FontSwapError::NoBackupFound { .. })
        ));
    }

    #[test]
    fn test_legacy_flat_layout() {
        let (manager, _temp) = create_test_manager();
        fs::create_dir(manager.backup_root()).unwrap();
        fs::write(manager.backup_root().join("a.ttf"), b"a").unwrap();
        fs::write(manager.backup_root().join("readme.txt"), b"r").unwrap();

        let sessions = manager.list_sessions().unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id, BackupSessionId::Legacy);
        assert_eq!(sessions[0].path, manager.backup_root());
        assert_eq!(sessions[0].file_count, 2);
    }

    #[test]
    fn test_timestamped_sessions_take_precedence() {
        let (manager, _temp) = create_test_manager();
        manager.create_session_at(at(8, 0, 0)).unwrap();
        fs::write(manager.backup_root().join("a.ttf"), b"a").unwrap();

        let sessions = manager.list_sessions().unwrap();
        assert_eq!(sessions.len(), 1);
        assert!(!sessions[0].id.is_legacy());
    }

    #[test]
    fn test_session_stats() {
        let (manager, _temp) = create_test_manager();
        let (id, path) = manager.create_session_at(at(8, 0, 0)).unwrap();
        fs::write(path.join("a.ttf"), b"1234").unwrap();
        fs::write(path.join("b.otf"), b"56").unwrap();

        let session = manager.session(id).unwrap();
        assert_eq!(session.file_count, 2);
        assert_eq!(session.size_bytes, 6);
        assert_eq!(session.created_at(), Some(at(8, 0, 0)));
    }

    #[test]
    fn test_resolve_session() {
        let (manager, _temp) = create_test_manager();
        manager.create_session_at(at(8, 0, 0)).unwrap();
        manager.create_session_at(at(9, 0, 0)).unwrap();

        assert_eq!(
            manager.resolve_session("latest").unwrap().id.to_string(),
            "2025-11-27_09-00-00"
        );
        assert_eq!(
            manager
                .resolve_session("2025-11-27_08-00-00")
                .unwrap()
                .id
                .to_string(),
            "2025-11-27_08-00-00"
        );
        assert!(matches!(
            manager.resolve_session("2025-11-27_07-00-00"),
            Err(FontSwapError::SessionNotFound { .. })
        ));
        assert!(matches!(
            manager.resolve_session("tuesday"),
            Err(FontSwapError::InvalidSessionId(_))
        ));
    }

    #[test]
    fn test_flat_session_refuses_existing_fonts() {
        let (manager, _temp) = create_test_manager();

        let (id, path) = manager.create_session(BackupLayout::Flat).unwrap();
        assert_eq!(id, BackupSessionId::Legacy);
        assert_eq!(path, manager.backup_root());

        fs::write(path.join("a.ttf"), b"a").unwrap();
        assert!(matches!(
            manager.create_session(BackupLayout::Flat),
            Err(FontSwapError::BackupSessionExists { .. })
        ));
    }

    #[test]
    fn test_flat_session_refuses_timestamped_sessions() {
        let (manager, _temp) = create_test_manager();
        let (_, older) = manager.create_session_at(at(8, 0, 0)).unwrap();
        fs::write(older.join("z.ttf"), b"z").unwrap();

        let err = manager.create_session(BackupLayout::Flat).unwrap_err();
        match err {
            FontSwapError::BackupSessionExists { path } => assert_eq!(path, older),
            other => panic!("unexpected error: {other:?}"),
        }

        // Nothing was written beside the existing session
        let sessions = manager.list_sessions().unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].path, older);
        assert_eq!(manager.session_files(BackupSessionId::Legacy).unwrap().len(), 0);
    }

    #[test]
    fn test_remove_timestamped_session_keeps_root() {
        let (manager, _temp) = create_test_manager();
        let (id, path) = manager.create_session_at(at(8, 0, 0)).unwrap();

        manager.remove_session(id).unwrap();
        assert!(!path.exists());
        assert!(manager.backup_root().is_dir());
    }

    #[test]
    fn test_remove_refuses_non_empty_session() {
        let (manager, _temp) = create_test_manager();
        let (id, path) = manager.create_session_at(at(8, 0, 0)).unwrap();
        fs::write(path.join("left.ttf"), b"x").unwrap();

        let err = manager.remove_session(id).unwrap_err();
        assert!(matches!(
            err,
            FontSwapError::SessionNotEmpty { remaining: 1, .. }
        ));
        assert!(path.join("left.ttf").exists());
    }

    #[test]
    fn test_remove_legacy_session_removes_empty_root() {
        let (manager, _temp) = create_test_manager();
        fs::create_dir(manager.backup_root()).unwrap();

        manager.remove_session(BackupSessionId::Legacy).unwrap();
        assert!(!manager.backup_root().exists());
    }

    #[test]
    fn test_remove_legacy_refuses_root_with_sessions() {
        let (manager, _temp) = create_test_manager();
        manager.create_session_at(at(8, 0, 0)).unwrap();

        assert!(matches!(
            manager.remove_session(BackupSessionId::Legacy),
            Err(FontSwapError::SessionNotEmpty { .. })
        ));
        assert!(manager.backup_root().is_dir());
    }
}
