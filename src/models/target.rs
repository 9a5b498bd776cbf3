//! Target directory validation
//!
//! A target must exist, be a directory, and accept writes before anything in
//! it is moved. Pointing at a `Fonts.old` backup root selects its parent.

use std::path::{Path, PathBuf};

use crate::error::{FontSwapError, FontSwapResult, TargetProblem};

use super::session::BACKUP_ROOT_NAME;

/// A validated directory whose font files are replaced or restored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDirectory {
    path: PathBuf,
    /// Set when the caller picked `Fonts.old` and was moved up to its parent
    redirected_from: Option<PathBuf>,
}

impl TargetDirectory {
    /// Validate a user-supplied path as a target directory
    pub fn validate(path: impl AsRef<Path>) -> FontSwapResult<Self> {
        let requested = path.as_ref();
        check_directory(requested)?;

        let canonical = requested
            .canonicalize()
            .map_err(|e| FontSwapError::fs("resolve", requested, e))?;

        let (path, redirected_from) = match redirect_backup_root(&canonical) {
            Some(parent) => {
                tracing::info!(
                    from = %canonical.display(),
                    to = %parent.display(),
                    "target is a backup root, using its parent"
                );
                check_directory(&parent)?;
                (parent, Some(canonical))
            }
            None => (canonical, None),
        };

        check_writable(&path)?;

        Ok(Self {
            path,
            redirected_from,
        })
    }

    /// Canonical path of the target directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The `Fonts.old` path originally given, if a redirect happened
    pub fn redirected_from(&self) -> Option<&Path> {
        self.redirected_from.as_deref()
    }

    /// `<target>/Fonts.old`
    pub fn backup_root(&self) -> PathBuf {
        self.path.join(BACKUP_ROOT_NAME)
    }
}

/// Parent of `path` if `path` is itself a `Fonts.old` folder
///
/// Case is ignored only where the filesystem ignores it too, so the parent's
/// `backup_root()` always names the folder that was picked.
fn redirect_backup_root(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?.to_str()?;
    let is_backup_root = if cfg!(any(windows, target_os = "macos")) {
        name.eq_ignore_ascii_case(BACKUP_ROOT_NAME)
    } else {
        name == BACKUP_ROOT_NAME
    };
    if is_backup_root {
        path.parent().map(Path::to_path_buf)
    } else {
        None
    }
}

fn check_directory(path: &Path) -> FontSwapResult<()> {
    let problem = match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => return Ok(()),
        Ok(_) => TargetProblem::NotADirectory,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => TargetProblem::Missing,
        Err(e) => return Err(FontSwapError::fs("inspect", path, e)),
    };
    Err(FontSwapError::InvalidTarget {
        path: path.to_path_buf(),
        problem,
    })
}

/// Probe writability with an anonymous temp file that vanishes on drop
fn check_writable(path: &Path) -> FontSwapResult<()> {
    match tempfile::tempfile_in(path) {
        Ok(_) => Ok(()),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "write probe failed");
            Err(FontSwapError::InvalidTarget {
                path: path.to_path_buf(),
                problem: TargetProblem::NotWritable,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_existing_directory() {
        let temp = TempDir::new().unwrap();
        let target = TargetDirectory::validate(temp.path()).unwrap();

        assert_eq!(target.path(), temp.path().canonicalize().unwrap());
        assert!(target.redirected_from().is_none());
        assert_eq!(target.backup_root(), target.path().join("Fonts.old"));
    }

    #[test]
    fn test_write_probe_leaves_no_files() {
        let temp = TempDir::new().unwrap();
        TargetDirectory::validate(temp.path()).unwrap();
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_directory() {
        let temp = TempDir::new().unwrap();
        let err = TargetDirectory::validate(temp.path().join("nope")).unwrap_err();
        assert!(matches!(
            err,
            FontSwapError::InvalidTarget {
                problem: TargetProblem::Missing,
                ..
            }
        ));
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.ttf");
        fs::write(&file, b"font").unwrap();

        let err = TargetDirectory::validate(&file).unwrap_err();
        assert!(matches!(
            err,
            FontSwapError::InvalidTarget {
                problem: TargetProblem::NotADirectory,
                ..
            }
        ));
    }

    #[test]
    fn test_backup_root_redirects_to_parent() {
        let temp = TempDir::new().unwrap();
        let backup_root = temp.path().join("Fonts.old");
        fs::create_dir(&backup_root).unwrap();

        let target = TargetDirectory::validate(&backup_root).unwrap();
        assert_eq!(target.path(), temp.path().canonicalize().unwrap());
        assert_eq!(
            target.redirected_from(),
            Some(backup_root.canonicalize().unwrap().as_path())
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_differently_cased_backup_root_is_a_plain_target() {
        let temp = TempDir::new().unwrap();
        let lower = temp.path().join("fonts.old");
        fs::create_dir(&lower).unwrap();

        let target = TargetDirectory::validate(&lower).unwrap();
        assert_eq!(target.path(), lower.canonicalize().unwrap());
        assert!(target.redirected_from().is_none());
        assert_eq!(target.backup_root(), target.path().join("Fonts.old"));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_only_directory_is_rejected() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let locked = temp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        let result = TargetDirectory::validate(&locked);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        // Root ignores permission bits, so only assert when the probe could fail
        if let Err(err) = result {
            assert!(matches!(
                err,
                FontSwapError::InvalidTarget {
                    problem: TargetProblem::NotWritable,
                    ..
                }
            ));
        }
    }
}
