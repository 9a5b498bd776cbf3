//! Low-level file moves and copies

use std::fs::{self, File, FileTimes};
use std::io;
use std::path::Path;

/// Copy `from` to `to`, carrying over permissions and timestamps
///
/// Permissions come with `fs::copy`. Timestamps are applied afterwards and
/// silently left alone on platforms that refuse them.
pub(crate) fn copy_with_metadata(from: &Path, to: &Path) -> io::Result<u64> {
    let bytes = fs::copy(from, to)?;

    let meta = fs::metadata(from)?;
    let mut times = FileTimes::new();
    if let Ok(modified) = meta.modified() {
        times = times.set_modified(modified);
    }
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    let applied = File::options()
        .write(true)
        .open(to)
        .and_then(|file| file.set_times(times));
    if let Err(e) = applied {
        tracing::debug!(path = %to.display(), error = %e, "could not copy timestamps");
    }

    Ok(bytes)
}

/// Move a file, replacing anything already at `to`
///
/// Falls back to copy-then-delete when a rename is refused, which covers
/// cross-device moves and platforms that won't rename over an existing file.
pub(crate) fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            if to.is_dir() || !from.is_file() {
                return Err(rename_err);
            }
            tracing::debug!(
                from = %from.display(),
                to = %to.display(),
                error = %rename_err,
                "rename failed, copying instead"
            );
            copy_then_remove(from, to)
        }
    }
}

/// Copy `from` to `to`, then delete `from`
///
/// On a failed copy the copy error is returned and a destination this call
/// created is removed again. A destination that was already there is left.
fn copy_then_remove(from: &Path, to: &Path) -> io::Result<()> {
    let existed = to.exists();
    if let Err(copy_err) = copy_with_metadata(from, to) {
        if !existed {
            if let Err(e) = fs::remove_file(to) {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(path = %to.display(), error = %e, "could not remove partial copy");
                }
            }
        }
        return Err(copy_err);
    }
    fs::remove_file(from)
}
