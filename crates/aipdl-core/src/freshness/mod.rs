//! Freshness guard: decides whether a unit's local copy can be kept.
//!
//! The decision functions are pure (they take what was observed on disk and
//! from the remote probe) so the same inputs always give the same answer;
//! the `stat_*` helpers gather those inputs from the filesystem.

mod decide;

pub use decide::{directory_verdict, file_decision, Decision, FetchReason, LocalFile};

use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Modification time of `dir`, `None` if it does not exist.
/// Any other stat error is returned.
pub fn stat_dir(dir: &Path) -> io::Result<Option<SystemTime>> {
    match std::fs::metadata(dir) {
        Ok(meta) => Ok(Some(meta.modified()?)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Size and modification time of `path`, `None` if it does not exist.
pub fn stat_file(path: &Path) -> io::Result<Option<LocalFile>> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(Some(LocalFile {
            len: meta.len(),
            modified: meta.modified()?,
        })),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Creates `dir` if needed and stamps its mtime with the current time, so the
/// next run sees a directory belonging to the current edition.
pub fn mark_directory_fresh(dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dir)?;
    filetime::set_file_mtime(dir, filetime::FileTime::now())
}
