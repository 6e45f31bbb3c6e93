//! Disk I/O and file lifecycle.
//!
//! Every file the pipeline produces (fetched units, index pages, merged
//! artifacts) is written to `<final>.part` first and renamed into place only
//! once complete, so a failed transfer or merge never leaves a truncated file
//! at the final path.

mod writer;

pub use writer::TempFile;

use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `a.pdf` → `a.pdf.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}
