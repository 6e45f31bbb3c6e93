//! Sequential temp-file writer with atomic finalize.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::os::unix::io::AsRawFd;

use super::temp_path;

/// A `.part` file being filled sequentially. Call `finalize` to move it to the
/// final path or `discard` to remove it.
pub struct TempFile {
    file: File,
    temp_path: PathBuf,
    final_path: PathBuf,
    written: u64,
}

impl TempFile {
    /// Create (truncate) the temp file for `final_path`.
    pub fn create(final_path: &Path) -> io::Result<Self> {
        let temp_path = temp_path(final_path);
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        Ok(TempFile {
            file,
            temp_path,
            final_path: final_path.to_path_buf(),
            written: 0,
        })
    }

    /// Reserve `size` bytes up front. On Unix tries `posix_fallocate`; falls back to `set_len`.
    pub fn preallocate(&mut self, size: u64) -> io::Result<()> {
        if size == 0 {
            return Ok(());
        }
        #[cfg(unix)]
        {
            let fd = self.file.as_raw_fd();
            let r = unsafe { libc::posix_fallocate(fd, 0, size as libc::off_t) };
            if r == 0 {
                return Ok(());
            }
            tracing::debug!(errno = r, "posix_fallocate failed, falling back to set_len");
        }
        self.file.set_len(size)
    }

    /// Append `data` at the current end of written bytes.
    pub fn append(&mut self, data: &[u8]) -> io::Result<()> {
        self.file.write_all(data)?;
        self.written += data.len() as u64;
        Ok(())
    }

    /// Bytes appended so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Trim to the written length, sync, and rename onto the final path.
    pub fn finalize(self) -> io::Result<PathBuf> {
        self.file.set_len(self.written)?;
        self.file.sync_all()?;
        let TempFile {
            file,
            temp_path,
            final_path,
            ..
        } = self;
        drop(file);
        std::fs::rename(&temp_path, &final_path)?;
        Ok(final_path)
    }

    /// Remove the temp file; the final path is not touched.
    pub fn discard(self) {
        let TempFile {
            file, temp_path, ..
        } = self;
        drop(file);
        if let Err(e) = std::fs::remove_file(&temp_path) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(path = %temp_path.display(), error = %e, "could not remove temp file");
            }
        }
    }
}
