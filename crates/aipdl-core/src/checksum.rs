//! Digests of merged artifacts for the batch summary.
//!
//! Computed after the merge, never while a unit is being fetched.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const BUF_SIZE: usize = 64 * 1024;

/// Size and SHA-256 of one file, read in a single pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigest {
    pub size: u64,
    /// Lowercase hex.
    pub sha256: String,
}

pub fn digest_file(path: &Path) -> Result<FileDigest> {
    let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut hasher = Sha256::new();
    let mut size = 0u64;
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = f
            .read(&mut buf)
            .with_context(|| format!("read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
        size += n as u64;
    }
    Ok(FileDigest {
        size,
        sha256: hex::encode(hasher.finalize()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_artifact() {
        let f = tempfile::NamedTempFile::new().unwrap();
        let d = digest_file(f.path()).unwrap();
        assert_eq!(d.size, 0);
        assert_eq!(
            d.sha256,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn size_spans_several_reads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("RJAA_full.pdf");
        std::fs::write(&path, vec![b'x'; BUF_SIZE * 2 + 7]).unwrap();
        let d = digest_file(&path).unwrap();
        assert_eq!(d.size, (BUF_SIZE * 2 + 7) as u64);
        assert_eq!(d.sha256.len(), 64);
    }

    #[test]
    fn known_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.txt");
        std::fs::write(&path, b"hello\n").unwrap();
        assert_eq!(
            digest_file(&path).unwrap(),
            FileDigest {
                size: 6,
                sha256: "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03"
                    .to_string(),
            }
        );
    }

    #[test]
    fn missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = digest_file(&dir.path().join("nope.pdf")).unwrap_err();
        assert!(format!("{:#}", err).contains("nope.pdf"));
    }
}
