use std::path::PathBuf;

use thiserror::Error;

/// A failed merge. Recoverable: the orchestrator discards the attempt and
/// forces a full re-fetch of the airport.
#[derive(Debug, Error)]
pub enum MergeError {
    /// Source file could not be opened or parsed.
    #[error("cannot read {path}: {message}")]
    Open { path: PathBuf, message: String },
    /// Source parsed but a page or one of its objects could not be resolved.
    #[error("bad page in {path}: {message}")]
    Page { path: PathBuf, message: String },
    /// Assembled document could not be serialized or renamed into place.
    #[error("cannot write {path}: {message}")]
    Write { path: PathBuf, message: String },
    /// A unit was never fetched, so there is nothing to merge from.
    #[error("unit {path} was not fetched")]
    NotFetched { path: PathBuf },
}

impl MergeError {
    pub fn path(&self) -> &PathBuf {
        match self {
            MergeError::Open { path, .. }
            | MergeError::Page { path, .. }
            | MergeError::Write { path, .. }
            | MergeError::NotFetched { path } => path,
        }
    }
}
