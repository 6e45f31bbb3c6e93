use std::fmt;
use std::time::SystemTime;

use crate::model::ValidityWindow;

/// What was found on disk for a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalFile {
    pub len: u64,
    pub modified: SystemTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchReason {
    /// Orchestrator forced a full re-fetch.
    Forced,
    /// Airport directory does not exist yet.
    DirectoryMissing,
    /// Airport directory was last touched before the effective date.
    DirectoryStale,
    /// No local file.
    Missing,
    SizeMismatch { local: u64, remote: u64 },
    /// The remote length is unknown, so the local size cannot be confirmed.
    UnknownRemoteSize,
    /// Local file was written outside the validity window.
    OutsideWindow,
}

impl fmt::Display for FetchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchReason::Forced => write!(f, "forced"),
            FetchReason::DirectoryMissing => write!(f, "directory missing"),
            FetchReason::DirectoryStale => write!(f, "directory older than effective date"),
            FetchReason::Missing => write!(f, "missing"),
            FetchReason::SizeMismatch { local, remote } => {
                write!(f, "size mismatch (local {}, remote {})", local, remote)
            }
            FetchReason::UnknownRemoteSize => write!(f, "remote size unknown"),
            FetchReason::OutsideWindow => write!(f, "outside validity window"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Fetch(FetchReason),
    /// Local copy is current; count the unit as already downloaded.
    Skip,
}

impl Decision {
    pub fn should_fetch(&self) -> bool {
        matches!(self, Decision::Fetch(_))
    }
}

/// Bulk check on the airport directory. `Some(reason)` means every unit of
/// the airport is fetched without per-file checks.
pub fn directory_verdict(
    dir_modified: Option<SystemTime>,
    window: &ValidityWindow,
    force: bool,
) -> Option<FetchReason> {
    if force {
        return Some(FetchReason::Forced);
    }
    match dir_modified {
        None => Some(FetchReason::DirectoryMissing),
        Some(t) if window.predates(t) => Some(FetchReason::DirectoryStale),
        Some(_) => None,
    }
}

/// Per-file check, used when the directory itself is current.
pub fn file_decision(
    local: Option<LocalFile>,
    expected_len: Option<u64>,
    window: &ValidityWindow,
) -> Decision {
    let Some(local) = local else {
        return Decision::Fetch(FetchReason::Missing);
    };
    let Some(remote) = expected_len else {
        return Decision::Fetch(FetchReason::UnknownRemoteSize);
    };
    if local.len != remote {
        return Decision::Fetch(FetchReason::SizeMismatch {
            local: local.len,
            remote,
        });
    }
    if window.contains_system_time(local.modified) {
        Decision::Skip
    } else {
        Decision::Fetch(FetchReason::OutsideWindow)
    }
}
