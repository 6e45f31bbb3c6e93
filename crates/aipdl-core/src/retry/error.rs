//! Unit fetch error type.

use thiserror::Error;

/// Error returned by one fetch (curl failure, HTTP error, storage failure).
/// Kept typed so the retry policy can classify it before it is reported.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Body ended before the advertised length (server closed early).
    #[error("partial transfer: expected {expected} bytes, got {received}")]
    PartialTransfer { expected: u64, received: u64 },
    /// Disk write or rename failed (disk full, permission denied). Not retried.
    #[error("storage: {0}")]
    Storage(#[from] std::io::Error),
    /// Locator could not be turned into a URL.
    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    /// The batch was cancelled before this unit was fetched.
    #[error("cancelled")]
    Cancelled,
    /// The job never reported back (worker panicked or pool shut down).
    #[error("no result from fetch worker: {0}")]
    Lost(String),
}
