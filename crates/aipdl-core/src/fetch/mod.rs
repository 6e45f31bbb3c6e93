//! Byte fetching: the `Fetcher` seam and its libcurl implementation.
//!
//! `probe` is a HEAD request giving the expected length for the freshness
//! guard; `fetch_to` streams a GET body into `<dest>.part` and renames it
//! onto `dest` only when the transfer completed.

mod curl_fetcher;
mod parse;

pub use curl_fetcher::CurlFetcher;

use std::path::Path;

use crate::retry::FetchError;

/// Metadata from a HEAD request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Probe {
    /// Total size in bytes, if `Content-Length` is present.
    pub content_length: Option<u64>,
}

/// Fetches remote bytes. Shared by every worker of the pool.
pub trait Fetcher: Send + Sync {
    fn probe(&self, url: &str) -> Result<Probe, FetchError>;

    /// Downloads `url` to `dest`, returning the number of bytes written.
    /// When `expected_len` is known, a shorter body is a `PartialTransfer`.
    fn fetch_to(&self, url: &str, dest: &Path, expected_len: Option<u64>)
        -> Result<u64, FetchError>;
}
