//! Retry and backoff for a single unit fetch.
//!
//! Transient transport failures (timeouts, throttling, dropped connections,
//! 5xx) are retried in place by the worker with exponential backoff. This is
//! separate from the airport-level forced re-fetch cycle, which reacts to
//! units that still failed after these retries.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::FetchError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
