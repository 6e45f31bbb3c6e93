//! Worker loop: take a job, fetch it, report the outcome.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};

use crate::control::CancelToken;
use crate::fetch::Fetcher;
use crate::retry::{run_with_retry, FetchError, RetryPolicy};

use super::{lock, FetchJob};

pub(super) fn run(
    id: usize,
    rx: Arc<Mutex<Receiver<FetchJob>>>,
    fetcher: Arc<dyn Fetcher>,
    retry: RetryPolicy,
    cancel: CancelToken,
) {
    loop {
        let next = lock(&rx).recv();
        let Ok(job) = next else {
            break;
        };
        process(id, job, fetcher.as_ref(), &retry, &cancel);
    }
    tracing::debug!(worker = id, "fetch worker exiting");
}

fn process(id: usize, job: FetchJob, fetcher: &dyn Fetcher, retry: &RetryPolicy, cancel: &CancelToken) {
    let FetchJob {
        airport,
        url,
        dest,
        expected_len,
        done,
    } = job;

    if cancel.is_cancelled() {
        done.done(Err(FetchError::Cancelled));
        return;
    }

    if let Some(parent) = dest.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::error!(worker = id, airport = %airport, path = %parent.display(), error = %e, "cannot create unit directory");
            done.done(Err(FetchError::Storage(e)));
            return;
        }
    }

    let fetched = panic::catch_unwind(AssertUnwindSafe(|| {
        run_with_retry(retry, &airport, &url, || fetcher.fetch_to(&url, &dest, expected_len))
    }))
    .unwrap_or_else(|_| Err(FetchError::Lost(format!("fetch of {} panicked", url))));

    match &fetched {
        Ok(bytes) => tracing::info!(worker = id, airport = %airport, bytes, path = %dest.display(), "downloaded"),
        Err(e) => tracing::warn!(worker = id, airport = %airport, url = %url, error = %e, "download failed"),
    }
    done.done(fetched);
}
