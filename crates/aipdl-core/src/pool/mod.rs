//! Bounded fetch worker pool shared by every airport of a batch.
//!
//! A single bounded queue carries [`FetchJob`]s; up to `max_workers` threads
//! drain it. Workers are spawned lazily, one per submit, until the cap is
//! reached. Each job carries its own completion handle, so jobs of different
//! airports interleave freely on the same workers.

mod worker;

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;

use crate::control::CancelToken;
use crate::fetch::Fetcher;
use crate::retry::RetryPolicy;
use crate::tracker::CompletionHandle;

/// One unit to fetch.
#[derive(Debug)]
pub struct FetchJob {
    pub airport: String,
    pub url: String,
    pub dest: PathBuf,
    /// Length from the HEAD probe, if one was made.
    pub expected_len: Option<u64>,
    pub done: CompletionHandle,
}

/// Returned by `submit` after `shutdown`. The job has been reported as lost.
#[derive(Debug, thiserror::Error)]
#[error("worker pool is shut down")]
pub struct PoolClosed;

pub struct WorkerPool {
    tx: Mutex<Option<SyncSender<FetchJob>>>,
    rx: Arc<Mutex<Receiver<FetchJob>>>,
    handles: Mutex<Vec<JoinHandle<()>>>,
    max_workers: usize,
    fetcher: Arc<dyn Fetcher>,
    retry: RetryPolicy,
    cancel: CancelToken,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl WorkerPool {
    pub fn new(
        max_workers: usize,
        queue_capacity: usize,
        fetcher: Arc<dyn Fetcher>,
        retry: RetryPolicy,
        cancel: CancelToken,
    ) -> Self {
        let (tx, rx) = mpsc::sync_channel(queue_capacity.max(1));
        Self {
            tx: Mutex::new(Some(tx)),
            rx: Arc::new(Mutex::new(rx)),
            handles: Mutex::new(Vec::new()),
            max_workers: max_workers.max(1),
            fetcher,
            retry,
            cancel,
        }
    }

    /// Workers started so far (never more than `max_workers`).
    pub fn worker_count(&self) -> usize {
        lock(&self.handles).len()
    }

    fn ensure_worker(&self) {
        let mut handles = lock(&self.handles);
        if handles.len() >= self.max_workers {
            return;
        }
        let id = handles.len() + 1;
        let rx = Arc::clone(&self.rx);
        let fetcher = Arc::clone(&self.fetcher);
        let retry = self.retry;
        let cancel = self.cancel.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("aipdl-fetch-{}", id))
            .spawn(move || worker::run(id, rx, fetcher, retry, cancel));
        match spawned {
            Ok(h) => {
                tracing::debug!(worker = id, "fetch worker started");
                handles.push(h);
            }
            Err(e) => tracing::warn!(error = %e, "could not start fetch worker"),
        }
    }

    /// Queues a job, blocking while the queue is full.
    pub fn submit(&self, job: FetchJob) -> Result<(), PoolClosed> {
        self.ensure_worker();
        let tx = lock(&self.tx).clone();
        match tx {
            Some(tx) => tx.send(job).map_err(|_| PoolClosed),
            None => Err(PoolClosed),
        }
    }

    /// Closes the queue and waits for workers to drain it and exit.
    pub fn shutdown(&self) {
        drop(lock(&self.tx).take());
        let handles: Vec<_> = lock(&self.handles).drain(..).collect();
        for h in handles {
            if h.join().is_err() {
                tracing::warn!("fetch worker panicked");
            }
        }
    }
}
