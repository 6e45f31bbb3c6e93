//! Per-airport completion tracking for one fetch cycle.
//!
//! Workers never touch airport state. Each dispatched job carries a
//! [`CompletionHandle`]; the worker that processes the job reports through it
//! exactly once (dropping an unreported handle reports the job as lost), and
//! the orchestrator owning the [`CompletionTracker`] is the only writer of the
//! counters. `wait` returns once every dispatched job has reported.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::progress::AirportProgress;
use crate::retry::FetchError;

/// Result of one dispatched unit, keyed by its index in the airport's list.
#[derive(Debug)]
pub struct UnitOutcome {
    pub index: usize,
    pub result: Result<u64, FetchError>,
}

/// Reports the outcome of one dispatched job. Consumed by `done`.
#[derive(Debug)]
pub struct CompletionHandle {
    index: usize,
    tx: Option<Sender<UnitOutcome>>,
}

impl CompletionHandle {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn done(mut self, result: Result<u64, FetchError>) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(UnitOutcome {
                index: self.index,
                result,
            });
        }
    }
}

impl Drop for CompletionHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(UnitOutcome {
                index: self.index,
                result: Err(FetchError::Lost("job dropped before completion".to_string())),
            });
        }
    }
}

/// Counts of one finished cycle plus every reported outcome.
#[derive(Debug)]
pub struct CycleOutcome {
    pub dispatched: usize,
    pub completed: usize,
    pub skipped: usize,
    pub outcomes: Vec<UnitOutcome>,
}

/// Counting barrier for one airport and one cycle.
pub struct CompletionTracker {
    airport: String,
    total: usize,
    tx: Sender<UnitOutcome>,
    rx: Receiver<UnitOutcome>,
    dispatched: usize,
    completed: usize,
    skipped: usize,
}

impl CompletionTracker {
    /// `total` is the number of units the airport declares (for progress logs).
    pub fn new(airport: &str, total: usize) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            airport: airport.to_string(),
            total,
            tx,
            rx,
            dispatched: 0,
            completed: 0,
            skipped: 0,
        }
    }

    /// Registers one dispatched job and returns the handle it reports through.
    pub fn add(&mut self, index: usize) -> CompletionHandle {
        self.dispatched += 1;
        CompletionHandle {
            index,
            tx: Some(self.tx.clone()),
        }
    }

    /// Registers a unit kept from a fresh local copy. Not a dispatched job.
    pub fn skip(&mut self) {
        self.skipped += 1;
    }

    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Blocks until every dispatched job has reported. Returns at once when
    /// nothing was dispatched.
    pub fn wait(self) -> CycleOutcome {
        let CompletionTracker {
            airport,
            total,
            tx,
            rx,
            dispatched,
            mut completed,
            skipped,
        } = self;
        // Only handles keep the channel open from here on.
        drop(tx);

        let mut outcomes = Vec::with_capacity(dispatched);
        while completed < dispatched {
            let outcome = match rx.recv() {
                Ok(o) => o,
                Err(_) => break,
            };
            completed += 1;
            let progress = AirportProgress {
                downloaded: completed + skipped,
                total,
            };
            match &outcome.result {
                Ok(bytes) => tracing::debug!(
                    airport = %airport,
                    unit = outcome.index,
                    bytes,
                    progress = %progress,
                    "unit downloaded"
                ),
                Err(e) => tracing::warn!(
                    airport = %airport,
                    unit = outcome.index,
                    error = %e,
                    progress = %progress,
                    "unit failed"
                ),
            }
            outcomes.push(outcome);
        }

        let progress = AirportProgress {
            downloaded: completed + skipped,
            total,
        };
        if !progress.is_complete() {
            tracing::debug!(airport = %airport, progress = %progress, "cycle ended with units missing");
        }

        CycleOutcome {
            dispatched,
            completed,
            skipped,
            outcomes,
        }
    }
}
