//! Batch runner: every airport of a document through one shared worker pool.
//!
//! Keeps up to `max_concurrent_airports` orchestrators in flight; each runs
//! on the blocking pool since it waits on its completion tracker. The call
//! returns once every airport has finished, successfully or not.

use std::sync::Arc;

use crate::config::AipdlConfig;
use crate::control::CancelToken;
use crate::fetch::Fetcher;
use crate::model::{Airport, DocumentInfo, Layout};
use crate::orchestrator::{self, AirportContext, AirportError, AirportReport};
use crate::pool::WorkerPool;

#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Fetch everything on the first cycle, ignoring local copies.
    pub force: bool,
}

/// Final state of one airport.
#[derive(Debug)]
pub struct AirportOutcome {
    pub airport: Airport,
    pub result: Result<AirportReport, AirportError>,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    /// In the order the airports were given.
    pub outcomes: Vec<AirportOutcome>,
}

impl BatchReport {
    pub fn any_failed(&self) -> bool {
        self.outcomes.iter().any(|o| o.result.is_err())
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Runs the fetch/merge pipeline for `airports`.
pub async fn run_batch(
    cfg: &AipdlConfig,
    document: &DocumentInfo,
    airports: Vec<Airport>,
    fetcher: Arc<dyn Fetcher>,
    options: BatchOptions,
    cancel: CancelToken,
) -> BatchReport {
    let pool = Arc::new(WorkerPool::new(
        cfg.max_workers,
        cfg.queue_capacity,
        Arc::clone(&fetcher),
        cfg.retry_policy(),
        cancel.clone(),
    ));
    let ctx = AirportContext {
        document: document.clone(),
        layout: Layout::new(&cfg.root_dir, document, &cfg.merge_dir),
        pool: Arc::clone(&pool),
        fetcher,
        cancel,
        max_attempts: cfg.attempt_limit(),
        force: options.force,
        fetch_index_pages: cfg.fetch_index_pages,
        retry: cfg.retry_policy(),
    };
    let max_concurrent = cfg.max_concurrent_airports.max(1);
    tracing::info!(
        country = %document.country_code,
        airports = airports.len(),
        workers = cfg.max_workers,
        max_concurrent,
        "batch starting"
    );

    // Kept apart from the airports so a lost task can still be reported.
    let names: Vec<(String, String)> = airports
        .iter()
        .map(|a| (a.code.clone(), a.title.clone()))
        .collect();
    let total = airports.len();
    let mut slots: Vec<Option<AirportOutcome>> = (0..total).map(|_| None).collect();
    let mut queue = airports.into_iter().enumerate();
    let mut join_set = tokio::task::JoinSet::new();

    loop {
        while join_set.len() < max_concurrent {
            let Some((index, mut airport)) = queue.next() else {
                break;
            };
            let ctx = ctx.clone();
            join_set.spawn(async move {
                let code = airport.code.clone();
                let joined = tokio::task::spawn_blocking(move || {
                    let result = orchestrator::run_airport(&mut airport, &ctx);
                    AirportOutcome { airport, result }
                })
                .await;
                (index, code, joined)
            });
        }

        let Some(res) = join_set.join_next().await else {
            break;
        };
        match res {
            Ok((index, _, Ok(outcome))) => {
                if let Err(e) = &outcome.result {
                    tracing::error!(airport = %e.airport(), error = %e, "airport failed");
                }
                slots[index] = Some(outcome);
            }
            Ok((index, code, Err(e))) => {
                tracing::error!(airport = %code, error = %e, "airport task panicked");
                slots[index] = Some(panicked(&names[index], e.to_string()));
            }
            // The index is lost with the task; `collect_outcomes` reports it.
            Err(e) => tracing::error!(error = %e, "airport task join"),
        }
    }

    // Orchestrators are done, so nothing is queued; this only joins workers.
    let pool_for_shutdown = Arc::clone(&pool);
    if let Err(e) = tokio::task::spawn_blocking(move || pool_for_shutdown.shutdown()).await {
        tracing::warn!(error = %e, "worker pool shutdown");
    }

    let report = BatchReport {
        outcomes: collect_outcomes(slots, &names),
    };
    tracing::info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        "batch finished"
    );
    report
}

fn panicked((code, title): &(String, String), message: String) -> AirportOutcome {
    AirportOutcome {
        airport: Airport::new(code, title),
        result: Err(AirportError::Panicked {
            airport: code.clone(),
            message,
        }),
    }
}

/// Outcomes in input order. An airport whose task produced none is recorded
/// as `Panicked`, so every input airport appears in the report.
fn collect_outcomes(
    slots: Vec<Option<AirportOutcome>>,
    names: &[(String, String)],
) -> Vec<AirportOutcome> {
    slots
        .into_iter()
        .zip(names)
        .map(|(slot, name)| {
            slot.unwrap_or_else(|| panicked(name, "airport task ended without an outcome".to_string()))
        })
        .collect()
}
