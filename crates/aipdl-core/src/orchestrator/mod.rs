//! Per-airport retry orchestrator.
//!
//! One airport moves through
//! `Selecting -> Dispatching -> WaitingCompletion -> DeterminingSuccess -> Merging`.
//! A unit that did not fetch, or a failed merge, sends the airport back to
//! `Selecting` with `force` set, so the next cycle re-fetches everything.
//! The attempt bound is checked on entry to `Selecting`: at most
//! `max_attempts` cycles run (never more than two), and needing one more is
//! [`AirportError::AttemptsExhausted`].

mod error;
mod plan;

pub use error::AirportError;
pub use plan::{plan_airport, AirportPlan, UnitPlan};

use std::sync::Arc;

use crate::config::MAX_CYCLES;
use crate::control::CancelToken;
use crate::fetch::Fetcher;
use crate::freshness::{self, Decision};
use crate::index_page;
use crate::merge;
use crate::model::{Airport, DocumentInfo, Layout, MergedArtifact};
use crate::pool::{FetchJob, WorkerPool};
use crate::retry::RetryPolicy;
use crate::tracker::{CompletionTracker, CycleOutcome};

/// Everything an orchestrator needs besides the airport itself.
/// Cheap to clone; one per airport task.
#[derive(Clone)]
pub struct AirportContext {
    pub document: DocumentInfo,
    pub layout: Layout,
    pub pool: Arc<WorkerPool>,
    pub fetcher: Arc<dyn Fetcher>,
    pub cancel: CancelToken,
    /// Cycles allowed per airport, clamped to `1..=MAX_CYCLES`.
    pub max_attempts: u32,
    /// Force the first cycle as well.
    pub force: bool,
    pub fetch_index_pages: bool,
    /// Transient retry for the index page download.
    pub retry: RetryPolicy,
}

/// Successful end of one airport.
#[derive(Debug, Clone)]
pub struct AirportReport {
    pub airport: String,
    pub attempts: u32,
    /// Jobs sent to the pool, summed over all cycles.
    pub dispatched: usize,
    /// Units kept from local copies, summed over all cycles.
    pub skipped: usize,
    pub artifacts: Vec<MergedArtifact>,
    pub index_page_fetched: bool,
}

enum State {
    Selecting,
    Dispatching(AirportPlan),
    WaitingCompletion(CompletionTracker),
    DeterminingSuccess,
    Merging,
}

/// Runs fetch/merge cycles for `airport` until it merges or runs out of
/// attempts, then refreshes its index page (when enabled) whether or not the
/// merge succeeded. Blocks the calling thread; jobs run on the shared pool.
pub fn run_airport(airport: &mut Airport, ctx: &AirportContext) -> Result<AirportReport, AirportError> {
    let mut report = AirportReport {
        airport: airport.code.clone(),
        attempts: 0,
        dispatched: 0,
        skipped: 0,
        artifacts: Vec::new(),
        index_page_fetched: false,
    };
    let cycles = run_cycles(airport, ctx, &mut report);

    // After the unit cycles, so the page never touches the directory verdict.
    let cancelled = matches!(cycles, Err(AirportError::Cancelled { .. }));
    if ctx.fetch_index_pages && !cancelled {
        report.index_page_fetched = refresh_index_page(airport, ctx);
    }
    cycles?;

    tracing::info!(
        airport = %airport.code,
        attempts = report.attempts,
        dispatched = report.dispatched,
        skipped = report.skipped,
        "airport done"
    );
    Ok(report)
}

fn run_cycles(
    airport: &mut Airport,
    ctx: &AirportContext,
    report: &mut AirportReport,
) -> Result<(), AirportError> {
    if let Some(name) = airport.duplicate_local_name() {
        return Err(AirportError::DuplicateLocalName {
            airport: airport.code.clone(),
            name: name.to_string(),
        });
    }
    let max_attempts = ctx.max_attempts.clamp(1, MAX_CYCLES);
    let mut force = ctx.force;
    let mut last_failure = String::from("no cycle ran");
    let mut state = State::Selecting;

    loop {
        state = match state {
            State::Selecting => {
                if ctx.cancel.is_cancelled() {
                    return Err(AirportError::Cancelled {
                        airport: airport.code.clone(),
                    });
                }
                if airport.attempt_count >= max_attempts {
                    tracing::error!(airport = %airport.code, attempts = airport.attempt_count, failure = %last_failure, "attempts exhausted");
                    return Err(AirportError::AttemptsExhausted {
                        airport: airport.code.clone(),
                        attempts: airport.attempt_count,
                        last_failure,
                    });
                }
                airport.attempt_count += 1;
                airport.reset_fetch_status();
                airport.merged_artifacts.clear();
                report.attempts = airport.attempt_count;
                tracing::info!(airport = %airport.code, attempt = airport.attempt_count, force, "selecting units");
                State::Dispatching(plan_airport(airport, &ctx.layout, &ctx.document, ctx.fetcher.as_ref(), force)?)
            }
            State::Dispatching(plan) => State::WaitingCompletion(dispatch(airport, ctx, plan)?),
            State::WaitingCompletion(tracker) => {
                let outcome = tracker.wait();
                report.dispatched += outcome.dispatched;
                report.skipped += outcome.skipped;
                apply_outcomes(airport, outcome);
                State::DeterminingSuccess
            }
            State::DeterminingSuccess => {
                if airport.all_fetched() {
                    State::Merging
                } else {
                    let failed = airport.failed_units();
                    last_failure = format!("{} unit(s) not fetched: {}", failed.len(), failed.join(", "));
                    tracing::warn!(airport = %airport.code, attempt = airport.attempt_count, failure = %last_failure, "fetch incomplete, forcing re-fetch");
                    force = true;
                    State::Selecting
                }
            }
            State::Merging => match merge::merge_airport(airport, &ctx.layout) {
                Ok(artifacts) => {
                    airport.merged_artifacts = artifacts.clone();
                    report.artifacts = artifacts;
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(airport = %airport.code, attempt = airport.attempt_count, error = %e, "merge failed, forcing re-fetch");
                    last_failure = e.to_string();
                    force = true;
                    State::Selecting
                }
            },
        };
    }
}

/// Dispatching stage: skips are recorded on the spot, the rest go to the pool.
fn dispatch(
    airport: &mut Airport,
    ctx: &AirportContext,
    plan: AirportPlan,
) -> Result<CompletionTracker, AirportError> {
    if let Some(reason) = plan.bulk {
        tracing::info!(airport = %airport.code, dir = %plan.airport_dir.display(), %reason, "fetching whole airport directory");
        freshness::mark_directory_fresh(&plan.airport_dir).map_err(|source| {
            AirportError::Freshness {
                airport: airport.code.clone(),
                path: plan.airport_dir.clone(),
                source,
            }
        })?;
    }

    let mut tracker = CompletionTracker::new(&airport.code, airport.descriptors.len());
    for unit in plan.units {
        if ctx.cancel.is_cancelled() {
            tracing::info!(airport = %airport.code, "cancelled while dispatching");
            break;
        }
        match unit.decision {
            Decision::Skip => {
                if let Some(d) = airport.descriptors.get_mut(unit.index) {
                    d.fetch_succeeded = true;
                }
                tracker.skip();
                tracing::debug!(airport = %airport.code, path = %unit.dest.display(), "up to date, skipped");
            }
            Decision::Fetch(reason) => {
                tracing::debug!(airport = %airport.code, path = %unit.dest.display(), %reason, "queueing");
                let job = FetchJob {
                    airport: airport.code.clone(),
                    url: unit.url,
                    dest: unit.dest,
                    expected_len: unit.expected_len,
                    done: tracker.add(unit.index),
                };
                // A refused job reports itself lost through its handle.
                if ctx.pool.submit(job).is_err() {
                    tracing::warn!(airport = %airport.code, "worker pool closed, job dropped");
                }
            }
        }
    }
    tracing::info!(
        airport = %airport.code,
        dispatched = tracker.dispatched(),
        skipped = tracker.skipped(),
        "dispatched"
    );
    Ok(tracker)
}

fn apply_outcomes(airport: &mut Airport, outcome: CycleOutcome) {
    for o in outcome.outcomes {
        if let Some(d) = airport.descriptors.get_mut(o.index) {
            d.fetch_succeeded = o.result.is_ok();
        }
    }
}

fn refresh_index_page(airport: &Airport, ctx: &AirportContext) -> bool {
    let Some(locator) = airport.index_locator.as_deref() else {
        return false;
    };
    match index_page::refresh_index_page(
        ctx.fetcher.as_ref(),
        &ctx.document,
        &ctx.layout,
        &airport.code,
        locator,
        &ctx.retry,
    ) {
        Ok(fetched) => fetched,
        Err(e) => {
            tracing::warn!(airport = %airport.code, error = %e, "index page download failed");
            false
        }
    }
}
