//! `aipdl run`: the whole fetch/merge pipeline for a manifest.

use aipdl_core::batch::{run_batch, BatchOptions};
use aipdl_core::config::AipdlConfig;
use aipdl_core::control::CancelToken;
use aipdl_core::fetch::{CurlFetcher, Fetcher};
use aipdl_core::model::Layout;
use aipdl_core::source::{self, AirportSource, ManifestSource};
use aipdl_core::summary::{self, BatchSummary};
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct RunOverrides {
    pub force: bool,
    pub workers: Option<usize>,
    pub root: Option<PathBuf>,
    pub airports: Vec<String>,
}

pub async fn run_pipeline(cfg: &mut AipdlConfig, manifest: &Path, overrides: RunOverrides) -> Result<()> {
    if let Some(n) = overrides.workers {
        cfg.max_workers = n.max(1);
    }
    if let Some(root) = overrides.root {
        cfg.root_dir = root;
    }

    let source = ManifestSource::load(manifest)?;
    let document = source.document()?;
    let airports = source::load_airports(&source, &overrides.airports)?;
    if airports.is_empty() {
        bail!("no airports selected from {}", manifest.display());
    }

    let cancel = CancelToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("interrupted, finishing in-flight downloads");
            on_interrupt.cancel();
        }
    });

    let fetcher: Arc<dyn Fetcher> = Arc::new(CurlFetcher::new(cfg.http()));
    let report = run_batch(
        cfg,
        &document,
        airports,
        fetcher,
        BatchOptions {
            force: overrides.force,
        },
        cancel,
    )
    .await;

    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(r) => {
                let pages: Vec<String> = r
                    .artifacts
                    .iter()
                    .map(|a| format!("{} ({} pages)", a.output_file_name, a.page_count))
                    .collect();
                println!(
                    "{:<6} ok      attempts={} fetched={} kept={}  {}",
                    outcome.airport.code,
                    r.attempts,
                    r.dispatched,
                    r.skipped,
                    pages.join(", ")
                );
            }
            Err(e) => println!("{:<6} FAILED  {}", outcome.airport.code, e),
        }
    }

    let layout = Layout::new(&cfg.root_dir, &document, &cfg.merge_dir);
    let record = BatchSummary::from_report(&document, &report)?;
    let path = summary::write_summary(&layout, &record)?;
    println!("summary: {}", path.display());

    if report.any_failed() {
        bail!(
            "{} of {} airport(s) failed",
            report.failed(),
            report.outcomes.len()
        );
    }
    Ok(())
}
