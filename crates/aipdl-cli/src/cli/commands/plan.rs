//! `aipdl plan`: freshness verdicts per airport, nothing downloaded.

use aipdl_core::config::AipdlConfig;
use aipdl_core::fetch::{CurlFetcher, Fetcher};
use aipdl_core::freshness::Decision;
use aipdl_core::model::Layout;
use aipdl_core::orchestrator::plan_airport;
use aipdl_core::source::{self, AirportSource, ManifestSource};
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

pub async fn run_plan(cfg: &AipdlConfig, manifest: &Path) -> Result<()> {
    let source = ManifestSource::load(manifest)?;
    let document = source.document()?;
    let airports = source::load_airports(&source, &[])?;
    let layout = Layout::new(&cfg.root_dir, &document, &cfg.merge_dir);
    let fetcher: Arc<dyn Fetcher> = Arc::new(CurlFetcher::new(cfg.http()));

    // Probes are blocking HTTP calls.
    let plans = tokio::task::spawn_blocking(move || {
        airports
            .iter()
            .map(|a| plan_airport(a, &layout, &document, fetcher.as_ref(), false))
            .collect::<Result<Vec<_>, _>>()
    })
    .await
    .context("plan task")??;

    for plan in &plans {
        match plan.bulk {
            Some(reason) => println!("{}: fetch all {} ({})", plan.airport, plan.units.len(), reason),
            None => println!(
                "{}: fetch {}, keep {}",
                plan.airport,
                plan.to_fetch(),
                plan.to_skip()
            ),
        }
        for unit in &plan.units {
            if let Decision::Fetch(reason) = unit.decision {
                if plan.bulk.is_none() {
                    println!("  {}  {}", unit.dest.display(), reason);
                }
            }
        }
        if !plan.unresolved.is_empty() {
            println!("  {} unit(s) with unusable locators", plan.unresolved.len());
        }
    }
    Ok(())
}
