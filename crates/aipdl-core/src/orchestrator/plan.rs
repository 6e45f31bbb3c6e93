//! Selecting stage: runs the freshness guard over every unit of an airport.

use std::path::PathBuf;

use super::AirportError;
use crate::fetch::Fetcher;
use crate::freshness::{self, Decision, FetchReason};
use crate::model::{Airport, DocumentInfo, Layout};
use crate::url_model;

/// Freshness verdict for one unit.
#[derive(Debug, Clone)]
pub struct UnitPlan {
    /// Position in the airport's descriptor list.
    pub index: usize,
    pub url: String,
    pub dest: PathBuf,
    pub decision: Decision,
    /// Remote length from the probe, when one was made.
    pub expected_len: Option<u64>,
}

/// What one cycle would do for an airport. Building a plan has no side
/// effects on disk.
#[derive(Debug, Clone)]
pub struct AirportPlan {
    pub airport: String,
    pub airport_dir: PathBuf,
    /// Set when the whole directory is fetched without per-file checks.
    pub bulk: Option<FetchReason>,
    pub units: Vec<UnitPlan>,
    /// Units whose locator could not be resolved against the base URL.
    pub unresolved: Vec<usize>,
}

impl AirportPlan {
    pub fn to_fetch(&self) -> usize {
        self.units.iter().filter(|u| u.decision.should_fetch()).count()
    }

    pub fn to_skip(&self) -> usize {
        self.units.len() - self.to_fetch()
    }
}

/// Probes remote sizes and stats local files to decide, per unit, fetch or
/// skip. Probing only happens when a local copy exists and the directory is
/// not being fetched in bulk; a failed probe counts as an unknown size.
pub fn plan_airport(
    airport: &Airport,
    layout: &Layout,
    document: &DocumentInfo,
    fetcher: &dyn Fetcher,
    force: bool,
) -> Result<AirportPlan, AirportError> {
    let freshness_err = |path: PathBuf, source: std::io::Error| AirportError::Freshness {
        airport: airport.code.clone(),
        path,
        source,
    };

    let airport_dir = layout.airport_dir(&airport.code);
    let dir_modified =
        freshness::stat_dir(&airport_dir).map_err(|e| freshness_err(airport_dir.clone(), e))?;
    let bulk = freshness::directory_verdict(dir_modified, &document.window, force);

    let mut units = Vec::with_capacity(airport.descriptors.len());
    let mut unresolved = Vec::new();
    for (index, unit) in airport.descriptors.iter().enumerate() {
        let url = match url_model::resolve_locator(&document.base_url, &unit.source_locator) {
            Ok(u) => u,
            Err(e) => {
                tracing::warn!(airport = %airport.code, unit = index, locator = %unit.source_locator, error = %e, "cannot resolve unit locator");
                unresolved.push(index);
                continue;
            }
        };
        let dest = layout.unit_path(&airport.code, &unit.local_name);

        let (decision, expected_len) = match bulk {
            Some(reason) => (Decision::Fetch(reason), None),
            None => match freshness::stat_file(&dest).map_err(|e| freshness_err(dest.clone(), e))? {
                None => (Decision::Fetch(FetchReason::Missing), None),
                local => {
                    let expected_len = match fetcher.probe(&url) {
                        Ok(p) => p.content_length,
                        Err(e) => {
                            tracing::debug!(airport = %airport.code, url = %url, error = %e, "probe failed");
                            None
                        }
                    };
                    (
                        freshness::file_decision(local, expected_len, &document.window),
                        expected_len,
                    )
                }
            },
        };

        units.push(UnitPlan {
            index,
            url,
            dest,
            decision,
            expected_len,
        });
    }

    Ok(AirportPlan {
        airport: airport.code.clone(),
        airport_dir,
        bulk,
        units,
        unresolved,
    })
}
