//! `summary.json`: the batch record handed to the upload step.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::batch::BatchReport;
use crate::checksum;
use crate::model::{ArtifactKind, DocumentInfo, Layout};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactRecord {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub page_count: usize,
    pub size: u64,
    pub sha256: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirportStatus {
    Merged,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportRecord {
    pub code: String,
    pub title: String,
    pub status: AirportStatus,
    pub attempts: u32,
    pub dispatched: usize,
    pub skipped: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub artifacts: Vec<ArtifactRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub country_code: String,
    pub effective_date: NaiveDate,
    pub next_effective_date: NaiveDate,
    pub airports: Vec<AirportRecord>,
}

impl BatchSummary {
    /// Builds the record, hashing every merged artifact on disk.
    pub fn from_report(document: &DocumentInfo, report: &BatchReport) -> Result<Self> {
        let mut airports = Vec::with_capacity(report.outcomes.len());
        for outcome in &report.outcomes {
            let record = match &outcome.result {
                Ok(r) => {
                    let mut artifacts = Vec::with_capacity(r.artifacts.len());
                    for a in &r.artifacts {
                        let path = a.path();
                        let digest = checksum::digest_file(&path)?;
                        artifacts.push(ArtifactRecord {
                            kind: a.kind,
                            path,
                            page_count: a.page_count,
                            size: digest.size,
                            sha256: digest.sha256,
                        });
                    }
                    AirportRecord {
                        code: outcome.airport.code.clone(),
                        title: outcome.airport.title.clone(),
                        status: AirportStatus::Merged,
                        attempts: r.attempts,
                        dispatched: r.dispatched,
                        skipped: r.skipped,
                        error: None,
                        artifacts,
                    }
                }
                Err(e) => AirportRecord {
                    code: outcome.airport.code.clone(),
                    title: outcome.airport.title.clone(),
                    status: AirportStatus::Failed,
                    attempts: outcome.airport.attempt_count,
                    dispatched: 0,
                    skipped: 0,
                    error: Some(e.to_string()),
                    artifacts: Vec::new(),
                },
            };
            airports.push(record);
        }
        Ok(Self {
            country_code: document.country_code.clone(),
            effective_date: document.window.effective_date(),
            next_effective_date: document.window.next_effective.date_naive(),
            airports,
        })
    }
}

/// Writes `summary.json` into the merge directory and returns its path.
pub fn write_summary(layout: &Layout, summary: &BatchSummary) -> Result<PathBuf> {
    let path = layout.summary_path();
    write_summary_to(&path, summary)?;
    Ok(path)
}

pub fn write_summary_to(path: &Path, summary: &BatchSummary) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), airports = summary.airports.len(), "summary written");
    Ok(())
}
