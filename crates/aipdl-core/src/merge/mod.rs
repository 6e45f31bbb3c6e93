//! Merge engine: concatenates an airport's downloaded units into its
//! `<code>_full.pdf` and `<code>_chart.pdf` artifacts.
//!
//! Page order is descriptor order, then page order within each file. Both
//! artifacts are assembled and written to `.part` files before either is
//! renamed into place, so a failed assembly or write leaves no new output.

mod assembler;
mod error;

pub use assembler::{PdfAssembler, PdfInfo};
pub use error::MergeError;

use crate::model::{Airport, ArtifactKind, Layout, MergedArtifact, UnitDescriptor};
use crate::storage::TempFile;

/// Builds both artifacts for `airport` from its local unit files.
pub fn merge_airport(
    airport: &Airport,
    layout: &Layout,
) -> Result<Vec<MergedArtifact>, MergeError> {
    let out_dir = layout.merge_output_dir();
    let charts: Vec<&UnitDescriptor> = airport.descriptors.iter().filter(|d| d.is_chart()).collect();
    let all: Vec<&UnitDescriptor> = airport.descriptors.iter().collect();

    let plans = [(ArtifactKind::ChartOnly, charts), (ArtifactKind::Full, all)];
    let mut assembled = Vec::with_capacity(plans.len());
    for (kind, units) in plans {
        let mut asm = PdfAssembler::new();
        for unit in units {
            let path = layout.unit_path(&airport.code, &unit.local_name);
            if !unit.fetch_succeeded {
                return Err(MergeError::NotFetched { path });
            }
            let pages = asm.append_file(&path)?;
            tracing::debug!(airport = %airport.code, path = %path.display(), pages, artifact = ?kind, "appended");
        }
        assembled.push((kind, asm));
    }

    let mut staged: Vec<(MergedArtifact, TempFile)> = Vec::with_capacity(assembled.len());
    for (kind, asm) in assembled {
        let artifact = MergedArtifact {
            kind,
            output_directory: out_dir.clone(),
            output_file_name: kind.file_name(&airport.code),
            page_count: asm.page_count(),
        };
        let info = PdfInfo::for_artifact(kind, &airport.code, layout.country_code());
        match asm.write_part(&artifact.path(), &info) {
            Ok(part) => staged.push((artifact, part)),
            Err(e) => {
                for (_, part) in staged {
                    part.discard();
                }
                return Err(e);
            }
        }
    }

    let mut artifacts = Vec::with_capacity(staged.len());
    let mut staged = staged.into_iter();
    while let Some((artifact, part)) = staged.next() {
        if let Err(e) = part.finalize() {
            staged.for_each(|(_, rest)| rest.discard());
            return Err(MergeError::Write {
                path: artifact.path(),
                message: e.to_string(),
            });
        }
        tracing::info!(
            airport = %airport.code,
            path = %artifact.path().display(),
            pages = artifact.page_count,
            "merged"
        );
        artifacts.push(artifact);
    }
    Ok(artifacts)
}
