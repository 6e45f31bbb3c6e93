//! `aipdl merge`: rebuild one airport's merged PDFs from local files.

use aipdl_core::config::AipdlConfig;
use aipdl_core::merge;
use aipdl_core::model::Layout;
use aipdl_core::source::{self, AirportSource, ManifestSource};
use anyhow::{bail, Result};
use std::path::Path;

pub fn run_merge(cfg: &AipdlConfig, manifest: &Path, airport: &str) -> Result<()> {
    let source = ManifestSource::load(manifest)?;
    let document = source.document()?;
    let mut airports = source::load_airports(&source, &[airport.to_string()])?;
    let Some(mut apt) = airports.pop() else {
        bail!("airport {} not in {}", airport, manifest.display());
    };
    let layout = Layout::new(&cfg.root_dir, &document, &cfg.merge_dir);

    // Local files stand in for a completed fetch cycle.
    for unit in &mut apt.descriptors {
        unit.fetch_succeeded = layout.unit_path(&apt.code, &unit.local_name).is_file();
    }
    let missing = apt.failed_units();
    if !missing.is_empty() {
        bail!("{}: missing local files: {}", apt.code, missing.join(", "));
    }

    for artifact in merge::merge_airport(&apt, &layout)? {
        println!("{}  {} pages", artifact.path().display(), artifact.page_count);
    }
    Ok(())
}
