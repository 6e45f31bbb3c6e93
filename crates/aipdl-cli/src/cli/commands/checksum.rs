//! `aipdl checksum <path>`: the size and SHA-256 recorded in `summary.json`.

use aipdl_core::checksum;
use anyhow::Result;
use std::path::Path;

pub fn run_checksum(path: &Path) -> Result<()> {
    let digest = checksum::digest_file(path)?;
    println!("{}  {}  {}", digest.sha256, digest.size, path.display());
    Ok(())
}
