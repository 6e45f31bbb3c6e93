use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Every unit, text first.
    Full,
    /// Chart units only.
    ChartOnly,
}

impl ArtifactKind {
    /// Output file name for an airport: `<code>_full.pdf` / `<code>_chart.pdf`.
    pub fn file_name(self, airport_code: &str) -> String {
        match self {
            ArtifactKind::Full => format!("{}_full.pdf", airport_code),
            ArtifactKind::ChartOnly => format!("{}_chart.pdf", airport_code),
        }
    }
}

/// A merged document written for an airport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedArtifact {
    pub kind: ArtifactKind,
    pub output_directory: PathBuf,
    pub output_file_name: String,
    pub page_count: usize,
}

impl MergedArtifact {
    pub fn path(&self) -> PathBuf {
        self.output_directory.join(&self.output_file_name)
    }
}
