use super::{MergedArtifact, UnitDescriptor};

/// An airport of the document and the state of its fetch/merge cycles.
#[derive(Debug, Clone, Default)]
pub struct Airport {
    /// ICAO-style code, e.g. `RJAA`.
    pub code: String,
    pub title: String,
    /// Locator of the airport's index page, when the site has one.
    pub index_locator: Option<String>,
    /// Units in discovery order; the text unit comes first.
    pub descriptors: Vec<UnitDescriptor>,
    /// Filled once per successful merge.
    pub merged_artifacts: Vec<MergedArtifact>,
    /// Full fetch+merge cycles started so far.
    pub attempt_count: u32,
}

impl Airport {
    pub fn new(code: &str, title: &str) -> Self {
        Self {
            code: code.to_string(),
            title: title.to_string(),
            ..Self::default()
        }
    }

    /// Appends a unit, re-pointing its owner at this airport.
    pub fn push_unit(&mut self, mut unit: UnitDescriptor) {
        unit.owner_airport = self.code.clone();
        self.descriptors.push(unit);
    }

    pub fn all_fetched(&self) -> bool {
        self.descriptors.iter().all(|d| d.fetch_succeeded)
    }

    pub fn reset_fetch_status(&mut self) {
        for d in &mut self.descriptors {
            d.fetch_succeeded = false;
        }
    }

    pub fn failed_units(&self) -> Vec<&str> {
        self.descriptors
            .iter()
            .filter(|d| !d.fetch_succeeded)
            .map(|d| d.local_name.as_str())
            .collect()
    }

    /// First local file name shared by two units. Two units writing the same
    /// file would make the merge read one of them twice.
    pub fn duplicate_local_name(&self) -> Option<&str> {
        let mut seen = std::collections::HashSet::new();
        self.descriptors
            .iter()
            .map(|d| d.local_name.as_str())
            .find(|name| !seen.insert(*name))
    }
}
