use serde::{Deserialize, Serialize};

use crate::url_model;

/// What a unit holds. Governs merge order and the chart-only artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// The airport's text section (the cover of the full artifact).
    Text,
    Chart,
}

/// One downloadable asset of an airport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitDescriptor {
    /// Remote address, relative to the document's base URL (or absolute).
    pub source_locator: String,
    /// File name inside the airport directory.
    pub local_name: String,
    pub content_kind: ContentKind,
    /// Code of the owning airport. Set before the unit is dispatched.
    pub owner_airport: String,
    /// Written only by the airport's orchestrator, from the outcome the
    /// worker reports for this unit.
    pub fetch_succeeded: bool,
}

impl UnitDescriptor {
    pub fn new(owner_airport: &str, content_kind: ContentKind, source_locator: &str) -> Self {
        Self {
            source_locator: source_locator.to_string(),
            local_name: url_model::derive_local_name(source_locator),
            content_kind,
            owner_airport: owner_airport.to_string(),
            fetch_succeeded: false,
        }
    }

    pub fn text(owner_airport: &str, source_locator: &str) -> Self {
        Self::new(owner_airport, ContentKind::Text, source_locator)
    }

    pub fn chart(owner_airport: &str, source_locator: &str) -> Self {
        Self::new(owner_airport, ContentKind::Chart, source_locator)
    }

    pub fn with_local_name(mut self, local_name: &str) -> Self {
        self.local_name = url_model::sanitize_filename_for_linux(local_name);
        self
    }

    pub fn is_chart(&self) -> bool {
        self.content_kind == ContentKind::Chart
    }
}
