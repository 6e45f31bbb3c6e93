//! Discovery collaborator: where airports and their units come from.
//!
//! The pipeline only sees [`AirportSource`]. Site scrapers are separate
//! implementations; [`ManifestSource`] reads a hand-written TOML manifest.

mod manifest;

pub use manifest::{ManifestAirport, ManifestSource, ManifestUnit};

use anyhow::{bail, Result};

use crate::model::{Airport, DocumentInfo, UnitDescriptor};

pub trait AirportSource: Send + Sync {
    /// The document edition: country, base URL, validity window.
    fn document(&self) -> Result<DocumentInfo>;

    /// Codes of every airport the document publishes, in publication order.
    fn airport_codes(&self) -> Result<Vec<String>>;

    /// Units of one airport in discovery order, text unit first.
    fn fetch_pdf_list(&self, airport_code: &str) -> Result<Vec<UnitDescriptor>>;

    /// Locator of the airport's index page, if the site has one.
    fn fetch_index_page(&self, airport_code: &str) -> Option<String>;

    /// Display title of the airport. Defaults to the code.
    fn airport_title(&self, airport_code: &str) -> String {
        airport_code.to_string()
    }
}

/// Builds the full airport list from a source, optionally restricted to
/// `only` (codes compared case-insensitively).
pub fn load_airports(source: &dyn AirportSource, only: &[String]) -> Result<Vec<Airport>> {
    let mut airports = Vec::new();
    for code in source.airport_codes()? {
        if !only.is_empty() && !only.iter().any(|c| c.eq_ignore_ascii_case(&code)) {
            continue;
        }
        let mut airport = Airport::new(&code, &source.airport_title(&code));
        airport.index_locator = source.fetch_index_page(&code);
        for unit in source.fetch_pdf_list(&code)? {
            airport.push_unit(unit);
        }
        if let Some(name) = airport.duplicate_local_name() {
            bail!("{}: two units share the local file name {}", code, name);
        }
        tracing::debug!(airport = %code, units = airport.descriptors.len(), "airport loaded");
        airports.push(airport);
    }
    Ok(airports)
}
