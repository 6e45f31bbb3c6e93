//! TOML manifest listing a document and its airports.
//!
//! ```toml
//! country_code = "JP"
//! base_url = "https://aip.example/eAIP/2024-05-16/html/"
//! effective_date = "2024-05-16"
//! next_effective_date = "2024-06-13"
//!
//! [[airports]]
//! code = "RJAA"
//! title = "NARITA INTL"
//! index_page = "eAIP/JP-AD-2.RJAA-en-JP.html"
//!
//! [[airports.units]]
//! kind = "text"
//! locator = "pdf/JP-AD-2-RJAA-en-JP.pdf"
//!
//! [[airports.units]]
//! kind = "chart"
//! locator = "pdf/JP-AD-2.24.1-RJAA-en-JP.pdf"
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::AirportSource;
use crate::model::{ContentKind, DocumentInfo, UnitDescriptor, ValidityWindow};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestUnit {
    pub kind: ContentKind,
    pub locator: String,
    /// Overrides the name derived from the locator.
    #[serde(default)]
    pub local_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestAirport {
    pub code: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub index_page: Option<String>,
    #[serde(default)]
    pub units: Vec<ManifestUnit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestSource {
    pub country_code: String,
    pub base_url: String,
    pub effective_date: NaiveDate,
    pub next_effective_date: NaiveDate,
    #[serde(default)]
    pub airports: Vec<ManifestAirport>,
}

impl ManifestSource {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("read manifest {}", path.display()))?;
        Self::parse(&data).with_context(|| format!("parse manifest {}", path.display()))
    }

    pub fn parse(data: &str) -> Result<Self> {
        let manifest: ManifestSource = toml::from_str(data)?;
        if manifest.next_effective_date <= manifest.effective_date {
            bail!(
                "next_effective_date {} is not after effective_date {}",
                manifest.next_effective_date,
                manifest.effective_date
            );
        }
        if let Some(dup) = first_duplicate(manifest.airports.iter().map(|a| a.code.as_str())) {
            bail!("airport {} listed twice", dup);
        }
        for airport in &manifest.airports {
            let names: Vec<String> = Self::units_of(airport).map(|u| u.local_name).collect();
            if let Some(dup) = first_duplicate(names.iter().map(String::as_str)) {
                bail!("airport {}: two units share the local file name {}", airport.code, dup);
            }
        }
        Ok(manifest)
    }

    fn airport(&self, code: &str) -> Option<&ManifestAirport> {
        self.airports.iter().find(|a| a.code == code)
    }

    fn units_of(airport: &ManifestAirport) -> impl Iterator<Item = UnitDescriptor> + '_ {
        airport.units.iter().map(|u| {
            let unit = UnitDescriptor::new(&airport.code, u.kind, &u.locator);
            match &u.local_name {
                Some(name) => unit.with_local_name(name),
                None => unit,
            }
        })
    }
}

fn first_duplicate<'a>(codes: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = std::collections::HashSet::new();
    codes.into_iter().find(|c| !seen.insert(*c))
}

impl AirportSource for ManifestSource {
    fn document(&self) -> Result<DocumentInfo> {
        Ok(DocumentInfo {
            country_code: self.country_code.clone(),
            base_url: self.base_url.clone(),
            window: ValidityWindow::from_dates(self.effective_date, self.next_effective_date),
        })
    }

    fn airport_codes(&self) -> Result<Vec<String>> {
        Ok(self.airports.iter().map(|a| a.code.clone()).collect())
    }

    fn fetch_pdf_list(&self, airport_code: &str) -> Result<Vec<UnitDescriptor>> {
        let Some(airport) = self.airport(airport_code) else {
            bail!("airport {} not in manifest", airport_code);
        };
        Ok(Self::units_of(airport).collect())
    }

    fn fetch_index_page(&self, airport_code: &str) -> Option<String> {
        self.airport(airport_code)?.index_page.clone()
    }

    fn airport_title(&self, airport_code: &str) -> String {
        self.airport(airport_code)
            .and_then(|a| a.title.clone())
            .unwrap_or_else(|| airport_code.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::load_airports;

    const MANIFEST: &str = r#"
        country_code = "JP"
        base_url = "https://aip.example/eAIP/"
        effective_date = "2024-05-16"
        next_effective_date = "2024-06-13"

        [[airports]]
        code = "RJAA"
        title = "NARITA INTL"
        index_page = "html/RJAA.html"

        [[airports.units]]
        kind = "text"
        locator = "pdf/JP-AD-2-RJAA-en-JP.pdf"

        [[airports.units]]
        kind = "chart"
        locator = "pdf/RJAA-ADC.pdf"
        local_name = "adc.pdf"

        [[airports]]
        code = "RJTT"
    "#;

    #[test]
    fn parses_document_and_units() {
        let m = ManifestSource::parse(MANIFEST).unwrap();
        let doc = m.document().unwrap();
        assert_eq!(doc.country_code, "JP");
        assert_eq!(doc.window.effective_date(), NaiveDate::from_ymd_opt(2024, 5, 16).unwrap());

        let units = m.fetch_pdf_list("RJAA").unwrap();
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].content_kind, ContentKind::Text);
        assert_eq!(units[0].local_name, "JP-AD-2-RJAA-en-JP.pdf");
        assert_eq!(units[1].local_name, "adc.pdf");
        assert_eq!(m.fetch_index_page("RJAA").as_deref(), Some("html/RJAA.html"));
        assert_eq!(m.airport_title("RJTT"), "RJTT");
        assert!(m.fetch_pdf_list("RJBB").is_err());
    }

    #[test]
    fn load_airports_filters_codes() {
        let m = ManifestSource::parse(MANIFEST).unwrap();
        let all = load_airports(&m, &[]).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].title, "NARITA INTL");
        assert!(all[0].descriptors.iter().all(|d| d.owner_airport == "RJAA"));

        let only = load_airports(&m, &["rjtt".to_string()]).unwrap();
        assert_eq!(only.len(), 1);
        assert_eq!(only[0].code, "RJTT");
        assert!(only[0].descriptors.is_empty());
    }

    #[test]
    fn rejects_inverted_window_and_duplicates() {
        let inverted = MANIFEST.replace("2024-06-13", "2024-05-01");
        assert!(ManifestSource::parse(&inverted).is_err());
        let dup = MANIFEST.replace("code = \"RJTT\"", "code = \"RJAA\"");
        assert!(ManifestSource::parse(&dup).is_err());
    }

    #[test]
    fn rejects_units_sharing_a_local_file() {
        let clash = MANIFEST.replace("local_name = \"adc.pdf\"", "local_name = \"JP-AD-2-RJAA-en-JP.pdf\"");
        let err = ManifestSource::parse(&clash).unwrap_err();
        assert!(format!("{:#}", err).contains("JP-AD-2-RJAA-en-JP.pdf"));
    }
}
