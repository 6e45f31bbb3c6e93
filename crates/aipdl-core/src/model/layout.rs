use std::path::{Path, PathBuf};

use super::ValidityWindow;

/// The published document an airport set belongs to (one AIP edition).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    /// Directory name for the country, e.g. `JP`.
    pub country_code: String,
    /// Base URL unit locators are relative to.
    pub base_url: String,
    pub window: ValidityWindow,
}

/// On-disk layout of one document:
///
/// ```text
/// <root>/<country>/<YYYYMMDD>/<airport>/<unit files>
/// <root>/<country>/<YYYYMMDD>/<merge_dir>/<airport>_full.pdf
/// <root>/<country>/<YYYYMMDD>/<merge_dir>/<airport>_chart.pdf
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
    country_code: String,
    date_dir: String,
    merge_dir: String,
}

impl Layout {
    pub fn new(root: &Path, document: &DocumentInfo, merge_dir: &str) -> Self {
        Self {
            root: root.to_path_buf(),
            country_code: document.country_code.clone(),
            date_dir: document.window.effective_date().format("%Y%m%d").to_string(),
            merge_dir: merge_dir.to_string(),
        }
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// `<root>/<country>/<YYYYMMDD>`
    pub fn document_dir(&self) -> PathBuf {
        self.root.join(&self.country_code).join(&self.date_dir)
    }

    /// `<root>/<country>/<YYYYMMDD>/<airport>`
    pub fn airport_dir(&self, airport_code: &str) -> PathBuf {
        self.document_dir().join(airport_code)
    }

    pub fn unit_path(&self, airport_code: &str, local_name: &str) -> PathBuf {
        self.airport_dir(airport_code).join(local_name)
    }

    /// `<root>/<country>/<YYYYMMDD>/<airport>/<airport>.html`
    pub fn index_page_path(&self, airport_code: &str) -> PathBuf {
        self.airport_dir(airport_code)
            .join(format!("{}.html", airport_code))
    }

    pub fn merge_output_dir(&self) -> PathBuf {
        self.document_dir().join(&self.merge_dir)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.merge_output_dir().join("summary.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn document() -> DocumentInfo {
        DocumentInfo {
            country_code: "JP".to_string(),
            base_url: "https://aip.example/eAIP/".to_string(),
            window: ValidityWindow::from_dates(
                NaiveDate::from_ymd_opt(2024, 5, 16).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, 13).unwrap(),
            ),
        }
    }

    #[test]
    fn directory_layout() {
        let layout = Layout::new(Path::new("/data/aip"), &document(), "merged");
        assert_eq!(layout.document_dir(), PathBuf::from("/data/aip/JP/20240516"));
        assert_eq!(
            layout.unit_path("RJAA", "a.pdf"),
            PathBuf::from("/data/aip/JP/20240516/RJAA/a.pdf")
        );
        assert_eq!(
            layout.index_page_path("RJAA"),
            PathBuf::from("/data/aip/JP/20240516/RJAA/RJAA.html")
        );
        assert_eq!(
            layout.merge_output_dir(),
            PathBuf::from("/data/aip/JP/20240516/merged")
        );
    }
}
