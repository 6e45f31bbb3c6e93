//! Unit locators: resolving them against a document's base URL and deriving
//! local file names from them.

mod path;
mod sanitize;

pub use path::filename_from_url_path;
pub use sanitize::sanitize_filename_for_linux;

use url::Url;

/// Fallback name when the locator yields nothing usable.
const DEFAULT_FILENAME: &str = "unit.pdf";

/// Derives the local file name for a unit from its locator (last path segment,
/// sanitized for Linux).
///
/// - `derive_local_name("pdf/JP-AD-2-RJAA-en-JP.pdf")` → `"JP-AD-2-RJAA-en-JP.pdf"`
pub fn derive_local_name(locator: &str) -> String {
    let raw = match filename_from_url_path(locator) {
        Some(c) => c,
        None => return DEFAULT_FILENAME.to_string(),
    };
    let sanitized = sanitize_filename_for_linux(&raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}

/// Resolves `locator` (relative to the document) against `base`.
/// A locator that is already an absolute URL is returned as is.
pub fn resolve_locator(base: &str, locator: &str) -> Result<String, url::ParseError> {
    if let Ok(abs) = Url::parse(locator) {
        return Ok(abs.to_string());
    }
    let base = Url::parse(base)?;
    Ok(base.join(locator)?.to_string())
}
