//! Airport index page download (`<airport_dir>/<code>.html`).
//!
//! Uses the per-file freshness rule: an existing page whose size matches the
//! probed length and whose mtime lies inside the validity window is kept.

use crate::fetch::Fetcher;
use crate::freshness::{self, Decision};
use crate::model::{DocumentInfo, Layout};
use crate::retry::{run_with_retry, FetchError, RetryPolicy};
use crate::url_model;

/// Returns `Ok(true)` when the page was downloaded, `Ok(false)` when the
/// local copy was kept.
pub fn refresh_index_page(
    fetcher: &dyn Fetcher,
    document: &DocumentInfo,
    layout: &Layout,
    airport_code: &str,
    locator: &str,
    retry: &RetryPolicy,
) -> Result<bool, FetchError> {
    let url = url_model::resolve_locator(&document.base_url, locator).map_err(|e| {
        FetchError::InvalidUrl {
            url: locator.to_string(),
            reason: e.to_string(),
        }
    })?;
    let dest = layout.index_page_path(airport_code);

    let local = freshness::stat_file(&dest)?;
    let expected_len = match local {
        None => None,
        Some(_) => fetcher.probe(&url).ok().and_then(|p| p.content_length),
    };
    let decision = freshness::file_decision(local, expected_len, &document.window);
    let Decision::Fetch(reason) = decision else {
        tracing::debug!(airport = %airport_code, path = %dest.display(), "index page up to date");
        return Ok(false);
    };

    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let bytes = run_with_retry(retry, airport_code, &url, || {
        fetcher.fetch_to(&url, &dest, expected_len)
    })?;
    tracing::info!(airport = %airport_code, path = %dest.display(), bytes, %reason, "index page downloaded");
    Ok(true)
}
