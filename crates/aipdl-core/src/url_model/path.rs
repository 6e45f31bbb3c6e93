//! File name extraction from a locator's path.

/// Returns the last path segment of an absolute URL or a relative locator,
/// without query or fragment. `None` when the path ends in `/` (a directory)
/// or the segment is empty, `.` or `..`.
pub fn filename_from_url_path(locator: &str) -> Option<String> {
    let path = match url::Url::parse(locator) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => locator
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };
    let segment = path.rsplit('/').next()?;
    if segment.is_empty() || segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}
