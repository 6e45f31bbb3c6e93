//! Linux-safe file names for fetched units.

const NAME_MAX: usize = 255;

/// Replaces NUL, path separators, whitespace and control characters with `_`
/// (runs collapsed), trims leading/trailing dots and underscores, and caps the
/// result at 255 bytes on a char boundary.
pub fn sanitize_filename_for_linux(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let bad = c == '\0' || c == '/' || c == '\\' || c.is_control() || c.is_whitespace();
        if bad {
            if !out.ends_with('_') {
                out.push('_');
            }
        } else {
            out.push(c);
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    let mut end = trimmed.len().min(NAME_MAX);
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    trimmed[..end].to_string()
}
