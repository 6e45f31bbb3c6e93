//! Parse HTTP response header lines into a Probe.

use super::Probe;

/// Parse collected header lines. With redirects, libcurl reports one header
/// block per response; only the last block counts.
pub(crate) fn parse_headers(lines: &[String]) -> Probe {
    let mut probe = Probe::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            probe = Probe::default();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                probe.content_length = value.parse::<u64>().ok();
            }
        }
    }

    probe
}
