//! Per-airport download progress (units ready out of units known).

/// Snapshot of how many of an airport's units are present locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AirportProgress {
    /// Units fetched this cycle plus units kept from a fresh local copy.
    pub downloaded: usize,
    /// Units the airport declares.
    pub total: usize,
}

impl AirportProgress {
    pub fn is_complete(&self) -> bool {
        self.downloaded >= self.total
    }
}

impl std::fmt::Display for AirportProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.downloaded, self.total)
    }
}
