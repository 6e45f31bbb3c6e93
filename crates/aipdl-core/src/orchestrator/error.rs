use std::path::PathBuf;

use thiserror::Error;

/// Why an airport ended without merged artifacts. Only that airport fails;
/// the rest of the batch carries on.
#[derive(Debug, Error)]
pub enum AirportError {
    /// Every allowed cycle ran and the last one still did not merge.
    #[error("{airport}: gave up after {attempts} attempt(s): {last_failure}")]
    AttemptsExhausted {
        airport: String,
        attempts: u32,
        last_failure: String,
    },
    /// Stat of the airport directory or a unit file failed for a reason
    /// other than the path not existing.
    #[error("{airport}: cannot stat {path}: {source}")]
    Freshness {
        airport: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Two units map to the same local file.
    #[error("{airport}: two units share the local file name {name}")]
    DuplicateLocalName { airport: String, name: String },
    #[error("{airport}: cancelled")]
    Cancelled { airport: String },
    /// The orchestrator thread panicked.
    #[error("{airport}: orchestrator panicked: {message}")]
    Panicked { airport: String, message: String },
}

impl AirportError {
    pub fn airport(&self) -> &str {
        match self {
            AirportError::AttemptsExhausted { airport, .. }
            | AirportError::Freshness { airport, .. }
            | AirportError::DuplicateLocalName { airport, .. }
            | AirportError::Cancelled { airport }
            | AirportError::Panicked { airport, .. } => airport,
        }
    }
}
