//! In-memory `Fetcher` with failure injection.
//!
//! Bodies are keyed by the last path segment of the URL.

use aipdl_core::fetch::{Fetcher, Probe};
use aipdl_core::retry::FetchError;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct StubFetcher {
    bodies: Mutex<HashMap<String, Vec<u8>>>,
    /// Remaining fetches of a name that fail with HTTP 404 (usize::MAX = always).
    fail: Mutex<HashMap<String, usize>>,
    /// Remaining fetches of a name that deliver garbage instead of a PDF.
    corrupt: Mutex<HashMap<String, usize>>,
    fetches: Mutex<HashMap<String, usize>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    delay: Duration,
}

fn name_of(url: &str) -> String {
    url.rsplit('/').next().unwrap_or(url).to_string()
}

fn take(map: &Mutex<HashMap<String, usize>>, name: &str) -> bool {
    let mut map = map.lock().unwrap();
    match map.get_mut(name) {
        Some(0) | None => false,
        Some(n) => {
            if *n != usize::MAX {
                *n -= 1;
            }
            true
        }
    }
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn serve(&self, name: &str, body: Vec<u8>) {
        self.bodies.lock().unwrap().insert(name.to_string(), body);
    }

    pub fn fail_times(&self, name: &str, times: usize) {
        self.fail.lock().unwrap().insert(name.to_string(), times);
    }

    pub fn corrupt_times(&self, name: &str, times: usize) {
        self.corrupt.lock().unwrap().insert(name.to_string(), times);
    }

    pub fn fetch_count(&self, name: &str) -> usize {
        self.fetches.lock().unwrap().get(name).copied().unwrap_or(0)
    }

    pub fn total_fetches(&self) -> usize {
        self.fetches.lock().unwrap().values().sum()
    }

    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl Fetcher for StubFetcher {
    fn probe(&self, url: &str) -> Result<Probe, FetchError> {
        let name = name_of(url);
        match self.bodies.lock().unwrap().get(&name) {
            Some(body) => Ok(Probe {
                content_length: Some(body.len() as u64),
            }),
            None => Err(FetchError::Http(404)),
        }
    }

    fn fetch_to(&self, url: &str, dest: &Path, _expected_len: Option<u64>) -> Result<u64, FetchError> {
        let name = name_of(url);
        *self.fetches.lock().unwrap().entry(name.clone()).or_insert(0) += 1;

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if take(&self.fail, &name) {
            return Err(FetchError::Http(404));
        }
        let body = if take(&self.corrupt, &name) {
            b"this is not a pdf".to_vec()
        } else {
            match self.bodies.lock().unwrap().get(&name) {
                Some(b) => b.clone(),
                None => return Err(FetchError::Http(404)),
            }
        };
        std::fs::write(dest, &body)?;
        Ok(body.len() as u64)
    }
}
