//! libcurl-backed `Fetcher`.

use std::path::Path;
use std::str;
use std::time::Duration;

use crate::config::HttpConfig;
use crate::retry::FetchError;
use crate::storage::TempFile;

use super::parse::parse_headers;
use super::{Fetcher, Probe};

/// Abort a transfer slower than 1 KiB/s for this long.
const LOW_SPEED_TIME: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    http: HttpConfig,
}

impl CurlFetcher {
    pub fn new(http: HttpConfig) -> Self {
        Self { http }
    }

    fn easy(&self, url: &str) -> Result<curl::easy::Easy, FetchError> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(Duration::from_secs(self.http.connect_timeout_secs))?;
        easy.low_speed_limit(1024)?;
        easy.low_speed_time(LOW_SPEED_TIME)?;
        easy.timeout(Duration::from_secs(self.http.timeout_secs))?;
        if let Some(ua) = &self.http.user_agent {
            easy.useragent(ua)?;
        }
        if let Some(cookies) = &self.http.cookie_file {
            easy.cookie_file(cookies)?;
        }
        Ok(easy)
    }
}

fn check_status(easy: &mut curl::easy::Easy) -> Result<(), FetchError> {
    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }
    Ok(())
}

impl Fetcher for CurlFetcher {
    fn probe(&self, url: &str) -> Result<Probe, FetchError> {
        let mut headers: Vec<String> = Vec::new();
        let mut easy = self.easy(url)?;
        easy.nobody(true)?;
        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    headers.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.perform()?;
        }
        check_status(&mut easy)?;
        Ok(parse_headers(&headers))
    }

    fn fetch_to(
        &self,
        url: &str,
        dest: &Path,
        expected_len: Option<u64>,
    ) -> Result<u64, FetchError> {
        let mut file = TempFile::create(dest)?;
        if let Some(len) = expected_len {
            if let Err(e) = file.preallocate(len) {
                file.discard();
                return Err(FetchError::Storage(e));
            }
        }

        let mut easy = match self.easy(url) {
            Ok(e) => e,
            Err(e) => {
                file.discard();
                return Err(e);
            }
        };

        let mut storage_error: Option<std::io::Error> = None;
        let performed = {
            let mut transfer = easy.transfer();
            let registered = transfer.write_function(|data| match file.append(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    storage_error = Some(e);
                    Ok(0) // abort transfer
                }
            });
            match registered {
                Ok(()) => transfer.perform(),
                Err(e) => Err(e),
            }
        };

        let outcome = match performed {
            Err(e) if e.is_write_error() => Err(storage_error
                .take()
                .map(FetchError::Storage)
                .unwrap_or(FetchError::Curl(e))),
            Err(e) => Err(FetchError::Curl(e)),
            Ok(()) => check_status(&mut easy),
        };
        if let Err(e) = outcome {
            file.discard();
            return Err(e);
        }

        let received = file.written();
        if let Some(expected) = expected_len {
            if received != expected {
                file.discard();
                return Err(FetchError::PartialTransfer { expected, received });
            }
        }
        file.finalize()?;
        Ok(received)
    }
}
