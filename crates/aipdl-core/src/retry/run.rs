//! In-place retry of one remote fetch for an airport.

use super::classify;
use super::error::FetchError;
use super::policy::{RetryDecision, RetryPolicy};

/// Calls `fetch` until it succeeds or `policy` gives up, sleeping for the
/// backoff between attempts. `airport` and `url` only label the log lines.
pub fn run_with_retry<T, F>(
    policy: &RetryPolicy,
    airport: &str,
    url: &str,
    mut fetch: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Result<T, FetchError>,
{
    let mut attempt = 1u32;
    loop {
        let err = match fetch() {
            Ok(v) => {
                if attempt > 1 {
                    tracing::info!(airport, url, attempt, "fetch succeeded after retry");
                }
                return Ok(v);
            }
            Err(e) => e,
        };
        match policy.decide(attempt, classify::classify(&err)) {
            RetryDecision::RetryAfter(d) => {
                tracing::debug!(
                    airport,
                    url,
                    attempt,
                    error = %err,
                    delay_ms = d.as_millis() as u64,
                    "retrying fetch"
                );
                std::thread::sleep(d);
                attempt += 1;
            }
            RetryDecision::NoRetry if attempt > 1 => {
                tracing::warn!(airport, url, attempts = attempt, error = %err, "giving up on fetch");
                return Err(err);
            }
            RetryDecision::NoRetry => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        }
    }

    const URL: &str = "https://aip.example/pdf/RJAA-ADC.pdf";

    #[test]
    fn throttled_fetch_is_retried_until_success() {
        let mut calls = 0;
        let res = run_with_retry(&fast_policy(3), "RJAA", URL, || {
            calls += 1;
            if calls < 3 {
                Err(FetchError::Http(503))
            } else {
                Ok(42u64)
            }
        });
        assert_eq!(res.unwrap(), 42);
        assert_eq!(calls, 3);
    }

    #[test]
    fn missing_unit_is_not_retried() {
        let mut calls = 0;
        let res: Result<(), _> = run_with_retry(&fast_policy(5), "RJAA", URL, || {
            calls += 1;
            Err(FetchError::Http(404))
        });
        assert!(matches!(res, Err(FetchError::Http(404))));
        assert_eq!(calls, 1);
    }

    #[test]
    fn last_error_is_returned_once_attempts_run_out() {
        let mut calls = 0;
        let res: Result<(), _> = run_with_retry(&fast_policy(2), "RJAA", URL, || {
            calls += 1;
            Err(FetchError::Http(500 + calls))
        });
        assert!(matches!(res, Err(FetchError::Http(502))));
        assert_eq!(calls, 2);
    }
}
