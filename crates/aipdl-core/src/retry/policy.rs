use std::time::Duration;

/// What a failed fetch means for retrying it in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connect or transfer timeout.
    Timeout,
    /// 429 or 503 from the AIP host.
    Throttled,
    /// Reset, DNS failure or a body shorter than announced.
    Connection,
    /// Any other 5xx.
    Http5xx(u16),
    /// 4xx, local storage errors, cancellation. Never retried.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    NoRetry,
    RetryAfter(Duration),
}

/// Per-fetch backoff. Independent of the airport's forced re-fetch cycle.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Tries per fetch, the first one included.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// One try per fetch.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// `base_delay * 2^(step-1)`, capped at `max_delay`. `step` is 1-based.
    pub fn backoff(&self, step: u32) -> Duration {
        let exp = 1u32 << step.saturating_sub(1).min(8);
        self.base_delay.saturating_mul(exp).min(self.max_delay)
    }

    /// Whether and how long to wait before try `attempt + 1`.
    ///
    /// A throttling host is given one extra backoff step.
    pub fn decide(&self, attempt: u32, kind: ErrorKind) -> RetryDecision {
        if attempt >= self.max_attempts {
            return RetryDecision::NoRetry;
        }
        match kind {
            ErrorKind::Other => RetryDecision::NoRetry,
            ErrorKind::Throttled => RetryDecision::RetryAfter(self.backoff(attempt + 1)),
            ErrorKind::Timeout | ErrorKind::Connection | ErrorKind::Http5xx(_) => {
                RetryDecision::RetryAfter(self.backoff(attempt))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(1),
        }
    }

    #[test]
    fn client_errors_are_final() {
        assert_eq!(policy(5).decide(1, ErrorKind::Other), RetryDecision::NoRetry);
    }

    #[test]
    fn backoff_doubles_up_to_the_cap() {
        let p = policy(20);
        assert_eq!(p.backoff(1), Duration::from_millis(100));
        assert_eq!(p.backoff(2), Duration::from_millis(200));
        assert_eq!(p.backoff(3), Duration::from_millis(400));
        assert_eq!(p.backoff(12), p.max_delay);
    }

    #[test]
    fn throttling_waits_one_step_longer() {
        let p = policy(5);
        assert_eq!(
            p.decide(1, ErrorKind::Timeout),
            RetryDecision::RetryAfter(Duration::from_millis(100))
        );
        assert_eq!(
            p.decide(1, ErrorKind::Throttled),
            RetryDecision::RetryAfter(Duration::from_millis(200))
        );
    }

    #[test]
    fn stops_at_max_attempts() {
        let p = policy(3);
        assert!(matches!(p.decide(2, ErrorKind::Http5xx(502)), RetryDecision::RetryAfter(_)));
        assert_eq!(p.decide(3, ErrorKind::Http5xx(502)), RetryDecision::NoRetry);
        assert_eq!(RetryPolicy::none().decide(1, ErrorKind::Timeout), RetryDecision::NoRetry);
    }
}
