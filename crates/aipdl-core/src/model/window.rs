use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Period during which a previously fetched local copy is trusted:
/// `[effective, next_effective)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityWindow {
    pub effective: DateTime<Utc>,
    pub next_effective: DateTime<Utc>,
}

impl ValidityWindow {
    pub fn new(effective: DateTime<Utc>, next_effective: DateTime<Utc>) -> Self {
        Self {
            effective,
            next_effective,
        }
    }

    /// Window from two calendar dates, each starting at 00:00 UTC.
    pub fn from_dates(effective: NaiveDate, next_effective: NaiveDate) -> Self {
        Self::new(start_of_day(effective), start_of_day(next_effective))
    }

    pub fn effective_date(&self) -> NaiveDate {
        self.effective.date_naive()
    }

    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        t >= self.effective && t < self.next_effective
    }

    pub fn contains_system_time(&self, t: SystemTime) -> bool {
        self.contains(DateTime::<Utc>::from(t))
    }

    /// True when `t` is earlier than the effective date (an older edition).
    pub fn predates(&self, t: SystemTime) -> bool {
        DateTime::<Utc>::from(t) < self.effective
    }
}

fn start_of_day(d: NaiveDate) -> DateTime<Utc> {
    d.and_time(NaiveTime::MIN).and_utc()
}
