//! Time windows for dashboard statistics.

use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, Utc};

/// Lower bounds of the revenue windows, all relative to one `now`.
#[derive(Clone, Copy, Debug)]
pub struct StatsWindows {
    /// Midnight UTC of the current day
    pub today: NaiveDateTime,
    pub last_7_days: NaiveDateTime,
    pub last_30_days: NaiveDateTime,
}

impl StatsWindows {
    pub fn at(now: DateTime<Utc>) -> Self {
        let now = now.naive_utc();

        Self {
            today: now.date().and_time(NaiveTime::MIN),
            last_7_days: now - Duration::days(7),
            last_30_days: now - Duration::days(30),
        }
    }
}
