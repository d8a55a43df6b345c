//! Fixed-window daily counters for trend charts.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

/// Number of days covered by a growth bucket.
pub const GROWTH_WINDOW_DAYS: u64 = 30;

/// Per-day counts over a fixed window ending on `today`.
///
/// Every day in the window starts at zero; dates outside the window are
/// ignored when recorded.
#[derive(Debug, Clone)]
pub struct StatBucket {
    counts: BTreeMap<NaiveDate, u64>,
}

impl StatBucket {
    /// Window of `days` days ending on (and including) `today`.
    pub fn ending_on(today: NaiveDate, days: u64) -> Self {
        let counts = (0..days)
            .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
            .map(|day| (day, 0))
            .collect();
        Self { counts }
    }

    /// Standard 30-day window.
    pub fn last_30_days(today: NaiveDate) -> Self {
        Self::ending_on(today, GROWTH_WINDOW_DAYS)
    }

    /// Count one occurrence on `day` if it falls inside the window.
    pub fn record(&mut self, day: NaiveDate) {
        if let Some(count) = self.counts.get_mut(&day) {
            *count += 1;
        }
    }

    /// ISO dates of the window, oldest first.
    pub fn labels(&self) -> Vec<String> {
        self.counts
            .keys()
            .map(|day| day.format("%Y-%m-%d").to_string())
            .collect()
    }

    /// Counts aligned with [`labels`](Self::labels).
    pub fn counts(&self) -> Vec<u64> {
        self.counts.values().copied().collect()
    }
}
