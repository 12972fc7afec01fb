use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::format::parse_iso_day;
use crate::error::{ChartError, ChartResult};

/// Minimum number of samples a chart can lay out (the x scale divides by `N - 1`).
pub const MIN_SERIES_LEN: usize = 2;

/// Window length used by [`TimeSeries::weekly_trend`].
pub const TREND_WINDOW_DAYS: usize = 7;

/// Daily counts, oldest first, index-aligned with their calendar days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTimeSeries")]
pub struct TimeSeries {
    values: Vec<u64>,
    days: Vec<NaiveDate>,
}

#[derive(Deserialize)]
struct RawTimeSeries {
    values: Vec<u64>,
    days: Vec<NaiveDate>,
}

impl TryFrom<RawTimeSeries> for TimeSeries {
    type Error = ChartError;

    fn try_from(raw: RawTimeSeries) -> ChartResult<Self> {
        Self::new(raw.values, raw.days)
    }
}

impl TimeSeries {
    /// Builds a series from aligned values and days.
    ///
    /// Rejects mismatched lengths, fewer than [`MIN_SERIES_LEN`] samples and
    /// days that are not strictly increasing.
    pub fn new(values: Vec<u64>, days: Vec<NaiveDate>) -> ChartResult<Self> {
        if values.len() != days.len() {
            return Err(ChartError::InvalidData(format!(
                "series has {} values but {} day labels",
                values.len(),
                days.len()
            )));
        }
        if values.len() < MIN_SERIES_LEN {
            return Err(ChartError::InvalidData(format!(
                "series needs at least {MIN_SERIES_LEN} samples, got {}",
                values.len()
            )));
        }
        if let Some(pair) = days.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(ChartError::InvalidData(format!(
                "series days must be strictly increasing: {} is followed by {}",
                pair[0], pair[1]
            )));
        }

        Ok(Self { values, days })
    }

    /// Builds a series from `YYYY-MM-DD` labels.
    pub fn from_iso_labels<S: AsRef<str>>(values: Vec<u64>, labels: &[S]) -> ChartResult<Self> {
        let days = labels
            .iter()
            .map(|label| parse_iso_day(label.as_ref()))
            .collect::<ChartResult<Vec<_>>>()?;
        Self::new(values, days)
    }

    /// Buckets event timestamps into per-day counts over the `day_count` days
    /// ending at `last_day` (inclusive). Events outside the window are ignored.
    pub fn from_daily_events(
        events: &[DateTime<Utc>],
        last_day: NaiveDate,
        day_count: usize,
    ) -> ChartResult<Self> {
        if day_count < MIN_SERIES_LEN {
            return Err(ChartError::InvalidData(format!(
                "daily window needs at least {MIN_SERIES_LEN} days, got {day_count}"
            )));
        }
        let first_day = last_day
            .checked_sub_days(Days::new(day_count as u64 - 1))
            .ok_or_else(|| {
                ChartError::InvalidData(format!(
                    "daily window of {day_count} days ending {last_day} underflows the calendar"
                ))
            })?;

        let days: Vec<NaiveDate> = first_day.iter_days().take(day_count).collect();
        let mut values = vec![0_u64; day_count];
        let mut ignored = 0_usize;
        for event in events {
            let day = event.date_naive();
            match day.signed_duration_since(first_day).num_days() {
                offset if offset >= 0 && (offset as usize) < day_count => {
                    values[offset as usize] += 1;
                }
                _ => ignored += 1,
            }
        }
        debug!(
            event_count = events.len(),
            ignored,
            day_count,
            %first_day,
            %last_day,
            "bucket daily events"
        );

        Self::new(values, days)
    }

    #[must_use]
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    #[must_use]
    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`: construction guarantees at least two samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn max_value(&self) -> u64 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.values.iter().sum()
    }

    /// Sum of the last [`TREND_WINDOW_DAYS`] samples against the window before it.
    ///
    /// Short series shrink the windows: the recent window keeps what is
    /// available and the prior window only covers samples older than it.
    #[must_use]
    pub fn weekly_trend(&self) -> WeeklyTrend {
        let len = self.values.len();
        let recent_start = len.saturating_sub(TREND_WINDOW_DAYS);
        let prior_start = len.saturating_sub(TREND_WINDOW_DAYS * 2);
        WeeklyTrend {
            recent: self.values[recent_start..].iter().sum(),
            prior: self.values[prior_start..recent_start].iter().sum(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

/// Week-over-week comparison shown next to a series total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyTrend {
    pub recent: u64,
    pub prior: u64,
}

impl WeeklyTrend {
    #[must_use]
    pub fn delta(self) -> i64 {
        self.recent as i64 - self.prior as i64
    }

    #[must_use]
    pub fn direction(self) -> TrendDirection {
        match self.recent.cmp(&self.prior) {
            std::cmp::Ordering::Greater => TrendDirection::Up,
            std::cmp::Ordering::Less => TrendDirection::Down,
            std::cmp::Ordering::Equal => TrendDirection::Flat,
        }
    }
}
