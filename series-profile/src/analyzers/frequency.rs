//! Sampling-frequency estimation.
//!
//! The guess is derived from the modal difference between consecutive
//! timestamps. When several differences are equally frequent the smallest one
//! wins, so the result only depends on the multiset of deltas.

use std::collections::HashMap;
use std::fmt;

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Coarse sampling-cadence category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FrequencyGuess {
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "1min")]
    OneMinute,
    #[serde(rename = "5min_or_less")]
    FiveMinutesOrLess,
    #[serde(rename = "hourly_or_less")]
    HourlyOrLess,
    #[serde(rename = "daily_or_less")]
    DailyOrLess,
    #[serde(rename = "weekly_or_less")]
    WeeklyOrLess,
    #[serde(rename = "low_freq")]
    LowFrequency,
}

impl FrequencyGuess {
    /// The label written to reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::OneMinute => "1min",
            Self::FiveMinutesOrLess => "5min_or_less",
            Self::HourlyOrLess => "hourly_or_less",
            Self::DailyOrLess => "daily_or_less",
            Self::WeeklyOrLess => "weekly_or_less",
            Self::LowFrequency => "low_freq",
        }
    }

    /// Classifies a single delta into the first matching bucket.
    pub fn from_delta(delta: TimeDelta) -> Self {
        if delta <= TimeDelta::minutes(1) {
            Self::OneMinute
        } else if delta <= TimeDelta::minutes(5) {
            Self::FiveMinutesOrLess
        } else if delta <= TimeDelta::hours(1) {
            Self::HourlyOrLess
        } else if delta <= TimeDelta::days(1) {
            Self::DailyOrLess
        } else if delta <= TimeDelta::days(7) {
            Self::WeeklyOrLess
        } else {
            Self::LowFrequency
        }
    }
}

impl fmt::Display for FrequencyGuess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Most frequent difference between consecutive timestamps.
///
/// Ties resolve to the smallest delta. Returns `None` for fewer than two
/// timestamps.
pub fn modal_delta(index: &[NaiveDateTime]) -> Option<TimeDelta> {
    let mut counts: HashMap<TimeDelta, usize> = HashMap::new();
    for pair in index.windows(2) {
        *counts.entry(pair[1] - pair[0]).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by(|(da, ca), (db, cb)| ca.cmp(cb).then_with(|| db.cmp(da)))
        .map(|(delta, _)| delta)
}

/// Guesses the sampling frequency of a sorted index.
pub fn estimate_frequency(index: &[NaiveDateTime]) -> FrequencyGuess {
    if index.len() < 3 {
        return FrequencyGuess::Unknown;
    }
    let Some(delta) = modal_delta(index) else {
        return FrequencyGuess::Unknown;
    };
    let guess = FrequencyGuess::from_delta(delta);
    debug!(modal_delta_secs = delta.num_seconds(), guess = %guess, "Estimated frequency");
    guess
}
