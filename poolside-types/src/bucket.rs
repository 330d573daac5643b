use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PoolsideError;

const DAY: i64 = 86_400;

/// Fixed sampling interval of a candle feed.
///
/// Defines the regular time grid candles are bucketed on. Weekly buckets start
/// on Monday 00:00 UTC; monthly data is approximated by 30-day buckets as the
/// upstream datasets do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeBucket {
    /// One minute.
    #[serde(rename = "1m")]
    M1,
    /// Five minutes.
    #[serde(rename = "5m")]
    M5,
    /// Fifteen minutes.
    #[serde(rename = "15m")]
    M15,
    /// One hour.
    #[serde(rename = "1h")]
    H1,
    /// Four hours.
    #[serde(rename = "4h")]
    H4,
    /// One day.
    #[serde(rename = "1d")]
    D1,
    /// One week, Monday aligned.
    #[serde(rename = "7d")]
    D7,
    /// Thirty days.
    #[serde(rename = "30d")]
    D30,
}

impl TimeBucket {
    /// Bucket length in seconds.
    #[must_use]
    pub const fn seconds(self) -> i64 {
        match self {
            Self::M1 => 60,
            Self::M5 => 5 * 60,
            Self::M15 => 15 * 60,
            Self::H1 => 3_600,
            Self::H4 => 4 * 3_600,
            Self::D1 => DAY,
            Self::D7 => 7 * DAY,
            Self::D30 => 30 * DAY,
        }
    }

    /// Bucket length as a `TimeDelta`.
    #[must_use]
    pub fn duration(self) -> TimeDelta {
        TimeDelta::seconds(self.seconds())
    }

    /// Canonical string token, matching the serde representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::M1 => "1m",
            Self::M5 => "5m",
            Self::M15 => "15m",
            Self::H1 => "1h",
            Self::H4 => "4h",
            Self::D1 => "1d",
            Self::D7 => "7d",
            Self::D30 => "30d",
        }
    }

    /// Align a timestamp down to the start of its bucket.
    ///
    /// Sub-second precision is dropped. Weekly buckets floor to Monday 00:00
    /// UTC (the Unix epoch fell on a Thursday, hence the 3-day correction).
    ///
    /// ```
    /// use chrono::DateTime;
    /// use poolside_types::TimeBucket;
    ///
    /// // 2020-01-02 13:30:00 UTC, a Thursday
    /// let ts = DateTime::from_timestamp(1_577_971_800, 0).unwrap();
    /// assert_eq!(
    ///     TimeBucket::D1.floor(ts),
    ///     DateTime::from_timestamp(1_577_923_200, 0).unwrap(), // same day 00:00
    /// );
    /// assert_eq!(
    ///     TimeBucket::D7.floor(ts),
    ///     DateTime::from_timestamp(1_577_664_000, 0).unwrap(), // Monday 2019-12-30
    /// );
    /// ```
    #[must_use]
    pub fn floor(self, ts: DateTime<Utc>) -> DateTime<Utc> {
        let secs = ts.timestamp();
        let floored = match self {
            Self::D7 => {
                let day = secs.div_euclid(DAY);
                let week_start = day - (day + 3).rem_euclid(7);
                week_start * DAY
            }
            _ => secs - secs.rem_euclid(self.seconds()),
        };
        DateTime::from_timestamp(floored, 0).unwrap_or(ts)
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeBucket {
    type Err = PoolsideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1m" => Ok(Self::M1),
            "5m" => Ok(Self::M5),
            "15m" => Ok(Self::M15),
            "1h" => Ok(Self::H1),
            "4h" => Ok(Self::H4),
            "1d" => Ok(Self::D1),
            "7d" => Ok(Self::D7),
            "30d" => Ok(Self::D30),
            other => Err(PoolsideError::InvalidArg(format!(
                "unknown time bucket: {other}"
            ))),
        }
    }
}
