//! Naive nanosecond timestamps.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::TimewiseError;

/// A naive point in time stored as nanoseconds since 1970-01-01 00:00:00.
///
/// This is the physical value of a `Datetime(Nanoseconds, None)` column. The
/// representable range is roughly 1677-09-21 through 2262-04-11; conversions
/// from wider `chrono` values are therefore fallible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Earliest representable timestamp.
    pub const MIN: Self = Self(i64::MIN);
    /// Latest representable timestamp.
    pub const MAX: Self = Self(i64::MAX);

    /// Wrap a raw nanosecond count.
    #[must_use]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    /// Raw nanoseconds since the epoch.
    #[must_use]
    pub const fn nanos(self) -> i64 {
        self.0
    }

    /// Convert from a `chrono` date-time; `None` when outside the nanosecond range.
    #[must_use]
    pub fn from_naive(dt: NaiveDateTime) -> Option<Self> {
        dt.and_utc().timestamp_nanos_opt().map(Self)
    }

    /// Midnight of the given calendar date.
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        Self::from_naive(NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?)
    }

    /// The given calendar date and wall-clock time.
    #[must_use]
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Option<Self> {
        Self::from_naive(
            NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?,
        )
    }

    /// Convert to a `chrono` date-time. Every timestamp is representable.
    #[must_use]
    pub fn to_naive(self) -> NaiveDateTime {
        DateTime::from_timestamp_nanos(self.0).naive_utc()
    }
}

impl TryFrom<NaiveDateTime> for Timestamp {
    type Error = TimewiseError;

    fn try_from(dt: NaiveDateTime) -> Result<Self, Self::Error> {
        Self::from_naive(dt)
            .ok_or_else(|| TimewiseError::InvalidArg(format!("{dt} is outside the timestamp range")))
    }
}


impl From<Timestamp> for NaiveDateTime {
    fn from(ts: Timestamp) -> Self {
        ts.to_naive()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_naive().format("%Y-%m-%d %H:%M:%S%.f"))
    }
}
