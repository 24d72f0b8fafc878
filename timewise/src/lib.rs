//! Timewise normalizes the dates of in-memory time series.
//!
//! Overview
//! - Floors timestamps to the start of a calendar period (day, week, month,
//!   quarter, year, business day, or a sub-daily unit).
//! - Computes the week of the month for every date of a series.
//! - Infers the sampling frequency of a series as a compact code (`"D"`, `"B"`,
//!   `"ME"`, `"W-SUN"`, `"15min"`, ...), optionally mapping business-calendar
//!   codes to their plain-calendar counterparts.
//! - Detects which columns of a data frame hold date-like values.
//!
//! Series and data frames are polars [`Series`] and [`DataFrame`] values.
//!
//! Key behaviors and trade-offs
//! - Flooring: when a period start falls outside the nanosecond timestamp range
//!   the result degrades to period labels instead of failing; inspect
//!   [`Floored::is_fallback`] if the distinction matters.
//! - Frequency inference: only the leading `sample_size` values are examined,
//!   which keeps the call cheap but ignores irregularities further in.
//! - Detection: only the first row is read, so a header-like first value hides
//!   an otherwise date-filled column.
//!
//! Examples
//! ```rust
//! use timewise::{PeriodUnit, Timestamp, Timewise, ops::datetime_series};
//!
//! let tw = Timewise::builder()
//!     .floor_unit(PeriodUnit::Month)
//!     .force_regular(true)
//!     .build()?;
//!
//! // Two working weeks, Monday 2020-01-06 through Friday 2020-01-17.
//! let days = [6, 7, 8, 9, 10, 13, 14, 15, 16, 17].map(|d| Timestamp::from_ymd(2020, 1, d));
//! let series = datetime_series("date", days);
//!
//! assert_eq!(tw.pandas_frequency(&series)?, "D");
//! let floored = tw.floor_date(&series)?.into_series();
//! assert_eq!(floored.len(), series.len());
//! # Ok::<(), timewise::TimewiseError>(())
//! ```
//!
//! See `timewise/examples/` for a runnable end-to-end demonstration.
#![warn(missing_docs)]

pub(crate) mod core;

pub use core::{Timewise, TimewiseBuilder};

// Re-export core types for convenience
pub use timewise_core::{
    Anchor,
    AnyValue,
    BUSINESS_TO_CALENDAR,
    DEFAULT_FREQUENCY_SAMPLE,
    DataFrame,
    DetectConfig,
    DetectionRow,
    Floored,
    Frequency,
    FrequencyConfig,
    MIN_FREQUENCY_SAMPLE,
    Period,
    PeriodColumn,
    PeriodUnit,
    Rule,
    Series,
    Timestamp,
    TimewiseConfig,
    TimewiseError,
};

/// Free functions for callers that do not need a configured [`Timewise`].
pub mod ops {
    pub use timewise_core::{
        datetime_series, detect_timeseries_columns, floor_column, floor_date, floor_periods,
        get_pandas_frequency, get_timeseries_colname, has_timeseries_columns, infer_freq,
        infer_series_frequency, is_datetime_string, timestamps, week_of_month,
    };
}
