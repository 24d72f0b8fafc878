//! timewise-core
//!
//! Date/time inference and normalization helpers for in-memory time-series data.
//!
//! - `timestamp`: the naive nanosecond scalar behind `Datetime(ns)` columns.
//! - `frame`: conversions between polars series and timestamps.
//! - `period`: calendar periods and the period containing an instant.
//! - `parse`: speculative string-to-date parsing.
//! - `timeseries`: flooring, week-of-month, and frequency inference.
//! - `detect`: datetime-like column detection on a data frame's first row.
//!
//! Columns are polars [`Series`] and tables are polars [`DataFrame`]s. Every
//! function is pure: inputs are borrowed, outputs are freshly built, and
//! element `i` of an output always corresponds to element `i` of the input.
#![warn(missing_docs)]

/// Datetime-like column detection.
pub mod detect;
/// Polars column conversions.
pub mod frame;
/// Speculative date/time parsing.
pub mod parse;
/// Calendar periods.
pub mod period;
/// Time-series utilities for flooring, calendars, and frequency inference.
pub mod timeseries;
pub mod timestamp;
pub mod types;

pub use detect::{
    DetectionRow, detect_timeseries_columns, get_timeseries_colname, has_timeseries_columns,
    is_datetime_string,
};
pub use frame::{datetime_series, timestamps};
pub use period::{Period, PeriodColumn};
pub use polars::prelude::{AnyValue, DataFrame, Series};
pub use timeseries::calendar::week_of_month;
pub use timeseries::floor::{Floored, floor_column, floor_date, floor_periods};
pub use timeseries::infer::{get_pandas_frequency, infer_freq, infer_series_frequency};
pub use timestamp::Timestamp;
pub use types::*;
