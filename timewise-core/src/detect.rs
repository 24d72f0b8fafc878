//! Datetime-like column detection over the first row of a data frame.

use std::fmt;

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::frame::frame_err;
use crate::parse::parse_datetime;
use crate::{DetectConfig, TimewiseError};

/// True when `value` looks like a date or time.
///
/// Temporal values always qualify; strings qualify when [`parse_datetime`]
/// accepts them, which includes period labels such as `1677` or `2020Q1`.
/// Nulls, booleans, and numbers never do.
#[must_use]
pub fn is_datetime_string(value: &AnyValue<'_>) -> bool {
    match value {
        AnyValue::Date(_)
        | AnyValue::Datetime(..)
        | AnyValue::DatetimeOwned(..)
        | AnyValue::Time(_) => true,
        AnyValue::String(s) => parse_datetime(s).is_some(),
        AnyValue::StringOwned(s) => parse_datetime(s.as_str()).is_some(),
        _ => false,
    }
}

/// One boolean per column, in column order: does the sampled value look like a date?
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DetectionRow {
    entries: Vec<(String, bool)>,
}

impl DetectionRow {
    /// `(column name, is datetime-like)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(n, b)| (n.as_str(), *b))
    }

    /// Result for a single column.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<bool> {
        self.iter().find(|(n, _)| *n == name).map(|(_, b)| b)
    }

    /// The flags alone, in column order.
    #[must_use]
    pub fn flags(&self) -> Vec<bool> {
        self.entries.iter().map(|(_, b)| *b).collect()
    }

    /// True if any column was detected.
    #[must_use]
    pub fn any(&self) -> bool {
        self.entries.iter().any(|(_, b)| *b)
    }

    /// Name of the first detected column.
    #[must_use]
    pub fn first_match(&self) -> Option<&str> {
        self.iter().find(|(_, b)| *b).map(|(n, _)| n)
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the frame had no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The row as a one-row frame of boolean columns.
    ///
    /// # Errors
    /// Returns `Frame` if column names repeat.
    pub fn to_frame(&self) -> Result<DataFrame, TimewiseError> {
        let columns = self
            .entries
            .iter()
            .map(|(name, flag)| Series::new(name.as_str().into(), [*flag]).into_column())
            .collect();
        DataFrame::new(columns).map_err(frame_err)
    }
}

impl fmt::Display for DetectionRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths: Vec<usize> = self.entries.iter().map(|(n, _)| n.len().max(5)).collect();
        for ((name, _), w) in self.entries.iter().zip(widths.iter().copied()) {
            write!(f, "{name:>w$} ")?;
        }
        writeln!(f)?;
        for ((_, flag), w) in self.entries.iter().zip(widths.iter().copied()) {
            let flag = if *flag { "True" } else { "False" };
            write!(f, "{flag:>w$} ")?;
        }
        Ok(())
    }
}

/// Read the first row of `frame` and flag the columns whose value looks like a date.
///
/// Parse failures are ordinary negative results. A frame without rows yields
/// `false` for every column.
///
/// ```
/// use polars::prelude::*;
/// use timewise_core::{detect_timeseries_columns, DetectConfig};
///
/// let frame = df!(
///     "date" => ["2020-01-01"],
///     "word" => ["hello"],
///     "n" => [42_i64],
/// ).unwrap();
/// let row = detect_timeseries_columns(&frame, &DetectConfig::default());
/// assert_eq!(row.flags(), vec![true, false, false]);
/// ```
#[must_use]
pub fn detect_timeseries_columns(frame: &DataFrame, config: &DetectConfig) -> DetectionRow {
    let first = frame.head(Some(1));
    let entries = first
        .get_columns()
        .iter()
        .map(|column| {
            let hit = column
                .as_materialized_series()
                .get(0)
                .is_ok_and(|value| is_datetime_string(&value));
            (column.name().to_string(), hit)
        })
        .collect();
    let row = DetectionRow { entries };
    if config.verbose {
        tracing::info!(columns = row.len(), "datetime column detection\n{row}");
    } else {
        tracing::debug!(columns = row.len(), detected = row.any(), "datetime column detection");
    }
    row
}

/// True if at least one column of `frame` looks datetime-like.
#[must_use]
pub fn has_timeseries_columns(frame: &DataFrame, config: &DetectConfig) -> bool {
    detect_timeseries_columns(frame, config).any()
}

/// Name of the first datetime-like column of `frame`.
///
/// # Errors
/// Returns `NotFound` if no column looks datetime-like.
pub fn get_timeseries_colname(
    frame: &DataFrame,
    config: &DetectConfig,
) -> Result<String, TimewiseError> {
    detect_timeseries_columns(frame, config)
        .first_match()
        .map(str::to_string)
        .ok_or_else(|| TimewiseError::not_found("datetime-like column"))
}
