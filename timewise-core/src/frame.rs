//! Conversions between polars columns and [`Timestamp`] values.

use polars::prelude::*;

use crate::TimewiseError;
use crate::timestamp::Timestamp;

const NANOS_PER_DAY: i64 = 86_400 * 1_000_000_000;

pub(crate) fn frame_err(e: PolarsError) -> TimewiseError {
    TimewiseError::Frame(e.to_string())
}

const fn nanos_per(unit: TimeUnit) -> i64 {
    match unit {
        TimeUnit::Nanoseconds => 1,
        TimeUnit::Microseconds => 1_000,
        TimeUnit::Milliseconds => 1_000_000,
    }
}

/// A `Datetime(Nanoseconds, None)` series named `name`; `None` entries become nulls.
///
/// ```
/// use timewise_core::{datetime_series, Timestamp};
///
/// let s = datetime_series("date", [Timestamp::from_ymd(2020, 1, 1), None]);
/// assert_eq!(s.len(), 2);
/// assert_eq!(s.null_count(), 1);
/// ```
pub fn datetime_series<I>(name: &str, values: I) -> Series
where
    I: IntoIterator<Item = Option<Timestamp>>,
{
    let nanos: Int64Chunked = values.into_iter().map(|v| v.map(Timestamp::nanos)).collect();
    nanos
        .with_name(name.into())
        .into_datetime(TimeUnit::Nanoseconds, None)
        .into_series()
}

/// Timestamps of a naive datetime (any time unit) or date series; nulls map to `None`.
///
/// # Errors
/// - `TypeMismatch` for any other dtype, including timezone-aware datetimes.
/// - `InvalidArg` if a value lies outside the nanosecond range.
pub fn timestamps(series: &Series) -> Result<Vec<Option<Timestamp>>, TimewiseError> {
    let factor = match series.dtype() {
        DataType::Datetime(unit, None) => nanos_per(*unit),
        DataType::Date => NANOS_PER_DAY,
        other => {
            return Err(TimewiseError::type_mismatch(
                "naive datetime or date series",
                other.to_string(),
            ));
        }
    };
    let physical = series
        .to_physical_repr()
        .cast(&DataType::Int64)
        .map_err(frame_err)?;
    physical
        .i64()
        .map_err(frame_err)?
        .into_iter()
        .map(|v| {
            v.map(|v| {
                v.checked_mul(factor).map(Timestamp::from_nanos).ok_or_else(|| {
                    TimewiseError::InvalidArg(format!(
                        "value {v} of {} is outside the nanosecond range",
                        series.name()
                    ))
                })
            })
            .transpose()
        })
        .collect()
}
