use chrono::NaiveDateTime;
use polars::prelude::{DataFrame, Series};

use crate::frame::{datetime_series, frame_err, timestamps};
use crate::period::{Period, PeriodColumn};
use crate::timestamp::Timestamp;
use crate::{PeriodUnit, TimewiseError};

/// Result of [`floor_date`].
#[derive(Debug, Clone)]
pub enum Floored {
    /// Every period start was representable; a `Datetime(ns)` series.
    Timestamps(Series),
    /// At least one period start fell outside the timestamp range, so the
    /// whole column is returned as periods instead.
    Periods(PeriodColumn),
}

impl Floored {
    /// The floored column as a series. Periods become their string labels.
    #[must_use]
    pub fn into_series(self) -> Series {
        match self {
            Self::Timestamps(s) => s,
            Self::Periods(p) => p.to_series(),
        }
    }

    /// The timestamp series, unless the column fell back to periods.
    #[must_use]
    pub const fn timestamps(&self) -> Option<&Series> {
        match self {
            Self::Timestamps(s) => Some(s),
            Self::Periods(_) => None,
        }
    }

    /// The period column, if timestamp reconstruction failed.
    #[must_use]
    pub const fn periods(&self) -> Option<&PeriodColumn> {
        match self {
            Self::Timestamps(_) => None,
            Self::Periods(p) => Some(p),
        }
    }

    /// True when timestamp reconstruction failed and periods were returned.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Periods(_))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Timestamps(s) => s.len(),
            Self::Periods(p) => p.len(),
        }
    }

    /// True for an empty result.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn floor_instants(
    name: &str,
    instants: impl IntoIterator<Item = Option<NaiveDateTime>>,
    unit: PeriodUnit,
) -> Result<Floored, TimewiseError> {
    let periods = instants
        .into_iter()
        .map(|dt| {
            dt.map(|dt| {
                Period::containing(dt, unit).ok_or_else(|| {
                    TimewiseError::InvalidArg(format!("{dt} has no enclosing {unit} period"))
                })
            })
            .transpose()
        })
        .collect::<Result<Vec<Option<Period>>, _>>()?;

    let starts: Option<Vec<Option<Timestamp>>> = periods
        .iter()
        .map(|p| match p {
            None => Some(None),
            Some(p) => p.to_timestamp().map(Some),
        })
        .collect();

    match starts {
        Some(starts) => Ok(Floored::Timestamps(datetime_series(name, starts))),
        None => {
            tracing::warn!(
                unit = %unit,
                series = name,
                "failed to convert periods to timestamps; returning periods instead"
            );
            Ok(Floored::Periods(PeriodColumn::new(name, periods)))
        }
    }
}

/// Round every timestamp in `series` down to the start of its `unit` period.
///
/// The input may be a naive `Datetime` column of any time unit or a `Date`
/// column. The output keeps the input's name and length, nulls stay null,
/// and timestamps come back as `Datetime(Nanoseconds, None)`.
///
/// When some period start cannot be represented as a [`Timestamp`] the
/// function does not fail: it logs a warning and returns
/// [`Floored::Periods`] holding the period values for the whole column.
///
/// # Errors
/// Returns `TypeMismatch` for any other dtype, including timezone-aware datetimes.
///
/// ```
/// use timewise_core::{datetime_series, floor_date, PeriodUnit, Timestamp};
///
/// let ts = Timestamp::from_ymd_hms(2020, 3, 15, 13, 45, 0);
/// let floored = floor_date(&datetime_series("ts", [ts]), PeriodUnit::Month).unwrap();
/// assert!(!floored.is_fallback());
/// let expected = datetime_series("ts", [Timestamp::from_ymd(2020, 3, 1)]);
/// assert!(floored.into_series().equals_missing(&expected));
/// ```
pub fn floor_date(series: &Series, unit: PeriodUnit) -> Result<Floored, TimewiseError> {
    let instants = timestamps(series)?
        .into_iter()
        .map(|ts| ts.map(Timestamp::to_naive));
    floor_instants(series.name().as_str(), instants, unit)
}

/// Floor a period column again, starting from each period's start instant.
///
/// Flooring to the same unit returns the same periods, so a fallback result
/// can be passed back through without loss.
///
/// # Errors
/// Returns `InvalidArg` only if a period has no enclosing `unit` period.
pub fn floor_periods(column: &PeriodColumn, unit: PeriodUnit) -> Result<Floored, TimewiseError> {
    let instants = column.periods().iter().map(|p| p.as_ref().map(Period::start));
    floor_instants(column.name(), instants, unit)
}

/// Replace `column` of `frame` with its floored values, keeping every other column.
///
/// A fallback column is stored as period labels.
///
/// # Errors
/// - `NotFound` if `frame` has no column named `column`.
/// - Any error of [`floor_date`].
pub fn floor_column(
    frame: &DataFrame,
    column: &str,
    unit: PeriodUnit,
) -> Result<DataFrame, TimewiseError> {
    let series = frame
        .column(column)
        .map_err(|_| TimewiseError::not_found(format!("column {column}")))?
        .as_materialized_series();
    let floored = floor_date(series, unit)?.into_series();
    let mut out = frame.clone();
    out.with_column(floored).map_err(frame_err)?;
    Ok(out)
}
