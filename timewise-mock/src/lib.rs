//! Deterministic fixtures for timewise tests and examples.
//!
//! Generators build polars `Datetime(ns)` [`Series`] with a fixed cadence;
//! `by_name` lookups return canned series and data frames so examples stay
//! CI-safe.
#![warn(missing_docs)]

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use timewise_core::timeseries::calendar::{last_business_day_of_month, last_day_of_month};
use polars::prelude::*;
use timewise_core::{Timestamp, datetime_series};

mod fixtures;

pub use fixtures::frames::by_name as frame_by_name;
pub use fixtures::series::by_name as series_by_name;

fn collect(name: &str, stamps: impl Iterator<Item = NaiveDateTime>) -> Series {
    datetime_series(name, stamps.map(Timestamp::from_naive))
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(chrono::NaiveTime::MIN)
}

/// `n` timestamps starting at `start`, `step` apart.
///
/// Instants beyond the nanosecond range are missing values.
#[must_use]
pub fn every(start: NaiveDateTime, step: Duration, n: usize) -> Series {
    collect(
        "date",
        std::iter::successors(Some(start), |t| t.checked_add_signed(step)).take(n),
    )
}

/// `n` consecutive calendar days at midnight.
#[must_use]
pub fn daily(start: NaiveDate, n: usize) -> Series {
    every(midnight(start), Duration::days(1), n)
}

/// `n` consecutive hours.
#[must_use]
pub fn hourly(start: NaiveDateTime, n: usize) -> Series {
    every(start, Duration::hours(1), n)
}

/// `n` weekdays at midnight, starting on the first weekday on or after `start`.
#[must_use]
pub fn business_days(start: NaiveDate, n: usize) -> Series {
    let days = start
        .iter_days()
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .take(n)
        .map(midnight);
    collect("date", days)
}

fn month_starts(start: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let first = start.with_day(1).unwrap_or(start);
    std::iter::successors(Some(first), |d| d.checked_add_months(chrono::Months::new(1)))
}

/// Last calendar day of `n` consecutive months, starting with the month of `start`.
#[must_use]
pub fn month_ends(start: NaiveDate, n: usize) -> Series {
    collect(
        "date",
        month_starts(start).take(n).map(|d| midnight(last_day_of_month(d))),
    )
}

/// Last weekday of `n` consecutive months, starting with the month of `start`.
#[must_use]
pub fn business_month_ends(start: NaiveDate, n: usize) -> Series {
    collect(
        "date",
        month_starts(start)
            .take(n)
            .map(|d| midnight(last_business_day_of_month(d))),
    )
}

/// Data frame with one date-string column followed by the given series.
///
/// `None` if lengths differ or a name repeats.
#[must_use]
pub fn with_dates_first(dates: &[&str], others: Vec<Series>) -> Option<DataFrame> {
    let columns = std::iter::once(Series::new("date".into(), dates))
        .chain(others)
        .map(Series::into_column)
        .collect();
    DataFrame::new(columns).ok()
}
