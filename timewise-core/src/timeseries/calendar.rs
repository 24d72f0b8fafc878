use chrono::{Datelike, NaiveDate, Weekday};

use polars::prelude::*;

use crate::TimewiseError;
use crate::frame::frame_err;

/// 1-based week of the month for a day of the month: days 1-7 are week 1,
/// 8-14 week 2, and so on up to week 5.
#[must_use]
pub const fn week_of_month_for_day(day: u32) -> u32 {
    day.saturating_sub(1) / 7 + 1
}

fn week_of_day<D: TryInto<u32>>(day: Option<D>) -> Option<i64> {
    day.and_then(|d| d.try_into().ok())
        .map(|d| i64::from(week_of_month_for_day(d)))
}

/// Week of the month for every value of a `Datetime` or `Date` series.
///
/// The result is an `Int64` series named `week_of_month`, aligned with the
/// input by position. Nulls stay null.
///
/// # Errors
/// Returns `TypeMismatch` for any other dtype.
///
/// ```
/// use timewise_core::{datetime_series, week_of_month, Timestamp};
///
/// let days = [1, 7, 8, 31].map(|d| Timestamp::from_ymd(2020, 1, d));
/// let weeks = week_of_month(&datetime_series("date", days)).unwrap();
/// assert_eq!(weeks.name().as_str(), "week_of_month");
/// let values: Vec<Option<i64>> = weeks.i64().unwrap().into_iter().collect();
/// assert_eq!(values, [Some(1), Some(1), Some(2), Some(5)]);
/// ```
pub fn week_of_month(series: &Series) -> Result<Series, TimewiseError> {
    let weeks: Vec<Option<i64>> = match series.dtype() {
        DataType::Datetime(_, _) => series
            .datetime()
            .map_err(frame_err)?
            .day()
            .into_iter()
            .map(week_of_day)
            .collect(),
        DataType::Date => series
            .date()
            .map_err(frame_err)?
            .day()
            .into_iter()
            .map(week_of_day)
            .collect(),
        other => {
            return Err(TimewiseError::type_mismatch(
                "datetime or date series",
                other.to_string(),
            ));
        }
    };
    Ok(Series::new("week_of_month".into(), weeks))
}

const fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

/// Last calendar day of the month containing `date`.
#[must_use]
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(date)
}

/// First weekday (Mon-Fri) of the month containing `date`.
#[must_use]
pub fn first_business_day_of_month(date: NaiveDate) -> NaiveDate {
    let mut d = date.with_day(1).unwrap_or(date);
    while is_weekend(d.weekday()) {
        d = d.succ_opt().unwrap_or(d);
    }
    d
}

/// Last weekday (Mon-Fri) of the month containing `date`.
#[must_use]
pub fn last_business_day_of_month(date: NaiveDate) -> NaiveDate {
    let mut d = last_day_of_month(date);
    while is_weekend(d.weekday()) {
        d = d.pred_opt().unwrap_or(d);
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_boundaries() {
        assert_eq!(week_of_month_for_day(1), 1);
        assert_eq!(week_of_month_for_day(7), 1);
        assert_eq!(week_of_month_for_day(8), 2);
        assert_eq!(week_of_month_for_day(28), 4);
        assert_eq!(week_of_month_for_day(29), 5);
        assert_eq!(week_of_month_for_day(31), 5);
    }

    #[test]
    fn month_ends_handle_leap_years_and_december() {
        assert_eq!(last_day_of_month(ymd(2020, 2, 10)), ymd(2020, 2, 29));
        assert_eq!(last_day_of_month(ymd(2021, 2, 10)), ymd(2021, 2, 28));
        assert_eq!(last_day_of_month(ymd(2020, 12, 1)), ymd(2020, 12, 31));
    }

    #[test]
    fn business_month_boundaries_skip_weekends() {
        // February 2020 starts on a Saturday; May 2020 ends on a Sunday.
        assert_eq!(first_business_day_of_month(ymd(2020, 2, 20)), ymd(2020, 2, 3));
        assert_eq!(last_business_day_of_month(ymd(2020, 5, 3)), ymd(2020, 5, 29));
        assert_eq!(first_business_day_of_month(ymd(2020, 1, 20)), ymd(2020, 1, 1));
    }
}
