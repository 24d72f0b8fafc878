//! Calendar periods and the period containing a given instant.

use std::fmt;

use chrono::{Datelike, Days, Month, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use polars::prelude::{NamedFrom, Series};
use serde::{Deserialize, Serialize};

use crate::PeriodUnit;
use crate::timestamp::Timestamp;

/// A calendar-aligned span identified by its unit and start instant.
///
/// The start is kept as a `chrono` date-time, which spans a far wider range than
/// [`Timestamp`]; converting back with [`Period::to_timestamp`] can therefore fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    unit: PeriodUnit,
    start: NaiveDateTime,
}

const fn month_index(year: i32, month0: u32) -> i64 {
    year as i64 * 12 + month0 as i64
}

fn first_of_month_index(index: i64) -> Option<NaiveDate> {
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month0 = u32::try_from(index.rem_euclid(12)).ok()?;
    NaiveDate::from_ymd_opt(year, month0 + 1, 1)
}

/// Months to step back from `month0` to reach the start of its block of `len`
/// months, where blocks start at months congruent to `offset`.
const fn months_into_block(month0: u32, offset: u32, len: u32) -> u32 {
    (month0 + len - offset % len) % len
}

const fn month_number(m: Month) -> u32 {
    m as u32 + 1
}

impl Period {
    /// The period of `unit` that contains `dt`.
    ///
    /// Returns `None` only when the period start falls outside `chrono`'s range.
    #[must_use]
    pub fn containing(dt: NaiveDateTime, unit: PeriodUnit) -> Option<Self> {
        let date = dt.date();
        let start = match unit {
            PeriodUnit::Second => dt.with_nanosecond(0)?,
            PeriodUnit::Minute => date.and_hms_opt(dt.hour(), dt.minute(), 0)?,
            PeriodUnit::Hour => date.and_hms_opt(dt.hour(), 0, 0)?,
            PeriodUnit::Day => date.and_time(NaiveTime::MIN),
            PeriodUnit::BusinessDay => {
                let back = match date.weekday() {
                    Weekday::Sat => 1,
                    Weekday::Sun => 2,
                    _ => 0,
                };
                date.checked_sub_days(Days::new(back))?.and_time(NaiveTime::MIN)
            }
            PeriodUnit::Week { end } => {
                let first = end.succ().num_days_from_monday();
                let back = (date.weekday().num_days_from_monday() + 7 - first) % 7;
                date.checked_sub_days(Days::new(u64::from(back)))?
                    .and_time(NaiveTime::MIN)
            }
            PeriodUnit::Month => date.with_day(1)?.and_time(NaiveTime::MIN),
            PeriodUnit::Quarter { end } => {
                let back = months_into_block(date.month0(), month_number(end) % 3, 3);
                let idx = month_index(date.year(), date.month0()) - i64::from(back);
                first_of_month_index(idx)?.and_time(NaiveTime::MIN)
            }
            PeriodUnit::Year { end } => {
                let back = months_into_block(date.month0(), month_number(end) % 12, 12);
                let idx = month_index(date.year(), date.month0()) - i64::from(back);
                first_of_month_index(idx)?.and_time(NaiveTime::MIN)
            }
            _ => return None,
        };
        Some(Self { unit, start })
    }

    /// The period of `unit` that contains `ts`.
    #[must_use]
    pub fn of(ts: Timestamp, unit: PeriodUnit) -> Option<Self> {
        Self::containing(ts.to_naive(), unit)
    }

    /// Unit of the period.
    #[must_use]
    pub const fn unit(&self) -> PeriodUnit {
        self.unit
    }

    /// First instant of the period.
    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// First instant of the period as a timestamp, if representable.
    #[must_use]
    pub fn to_timestamp(&self) -> Option<Timestamp> {
        Timestamp::from_naive(self.start)
    }

    /// Calendar year the fiscal period is named after (the year it ends in).
    fn fiscal_year(&self, end: Month) -> i32 {
        let month0 = self.start.month0();
        let into_year = months_into_block(month0, month_number(end) % 12, 12);
        let last = month_index(self.start.year(), month0) - i64::from(into_year) + 11;
        i32::try_from(last.div_euclid(12)).unwrap_or(self.start.year())
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.start;
        match self.unit {
            PeriodUnit::Second => write!(f, "{}", s.format("%Y-%m-%d %H:%M:%S")),
            PeriodUnit::Minute => write!(f, "{}", s.format("%Y-%m-%d %H:%M")),
            PeriodUnit::Hour => write!(f, "{}", s.format("%Y-%m-%d %H:00")),
            PeriodUnit::Week { .. } => {
                let last = s.date().checked_add_days(Days::new(6)).unwrap_or(s.date());
                write!(f, "{}/{}", s.format("%Y-%m-%d"), last.format("%Y-%m-%d"))
            }
            PeriodUnit::Month => write!(f, "{}", s.format("%Y-%m")),
            PeriodUnit::Quarter { end } => {
                let into_year = months_into_block(s.month0(), month_number(end) % 12, 12);
                write!(f, "{}Q{}", self.fiscal_year(end), into_year / 3 + 1)
            }
            PeriodUnit::Year { end } => write!(f, "{}", self.fiscal_year(end)),
            _ => write!(f, "{}", s.format("%Y-%m-%d")),
        }
    }
}

/// A named column of periods, produced when floored starts leave the timestamp range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodColumn {
    name: String,
    periods: Vec<Option<Period>>,
}

impl PeriodColumn {
    pub(crate) fn new(name: &str, periods: Vec<Option<Period>>) -> Self {
        Self {
            name: name.to_string(),
            periods,
        }
    }

    /// Column name, taken from the floored series.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The periods in input order; missing inputs stay `None`.
    #[must_use]
    pub fn periods(&self) -> &[Option<Period>] {
        &self.periods
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// True for an empty column.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Period labels (`1677`, `2020Q1`, `2020-03`) as a string series of the same name.
    #[must_use]
    pub fn to_series(&self) -> Series {
        let labels: Vec<Option<String>> = self
            .periods
            .iter()
            .map(|p| p.as_ref().map(ToString::to_string))
            .collect();
        Series::new(self.name.as_str().into(), labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, 17)
            .unwrap()
    }

    fn start_of(dt: NaiveDateTime, code: &str) -> NaiveDateTime {
        Period::containing(dt, code.parse().unwrap()).unwrap().start()
    }

    #[test]
    fn subdaily_units_truncate() {
        let dt = at(2020, 3, 15, 13, 45);
        assert_eq!(start_of(dt, "h"), at(2020, 3, 15, 13, 0).with_second(0).unwrap());
        assert_eq!(start_of(dt, "min"), at(2020, 3, 15, 13, 45).with_second(0).unwrap());
        assert_eq!(start_of(dt, "s"), dt);
    }

    #[test]
    fn weeks_start_the_day_after_the_anchor() {
        // 2020-03-15 is a Sunday.
        let dt = at(2020, 3, 15, 13, 45);
        assert_eq!(start_of(dt, "W").date(), NaiveDate::from_ymd_opt(2020, 3, 9).unwrap());
        assert_eq!(start_of(dt, "W-SAT").date(), dt.date());
        assert_eq!(start_of(dt, "W-WED").date(), NaiveDate::from_ymd_opt(2020, 3, 12).unwrap());
    }

    #[test]
    fn business_day_rolls_weekends_back_to_friday() {
        let sunday = at(2020, 3, 15, 9, 0);
        assert_eq!(
            start_of(sunday, "B").date(),
            NaiveDate::from_ymd_opt(2020, 3, 13).unwrap()
        );
    }

    #[test]
    fn fiscal_quarters_and_years() {
        let dt = at(2020, 3, 15, 0, 0);
        assert_eq!(start_of(dt, "Q").date(), NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(start_of(dt, "Q-NOV").date(), NaiveDate::from_ymd_opt(2020, 3, 1).unwrap());
        assert_eq!(start_of(dt, "Q-JAN").date(), NaiveDate::from_ymd_opt(2020, 2, 1).unwrap());
        assert_eq!(start_of(dt, "Y").date(), NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(start_of(dt, "Y-JUN").date(), NaiveDate::from_ymd_opt(2019, 7, 1).unwrap());
    }

    #[test]
    fn labels_follow_fiscal_naming() {
        let label = |y, m, d, code: &str| {
            Period::containing(at(y, m, d, 0, 0), code.parse().unwrap())
                .unwrap()
                .to_string()
        };
        assert_eq!(label(2020, 3, 15, "Q"), "2020Q1");
        assert_eq!(label(2019, 12, 15, "Q-NOV"), "2020Q1");
        assert_eq!(label(2020, 3, 15, "Y-JUN"), "2020");
        assert_eq!(label(2020, 8, 1, "Y-JUN"), "2021");
        assert_eq!(label(2020, 3, 15, "M"), "2020-03");
        assert_eq!(label(2020, 3, 15, "W"), "2020-03-09/2020-03-15");
    }
}
