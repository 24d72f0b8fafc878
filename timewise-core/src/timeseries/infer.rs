use chrono::{Datelike, Month, NaiveDate, Weekday};
use polars::prelude::*;

use crate::frame::{frame_err, timestamps};
use crate::parse::parse_timestamp;
use crate::timestamp::Timestamp;
use crate::timeseries::calendar::{
    first_business_day_of_month, last_business_day_of_month, last_day_of_month,
};
use crate::{Anchor, Frequency, FrequencyConfig, MIN_FREQUENCY_SAMPLE, Rule, TimewiseError};

const NANOS_PER_MICRO: i64 = 1_000;
const NANOS_PER_MILLI: i64 = 1_000_000;
const NANOS_PER_SECOND: i64 = 1_000_000_000;
const NANOS_PER_MINUTE: i64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MINUTE;
const NANOS_PER_DAY: i64 = 24 * NANOS_PER_HOUR;

/// Sorted distinct values.
fn distinct<I: IntoIterator<Item = i64>>(values: I) -> Vec<i64> {
    let mut v: Vec<i64> = values.into_iter().collect();
    v.sort_unstable();
    v.dedup();
    v
}

/// Signed count prefix; negative for decreasing samples.
fn count(multiple: i64) -> Option<i64> {
    (multiple != 0).then_some(multiple)
}

/// Where in the month every stamp of a sample sits, if they all agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MonthPosition {
    CalendarEnd,
    BusinessEnd,
    CalendarStart,
    BusinessStart,
}

impl MonthPosition {
    const fn pick(self, rules: [Rule; 4]) -> Rule {
        match self {
            Self::CalendarEnd => rules[0],
            Self::BusinessEnd => rules[1],
            Self::CalendarStart => rules[2],
            Self::BusinessStart => rules[3],
        }
    }
}

fn month_position(dates: &[NaiveDate]) -> Option<MonthPosition> {
    let all = |f: fn(NaiveDate) -> bool| dates.iter().all(|&d| f(d));
    if all(|d| d == last_day_of_month(d)) {
        Some(MonthPosition::CalendarEnd)
    } else if all(|d| d == last_business_day_of_month(d)) {
        Some(MonthPosition::BusinessEnd)
    } else if all(|d| d.day() == 1) {
        Some(MonthPosition::CalendarStart)
    } else if all(|d| d == first_business_day_of_month(d)) {
        Some(MonthPosition::BusinessStart)
    } else {
        None
    }
}

/// Calendar view of a strictly monotonic sample whose smallest step is whole days.
struct DailySample {
    dates: Vec<NaiveDate>,
    deltas: Vec<i64>,
    year_diffs: Vec<i64>,
    month_diffs: Vec<i64>,
}

impl DailySample {
    fn new(stamps: &[Timestamp], deltas: Vec<i64>) -> Self {
        let dates: Vec<NaiveDate> = stamps.iter().map(|ts| ts.to_naive().date()).collect();
        let month_index = |d: &NaiveDate| i64::from(d.year()) * 12 + i64::from(d.month0());
        let year_diffs = distinct(
            dates
                .windows(2)
                .map(|w| i64::from(w[1].year()) - i64::from(w[0].year())),
        );
        let month_diffs = distinct(
            dates
                .windows(2)
                .map(|w| month_index(&w[1]) - month_index(&w[0])),
        );
        Self {
            dates,
            deltas,
            year_diffs,
            month_diffs,
        }
    }

    fn first(&self) -> NaiveDate {
        self.dates[0]
    }

    fn infer(&self) -> Option<Frequency> {
        self.annual()
            .or_else(|| self.quarterly())
            .or_else(|| self.monthly())
            .or_else(|| self.daily())
            .or_else(|| self.business_daily())
            .or_else(|| self.week_of_month())
    }

    fn single_month_step(&self) -> Option<i64> {
        match self.month_diffs.as_slice() {
            [step] if *step != 0 => Some(*step),
            _ => None,
        }
    }

    fn annual(&self) -> Option<Frequency> {
        let [years] = self.year_diffs.as_slice() else {
            return None;
        };
        let month = self.first().month();
        if self.dates.iter().any(|d| d.month() != month) {
            return None;
        }
        let rule = month_position(&self.dates)?.pick([
            Rule::YearEnd,
            Rule::BusinessYearEnd,
            Rule::YearStart,
            Rule::BusinessYearStart,
        ]);
        let anchor = Month::try_from(u8::try_from(month).ok()?).ok()?;
        Some(
            Frequency::new(rule)
                .with_multiple(count(*years)?)
                .anchored(Anchor::Month(anchor)),
        )
    }

    fn quarterly(&self) -> Option<Frequency> {
        let months = self.single_month_step()?;
        if months % 3 != 0 {
            return None;
        }
        let rule = month_position(&self.dates)?.pick([
            Rule::QuarterEnd,
            Rule::BusinessQuarterEnd,
            Rule::QuarterStart,
            Rule::BusinessQuarterStart,
        ]);
        // Anchor on the quarter-end month of the grid the first stamp sits on.
        let anchor = match self.first().month() % 3 {
            0 => Month::December,
            2 => Month::November,
            _ => Month::October,
        };
        Some(
            Frequency::new(rule)
                .with_multiple(count(months / 3)?)
                .anchored(Anchor::Month(anchor)),
        )
    }

    fn monthly(&self) -> Option<Frequency> {
        let months = self.single_month_step()?;
        let rule = month_position(&self.dates)?.pick([
            Rule::MonthEnd,
            Rule::BusinessMonthEnd,
            Rule::MonthStart,
            Rule::BusinessMonthStart,
        ]);
        Some(Frequency::new(rule).with_multiple(count(months)?))
    }

    fn daily(&self) -> Option<Frequency> {
        let [delta] = self.deltas.as_slice() else {
            return None;
        };
        let days = delta / NANOS_PER_DAY;
        if days % 7 == 0 {
            Some(
                Frequency::new(Rule::Week)
                    .with_multiple(count(days / 7)?)
                    .anchored(Anchor::Weekday(self.first().weekday())),
            )
        } else {
            Some(Frequency::new(Rule::Day).with_multiple(count(days)?))
        }
    }

    fn business_daily(&self) -> Option<Frequency> {
        if self.deltas != [NANOS_PER_DAY, 3 * NANOS_PER_DAY] {
            return None;
        }
        let weekdays_only = self.dates.windows(2).all(|w| {
            let shift = (w[1] - w[0]).num_days();
            match w[1].weekday() {
                Weekday::Mon => shift == 3,
                Weekday::Sat | Weekday::Sun => false,
                _ => shift == 1,
            }
        });
        weekdays_only.then(|| Frequency::new(Rule::BusinessDay))
    }

    fn week_of_month(&self) -> Option<Frequency> {
        let weekday = self.first().weekday();
        if self.dates.iter().any(|d| d.weekday() != weekday) {
            return None;
        }
        // Only weeks 1-4 exist in every month; a trailing fifth week is ignored.
        let weeks = distinct(
            self.dates
                .iter()
                .map(|d| i64::from(d.day0() / 7))
                .filter(|&w| w < 4),
        );
        let [week] = weeks.as_slice() else {
            return None;
        };
        Some(Frequency::new(Rule::WeekOfMonth).anchored(Anchor::WeekOfMonth {
            week: u8::try_from(week + 1).ok()?,
            weekday,
        }))
    }
}

/// Infer the regular spacing of `stamps`.
///
/// Recognizes fixed sub-daily steps (`h`, `min`, `s`, `ms`, `us`, `ns`, with a
/// count prefix such as `15min`), business hours (`bh`), calendar-aware daily
/// rules (`D`, `B`, `W-<day>`, `WOM-<n><day>`), and month, quarter, and year
/// start/end rules with business variants.
///
/// A strictly decreasing sample yields the same rule with a negative count
/// (`-1D`, `-1W-SUN`, `-3ME`). Business days and business hours only match
/// increasing samples.
///
/// Returns `None` for fewer than three stamps, stamps that are not strictly
/// monotonic, or spacing that matches no rule.
#[must_use]
pub fn infer_freq(stamps: &[Timestamp]) -> Option<Frequency> {
    if stamps.len() < MIN_FREQUENCY_SAMPLE {
        return None;
    }
    let raw: Vec<i64> = stamps
        .windows(2)
        .map(|w| w[1].nanos().checked_sub(w[0].nanos()))
        .collect::<Option<_>>()?;
    if !(raw.iter().all(|&d| d > 0) || raw.iter().all(|&d| d < 0)) {
        return None;
    }
    let deltas = distinct(raw);
    let smallest = deltas[0];

    if smallest % NANOS_PER_DAY == 0 {
        return DailySample::new(stamps, deltas).infer();
    }

    if deltas.iter().all(|d| d % NANOS_PER_HOUR == 0) {
        let hours: Vec<i64> = deltas.iter().map(|d| d / NANOS_PER_HOUR).collect();
        if matches!(hours.as_slice(), [1, 17] | [1, 65] | [1, 17, 65]) {
            return Some(Frequency::new(Rule::BusinessHour));
        }
    }

    let [delta] = deltas.as_slice() else {
        return None;
    };
    let (rule, unit) = [
        (Rule::Hour, NANOS_PER_HOUR),
        (Rule::Minute, NANOS_PER_MINUTE),
        (Rule::Second, NANOS_PER_SECOND),
        (Rule::Milli, NANOS_PER_MILLI),
        (Rule::Micro, NANOS_PER_MICRO),
    ]
    .into_iter()
    .find(|(_, unit)| delta % unit == 0)
    .unwrap_or((Rule::Nano, 1));
    Some(Frequency::new(rule).with_multiple(count(delta / unit)?))
}

/// Take up to `take` leading timestamps out of `series`.
///
/// Naive datetimes and dates are used as-is, strings are parsed, integers
/// are read as nanoseconds since the epoch.
fn sample_timestamps(series: &Series, take: usize) -> Result<Vec<Timestamp>, TimewiseError> {
    let head = series.head(Some(take));
    let values: Vec<Option<Timestamp>> = match head.dtype() {
        DataType::Datetime(_, _) | DataType::Date => timestamps(&head)?,
        DataType::String => head
            .str()
            .map_err(frame_err)?
            .into_iter()
            .map(|s| {
                s.map(|s| parse_timestamp(s).ok_or_else(|| TimewiseError::parse(s)))
                    .transpose()
            })
            .collect::<Result<_, _>>()?,
        dtype if dtype.is_integer() => head
            .cast(&DataType::Int64)
            .map_err(frame_err)?
            .i64()
            .map_err(frame_err)?
            .into_iter()
            .map(|n| n.map(Timestamp::from_nanos))
            .collect(),
        other => {
            return Err(TimewiseError::type_mismatch(
                "datetime-like series",
                other.to_string(),
            ));
        }
    };
    values
        .into_iter()
        .enumerate()
        .map(|(i, ts)| {
            ts.ok_or_else(|| TimewiseError::undetermined(format!("missing value at position {i}")))
        })
        .collect()
}

/// Infer the sampling frequency of `series` from its first `config.sample_size` values.
///
/// With `config.force_regular` set, business-calendar results are mapped to
/// their plain-calendar counterparts (`B` → `D`, `BQE-DEC` → `QE-DEC`, ...).
///
/// # Errors
/// - `TypeMismatch` if the series holds neither naive datetimes, dates, strings, nor integers.
/// - `Parse` if a sampled string is not a date.
/// - `FrequencyUndetermined` if the sample is too short, has missing values,
///   is not strictly monotonic, or has no regular spacing.
pub fn infer_series_frequency(
    series: &Series,
    config: &FrequencyConfig,
) -> Result<Frequency, TimewiseError> {
    let take = series.len().min(config.sample_size);
    let sample = sample_timestamps(series, take)?;

    if sample.len() < MIN_FREQUENCY_SAMPLE {
        return Err(TimewiseError::undetermined(format!(
            "need at least {MIN_FREQUENCY_SAMPLE} timestamps, got {}",
            sample.len()
        )));
    }
    let increasing = sample.windows(2).all(|w| w[0] < w[1]);
    let decreasing = sample.windows(2).all(|w| w[0] > w[1]);
    if !(increasing || decreasing) {
        return Err(TimewiseError::undetermined(
            "timestamps are not strictly monotonic",
        ));
    }
    let freq = infer_freq(&sample)
        .ok_or_else(|| TimewiseError::undetermined("no regular spacing in the sampled prefix"))?;

    tracing::debug!(frequency = %freq, sampled = sample.len(), "inferred frequency");
    Ok(if config.force_regular {
        freq.regularize()
    } else {
        freq
    })
}

/// Frequency code of `series` (e.g. `"D"`, `"B"`, `"ME"`), inferred from its
/// first ten values.
///
/// # Errors
/// Same as [`infer_series_frequency`].
///
/// ```
/// use timewise_core::{datetime_series, get_pandas_frequency, Timestamp};
///
/// let days = datetime_series("date", (1..=10).map(|d| Timestamp::from_ymd(2020, 1, d)));
/// assert_eq!(get_pandas_frequency(&days, false).unwrap(), "D");
/// ```
pub fn get_pandas_frequency(series: &Series, force_regular: bool) -> Result<String, TimewiseError> {
    infer_series_frequency(series, &FrequencyConfig::regular(force_regular)).map(|f| f.to_string())
}
