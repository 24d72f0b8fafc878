//! Speculative date/time parsing.
//!
//! Every function here reports failure through `Option` instead of an error,
//! so callers can treat "not a date" as an ordinary answer.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::timestamp::Timestamp;

const DATETIME_FORMATS: [&str; 14] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %I:%M:%S %p",
    "%Y-%m-%d %I:%M %p",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%b %d %Y %H:%M:%S",
    "%d %b %Y %H:%M:%S",
];

const DATE_FORMATS: [&str; 10] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%Y%m%d",
    "%d %b %Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %B %Y",
];

/// Layouts without a day; they parse to the first of the month.
const YEAR_MONTH_FORMATS: [&str; 5] = ["%Y-%m", "%Y/%m", "%m/%Y", "%b %Y", "%B %Y"];

const TIME_FORMATS: [&str; 5] = ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];

/// What a successfully parsed string turned out to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDate {
    /// Date and time of day. Offsets, when present, are normalized to UTC.
    DateTime(NaiveDateTime),
    /// Calendar date only.
    Date(NaiveDate),
    /// Time of day only.
    Time(NaiveTime),
}

impl ParsedDate {
    /// The parsed value as a date-time; dates map to midnight and bare times to `None`.
    #[must_use]
    pub fn to_naive(self) -> Option<NaiveDateTime> {
        match self {
            Self::DateTime(dt) => Some(dt),
            Self::Date(d) => Some(d.and_time(NaiveTime::MIN)),
            Self::Time(_) => None,
        }
    }
}

fn parse_year_month(s: &str) -> Option<NaiveDate> {
    let with_day = format!("{s} 1");
    YEAR_MONTH_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&with_day, &format!("{fmt} %d")).ok())
}

fn parse_year(s: &str) -> Option<i32> {
    (s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()))
        .then(|| s.parse().ok())
        .flatten()
}

/// Quarter labels such as `2020Q1` or `2020-Q3`, read as calendar quarters.
fn parse_quarter(s: &str) -> Option<NaiveDate> {
    let (year, quarter) = s.split_once(['Q', 'q'])?;
    let year = parse_year(year.strip_suffix('-').unwrap_or(year))?;
    let quarter: u32 = match quarter {
        "1" => 1,
        "2" => 2,
        "3" => 3,
        "4" => 4,
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, quarter * 3 - 2, 1)
}

/// Ranges such as `2020-01-06/2020-01-12`; the start is returned.
fn parse_range(s: &str) -> Option<NaiveDate> {
    let (start, end) = s.split_once('/')?;
    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").ok()?;
    let end = NaiveDate::parse_from_str(end, "%Y-%m-%d").ok()?;
    (start <= end).then_some(start)
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| parse_year_month(s))
        .or_else(|| parse_quarter(s))
        .or_else(|| parse_range(s))
        .or_else(|| parse_year(s).and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1)))
}

/// Try to read `s` as a date, a date-time, or a time of day.
///
/// Accepts RFC 3339, RFC 2822, ISO-like date-times with a space or `T`
/// separator, 12-hour clocks with `AM`/`PM`, common numeric and month-name
/// date layouts, year-month layouts (`2020-01`, `Jan 2020`), period labels
/// (`2020`, `2020Q1`, `2020-01-06/2020-01-12`), and `HH:MM[:SS]`.
/// Dates without a day start on the first of the month. Surrounding
/// whitespace is ignored.
///
/// ```
/// use timewise_core::parse::{parse_datetime, ParsedDate};
///
/// assert!(matches!(parse_datetime("2020-01-01"), Some(ParsedDate::Date(_))));
/// assert!(matches!(parse_datetime("2020-01-01T10:30:00Z"), Some(ParsedDate::DateTime(_))));
/// assert!(matches!(parse_datetime("January 2020"), Some(ParsedDate::Date(_))));
/// assert_eq!(parse_datetime("hello"), None);
/// ```
#[must_use]
pub fn parse_datetime(s: &str) -> Option<ParsedDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(ParsedDate::DateTime(dt.naive_utc()));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(ParsedDate::DateTime(dt.naive_utc()));
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(ParsedDate::DateTime)
        .or_else(|| parse_date(s).map(ParsedDate::Date))
        .or_else(|| {
            TIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
                .map(ParsedDate::Time)
        })
}

/// Parse `s` into a timestamp; bare times of day and out-of-range values yield `None`.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<Timestamp> {
    parse_datetime(s)?.to_naive().and_then(Timestamp::from_naive)
}
