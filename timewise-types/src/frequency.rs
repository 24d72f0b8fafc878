//! Structured frequency codes (`"D"`, `"BME"`, `"QE-DEC"`, `"15min"`, ...).

use std::fmt;
use std::str::FromStr;

use chrono::{Month, Weekday};
use serde::{Deserialize, Serialize};

use crate::TimewiseError;
use crate::codes::{month_code, parse_month_code, parse_weekday_code, split_anchor, weekday_code};

/// The base rule of a frequency code, without count or anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Rule {
    /// `ns`
    Nano,
    /// `us`
    Micro,
    /// `ms`
    Milli,
    /// `s`
    Second,
    /// `min`
    Minute,
    /// `h`
    Hour,
    /// `bh`: hourly within business hours.
    BusinessHour,
    /// `D`
    Day,
    /// `B`: weekdays only.
    BusinessDay,
    /// `W-<weekday>`
    Week,
    /// `WOM-<n><weekday>`: the n-th given weekday of each month.
    WeekOfMonth,
    /// `ME`
    MonthEnd,
    /// `BME`
    BusinessMonthEnd,
    /// `MS`
    MonthStart,
    /// `BMS`
    BusinessMonthStart,
    /// `QE-<month>`
    QuarterEnd,
    /// `BQE-<month>`
    BusinessQuarterEnd,
    /// `QS-<month>`
    QuarterStart,
    /// `BQS-<month>`
    BusinessQuarterStart,
    /// `YE-<month>`
    YearEnd,
    /// `BYE-<month>`
    BusinessYearEnd,
    /// `YS-<month>`
    YearStart,
    /// `BYS-<month>`
    BusinessYearStart,
}

/// Business-calendar codes and their plain-calendar counterparts.
///
/// Keyed by the short codes (`BM`, `BA`, ...), which resolve through
/// [`Rule::from_code`]; `BA` and `BY` both name the business year end.
/// Applied once by [`Frequency::regularize`]. Rules not listed, including
/// business hours, map to themselves.
pub const BUSINESS_TO_CALENDAR: [(&str, &str); 8] = [
    ("B", "D"),
    ("BM", "M"),
    ("BQ", "Q"),
    ("BA", "A"),
    ("BY", "Y"),
    ("BMS", "MS"),
    ("BQS", "QS"),
    ("BYS", "YS"),
];

const ALL_RULES: [Rule; 23] = [
    Rule::Nano,
    Rule::Micro,
    Rule::Milli,
    Rule::Second,
    Rule::Minute,
    Rule::Hour,
    Rule::BusinessHour,
    Rule::Day,
    Rule::BusinessDay,
    Rule::Week,
    Rule::WeekOfMonth,
    Rule::MonthEnd,
    Rule::BusinessMonthEnd,
    Rule::MonthStart,
    Rule::BusinessMonthStart,
    Rule::QuarterEnd,
    Rule::BusinessQuarterEnd,
    Rule::QuarterStart,
    Rule::BusinessQuarterStart,
    Rule::YearEnd,
    Rule::BusinessYearEnd,
    Rule::YearStart,
    Rule::BusinessYearStart,
];

impl Rule {
    /// Canonical code prefix.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Nano => "ns",
            Self::Micro => "us",
            Self::Milli => "ms",
            Self::Second => "s",
            Self::Minute => "min",
            Self::Hour => "h",
            Self::BusinessHour => "bh",
            Self::Day => "D",
            Self::BusinessDay => "B",
            Self::Week => "W",
            Self::WeekOfMonth => "WOM",
            Self::MonthEnd => "ME",
            Self::BusinessMonthEnd => "BME",
            Self::MonthStart => "MS",
            Self::BusinessMonthStart => "BMS",
            Self::QuarterEnd => "QE",
            Self::BusinessQuarterEnd => "BQE",
            Self::QuarterStart => "QS",
            Self::BusinessQuarterStart => "BQS",
            Self::YearEnd => "YE",
            Self::BusinessYearEnd => "BYE",
            Self::YearStart => "YS",
            Self::BusinessYearStart => "BYS",
        }
    }

    /// Look up a rule by canonical code or legacy alias.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let legacy = match code {
            "N" => Some(Self::Nano),
            "U" => Some(Self::Micro),
            "L" => Some(Self::Milli),
            "S" => Some(Self::Second),
            "T" => Some(Self::Minute),
            "H" => Some(Self::Hour),
            "BH" => Some(Self::BusinessHour),
            "M" => Some(Self::MonthEnd),
            "BM" => Some(Self::BusinessMonthEnd),
            "Q" => Some(Self::QuarterEnd),
            "BQ" => Some(Self::BusinessQuarterEnd),
            "A" | "Y" => Some(Self::YearEnd),
            "BA" | "BY" => Some(Self::BusinessYearEnd),
            "AS" => Some(Self::YearStart),
            "BAS" => Some(Self::BusinessYearStart),
            _ => None,
        };
        legacy.or_else(|| ALL_RULES.into_iter().find(|r| r.code() == code))
    }

    /// Plain-calendar counterpart of a business-calendar rule.
    #[must_use]
    pub fn regular(self) -> Self {
        BUSINESS_TO_CALENDAR
            .iter()
            .find(|(business, _)| Self::from_code(business) == Some(self))
            .and_then(|(_, calendar)| Self::from_code(calendar))
            .unwrap_or(self)
    }

    /// True for rules that skip weekends or non-business hours.
    #[must_use]
    pub const fn is_business(self) -> bool {
        matches!(
            self,
            Self::BusinessHour
                | Self::BusinessDay
                | Self::BusinessMonthEnd
                | Self::BusinessMonthStart
                | Self::BusinessQuarterEnd
                | Self::BusinessQuarterStart
                | Self::BusinessYearEnd
                | Self::BusinessYearStart
        )
    }

    const fn default_anchor(self) -> Option<Anchor> {
        match self {
            Self::Week => Some(Anchor::Weekday(Weekday::Sun)),
            Self::QuarterEnd
            | Self::BusinessQuarterEnd
            | Self::YearEnd
            | Self::BusinessYearEnd => Some(Anchor::Month(Month::December)),
            Self::QuarterStart
            | Self::BusinessQuarterStart
            | Self::YearStart
            | Self::BusinessYearStart => Some(Anchor::Month(Month::January)),
            _ => None,
        }
    }
}

/// Suffix that pins an anchored rule to a weekday or month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Anchor {
    /// `W-SUN`
    Weekday(Weekday),
    /// `QE-DEC`, `YS-JAN`
    Month(Month),
    /// `WOM-3FRI`: `week` is 1-based.
    WeekOfMonth {
        /// Week within the month, 1 through 4.
        week: u8,
        /// Weekday within that week.
        weekday: Weekday,
    },
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekday(d) => f.write_str(weekday_code(*d)),
            Self::Month(m) => f.write_str(month_code(*m)),
            Self::WeekOfMonth { week, weekday } => write!(f, "{week}{}", weekday_code(*weekday)),
        }
    }
}

/// An inferred or requested sampling frequency: `multiple` × `rule`, optionally anchored.
///
/// The multiple is negative for samples that run backwards in time (`-1D`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Frequency {
    rule: Rule,
    multiple: i64,
    anchor: Option<Anchor>,
}

impl Frequency {
    /// A single step of `rule`, with the rule's default anchor where it needs one.
    #[must_use]
    pub const fn new(rule: Rule) -> Self {
        Self {
            rule,
            multiple: 1,
            anchor: rule.default_anchor(),
        }
    }

    /// Set the step count (`2D`, `15min`, `-1D`). Zero is treated as one.
    #[must_use]
    pub const fn with_multiple(mut self, multiple: i64) -> Self {
        self.multiple = if multiple == 0 { 1 } else { multiple };
        self
    }

    /// Set the anchor suffix.
    #[must_use]
    pub const fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Base rule.
    #[must_use]
    pub const fn rule(&self) -> Rule {
        self.rule
    }

    /// Step count.
    #[must_use]
    pub const fn multiple(&self) -> i64 {
        self.multiple
    }

    /// Anchor suffix, if any.
    #[must_use]
    pub const fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    /// Replace a business-calendar rule with its plain-calendar counterpart,
    /// keeping multiple and anchor (`BQE-DEC` → `QE-DEC`).
    #[must_use]
    pub fn regularize(self) -> Self {
        Self {
            rule: self.rule.regular(),
            ..self
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.multiple != 1 {
            write!(f, "{}", self.multiple)?;
        }
        f.write_str(self.rule.code())?;
        if let Some(anchor) = self.anchor {
            write!(f, "-{anchor}")?;
        }
        Ok(())
    }
}

impl FromStr for Frequency {
    type Err = TimewiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || TimewiseError::InvalidArg(format!("unknown frequency code: {s:?}"));
        let s = s.trim();
        let sign = usize::from(s.starts_with('-'));
        let digits = s.bytes().skip(sign).take_while(u8::is_ascii_digit).count();
        let (count, rest) = s.split_at(sign + digits);
        let multiple = if count.is_empty() {
            1
        } else {
            count.parse::<i64>().map_err(|_| bad())?
        };

        let (base, anchor_text) = split_anchor(rest);
        let rule = Rule::from_code(base).ok_or_else(bad)?;
        let mut freq = Self::new(rule).with_multiple(multiple);

        let Some(text) = anchor_text else {
            if rule == Rule::WeekOfMonth {
                return Err(bad());
            }
            return Ok(freq);
        };
        let anchor = match rule {
            Rule::Week => Anchor::Weekday(parse_weekday_code(text).ok_or_else(bad)?),
            Rule::WeekOfMonth => {
                let mut chars = text.chars();
                let week = chars
                    .next()
                    .and_then(|c| c.to_digit(10))
                    .and_then(|w| u8::try_from(w).ok())
                    .filter(|w| (1..=4).contains(w))
                    .ok_or_else(bad)?;
                Anchor::WeekOfMonth {
                    week,
                    weekday: parse_weekday_code(chars.as_str()).ok_or_else(bad)?,
                }
            }
            _ if freq.anchor.is_some() => Anchor::Month(parse_month_code(text).ok_or_else(bad)?),
            _ => return Err(bad()),
        };
        freq.anchor = Some(anchor);
        Ok(freq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rule_code_resolves_to_itself() {
        for rule in ALL_RULES {
            assert_eq!(Rule::from_code(rule.code()), Some(rule));
        }
    }

    #[test]
    fn table_codes_resolve_to_business_and_calendar_rules() {
        for (business, calendar) in BUSINESS_TO_CALENDAR {
            let business = Rule::from_code(business).unwrap();
            let calendar = Rule::from_code(calendar).unwrap();
            assert!(business.is_business());
            assert!(!calendar.is_business());
            assert_eq!(business.regular(), calendar);
        }
    }

    #[test]
    fn only_business_hours_stay_business_after_regularizing() {
        let left: Vec<Rule> = ALL_RULES
            .into_iter()
            .filter(|r| r.regular().is_business())
            .collect();
        assert_eq!(left, [Rule::BusinessHour]);
    }
}
