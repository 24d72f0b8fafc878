//! Calendar granularities used as flooring targets.

use std::fmt;
use std::str::FromStr;

use chrono::{Month, Weekday};
use serde::{Deserialize, Serialize};

use crate::TimewiseError;
use crate::codes::{month_code, parse_month_code, parse_weekday_code, split_anchor, weekday_code};

/// Calendar granularity a timestamp can be floored to.
///
/// Parsed from the same short codes the frequency strings use (`"D"`, `"W-SUN"`,
/// `"Q-DEC"`, ...). Anchored units carry the **last** weekday/month of the period,
/// so `Week { end: Sun }` runs Monday through Sunday and `Year { end: June }` is a
/// July-to-June fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PeriodUnit {
    /// Whole seconds.
    Second,
    /// Whole minutes.
    Minute,
    /// Whole hours.
    Hour,
    /// Calendar days.
    #[default]
    Day,
    /// Business days; Saturday and Sunday belong to the preceding Friday.
    BusinessDay,
    /// Seven-day weeks ending on `end`.
    Week {
        /// Last weekday of each week.
        end: Weekday,
    },
    /// Calendar months.
    Month,
    /// Three-month quarters whose final month is `end` (or one of its 3-month shifts).
    Quarter {
        /// Final month of the fiscal year the quarters are aligned to.
        end: Month,
    },
    /// Twelve-month years ending with `end`.
    Year {
        /// Final month of the year.
        end: Month,
    },
}

impl PeriodUnit {
    /// Monday-to-Sunday weeks.
    pub const WEEK: Self = Self::Week { end: Weekday::Sun };
    /// Calendar quarters (Jan-Mar, Apr-Jun, ...).
    pub const QUARTER: Self = Self::Quarter {
        end: Month::December,
    };
    /// Calendar years.
    pub const YEAR: Self = Self::Year {
        end: Month::December,
    };

    /// True for units whose periods skip weekends.
    #[must_use]
    pub const fn is_business(&self) -> bool {
        matches!(self, Self::BusinessDay)
    }

    /// True for units finer than a day.
    #[must_use]
    pub const fn is_subdaily(&self) -> bool {
        matches!(self, Self::Second | Self::Minute | Self::Hour)
    }
}

/// `QS-JAN` (quarters starting in January) is the same grid as `Q-DEC`.
fn end_from_start(start: Month) -> Month {
    start.pred()
}

impl FromStr for PeriodUnit {
    type Err = TimewiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || TimewiseError::InvalidArg(format!("unknown period unit: {s:?}"));
        let (base, anchor) = split_anchor(s.trim());

        let month_anchor = |default: Month, start_anchored: bool| -> Result<Month, TimewiseError> {
            match anchor {
                None => Ok(default),
                Some(a) => {
                    let m = parse_month_code(a).ok_or_else(bad)?;
                    Ok(if start_anchored { end_from_start(m) } else { m })
                }
            }
        };

        let unit = match base {
            "W" => Self::Week {
                end: match anchor {
                    None => Weekday::Sun,
                    Some(a) => parse_weekday_code(a).ok_or_else(bad)?,
                },
            },
            "Q" | "QE" => Self::Quarter {
                end: month_anchor(Month::December, false)?,
            },
            "QS" => Self::Quarter {
                end: month_anchor(Month::December, true)?,
            },
            "Y" | "A" | "YE" => Self::Year {
                end: month_anchor(Month::December, false)?,
            },
            "YS" | "AS" => Self::Year {
                end: month_anchor(Month::December, true)?,
            },
            _ if anchor.is_some() => return Err(bad()),
            "s" | "S" => Self::Second,
            "min" | "T" => Self::Minute,
            "h" | "H" => Self::Hour,
            "D" => Self::Day,
            "B" => Self::BusinessDay,
            "M" | "ME" | "MS" => Self::Month,
            _ => return Err(bad()),
        };
        Ok(unit)
    }
}

impl fmt::Display for PeriodUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Second => f.write_str("s"),
            Self::Minute => f.write_str("min"),
            Self::Hour => f.write_str("h"),
            Self::Day => f.write_str("D"),
            Self::BusinessDay => f.write_str("B"),
            Self::Week { end } => write!(f, "W-{}", weekday_code(*end)),
            Self::Month => f.write_str("M"),
            Self::Quarter { end } => write!(f, "Q-{}", month_code(*end)),
            Self::Year { end } => write!(f, "Y-{}", month_code(*end)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_legacy_codes() {
        assert_eq!("D".parse::<PeriodUnit>().unwrap(), PeriodUnit::Day);
        assert_eq!("T".parse::<PeriodUnit>().unwrap(), PeriodUnit::Minute);
        assert_eq!("W".parse::<PeriodUnit>().unwrap(), PeriodUnit::WEEK);
        assert_eq!("A".parse::<PeriodUnit>().unwrap(), PeriodUnit::YEAR);
        assert_eq!("MS".parse::<PeriodUnit>().unwrap(), PeriodUnit::Month);
    }

    #[test]
    fn start_anchors_become_end_anchors() {
        assert_eq!("QS-JAN".parse::<PeriodUnit>().unwrap(), PeriodUnit::QUARTER);
        assert_eq!(
            "YS-JUL".parse::<PeriodUnit>().unwrap(),
            PeriodUnit::Year {
                end: Month::June
            }
        );
    }

    #[test]
    fn rejects_unknown_and_misplaced_anchors() {
        assert!("fortnight".parse::<PeriodUnit>().is_err());
        assert!("D-MON".parse::<PeriodUnit>().is_err());
        assert!("W-XYZ".parse::<PeriodUnit>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for code in ["s", "min", "h", "D", "B", "W-WED", "M", "Q-NOV", "Y-JUN"] {
            let unit: PeriodUnit = code.parse().unwrap();
            assert_eq!(unit.to_string(), code);
        }
    }
}
