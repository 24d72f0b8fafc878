use chrono::{Duration, NaiveDate};
use polars::prelude::Series;
use timewise_core::{Timestamp, datetime_series, timestamps};

pub fn by_name(name: &str) -> Option<Series> {
    let jan = NaiveDate::from_ymd_opt(2020, 1, 1)?;
    match name {
        "daily" => Some(crate::daily(jan, 10)),
        "business" => Some(crate::business_days(jan, 15)),
        "hourly" => Some(crate::hourly(jan.and_hms_opt(0, 0, 0)?, 48)),
        "quarter_hour" => Some(crate::every(
            jan.and_hms_opt(9, 0, 0)?,
            Duration::minutes(15),
            12,
        )),
        "month_end" => Some(crate::month_ends(jan, 12)),
        "business_month_end" => Some(crate::business_month_ends(jan, 12)),
        "irregular" => Some(stamps(&[(2020, 1, 1), (2020, 1, 2), (2020, 1, 5), (2020, 1, 11)])),
        "descending" => Some(stamps(&[(2020, 1, 5), (2020, 1, 4), (2020, 1, 3), (2020, 1, 2)])),
        "with_gaps" => {
            let mut data = timestamps(&crate::daily(jan, 5)).ok()?;
            data[2] = None;
            Some(datetime_series("date", data))
        }
        "pre_1677" => Some(stamps(&[(1677, 9, 22), (1677, 10, 1), (1700, 1, 1)])),
        _ => None,
    }
}

fn stamps(days: &[(i32, u32, u32)]) -> Series {
    datetime_series(
        "date",
        days.iter().map(|&(y, m, d)| Timestamp::from_ymd(y, m, d)),
    )
}
