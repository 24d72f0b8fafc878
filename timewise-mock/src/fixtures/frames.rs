use polars::prelude::*;
use timewise_core::{Timestamp, datetime_series};

pub fn by_name(name: &str) -> Option<DataFrame> {
    match name {
        "mixed" => crate::with_dates_first(
            &["2020-01-01", "2020-01-02", "2020-01-03"],
            vec![
                Series::new("word".into(), ["hello", "there", "world"]),
                Series::new("n".into(), [42_i64, 43, 44]),
            ],
        ),
        "no_dates" => df!("word" => ["hello", "world"], "n" => [42_i64, 43]).ok(),
        "timestamps" => DataFrame::new(vec![
            Series::new("id".into(), [1_i64, 2]).into_column(),
            datetime_series(
                "observed",
                [Timestamp::from_ymd(2021, 6, 1), Timestamp::from_ymd(2021, 6, 2)],
            )
            .into_column(),
            Series::new("note".into(), ["2021-06-01T08:30:00Z", "n/a"]).into_column(),
        ])
        .ok(),
        "empty" => df!("date" => Vec::<&str>::new()).ok(),
        _ => None,
    }
}
