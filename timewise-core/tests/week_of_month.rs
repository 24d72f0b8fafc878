use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use proptest::prelude::*;
use timewise_core::{Timestamp, TimewiseError, datetime_series, week_of_month};

fn weeks(series: &Series) -> Vec<Option<i64>> {
    series.i64().unwrap().into_iter().collect()
}

proptest! {
    #[test]
    fn matches_day_formula(days in proptest::collection::vec(0i64..150_000, 1..40)) {
        let epoch = NaiveDate::from_ymd_opt(1800, 1, 1).unwrap();
        let dates: Vec<NaiveDate> = days
            .iter()
            .map(|&d| epoch + chrono::Duration::days(d))
            .collect();
        let stamps = dates
            .iter()
            .map(|d| Timestamp::from_naive(d.and_hms_opt(12, 0, 0).unwrap()));
        let out = week_of_month(&datetime_series("date", stamps)).unwrap();
        let expected: Vec<Option<i64>> = dates
            .iter()
            .map(|d| Some((i64::from(d.day()) - 1) / 7 + 1))
            .collect();
        prop_assert_eq!(weeks(&out), expected);
    }
}

#[test]
fn boundary_days() {
    let stamps = [1, 7, 8, 14, 15, 22, 29, 31].map(|d| Timestamp::from_ymd(2020, 1, d));
    let out = week_of_month(&datetime_series("date", stamps)).unwrap();
    assert_eq!(
        weeks(&out),
        [1, 1, 2, 2, 3, 4, 5, 5].map(Some).to_vec()
    );
}

#[test]
fn keeps_positions_and_renames() {
    let stamps = [
        Timestamp::from_ymd(2021, 3, 9),
        None,
        Timestamp::from_ymd(2021, 3, 30),
    ];
    let out = week_of_month(&datetime_series("when", stamps)).unwrap();
    assert_eq!(out.name().as_str(), "week_of_month");
    assert_eq!(out.dtype(), &DataType::Int64);
    assert_eq!(weeks(&out), vec![Some(2), None, Some(5)]);
}

#[test]
fn date_columns_are_accepted() {
    let dates = Series::new(
        "d".into(),
        [
            NaiveDate::from_ymd_opt(2020, 2, 29).unwrap(),
            NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
        ],
    );
    assert_eq!(weeks(&week_of_month(&dates).unwrap()), vec![Some(5), Some(1)]);
}

#[test]
fn rejects_non_datetime_series() {
    let err = week_of_month(&Series::new("x".into(), ["2020-01-01"])).unwrap_err();
    assert!(matches!(err, TimewiseError::TypeMismatch { .. }));
}
