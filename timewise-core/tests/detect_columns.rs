use polars::prelude::*;
use timewise_core::{
    DetectConfig, Timestamp, TimewiseError, datetime_series, detect_timeseries_columns,
    get_timeseries_colname, has_timeseries_columns, is_datetime_string,
};

fn mixed() -> DataFrame {
    df!(
        "date" => ["2020-01-01", "2020-01-02"],
        "word" => ["hello", "world"],
        "n" => [42_i64, 43],
    )
    .unwrap()
}

#[test]
fn first_row_detection() {
    let row = detect_timeseries_columns(&mixed(), &DetectConfig::default());
    assert_eq!(row.flags(), vec![true, false, false]);
    assert_eq!(row.get("date"), Some(true));
    assert_eq!(row.get("missing"), None);
    assert!(has_timeseries_columns(&mixed(), &DetectConfig::default()));
    assert_eq!(
        get_timeseries_colname(&mixed(), &DetectConfig::default()).unwrap(),
        "date"
    );
}

#[test]
fn picks_the_first_match_in_column_order() {
    let frame = DataFrame::new(vec![
        Series::new("id".into(), [1_i64]).into_column(),
        datetime_series("created", [Timestamp::from_ymd(2020, 5, 1)]).into_column(),
        Series::new("updated".into(), ["2020-06-01 10:00"]).into_column(),
    ])
    .unwrap();
    let cfg = DetectConfig { verbose: true };
    assert_eq!(get_timeseries_colname(&frame, &cfg).unwrap(), "created");
}

#[test]
fn no_datetime_column_is_an_explicit_error() {
    let frame = df!("word" => ["hello"], "n" => [42_i64]).unwrap();
    let cfg = DetectConfig::default();
    assert!(!has_timeseries_columns(&frame, &cfg));
    assert!(matches!(
        get_timeseries_colname(&frame, &cfg),
        Err(TimewiseError::NotFound { .. })
    ));
}

#[test]
fn only_the_first_row_is_consulted() {
    let frame = df!("late" => ["n/a", "2020-01-01"]).unwrap();
    assert!(!has_timeseries_columns(&frame, &DetectConfig::default()));
}

#[test]
fn frames_without_rows_detect_nothing() {
    let frame = df!("date" => Vec::<&str>::new()).unwrap();
    let row = detect_timeseries_columns(&frame, &DetectConfig::default());
    assert_eq!(row.flags(), vec![false]);
    assert!(get_timeseries_colname(&frame, &DetectConfig::default()).is_err());

    let empty = detect_timeseries_columns(&DataFrame::empty(), &DetectConfig::default());
    assert!(empty.is_empty());
}

#[test]
fn value_classification() {
    assert!(is_datetime_string(&AnyValue::String("2020-01-01T00:00:00Z")));
    assert!(is_datetime_string(&AnyValue::StringOwned("Jan 2020".into())));
    assert!(is_datetime_string(&AnyValue::Datetime(0, TimeUnit::Nanoseconds, None)));
    assert!(is_datetime_string(&AnyValue::Date(18_262)));
    assert!(is_datetime_string(&AnyValue::String("2020Q1")));
    assert!(!is_datetime_string(&AnyValue::String("hello")));
    assert!(!is_datetime_string(&AnyValue::Int64(42)));
    assert!(!is_datetime_string(&AnyValue::Int64(20_200_101)));
    assert!(!is_datetime_string(&AnyValue::Float64(1.5)));
    assert!(!is_datetime_string(&AnyValue::Boolean(true)));
    assert!(!is_datetime_string(&AnyValue::Null));
}

#[test]
fn detection_row_renders_as_a_table() {
    let row = detect_timeseries_columns(&mixed(), &DetectConfig::default());
    let text = row.to_string();
    let mut lines = text.lines();
    let header = lines.next().unwrap();
    let values = lines.next().unwrap();
    assert!(header.contains("date") && header.contains("word"));
    assert_eq!(values.split_whitespace().collect::<Vec<_>>(), ["True", "False", "False"]);
}

#[test]
fn detection_row_converts_to_a_one_row_frame() {
    let row = detect_timeseries_columns(&mixed(), &DetectConfig::default());
    let frame = row.to_frame().unwrap();
    assert_eq!(frame.shape(), (1, 3));
    assert_eq!(frame.get_column_names(), mixed().get_column_names());
    let date = frame.column("date").unwrap().as_materialized_series();
    assert_eq!(date.get(0).unwrap(), AnyValue::Boolean(true));
}

#[test]
fn detection_row_serializes_pairs_in_order() {
    let row = detect_timeseries_columns(&mixed(), &DetectConfig::default());
    let row_json = serde_json::to_value(&row).unwrap();
    assert_eq!(row_json["entries"][0][0], "date");
    assert_eq!(row_json["entries"][0][1], true);
    assert_eq!(row_json["entries"][2][0], "n");
}
