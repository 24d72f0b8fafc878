use std::io;
use std::sync::{Arc, Mutex};

use polars::prelude::*;
use timewise_core::{
    Floored, Period, PeriodUnit, Timestamp, TimewiseError, datetime_series, floor_date,
    floor_periods, is_datetime_string,
};

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn near_lower_bound() -> Series {
    // 1677-09-22 is representable; the start of 1677 is not.
    let early = Timestamp::from_ymd(1677, 9, 22);
    let later = Timestamp::from_ymd(2000, 6, 15);
    datetime_series("ts", [early, None, later])
}

fn labels(series: &Series) -> Vec<Option<String>> {
    series
        .str()
        .unwrap()
        .into_iter()
        .map(|s| s.map(str::to_string))
        .collect()
}

#[test]
fn unrepresentable_period_start_falls_back_to_periods() {
    let s = near_lower_bound();
    let out = floor_date(&s, PeriodUnit::YEAR).unwrap();
    assert!(out.is_fallback());
    assert!(out.timestamps().is_none());

    let Floored::Periods(periods) = &out else {
        panic!("expected period fallback");
    };
    assert_eq!(periods.len(), 3);
    assert_eq!(periods.name(), "ts");
    assert!(periods.periods()[1].is_none());

    let series = out.into_series();
    assert_eq!(series.name().as_str(), "ts");
    assert_eq!(
        labels(&series),
        vec![Some("1677".to_string()), None, Some("2000".to_string())]
    );
}

#[test]
fn fallback_labels_read_as_datetime_like() {
    let series = floor_date(&near_lower_bound(), PeriodUnit::YEAR)
        .unwrap()
        .into_series();
    assert!(is_datetime_string(&series.get(0).unwrap()));
    assert!(!is_datetime_string(&series.get(1).unwrap()));
}

#[test]
fn representable_units_do_not_fall_back() {
    let out = floor_date(&near_lower_bound(), PeriodUnit::Day).unwrap();
    assert!(!out.is_fallback());
    assert_eq!(out.timestamps().unwrap().null_count(), 1);
}

#[test]
fn fallback_emits_a_warning() {
    let buf = Capture::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        floor_date(&near_lower_bound(), PeriodUnit::YEAR).unwrap();
    });

    let logged = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
    assert!(logged.contains("WARN"), "{logged}");
    assert!(logged.contains("returning periods instead"), "{logged}");
}

#[test]
fn period_columns_can_be_floored_again() {
    let out = floor_date(&near_lower_bound(), PeriodUnit::YEAR).unwrap();
    let periods = out.periods().unwrap();
    let again = floor_periods(periods, PeriodUnit::YEAR).unwrap();
    assert_eq!(again.periods(), Some(periods));
}

#[test]
fn periods_report_their_start() {
    let ts = Timestamp::from_ymd_hms(2020, 5, 17, 8, 30, 0).unwrap();
    let p = Period::of(ts, PeriodUnit::Month).unwrap();
    assert_eq!(p.to_timestamp(), Timestamp::from_ymd(2020, 5, 1));
    assert_eq!(p.unit(), PeriodUnit::Month);
}

#[test]
fn non_temporal_series_is_a_type_mismatch() {
    for series in [
        Series::new("x".into(), [1_i64, 2, 3]),
        Series::new("x".into(), [1.5, 2.5]),
        Series::new("x".into(), ["2020-01-01"]),
        Series::new("x".into(), [true]),
    ] {
        let err = floor_date(&series, PeriodUnit::Day).unwrap_err();
        assert!(matches!(err, TimewiseError::TypeMismatch { .. }), "{err}");
    }
}
