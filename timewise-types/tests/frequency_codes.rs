use chrono::{Month, Weekday};
use timewise_types::{Anchor, BUSINESS_TO_CALENDAR, Frequency, Rule};

fn freq(code: &str) -> Frequency {
    code.parse().expect("valid frequency code")
}

#[test]
fn display_matches_canonical_codes() {
    assert_eq!(Frequency::new(Rule::Day).to_string(), "D");
    assert_eq!(Frequency::new(Rule::Minute).with_multiple(15).to_string(), "15min");
    assert_eq!(Frequency::new(Rule::Week).to_string(), "W-SUN");
    assert_eq!(Frequency::new(Rule::BusinessQuarterEnd).to_string(), "BQE-DEC");
    assert_eq!(Frequency::new(Rule::YearStart).to_string(), "YS-JAN");
    assert_eq!(
        Frequency::new(Rule::WeekOfMonth)
            .anchored(Anchor::WeekOfMonth {
                week: 3,
                weekday: Weekday::Fri
            })
            .to_string(),
        "WOM-3FRI"
    );
}

#[test]
fn parses_counts_anchors_and_legacy_aliases() {
    assert_eq!(freq("2D"), Frequency::new(Rule::Day).with_multiple(2));
    assert_eq!(freq("BM").rule(), Rule::BusinessMonthEnd);
    assert_eq!(freq("BA").rule(), Rule::BusinessYearEnd);
    assert_eq!(freq("BAS").rule(), Rule::BusinessYearStart);
    assert_eq!(freq("T").rule(), Rule::Minute);
    assert_eq!(
        freq("QE-NOV").anchor(),
        Some(Anchor::Month(Month::November))
    );
    assert_eq!(freq("W-WED").anchor(), Some(Anchor::Weekday(Weekday::Wed)));
}

#[test]
fn rejects_malformed_codes() {
    for code in [
        "", "XYZ", "D-MON", "W-JAN", "WOM", "WOM-5MON", "QE-FOO", "-", "--1D", "WOM-\u{e9}FRI",
        "WOM-3\u{e9}", "WOM-",
    ] {
        assert!(code.parse::<Frequency>().is_err(), "{code} should not parse");
    }
}

#[test]
fn business_table_has_eight_entries_and_is_idempotent() {
    assert_eq!(BUSINESS_TO_CALENDAR.len(), 8);
    for (business, calendar) in BUSINESS_TO_CALENDAR {
        assert_eq!(freq(business).regularize(), freq(calendar));
        assert_eq!(freq(calendar).regularize(), freq(calendar));
    }
}

#[test]
fn regularize_keeps_anchor_and_multiple() {
    assert_eq!(freq("B").regularize().to_string(), "D");
    assert_eq!(freq("BQE-DEC").regularize().to_string(), "QE-DEC");
    assert_eq!(freq("2BMS").regularize().to_string(), "2MS");
    assert_eq!(freq("BA-JUN").regularize().to_string(), "YE-JUN");
    assert_eq!(freq("bh").regularize().to_string(), "bh");
    assert_eq!(freq("W-MON").regularize(), freq("W-MON"));
    assert_eq!(freq("15min").regularize(), freq("15min"));
}

#[test]
fn negative_and_wide_multiples_round_trip() {
    assert_eq!(Frequency::new(Rule::Day).with_multiple(-1).to_string(), "-1D");
    assert_eq!(freq("-1D"), Frequency::new(Rule::Day).with_multiple(-1));
    assert_eq!(freq("-2W-FRI").multiple(), -2);
    assert_eq!(
        Frequency::new(Rule::Nano)
            .with_multiple(5_000_000_001)
            .to_string(),
        "5000000001ns"
    );
    assert_eq!(freq("5000000001ns").multiple(), 5_000_000_001);
    assert_eq!(freq("-3BQE-MAR").regularize().to_string(), "-3QE-MAR");
}
