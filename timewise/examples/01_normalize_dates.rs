use chrono::NaiveDate;
use timewise::{PeriodUnit, Timewise};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Route timewise diagnostics to stderr; RUST_LOG=debug shows inference details.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // 2. Build a configured instance.
    let tw = Timewise::builder()
        .floor_unit(PeriodUnit::Month)
        .verbose(true)
        .build()?;

    // 3. Find the date column of a data frame.
    let frame = timewise_mock::frame_by_name("timestamps").ok_or("missing fixture")?;
    let column = tw.get_timeseries_colname(&frame)?;
    println!("date column: {column}");
    println!("{}", tw.floor_column(&frame, &column)?);

    // 4. Infer frequencies, with and without business-calendar regularization.
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).ok_or("bad date")?;
    let business = timewise_mock::business_days(start, 15);
    println!("business days: {}", tw.pandas_frequency(&business)?);
    let regular = Timewise::builder().force_regular(true).build()?;
    println!("business days, regularized: {}", regular.pandas_frequency(&business)?);
    let month_ends = timewise_mock::business_month_ends(start, 6);
    println!("month ends: {}", tw.frequency(&month_ends)?);

    // 5. Floor to months and compute the week of the month.
    let floored = tw.floor_date(&business)?;
    let weeks = tw.week_of_month(&business)?;
    println!("floored: {}", floored.into_series());
    println!("week of month: {weeks}");

    // 6. Dates before 1678 cannot be floored to a representable year start.
    let early = timewise_mock::series_by_name("pre_1677").ok_or("missing fixture")?;
    let years = tw.floor_date_with(&early, PeriodUnit::YEAR)?;
    println!("fell back to periods: {}", years.is_fallback());
    println!("{}", years.into_series());

    // 7. Descending data yields a negative multiple.
    let descending = timewise_mock::series_by_name("descending").ok_or("missing fixture")?;
    println!("descending: {}", tw.pandas_frequency(&descending)?);

    Ok(())
}
