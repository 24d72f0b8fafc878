use timewise_core::{DataFrame, DetectionRow, Floored, Frequency, Series};
use timewise_types::{
    DetectConfig, FrequencyConfig, MIN_FREQUENCY_SAMPLE, PeriodUnit, TimewiseConfig,
    TimewiseError,
};

/// Configured entry point to the flooring, calendar, detection, and inference helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timewise {
    pub(crate) cfg: TimewiseConfig,
}

/// Builder for constructing a `Timewise` instance with custom configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimewiseBuilder {
    cfg: TimewiseConfig,
}

impl TimewiseBuilder {
    /// Create a new builder with defaults.
    ///
    /// Defaults: floor to days, sample the first ten values for frequency
    /// inference, keep business-calendar codes, log detection at `debug`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Unit used by [`Timewise::floor_date`].
    #[must_use]
    pub const fn floor_unit(mut self, unit: PeriodUnit) -> Self {
        self.cfg.floor_unit = unit;
        self
    }

    /// Number of leading values examined by frequency inference.
    ///
    /// Larger samples catch irregular spacing earlier in the series at the cost
    /// of more work per call.
    #[must_use]
    pub const fn sample_size(mut self, n: usize) -> Self {
        self.cfg.frequency.sample_size = n;
        self
    }

    /// Map business-calendar frequency codes to plain-calendar ones (`B` → `D`).
    #[must_use]
    pub const fn force_regular(mut self, yes: bool) -> Self {
        self.cfg.frequency.force_regular = yes;
        self
    }

    /// Log column detection results at `info` instead of `debug`.
    #[must_use]
    pub const fn verbose(mut self, yes: bool) -> Self {
        self.cfg.detect.verbose = yes;
        self
    }

    /// Replace the whole configuration, e.g. one loaded from a file.
    #[must_use]
    pub const fn config(mut self, cfg: TimewiseConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the `Timewise` instance.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the frequency sample size is below
    /// [`MIN_FREQUENCY_SAMPLE`].
    pub fn build(self) -> Result<Timewise, TimewiseError> {
        if self.cfg.frequency.sample_size < MIN_FREQUENCY_SAMPLE {
            return Err(TimewiseError::InvalidArg(format!(
                "sample_size must be at least {MIN_FREQUENCY_SAMPLE}, got {}",
                self.cfg.frequency.sample_size
            )));
        }
        Ok(Timewise { cfg: self.cfg })
    }
}

impl Timewise {
    /// Start building a new `Timewise` instance.
    ///
    /// ```rust
    /// use timewise::{PeriodUnit, Timewise};
    ///
    /// let tw = Timewise::builder()
    ///     .floor_unit(PeriodUnit::WEEK)
    ///     .sample_size(20)
    ///     .verbose(true)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(tw.config().frequency.sample_size, 20);
    /// ```
    #[must_use]
    pub fn builder() -> TimewiseBuilder {
        TimewiseBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &TimewiseConfig {
        &self.cfg
    }

    /// Floor every timestamp of `series` to the start of its period in the
    /// configured unit.
    ///
    /// # Errors
    /// Returns `TypeMismatch` unless `series` is a naive `Datetime` or a `Date` column.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "timewise::floor_date",
            skip(self, series),
            fields(unit = %self.cfg.floor_unit, len = series.len()),
        )
    )]
    pub fn floor_date(&self, series: &Series) -> Result<Floored, TimewiseError> {
        timewise_core::floor_date(series, self.cfg.floor_unit)
    }

    /// Floor every timestamp of `series` to the start of its period in `unit`.
    ///
    /// # Errors
    /// Returns `TypeMismatch` unless `series` is a naive `Datetime` or a `Date` column.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "timewise::floor_date_with",
            skip(self, series, unit),
            fields(unit = %unit, len = series.len()),
        )
    )]
    pub fn floor_date_with(&self, series: &Series, unit: PeriodUnit) -> Result<Floored, TimewiseError> {
        timewise_core::floor_date(series, unit)
    }

    /// Floor `column` of `frame` in the configured unit, keeping the other columns.
    ///
    /// # Errors
    /// - `NotFound` if `frame` has no such column.
    /// - `TypeMismatch` unless the column is a naive `Datetime` or a `Date` column.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "timewise::floor_column",
            skip(self, frame),
            fields(unit = %self.cfg.floor_unit, rows = frame.height()),
        )
    )]
    pub fn floor_column(&self, frame: &DataFrame, column: &str) -> Result<DataFrame, TimewiseError> {
        timewise_core::floor_column(frame, column, self.cfg.floor_unit)
    }

    /// Week of the month (1 to 5) of every date in `series`.
    ///
    /// # Errors
    /// Returns `TypeMismatch` unless `series` is a `Datetime` or `Date` column.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "timewise::week_of_month", skip(self, series), fields(len = series.len()))
    )]
    pub fn week_of_month(&self, series: &Series) -> Result<Series, TimewiseError> {
        timewise_core::week_of_month(series)
    }

    /// Flag the columns of `frame` whose first value looks like a date.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "timewise::detect_timeseries_columns", skip(self, frame), fields(cols = frame.width()))
    )]
    #[must_use]
    pub fn detect_timeseries_columns(&self, frame: &DataFrame) -> DetectionRow {
        timewise_core::detect_timeseries_columns(frame, &self.cfg.detect)
    }

    /// True if any column of `frame` looks date-like.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "timewise::has_timeseries_columns", skip(self, frame), fields(cols = frame.width()))
    )]
    #[must_use]
    pub fn has_timeseries_columns(&self, frame: &DataFrame) -> bool {
        timewise_core::has_timeseries_columns(frame, &self.cfg.detect)
    }

    /// Name of the first date-like column of `frame`.
    ///
    /// # Errors
    /// Returns `NotFound` if no column looks date-like.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "timewise::get_timeseries_colname", skip(self, frame), fields(cols = frame.width()))
    )]
    pub fn get_timeseries_colname(&self, frame: &DataFrame) -> Result<String, TimewiseError> {
        timewise_core::get_timeseries_colname(frame, &self.cfg.detect)
    }

    /// Infer the sampling frequency of `series` from its leading values.
    ///
    /// # Errors
    /// - `TypeMismatch` if the series holds neither naive datetimes, dates, strings, nor integers.
    /// - `Parse` if a sampled string is not a date.
    /// - `FrequencyUndetermined` if no regular spacing is found.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "timewise::frequency",
            skip(self, series),
            fields(
                sample_size = self.cfg.frequency.sample_size,
                force_regular = self.cfg.frequency.force_regular,
            ),
        )
    )]
    pub fn frequency(&self, series: &Series) -> Result<Frequency, TimewiseError> {
        timewise_core::infer_series_frequency(series, &self.cfg.frequency)
    }

    /// Frequency of `series` rendered as a code such as `"D"` or `"BME"`.
    ///
    /// # Errors
    /// Same as [`Timewise::frequency`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "timewise::pandas_frequency", skip(self, series), fields(len = series.len()))
    )]
    pub fn pandas_frequency(&self, series: &Series) -> Result<String, TimewiseError> {
        self.frequency(series).map(|f| f.to_string())
    }

    /// Detection settings in effect.
    #[must_use]
    pub const fn detect_config(&self) -> DetectConfig {
        self.cfg.detect
    }

    /// Frequency inference settings in effect.
    #[must_use]
    pub const fn frequency_config(&self) -> FrequencyConfig {
        self.cfg.frequency
    }
}
