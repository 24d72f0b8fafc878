//! Timewise error, unit, frequency, and configuration primitives.
#![warn(missing_docs)]

mod codes;
mod config;
mod error;
mod frequency;
mod unit;

pub use config::{
    DEFAULT_FREQUENCY_SAMPLE, DetectConfig, FrequencyConfig, MIN_FREQUENCY_SAMPLE, TimewiseConfig,
};
pub use error::TimewiseError;
pub use frequency::{Anchor, BUSINESS_TO_CALENDAR, Frequency, Rule};
pub use unit::PeriodUnit;
