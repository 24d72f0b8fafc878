//! Re-export of foundational types from `timewise-types`.
// Consolidated re-exports so downstream crates can depend on `timewise-core` only

pub use timewise_types::{
    Anchor, BUSINESS_TO_CALENDAR, DEFAULT_FREQUENCY_SAMPLE, DetectConfig, Frequency,
    FrequencyConfig, MIN_FREQUENCY_SAMPLE, PeriodUnit, Rule, TimewiseConfig, TimewiseError,
};
