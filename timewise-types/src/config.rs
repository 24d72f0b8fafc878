//! Configuration types shared by the core helpers and the `Timewise` facade.

use serde::{Deserialize, Serialize};

use crate::PeriodUnit;

/// Default number of leading timestamps examined by frequency inference.
pub const DEFAULT_FREQUENCY_SAMPLE: usize = 10;

/// Minimum number of timestamps frequency inference can work with.
pub const MIN_FREQUENCY_SAMPLE: usize = 3;

/// Controls frequency inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyConfig {
    /// Only the first `sample_size` values are examined.
    pub sample_size: usize,
    /// Map business-calendar codes to their plain-calendar counterparts (`B` → `D`).
    pub force_regular: bool,
}

impl Default for FrequencyConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_FREQUENCY_SAMPLE,
            force_regular: false,
        }
    }
}

impl FrequencyConfig {
    /// Default sample size with the given `force_regular` flag.
    #[must_use]
    pub const fn regular(force_regular: bool) -> Self {
        Self {
            sample_size: DEFAULT_FREQUENCY_SAMPLE,
            force_regular,
        }
    }
}

/// Controls datetime column detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DetectConfig {
    /// Log the detection row at `info` level instead of `debug`.
    pub verbose: bool,
}

/// Global configuration for the `Timewise` facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimewiseConfig {
    /// Unit used by `floor_date` when the caller does not pass one.
    pub floor_unit: PeriodUnit,
    /// Frequency inference settings.
    pub frequency: FrequencyConfig,
    /// Column detection settings.
    pub detect: DetectConfig,
}
