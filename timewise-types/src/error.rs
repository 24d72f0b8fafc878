use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the timewise workspace.
///
/// Input shape mismatches, undeterminable frequencies, missing columns,
/// invalid arguments, and hard parse failures all surface through this enum.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TimewiseError {
    /// The input was not one of the accepted sequence or table shapes.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Description of the accepted shape (e.g. "datetime series").
        expected: String,
        /// Description of the shape actually received (e.g. "int64").
        found: String,
    },

    /// No regular sampling interval could be inferred from the sampled prefix.
    #[error("frequency could not be determined: {0}")]
    FrequencyUndetermined(String),

    /// A resource (usually a column) could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "datetime-like column".
        what: String,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The underlying dataframe library rejected an operation.
    #[error("dataframe error: {0}")]
    Frame(String),

    /// A value that had to be a date/time could not be parsed as one.
    #[error("could not parse {value:?} as a date/time")]
    Parse {
        /// The offending input text.
        value: String,
    },
}

impl TimewiseError {
    /// Helper: build a `TypeMismatch` error.
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Helper: build a `FrequencyUndetermined` error with a reason.
    pub fn undetermined(reason: impl Into<String>) -> Self {
        Self::FrequencyUndetermined(reason.into())
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `Parse` error for the offending text.
    pub fn parse(value: impl Into<String>) -> Self {
        Self::Parse {
            value: value.into(),
        }
    }

    /// Returns true if the error stems from the caller handing over the wrong
    /// kind of input rather than from the data itself.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. } | Self::InvalidArg(_))
    }
}
