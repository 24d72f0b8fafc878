//! Time-series helpers over polars [`Series`](crate::Series) values.
//!
//! Modules include:
//! - `floor`: round timestamps down to the start of their period
//! - `calendar`: week-of-month and month/business-day boundaries
//! - `infer`: infer the regular sampling frequency of a timestamp sequence
/// Week-of-month and month boundary helpers.
pub mod calendar;
/// Date flooring with graceful fallback to periods.
pub mod floor;
/// Frequency inference and business-to-calendar regularization.
pub mod infer;
