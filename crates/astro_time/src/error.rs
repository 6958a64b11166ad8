//! Error types for time conversions.

use thiserror::Error;

/// Errors from Julian date ↔ civil instant conversion.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// The Julian date was NaN or infinite.
    #[error("Julian date is not a finite number")]
    NonFinite,
    /// The Julian date cannot be represented as a civil instant.
    #[error("Julian date {0} is outside the representable range")]
    OutOfRange(f64),
    /// A calendar date that does not exist (e.g. February 30th).
    #[error("invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
}
