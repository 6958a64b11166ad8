//! Error types for positional and calendar calculations.

use astro_time::TimeError;
use thiserror::Error;

/// Errors from the calculators in this crate.
///
/// Astronomical edge cases (circumpolar bodies, missing events) are not
/// errors; they surface as absent range endpoints or [`crate::Outcome`]
/// defaults.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CalcError {
    /// Invalid geographic location parameter.
    #[error("invalid location: {0}")]
    InvalidLocation(&'static str),
    /// Error from time conversion.
    #[error("time error: {0}")]
    Time(#[from] TimeError),
}
