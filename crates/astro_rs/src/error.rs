//! Error type for the convenience wrapper.

use astro_calc::CalcError;
use astro_time::TimeError;
use thiserror::Error;

/// Errors from [`crate::Astro`].
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum AstroError {
    #[error("calculation error: {0}")]
    Calc(#[from] CalcError),
    #[error("time error: {0}")]
    Time(#[from] TimeError),
}
