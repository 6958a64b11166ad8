//! Time utilities for the astro engine.
//!
//! This crate provides:
//! - Julian Date ↔ Gregorian calendar conversions
//! - `chrono` civil instant ↔ Julian Date, local midnight and day helpers
//! - Greenwich / local mean sidereal time
//! - Degree-based trigonometry and angle normalization

pub mod angle;
pub mod civil;
pub mod error;
pub mod julian;
pub mod sidereal;

pub use angle::{cos_deg, frac, normalize_deg, normalize_rad, sin_deg, tan_deg};
pub use civil::{
    add_days, datetime_to_jd, day_of_year, days_in_year, is_same_day, jd_to_datetime,
    local_midnight, midnight_jd, truncate_to_midnight,
};
pub use error::TimeError;
pub use julian::{
    J2000_JD, JULIAN_CENTURY_DAYS, MJD_OFFSET, SECONDS_PER_DAY, UNIX_EPOCH_JD, calendar_to_jd,
    jd_to_calendar, julian_centuries,
};
pub use sidereal::{gmst_rad, local_sidereal_time_rad};
