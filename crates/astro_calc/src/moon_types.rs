//! Types for lunar position and rise/set.

use chrono::{DateTime, FixedOffset};

use crate::position::Position;

/// Topocentric lunar position with the by-products of the series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonPosition {
    /// Azimuth/elevation, refraction included.
    pub position: Position,
    /// Geocentric ecliptic longitude in degrees [0, 360).
    pub ecliptic_longitude_deg: f64,
    /// Geocentric distance from the perturbation series, km.
    pub distance_km: f64,
}

/// Moonrise and moonset of one local day; either may not happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoonRiseSet {
    pub rise: Option<DateTime<FixedOffset>>,
    pub set: Option<DateTime<FixedOffset>>,
}
