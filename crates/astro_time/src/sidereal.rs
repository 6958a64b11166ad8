//! Greenwich and local mean sidereal time.
//!
//! The engine does not distinguish UT1 from UTC; the ~1 s difference is far
//! below the consumer precision targeted here.
//!
//! Source: Meeus, "Astronomical Algorithms", eq. 12.4.

use std::f64::consts::TAU;

use crate::julian::{J2000_JD, julian_centuries};

/// Greenwich Mean Sidereal Time at a Julian Date, radians in [0, 2π).
///
/// θ₀ = 280.46061837° + 360.98564736629°·(JD − 2451545) + 0.000387933°·T² − T³/38710000
pub fn gmst_rad(jd: f64) -> f64 {
    let t = julian_centuries(jd);
    let deg = 280.460_618_37 + 360.985_647_366_29 * (jd - J2000_JD) + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    deg.to_radians().rem_euclid(TAU)
}

/// Local Sidereal Time from GMST and observer east longitude.
///
/// LST = GMST + longitude_east_rad, radians in [0, 2π).
pub fn local_sidereal_time_rad(gmst: f64, longitude_east_rad: f64) -> f64 {
    (gmst + longitude_east_rad).rem_euclid(TAU)
}
