//! Mean lunation and the fundamental lunar arguments.
//!
//! Shared by the phase and eclipse searches. Everything is a polynomial in the
//! lunation index `k` (0 = new moon of 2000-Jan-06) and `T = k / 1236.85`.
//!
//! Source: Meeus, "Astronomical Algorithms", ch. 49.

use astro_time::sin_deg;

/// JDE of the new moon with lunation index 0.
pub const LUNATION_EPOCH_JD: f64 = 2_451_550.097_66;

/// Mean synodic month in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530_588_861;

/// Lunations per Julian century.
const LUNATIONS_PER_CENTURY: f64 = 1236.85;

/// Fractional lunation index of a Julian Date.
pub fn lunation_index(jd: f64) -> f64 {
    (jd - LUNATION_EPOCH_JD) / SYNODIC_MONTH_DAYS
}

/// Fundamental arguments of one lunation, angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunationArgs {
    pub k: f64,
    /// Julian centuries, `k / 1236.85`.
    pub t: f64,
    /// Eccentricity factor of the Earth's orbit.
    pub e: f64,
    /// Sun's mean anomaly.
    pub m: f64,
    /// Moon's mean anomaly.
    pub m1: f64,
    /// Moon's argument of latitude.
    pub f: f64,
    /// Longitude of the ascending node.
    pub omega: f64,
    /// Mean phase instant (JDE) before periodic corrections.
    pub mean_jd: f64,
}

impl LunationArgs {
    pub fn at(k: f64) -> Self {
        let t = k / LUNATIONS_PER_CENTURY;
        let t2 = t * t;
        let t3 = t2 * t;
        let t4 = t3 * t;
        Self {
            k,
            t,
            e: 1.0 - 0.002_516 * t - 0.000_007_4 * t2,
            m: 2.5534 + 29.105_356_7 * k - 0.000_001_4 * t2 - 0.000_000_11 * t3,
            m1: 201.5643 + 385.816_935_28 * k + 0.010_758_2 * t2 + 0.000_012_38 * t3
                - 0.000_000_058 * t4,
            f: 160.7108 + 390.670_502_84 * k - 0.001_611_8 * t2 - 0.000_002_27 * t3
                + 0.000_000_011 * t4,
            omega: 124.7746 - 1.563_755_88 * k + 0.002_067_2 * t2 + 0.000_002_15 * t3,
            mean_jd: LUNATION_EPOCH_JD + SYNODIC_MONTH_DAYS * k + 0.000_154_37 * t2
                - 0.000_000_150 * t3
                + 0.000_000_000_73 * t4,
        }
    }
}

/// Planetary arguments A1..A14 (Meeus table 49.A, "additional corrections").
const PLANETARY: [(f64, f64, f64); 14] = [
    (0.000_325, 299.77, 0.107_408),
    (0.000_165, 251.88, 0.016_321),
    (0.000_164, 251.83, 26.651_886),
    (0.000_126, 349.42, 36.412_478),
    (0.000_110, 84.66, 18.206_239),
    (0.000_062, 141.74, 53.303_771),
    (0.000_060, 207.14, 2.453_732),
    (0.000_056, 154.84, 7.306_86),
    (0.000_047, 34.52, 27.261_239),
    (0.000_042, 207.19, 0.121_824),
    (0.000_040, 291.34, 1.844_379),
    (0.000_037, 161.72, 24.198_154),
    (0.000_035, 239.56, 25.513_099),
    (0.000_023, 331.55, 3.592_518),
];

/// Sum of the planetary corrections, in days, common to all phases.
pub fn planetary_correction(args: &LunationArgs) -> f64 {
    PLANETARY
        .iter()
        .enumerate()
        .map(|(i, &(amp, phase, rate))| {
            // A1 carries a small secular term
            let secular = if i == 0 { -0.009_173 * args.t * args.t } else { 0.0 };
            amp * sin_deg(phase + rate * args.k + secular)
        })
        .sum()
}
