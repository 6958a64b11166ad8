//! Earth–Moon distance and the instants of apogee and perigee.
//!
//! Distance: Meeus ch. 47, the Σr column of table 47.A.
//! Apsides: Meeus ch. 50, table 50.A.

use astro_time::{J2000_JD, cos_deg, julian_centuries, sin_deg};
use log::warn;

/// Constant term of the distance series, km.
pub const MEAN_DISTANCE_KM: f64 = 385_000.56;

/// Anomalistic months tried before an apsis search gives up.
pub const MAX_APSIS_STEPS: usize = 8;

/// Apogee or perigee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApsisKind {
    Apogee,
    Perigee,
}

impl ApsisKind {
    /// Half-integer apsis indices are apogees.
    const fn index_offset(self) -> f64 {
        match self {
            Self::Apogee => 0.5,
            Self::Perigee => 0.0,
        }
    }
}

/// Distance of the Moon at an instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonDistance {
    pub jd: f64,
    pub distance_km: f64,
}

/// `(D, M, M′, F, Σr)` with Σr in units of 0.001 km.
const DISTANCE_TERMS: [(f64, f64, f64, f64, f64); 60] = [
    (0.0, 0.0, 1.0, 0.0, -20_905_355.0),
    (2.0, 0.0, -1.0, 0.0, -3_699_111.0),
    (2.0, 0.0, 0.0, 0.0, -2_955_968.0),
    (0.0, 0.0, 2.0, 0.0, -569_925.0),
    (0.0, 1.0, 0.0, 0.0, 48_888.0),
    (0.0, 0.0, 0.0, 2.0, -3_149.0),
    (2.0, 0.0, -2.0, 0.0, 246_158.0),
    (2.0, -1.0, -1.0, 0.0, -152_138.0),
    (2.0, 0.0, 1.0, 0.0, -170_733.0),
    (2.0, -1.0, 0.0, 0.0, -204_586.0),
    (0.0, 1.0, -1.0, 0.0, -129_620.0),
    (1.0, 0.0, 0.0, 0.0, 108_743.0),
    (0.0, 1.0, 1.0, 0.0, 104_755.0),
    (2.0, 0.0, 0.0, -2.0, 10_321.0),
    (0.0, 0.0, 1.0, 2.0, 0.0),
    (0.0, 0.0, 1.0, -2.0, 79_661.0),
    (4.0, 0.0, -1.0, 0.0, -34_782.0),
    (0.0, 0.0, 3.0, 0.0, -23_210.0),
    (4.0, 0.0, -2.0, 0.0, -21_636.0),
    (2.0, 1.0, -1.0, 0.0, 24_208.0),
    (2.0, 1.0, 0.0, 0.0, 30_824.0),
    (1.0, 0.0, -1.0, 0.0, -8_379.0),
    (1.0, 1.0, 0.0, 0.0, -16_675.0),
    (2.0, -1.0, 1.0, 0.0, -12_831.0),
    (2.0, 0.0, 2.0, 0.0, -10_445.0),
    (4.0, 0.0, 0.0, 0.0, -11_650.0),
    (2.0, 0.0, -3.0, 0.0, 14_403.0),
    (0.0, 1.0, -2.0, 0.0, -7_003.0),
    (2.0, 0.0, -1.0, 2.0, 0.0),
    (2.0, -1.0, -2.0, 0.0, 10_056.0),
    (1.0, 0.0, 1.0, 0.0, 6_322.0),
    (2.0, -2.0, 0.0, 0.0, -9_884.0),
    (0.0, 1.0, 2.0, 0.0, 5_751.0),
    (0.0, 2.0, 0.0, 0.0, 0.0),
    (2.0, -2.0, -1.0, 0.0, -4_950.0),
    (2.0, 0.0, 1.0, -2.0, 4_130.0),
    (2.0, 0.0, 0.0, 2.0, 0.0),
    (4.0, -1.0, -1.0, 0.0, -3_958.0),
    (0.0, 0.0, 2.0, 2.0, 0.0),
    (3.0, 0.0, -1.0, 0.0, 3_258.0),
    (2.0, 1.0, 1.0, 0.0, 2_616.0),
    (4.0, -1.0, -2.0, 0.0, -1_897.0),
    (0.0, 2.0, -1.0, 0.0, -2_117.0),
    (2.0, 2.0, -1.0, 0.0, 2_354.0),
    (2.0, 1.0, -2.0, 0.0, 0.0),
    (2.0, -1.0, 0.0, -2.0, 0.0),
    (4.0, 0.0, 1.0, 0.0, -1_423.0),
    (0.0, 0.0, 4.0, 0.0, -1_117.0),
    (4.0, -1.0, 0.0, 0.0, -1_571.0),
    (1.0, 0.0, -2.0, 0.0, -1_739.0),
    (2.0, 1.0, 0.0, -2.0, 0.0),
    (0.0, 0.0, 2.0, -2.0, -4_421.0),
    (1.0, 1.0, 1.0, 0.0, 0.0),
    (3.0, 0.0, -2.0, 0.0, 0.0),
    (4.0, 0.0, -3.0, 0.0, 0.0),
    (2.0, -1.0, 2.0, 0.0, 0.0),
    (0.0, 2.0, 1.0, 0.0, 1_165.0),
    (1.0, 1.0, -1.0, 0.0, 0.0),
    (2.0, 0.0, 3.0, 0.0, 0.0),
    (2.0, 0.0, -1.0, -2.0, 8_752.0),
];

/// Geocentric distance of the Moon's centre in km.
pub fn moon_distance_km(jd: f64) -> f64 {
    let t = julian_centuries(jd);
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let d = 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0
        - t4 / 113_065_000.0;
    let m = 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0;
    let m1 = 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
        - t4 / 14_712_000.0;
    let f = 93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2 - t3 / 3_526_000.0
        + t4 / 863_310_000.0;
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;

    let sum_r: f64 = DISTANCE_TERMS
        .iter()
        .map(|&(cd, cm, cm1, cf, r)| {
            r * e.powi(cm.abs() as i32) * cos_deg(cd * d + cm * m + cm1 * m1 + cf * f)
        })
        .sum();
    MEAN_DISTANCE_KM + sum_r / 1000.0
}

// ---------------------------------------------------------------------------
// Apsides
// ---------------------------------------------------------------------------

/// `(D, M, F, coefficient, T coefficient)`, in days.
type ApsisTerm = (f64, f64, f64, f64, f64);

const APOGEE_TERMS: [ApsisTerm; 32] = [
    (2.0, 0.0, 0.0, 0.4392, 0.0),
    (4.0, 0.0, 0.0, 0.0684, 0.0),
    (0.0, 1.0, 0.0, 0.0456, -0.000_11),
    (2.0, -1.0, 0.0, 0.0426, -0.000_11),
    (0.0, 0.0, 2.0, 0.0212, 0.0),
    (1.0, 0.0, 0.0, -0.0189, 0.0),
    (6.0, 0.0, 0.0, 0.0144, 0.0),
    (4.0, -1.0, 0.0, 0.0113, 0.0),
    (2.0, 0.0, 2.0, 0.0047, 0.0),
    (1.0, 1.0, 0.0, 0.0036, 0.0),
    (8.0, 0.0, 0.0, 0.0035, 0.0),
    (6.0, -1.0, 0.0, 0.0034, 0.0),
    (2.0, 0.0, -2.0, -0.0034, 0.0),
    (2.0, -2.0, 0.0, 0.0022, 0.0),
    (3.0, 0.0, 0.0, -0.0017, 0.0),
    (4.0, 0.0, 2.0, 0.0013, 0.0),
    (8.0, -1.0, 0.0, 0.0011, 0.0),
    (4.0, -2.0, 0.0, 0.0010, 0.0),
    (10.0, 0.0, 0.0, 0.0009, 0.0),
    (3.0, 1.0, 0.0, 0.0007, 0.0),
    (0.0, 2.0, 0.0, 0.0006, 0.0),
    (2.0, 1.0, 0.0, 0.0005, 0.0),
    (2.0, 2.0, 0.0, 0.0005, 0.0),
    (6.0, 0.0, 2.0, 0.0004, 0.0),
    (6.0, -2.0, 0.0, 0.0004, 0.0),
    (10.0, -1.0, 0.0, 0.0004, 0.0),
    (5.0, 0.0, 0.0, -0.0004, 0.0),
    (4.0, 0.0, -2.0, -0.0004, 0.0),
    (0.0, 1.0, 2.0, 0.0003, 0.0),
    (12.0, 0.0, 0.0, 0.0003, 0.0),
    (2.0, -1.0, 2.0, 0.0003, 0.0),
    (1.0, -1.0, 0.0, -0.0003, 0.0),
];

const PERIGEE_TERMS: [ApsisTerm; 60] = [
    (2.0, 0.0, 0.0, -1.6769, 0.0),
    (4.0, 0.0, 0.0, 0.4589, 0.0),
    (6.0, 0.0, 0.0, -0.1856, 0.0),
    (8.0, 0.0, 0.0, 0.0883, 0.0),
    (2.0, -1.0, 0.0, -0.0773, 0.000_19),
    (0.0, 1.0, 0.0, 0.0502, -0.000_13),
    (10.0, 0.0, 0.0, -0.0460, 0.0),
    (4.0, -1.0, 0.0, 0.0422, -0.000_11),
    (6.0, -1.0, 0.0, -0.0256, 0.0),
    (12.0, 0.0, 0.0, 0.0253, 0.0),
    (1.0, 0.0, 0.0, 0.0237, 0.0),
    (8.0, -1.0, 0.0, 0.0162, 0.0),
    (14.0, 0.0, 0.0, -0.0145, 0.0),
    (0.0, 0.0, 2.0, 0.0129, 0.0),
    (3.0, 0.0, 0.0, -0.0112, 0.0),
    (10.0, -1.0, 0.0, -0.0104, 0.0),
    (16.0, 0.0, 0.0, 0.0086, 0.0),
    (12.0, -1.0, 0.0, 0.0069, 0.0),
    (5.0, 0.0, 0.0, 0.0066, 0.0),
    (2.0, 0.0, 2.0, -0.0053, 0.0),
    (18.0, 0.0, 0.0, -0.0052, 0.0),
    (14.0, -1.0, 0.0, -0.0046, 0.0),
    (7.0, 0.0, 0.0, -0.0041, 0.0),
    (2.0, 1.0, 0.0, 0.0040, 0.0),
    (20.0, 0.0, 0.0, 0.0032, 0.0),
    (1.0, 1.0, 0.0, -0.0032, 0.0),
    (16.0, -1.0, 0.0, 0.0031, 0.0),
    (4.0, 1.0, 0.0, -0.0029, 0.0),
    (9.0, 0.0, 0.0, 0.0027, 0.0),
    (4.0, 0.0, 2.0, 0.0027, 0.0),
    (2.0, -2.0, 0.0, -0.0027, 0.0),
    (4.0, -2.0, 0.0, 0.0024, 0.0),
    (6.0, -2.0, 0.0, -0.0021, 0.0),
    (22.0, 0.0, 0.0, -0.0021, 0.0),
    (18.0, -1.0, 0.0, -0.0021, 0.0),
    (6.0, 1.0, 0.0, 0.0019, 0.0),
    (11.0, 0.0, 0.0, -0.0018, 0.0),
    (8.0, 1.0, 0.0, -0.0014, 0.0),
    (4.0, 0.0, -2.0, -0.0014, 0.0),
    (6.0, 0.0, 2.0, -0.0014, 0.0),
    (3.0, 1.0, 0.0, 0.0014, 0.0),
    (5.0, 1.0, 0.0, -0.0014, 0.0),
    (13.0, 0.0, 0.0, 0.0013, 0.0),
    (20.0, -1.0, 0.0, 0.0013, 0.0),
    (3.0, 2.0, 0.0, 0.0011, 0.0),
    (4.0, -2.0, 2.0, -0.0011, 0.0),
    (1.0, 2.0, 0.0, -0.0010, 0.0),
    (22.0, -1.0, 0.0, -0.0009, 0.0),
    (0.0, 0.0, 4.0, -0.0008, 0.0),
    (6.0, 0.0, -2.0, 0.0008, 0.0),
    (2.0, 1.0, -2.0, 0.0008, 0.0),
    (0.0, 2.0, 0.0, 0.0007, 0.0),
    (0.0, -1.0, 2.0, 0.0007, 0.0),
    (2.0, 0.0, 4.0, 0.0007, 0.0),
    (0.0, -2.0, 2.0, -0.0006, 0.0),
    (2.0, 2.0, -2.0, -0.0006, 0.0),
    (24.0, 0.0, 0.0, 0.0006, 0.0),
    (4.0, 0.0, -4.0, 0.0005, 0.0),
    (2.0, 2.0, 0.0, 0.0005, 0.0),
    (1.0, -1.0, 0.0, -0.0004, 0.0),
];

/// Apsides per Julian century.
const APSIDES_PER_CENTURY: f64 = 1325.55;

/// Instant (JDE) of the apsis with index `k`; half-integer `k` are apogees.
pub fn apsis_jd(k: f64, kind: ApsisKind) -> f64 {
    let t = k / APSIDES_PER_CENTURY;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let d = 171.9179 + 335.910_604_6 * k - 0.010_038_3 * t2 - 0.000_011_56 * t3
        + 0.000_000_055 * t4;
    let m = 347.3477 + 27.157_772_1 * k - 0.000_813_0 * t2 - 0.000_001_0 * t3;
    let f = 316.6109 + 364.528_791_1 * k - 0.012_505_3 * t2 - 0.000_014_8 * t3;
    let mean = 2_451_534.669_8 + 27.554_549_89 * k - 0.000_669_1 * t2 - 0.000_001_098 * t3
        + 0.000_000_005_2 * t4;

    let terms: &[ApsisTerm] = match kind {
        ApsisKind::Apogee => &APOGEE_TERMS,
        ApsisKind::Perigee => &PERIGEE_TERMS,
    };
    let correction: f64 = terms
        .iter()
        .map(|&(cd, cm, cf, c, ct)| (c + ct * t) * sin_deg(cd * d + cm * m + cf * f))
        .sum();
    mean + correction
}

/// First apogee or perigee at or after `jd`, with its distance.
pub fn next_apsis(kind: ApsisKind, jd: f64) -> Option<MoonDistance> {
    let year = 2000.0 + (jd - J2000_JD) / 365.25;
    let k0 = ((year - 1999.97) * 13.2555).floor() - 1.0 + kind.index_offset();
    let found = (0..MAX_APSIS_STEPS)
        .map(|i| apsis_jd(k0 + i as f64, kind))
        .find(|&candidate| candidate >= jd);
    match found {
        Some(at) => Some(MoonDistance {
            jd: at,
            distance_km: moon_distance_km(at),
        }),
        None => {
            warn!("{kind:?} search from JD {jd} exhausted {MAX_APSIS_STEPS} steps");
            None
        }
    }
}

/// Distance at `jd`.
pub fn moon_distance(jd: f64) -> MoonDistance {
    MoonDistance {
        jd,
        distance_km: moon_distance_km(jd),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeus_example_47a() {
        // 1992 April 12, 0h TD: Δ = 368409.7 km
        let d = moon_distance_km(2_448_724.5);
        assert!((d - 368_409.7).abs() < 0.5, "distance = {d} km");
    }

    #[test]
    fn meeus_example_50a() {
        // apogee of 1988 October 7, k = -148.5
        let jd = apsis_jd(-148.5, ApsisKind::Apogee);
        assert!((jd - 2_447_442.354_3).abs() < 1e-3, "JDE = {jd}");
    }

    #[test]
    fn distance_stays_in_orbit_bounds() {
        let mut jd = 2_460_000.5;
        while jd < 2_460_060.5 {
            let d = moon_distance_km(jd);
            assert!((356_000.0..407_000.0).contains(&d), "JD {jd}: {d} km");
            jd += 0.25;
        }
    }

    #[test]
    fn apsides_bracket_the_mean_distance() {
        let mut jd = 2_460_310.5;
        for _ in 0..6 {
            let apogee = next_apsis(ApsisKind::Apogee, jd).unwrap();
            let perigee = next_apsis(ApsisKind::Perigee, jd).unwrap();
            assert!(apogee.jd >= jd && perigee.jd >= jd);
            assert!(apogee.distance_km >= MEAN_DISTANCE_KM);
            assert!(MEAN_DISTANCE_KM >= perigee.distance_km);
            assert!((apogee.jd - perigee.jd).abs() < 27.6);
            jd += 9.3;
        }
    }

    #[test]
    fn apsis_index_parity() {
        let perigee = apsis_jd(300.0, ApsisKind::Perigee);
        let apogee = apsis_jd(300.5, ApsisKind::Apogee);
        let gap = apogee - perigee;
        assert!((11.0..17.0).contains(&gap), "perigee→apogee {gap} d");
    }
}
