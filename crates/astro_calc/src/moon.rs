//! Lunar position and moonrise/moonset.
//!
//! Position: truncated perturbation series (evection, annual equation,
//! equation of centre, variation, regression of the node) referred to the
//! 1990.0 epoch, then topocentric correction and refraction.
//!
//! Rise/set: the compact "MiniMoon" series of Montenbruck & Pfleger,
//! "Astronomy on the Personal Computer", sampled hourly and searched with
//! three-point parabolic interpolation.

use std::f64::consts::TAU;

use astro_time::{
    MJD_OFFSET, cos_deg, frac, gmst_rad, jd_to_datetime, local_sidereal_time_rad, midnight_jd,
    normalize_rad, sin_deg,
};
use chrono::{DateTime, FixedOffset};
use log::debug;

use crate::frames::{
    ecliptic_to_equatorial, equatorial_to_horizontal, geocentric_to_topocentric, refraction_deg,
};
use crate::location::GeoLocation;
use crate::moon_types::{MoonPosition, MoonRiseSet};
use crate::position::Position;

/// Series epoch 1990-Jan-00.0 as a Julian Date.
const EPOCH_1990_JD: f64 = 2_447_891.5;
const TROPICAL_YEAR_DAYS: f64 = 365.242_191;
/// Sun's mean longitude at the epoch, radians.
const SUN_EPOCH_LONGITUDE: f64 = 4.876_507_578_297_35;
/// Sun's longitude of perigee at the epoch, radians.
const SUN_PERIGEE_LONGITUDE: f64 = 4.935_239_984_568_769;
const SUN_ECCENTRICITY: f64 = 0.016_713;

/// Moon's mean longitude, perigee and node at the epoch, degrees.
const MOON_L0: f64 = 318.351_648;
const MOON_P0: f64 = 36.340_410;
const MOON_N0: f64 = 318.510_107;
/// Inclination of the lunar orbit, degrees.
const MOON_INCLINATION: f64 = 5.145_396;
const MOON_SEMI_MAJOR_KM: f64 = 384_401.0;
const MOON_ECCENTRICITY: f64 = 0.054_900;

/// MJD of J2000.0.
const MJD_J2000: f64 = 51_544.5;
/// Altitude of the Moon's centre at rise/set for the geocentric series.
const RISE_SET_ALTITUDE_DEG: f64 = 8.0 / 60.0;
/// Below this the parabola is treated as a straight line.
const FLAT_CURVATURE: f64 = 1e-12;

/// Topocentric position of the Moon at a Julian Date.
pub fn moon_position(jd: f64, location: &GeoLocation) -> MoonPosition {
    let lat = location.latitude_rad();
    let lmst = local_sidereal_time_rad(gmst_rad(jd), location.longitude_rad());

    let d = jd - EPOCH_1990_JD;
    let sun_anomaly = TAU / TROPICAL_YEAR_DAYS * d + SUN_EPOCH_LONGITUDE - SUN_PERIGEE_LONGITUDE;
    let nu = sun_anomaly + 2.0 * SUN_ECCENTRICITY * sun_anomaly.sin();
    let sun_lon = normalize_rad(nu + SUN_PERIGEE_LONGITUDE);

    let l = 13.176_396_6_f64.to_radians() * d + MOON_L0.to_radians();
    let m_moon = l - 0.111_404_1_f64.to_radians() * d - MOON_P0.to_radians();
    let node = MOON_N0.to_radians() - 0.052_953_9_f64.to_radians() * d;

    let evection = 1.2739_f64.to_radians() * (2.0 * (l - sun_lon) - m_moon).sin();
    let annual = 0.1858_f64.to_radians() * sun_anomaly.sin();
    let a3 = 0.37_f64.to_radians() * sun_anomaly.sin();
    let m_corr = m_moon + evection - annual - a3;
    let centre = 6.2886_f64.to_radians() * m_corr.sin();
    let a4 = 0.214_f64.to_radians() * (2.0 * m_corr).sin();
    let l2 = l + evection + centre - annual + a4;
    let variation = 0.6583_f64.to_radians() * (2.0 * (l2 - sun_lon)).sin();
    let l3 = l2 + variation;
    let node2 = node - 0.16_f64.to_radians() * sun_anomaly.sin();

    let inc = MOON_INCLINATION.to_radians();
    let moon_lon = normalize_rad(
        node2 + ((l3 - node2).sin() * inc.cos()).atan2((l3 - node2).cos()),
    );
    let moon_lat = ((l3 - node2).sin() * inc.sin()).asin();

    let distance_km = (1.0 - MOON_ECCENTRICITY * MOON_ECCENTRICITY)
        / (1.0 + MOON_ECCENTRICITY * (m_corr + centre).cos())
        * MOON_SEMI_MAJOR_KM;

    let (ra, dec) = ecliptic_to_equatorial(moon_lat, moon_lon, jd);
    let (ra_topo, dec_topo) = geocentric_to_topocentric(ra, dec, distance_km, lat, lmst);
    let (az, alt) = equatorial_to_horizontal(ra_topo, dec_topo, lat, lmst);

    let alt_deg = alt.to_degrees();
    MoonPosition {
        position: Position::new(az.to_degrees(), alt_deg + refraction_deg(alt_deg)),
        ecliptic_longitude_deg: moon_lon.to_degrees(),
        distance_km,
    }
}

/// Low-precision geocentric declination (deg) and right ascension (hours)
/// for `t` Julian centuries since J2000.
fn mini_moon(t: f64) -> (f64, f64) {
    const ARC: f64 = 206_264.806_2;
    const COS_EPS: f64 = 0.917_48;
    const SIN_EPS: f64 = 0.397_78;

    let l0 = frac(0.606_433 + 1336.855_225 * t);
    let l = TAU * frac(0.374_897 + 1325.552_41 * t);
    let ls = TAU * frac(0.993_133 + 99.997_361 * t);
    let d = TAU * frac(0.827_361 + 1236.853_086 * t);
    let f = TAU * frac(0.259_086 + 1342.227_825 * t);

    let dl = 22640.0 * l.sin() - 4586.0 * (l - 2.0 * d).sin() + 2370.0 * (2.0 * d).sin()
        + 769.0 * (2.0 * l).sin()
        - 668.0 * ls.sin()
        - 412.0 * (2.0 * f).sin()
        - 212.0 * (2.0 * l - 2.0 * d).sin()
        - 206.0 * (l + ls - 2.0 * d).sin()
        + 192.0 * (l + 2.0 * d).sin()
        - 165.0 * (ls - 2.0 * d).sin()
        - 125.0 * d.sin()
        - 110.0 * (l + ls).sin()
        + 148.0 * (l - ls).sin()
        - 55.0 * (2.0 * f - 2.0 * d).sin();
    let s = f + (dl + 412.0 * (2.0 * f).sin() + 541.0 * ls.sin()) / ARC;
    let h = f - 2.0 * d;
    let n = -526.0 * h.sin() + 44.0 * (l + h).sin() - 31.0 * (-l + h).sin()
        - 23.0 * (ls + h).sin()
        + 11.0 * (-ls + h).sin()
        - 25.0 * (-2.0 * l + f).sin()
        + 21.0 * (-l + f).sin();

    let lmoon = TAU * frac(l0 + dl / 1_296_000.0);
    let bmoon = (18520.0 * s.sin() + n) / ARC;

    let cb = bmoon.cos();
    let x = cb * lmoon.cos();
    let v = cb * lmoon.sin();
    let w = bmoon.sin();
    let y = COS_EPS * v - SIN_EPS * w;
    let z = SIN_EPS * v + COS_EPS * w;
    let rho = (1.0 - z * z).sqrt();

    let dec = (z / rho).atan().to_degrees();
    let mut ra = (48.0 / TAU) * (y / (x + rho)).atan();
    if ra < 0.0 {
        ra += 24.0;
    }
    (dec, ra)
}

/// Local mean sidereal time in hours; `lambda` is west-positive degrees.
fn lmst_hours(mjd: f64, lambda: f64) -> f64 {
    let mjd0 = mjd.floor();
    let ut = (mjd - mjd0) * 24.0;
    let t = (mjd0 - MJD_J2000) / 36_525.0;
    let gmst = 6.697_374_558
        + 1.002_737_909_3 * ut
        + (8_640_184.812_866 + (0.093_104 - 0.000_006_2 * t) * t) * t / 3600.0;
    24.0 * frac((gmst - lambda / 15.0) / 24.0)
}

/// Sine of the geocentric lunar altitude `hour` hours after `mjd0`.
fn sin_altitude(mjd0: f64, hour: f64, lambda: f64, sin_phi: f64, cos_phi: f64) -> f64 {
    let mjd = mjd0 + hour / 24.0;
    let t = (mjd - MJD_J2000) / 36_525.0;
    let (dec, ra) = mini_moon(t);
    let tau = 15.0 * (lmst_hours(mjd, lambda) - ra);
    sin_phi * sin_deg(dec) + cos_phi * cos_deg(dec) * cos_deg(tau)
}

/// Parabola through three equidistant samples at x = -1, 0, 1.
#[derive(Debug, Clone, Copy, PartialEq)]
struct QuadFit {
    /// Value at the extremum.
    extremum: f64,
    /// Roots in ascending order; meaningful up to `count`.
    first: f64,
    second: f64,
    /// Number of roots in [-1, 1].
    count: u8,
}

fn quad(y_minus: f64, y0: f64, y_plus: f64) -> QuadFit {
    let a = 0.5 * (y_minus + y_plus) - y0;
    let b = 0.5 * (y_plus - y_minus);

    if a.abs() < FLAT_CURVATURE {
        debug!("flat moon altitude samples, using linear root");
        let root = if b != 0.0 { -y0 / b } else { f64::NAN };
        let inside = root.is_finite() && root.abs() <= 1.0;
        return QuadFit {
            extremum: y0,
            first: root,
            second: root,
            count: u8::from(inside),
        };
    }

    let xe = -b / (2.0 * a);
    let extremum = (a * xe + b) * xe + y0;
    let dis = b * b - 4.0 * a * y0;
    if dis < 0.0 {
        return QuadFit {
            extremum,
            first: 0.0,
            second: 0.0,
            count: 0,
        };
    }
    let dx = 0.5 * dis.sqrt() / a.abs();
    let mut first = xe - dx;
    let second = xe + dx;
    let mut count = 0;
    if first.abs() <= 1.0 {
        count += 1;
    }
    if second.abs() <= 1.0 {
        count += 1;
    }
    if first < -1.0 {
        first = second;
    }
    QuadFit {
        extremum,
        first,
        second,
        count,
    }
}

/// Moonrise and moonset on the local day of `date`.
///
/// Samples `sin(alt) - sin(8')` at hours h-1, h, h+1 for h = 1, 3, …, 23
/// and stops once both events are found.
pub fn moon_rise_set(date: &DateTime<FixedOffset>, location: &GeoLocation) -> MoonRiseSet {
    let day_jd = midnight_jd(date);
    let mjd0 = day_jd - MJD_OFFSET;
    let lambda = -location.longitude_deg;
    let sin_phi = sin_deg(location.latitude_deg);
    let cos_phi = cos_deg(location.latitude_deg);
    let sin_h0 = sin_deg(RISE_SET_ALTITUDE_DEG);

    let mut rise: Option<f64> = None;
    let mut set: Option<f64> = None;
    let mut hour = 1.0;
    while hour < 25.0 && (rise.is_none() || set.is_none()) {
        let y_minus = sin_altitude(mjd0, hour - 1.0, lambda, sin_phi, cos_phi) - sin_h0;
        let y0 = sin_altitude(mjd0, hour, lambda, sin_phi, cos_phi) - sin_h0;
        let y_plus = sin_altitude(mjd0, hour + 1.0, lambda, sin_phi, cos_phi) - sin_h0;
        let fit = quad(y_minus, y0, y_plus);
        match fit.count {
            1 => {
                if y_minus < 0.0 {
                    rise = Some(hour + fit.first);
                } else {
                    set = Some(hour + fit.first);
                }
            }
            2 => {
                if fit.extremum < 0.0 {
                    rise = Some(hour + fit.second);
                    set = Some(hour + fit.first);
                } else {
                    rise = Some(hour + fit.first);
                    set = Some(hour + fit.second);
                }
            }
            _ => {}
        }
        hour += 2.0;
    }

    let offset = *date.offset();
    let at = |hours: Option<f64>| hours.and_then(|h| jd_to_datetime(day_jd + h / 24.0, offset).ok());
    MoonRiseSet {
        rise: at(rise),
        set: at(set),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astro_time::datetime_to_jd;
    use chrono::TimeZone;

    #[test]
    fn position_ranges() {
        let loc = GeoLocation::new(52.5, 13.4, Some(34.0)).unwrap();
        let mut jd = 2_460_310.5;
        for _ in 0..200 {
            let p = moon_position(jd, &loc);
            assert!((0.0..360.0).contains(&p.position.azimuth_deg));
            assert!((-90.0..=90.0).contains(&p.position.elevation_deg));
            assert!((0.0..360.0).contains(&p.ecliptic_longitude_deg));
            assert!(
                (355_000.0..410_000.0).contains(&p.distance_km),
                "distance {}",
                p.distance_km
            );
            jd += 0.37;
        }
    }

    #[test]
    fn longitude_near_new_moon_matches_sun() {
        // new moon 2024-01-11 11:57 UTC, Sun near 290.6°
        let loc = GeoLocation::new(0.0, 0.0, None).unwrap();
        let p = moon_position(2_460_321.0, &loc);
        let diff = (p.ecliptic_longitude_deg - 290.6).abs();
        assert!(diff < 2.0, "moon longitude {}", p.ecliptic_longitude_deg);
    }

    #[test]
    fn quad_finds_single_crossing() {
        let fit = quad(-1.0, 0.0, 1.0);
        assert_eq!(fit.count, 1);
        assert!(fit.first.abs() < 1e-12);
    }

    #[test]
    fn quad_two_crossings() {
        // y = x² - 0.25
        let fit = quad(0.75, -0.25, 0.75);
        assert_eq!(fit.count, 2);
        assert!((fit.first + 0.5).abs() < 1e-12);
        assert!((fit.second - 0.5).abs() < 1e-12);
        assert!(fit.extremum < 0.0);
    }

    #[test]
    fn quad_flat_samples_use_the_linear_root() {
        // collinear samples: the line through them is the fit
        let fit = quad(-0.3, -0.1, 0.1);
        assert_eq!(fit.count, 1);
        assert!((fit.first - 0.5).abs() < 1e-12, "root {}", fit.first);
        assert_eq!(fit.first, fit.second);

        // line crossing outside [-1, 1] and a constant give no event
        assert_eq!(quad(0.2, 0.5, 0.8).count, 0);
        let constant = quad(0.4, 0.4, 0.4);
        assert_eq!(constant.count, 0);
        assert!(constant.first.is_nan());
    }

    #[test]
    fn quad_no_crossing() {
        assert_eq!(quad(1.0, 0.5, 1.0).count, 0);
    }

    #[test]
    fn rise_and_set_mid_latitude() {
        let cet = FixedOffset::east_opt(3600).unwrap();
        let loc = GeoLocation::new(48.14, 11.58, None).unwrap();
        let mut found = 0;
        for day in 1..=10 {
            let date = cet.with_ymd_and_hms(2024, 2, day, 12, 0, 0).unwrap();
            let rs = moon_rise_set(&date, &loc);
            for t in [rs.rise, rs.set].into_iter().flatten() {
                found += 1;
                let el = moon_position(datetime_to_jd(&t), &loc).position.elevation_deg;
                assert!(el.abs() < 2.0, "elevation {el} at event {t}");
            }
        }
        // roughly one rise and one set per day, one of each gets skipped
        assert!(found >= 17, "only {found} events in 10 days");
    }

    #[test]
    fn circumpolar_moon_has_no_events() {
        let cet = FixedOffset::east_opt(3600).unwrap();
        let svalbard = GeoLocation::new(78.22, 15.65, None).unwrap();
        // 2024-01-09 the Moon stays below the horizon, 2024-01-22 above it
        for (day, above) in [(9, false), (22, true)] {
            let date = cet.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap();
            let rs = moon_rise_set(&date, &svalbard);
            assert_eq!(rs.rise, None, "rise on day {day}");
            assert_eq!(rs.set, None, "set on day {day}");

            let midnight = midnight_jd(&date);
            for i in 0..24 {
                let el = moon_position(midnight + f64::from(i) / 24.0, &svalbard)
                    .position
                    .elevation_deg;
                assert_eq!(el > 0.0, above, "elevation {el} at hour {i} of day {day}");
            }
        }
    }
}
