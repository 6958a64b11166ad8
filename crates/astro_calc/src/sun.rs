//! Solar position and the rise/set/twilight ranges of a local day.
//!
//! Low-precision solar theory: mean anomaly, a three-term equation of centre
//! and a fixed obliquity. Rise, set and twilight instants are analytic: the
//! hour angle at each altitude threshold is added to (set) or mirrored
//! about (rise) the solar transit of the day.
//!
//! Sources: Meeus, "Astronomical Algorithms", ch. 13/15 (horizontal
//! coordinates, hour angle); Schlyter's simplified solar theory for the
//! transit and equation-of-centre constants.

use std::f64::consts::{PI, TAU};

use astro_time::{
    J2000_JD, add_days, datetime_to_jd, is_same_day, jd_to_datetime, midnight_jd,
    truncate_to_midnight,
};
use chrono::{DateTime, FixedOffset, TimeDelta};

use crate::config::SunConfig;
use crate::location::GeoLocation;
use crate::position::Position;
use crate::range::Range;
use crate::sun_types::SunDay;

/// Mean anomaly at J2000 in degrees.
const M0: f64 = 357.5291;
/// Daily motion of the mean anomaly in degrees.
const M1: f64 = 0.985_600_28;
/// Solar transit constants (days).
const J0: f64 = 0.0009;
const J1: f64 = 0.0053;
const J2: f64 = -0.0069;
/// Equation of centre coefficients in degrees.
const C1: f64 = 1.9148;
const C2: f64 = 0.0200;
const C3: f64 = 0.0003;
/// Longitude of perihelion in degrees.
const PERIHELION: f64 = 102.9372;
/// Obliquity of the ecliptic in degrees.
const OBLIQUITY: f64 = 23.45;
/// Sidereal time at J2000 and its daily rate, degrees.
const TH0: f64 = 280.1600;
const TH1: f64 = 360.985_623_5;

/// One minute as a fraction of a day.
const ONE_MINUTE_DAYS: f64 = 1.0 / 1440.0;
/// Elevation samples for the "up all day" test.
const DAY_SAMPLES: i64 = 72;
const SAMPLE_STEP_MINUTES: i64 = 20;

fn mean_anomaly(jd: f64) -> f64 {
    (M0 + M1 * (jd - J2000_JD)).to_radians()
}

fn equation_of_center(m: f64) -> f64 {
    (C1 * m.sin() + C2 * (2.0 * m).sin() + C3 * (3.0 * m).sin()).to_radians()
}

fn ecliptic_longitude(m: f64, c: f64) -> f64 {
    m + c + PERIHELION.to_radians() + PI
}

fn declination(lsun: f64) -> f64 {
    (lsun.sin() * OBLIQUITY.to_radians().sin()).asin()
}

fn right_ascension(lsun: f64) -> f64 {
    (lsun.sin() * OBLIQUITY.to_radians().cos()).atan2(lsun.cos())
}

/// Local sidereal angle; `lw` is the west-positive longitude in radians.
fn sidereal_angle(jd: f64, lw: f64) -> f64 {
    (TH0 + TH1 * (jd - J2000_JD)).to_radians() - lw
}

/// Ecliptic longitude of the Sun in degrees [0, 360).
pub fn sun_ecliptic_longitude_deg(jd: f64) -> f64 {
    let m = mean_anomaly(jd);
    astro_time::normalize_deg(ecliptic_longitude(m, equation_of_center(m)).to_degrees())
}

/// Topocentric azimuth/elevation of the Sun at a Julian Date.
///
/// No refraction is applied. The shade length is filled while the Sun is up.
pub fn sun_position(jd: f64, location: &GeoLocation) -> Position {
    let lw = -location.longitude_rad();
    let phi = location.latitude_rad();

    let m = mean_anomaly(jd);
    let lsun = ecliptic_longitude(m, equation_of_center(m));
    let dec = declination(lsun);
    let ra = right_ascension(lsun);
    let h = sidereal_angle(jd, lw) - ra;

    let azimuth = h.sin().atan2(h.cos() * phi.sin() - dec.tan() * phi.cos());
    let elevation = (phi.sin() * dec.sin() + phi.cos() * dec.cos() * h.cos())
        .clamp(-1.0, 1.0)
        .asin();
    // azimuth above is counted from south
    Position::with_shade(azimuth.to_degrees() + 180.0, elevation.to_degrees())
}

/// [`sun_position`] for a civil instant.
pub fn sun_position_at(date: &DateTime<FixedOffset>, location: &GeoLocation) -> Position {
    sun_position(datetime_to_jd(date), location)
}

/// Julian Dates of the threshold crossings of one day.
///
/// Crossings that do not happen (hour angle undefined) are `None`.
#[derive(Debug, Clone, Copy)]
struct SolarEventsJd {
    transit: f64,
    rise: Option<f64>,
    rise_end: Option<f64>,
    set_start: Option<f64>,
    set: Option<f64>,
    civil_dawn_start: Option<f64>,
    civil_dusk_end: Option<f64>,
    nautic_dawn_start: Option<f64>,
    nautic_dusk_end: Option<f64>,
    astro_dawn_start: Option<f64>,
    astro_dusk_end: Option<f64>,
}

/// Hour angle at which the Sun reaches altitude `h0` (radians).
fn hour_angle(h0: f64, phi: f64, dec: f64) -> Option<f64> {
    let cos_h = (h0.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos());
    (cos_h.is_finite() && (-1.0..=1.0).contains(&cos_h)).then(|| cos_h.acos())
}

fn solar_events(day_midnight_jd: f64, location: &GeoLocation, config: &SunConfig) -> SolarEventsJd {
    let lw = -location.longitude_rad();
    let phi = location.latitude_rad();

    let j = day_midnight_jd + 0.5;
    let n = (j - J2000_JD - J0 - lw / TAU).round();
    let approx_transit = |ht: f64| J2000_JD + J0 + (ht + lw) / TAU + n;

    let js = approx_transit(0.0);
    let m = mean_anomaly(js);
    let lsun = ecliptic_longitude(m, equation_of_center(m));
    let dec = declination(lsun);
    let transit_of = |jd: f64| jd + J1 * m.sin() + J2 * (2.0 * lsun).sin();

    let transit = transit_of(js);
    let setting = |alt_deg: f64| {
        hour_angle(alt_deg.to_radians(), phi, dec).map(|w| transit_of(approx_transit(w)))
    };
    let mirror = |set: Option<f64>| set.map(|s| transit - (s - transit));

    let set = setting(config.horizon_deg);
    let set_start = setting(config.horizon_deg + config.diameter_deg);
    let civil_dusk_end = setting(config.civil_deg);
    let nautic_dusk_end = setting(config.nautical_deg);
    let astro_dusk_end = setting(config.astronomical_deg);

    SolarEventsJd {
        transit,
        rise: mirror(set),
        rise_end: mirror(set_start),
        set_start,
        set,
        civil_dawn_start: mirror(civil_dusk_end),
        civil_dusk_end,
        nautic_dawn_start: mirror(nautic_dusk_end),
        nautic_dusk_end,
        astro_dawn_start: mirror(astro_dusk_end),
        astro_dusk_end,
    }
}

fn instant(jd: Option<f64>, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    jd.and_then(|j| jd_to_datetime(j, offset).ok())
}

fn span(a: Option<f64>, b: Option<f64>, offset: FixedOffset) -> Range {
    Range::new(instant(a, offset), instant(b, offset))
}

/// Whether the Sun stays at or above the rise/set threshold all day.
///
/// Samples the elevation every 20 minutes from local midnight (72 samples).
pub fn is_sun_up_all_day(
    date: &DateTime<FixedOffset>,
    location: &GeoLocation,
    config: &SunConfig,
) -> bool {
    let midnight = truncate_to_midnight(date);
    (0..DAY_SAMPLES).all(|i| {
        let t = midnight + TimeDelta::minutes(i * SAMPLE_STEP_MINUTES);
        sun_position_at(&t, location).elevation_deg >= config.horizon_deg
    })
}

/// Rise, set, noon, twilight, daylight and night ranges of the local day
/// containing `date`.
///
/// Night ranges are stitched from yesterday's and tomorrow's astronomical
/// twilight, computed one day in each direction only.
pub fn sun_day(date: &DateTime<FixedOffset>, location: &GeoLocation, config: &SunConfig) -> SunDay {
    let offset = *date.offset();
    let ev = solar_events(midnight_jd(date), location, config);

    let rise = span(ev.rise, ev.rise_end, offset);
    let set = span(ev.set_start, ev.set, offset);
    let noon = span(Some(ev.transit), Some(ev.transit + ONE_MINUTE_DAYS), offset);
    let astro_dawn = span(ev.astro_dawn_start, ev.nautic_dawn_start, offset);
    let nautic_dawn = span(ev.nautic_dawn_start, ev.civil_dawn_start, offset);
    let civil_dawn = span(ev.civil_dawn_start, ev.rise, offset);
    let civil_dusk = span(ev.set, ev.civil_dusk_end, offset);
    let nautic_dusk = span(ev.civil_dusk_end, ev.nautic_dusk_end, offset);
    let astro_dusk = span(ev.nautic_dusk_end, ev.astro_dusk_end, offset);

    let midnight = truncate_to_midnight(date);
    let next_midnight = add_days(&midnight, 1);
    let sun_up_all_day = is_sun_up_all_day(date, location, config);

    let daylight = if rise.is_empty() {
        if sun_up_all_day {
            Range::new(Some(midnight), Some(next_midnight))
        } else {
            Range::empty()
        }
    } else {
        Range::new(rise.end(), set.start())
    };

    let yesterday = solar_events(midnight_jd(&add_days(date, -1)), location, config);
    let yesterday_dark = instant(yesterday.astro_dusk_end, offset);
    let morning_night = match yesterday_dark {
        Some(dark) if is_same_day(date, &dark) => Range::new(Some(dark), astro_dawn.start()),
        _ if sun_up_all_day || astro_dawn.start().is_none() => Range::empty(),
        _ => Range::new(Some(midnight), astro_dawn.start()),
    };

    let evening_night = match astro_dusk.end() {
        Some(dark) if is_same_day(date, &dark) => Range::new(Some(dark), Some(next_midnight)),
        _ => Range::empty(),
    };

    let night = if sun_up_all_day {
        Range::empty()
    } else {
        let tomorrow = solar_events(midnight_jd(&add_days(date, 1)), location, config);
        Range::new(astro_dusk.end(), instant(tomorrow.astro_dawn_start, offset))
    };

    SunDay {
        rise,
        set,
        noon,
        astro_dawn,
        nautic_dawn,
        civil_dawn,
        civil_dusk,
        nautic_dusk,
        astro_dusk,
        daylight,
        morning_night,
        evening_night,
        night,
        sun_up_all_day,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sun_types::SunPhaseName;
    use chrono::TimeZone;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn position_in_range_everywhere() {
        let date = utc().with_ymd_and_hms(2024, 3, 1, 6, 30, 0).unwrap();
        for lat in [-90.0, -45.0, 0.0, 45.0, 90.0] {
            for lon in [-180.0, -60.0, 0.0, 60.0, 180.0] {
                let loc = GeoLocation::new(lat, lon, None).unwrap();
                let p = sun_position_at(&date, &loc);
                assert!((0.0..360.0).contains(&p.azimuth_deg), "az {}", p.azimuth_deg);
                assert!((-90.0..=90.0).contains(&p.elevation_deg));
            }
        }
    }

    #[test]
    fn ecliptic_longitude_at_j2000() {
        // apparent longitude 2000-Jan-01 12h is about 280.37°
        let lon = sun_ecliptic_longitude_deg(J2000_JD);
        assert!((lon - 280.37).abs() < 0.05, "ecliptic longitude = {lon}");
    }

    #[test]
    fn ranges_are_ordered_mid_latitude() {
        let cet = FixedOffset::east_opt(3600).unwrap();
        let date = cet.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let loc = GeoLocation::new(48.14, 11.58, None).unwrap();
        let day = sun_day(&date, &loc, &SunConfig::default());

        let chain = [
            day.astro_dawn.start(),
            day.nautic_dawn.start(),
            day.civil_dawn.start(),
            day.rise.start(),
            day.rise.end(),
            day.noon.start(),
            day.set.start(),
            day.set.end(),
            day.nautic_dusk.start(),
            day.astro_dusk.start(),
            day.astro_dusk.end(),
        ];
        for w in chain.windows(2) {
            assert!(w[0].unwrap() <= w[1].unwrap(), "{:?} > {:?}", w[0], w[1]);
        }
        assert!(!day.sun_up_all_day);
        assert_eq!(day.daylight.start(), day.rise.end());
    }

    #[test]
    fn phase_names_through_the_day() {
        let cet = FixedOffset::east_opt(3600).unwrap();
        let loc = GeoLocation::new(48.14, 11.58, None).unwrap();
        let cfg = SunConfig::default();
        let noon = cet.with_ymd_and_hms(2024, 3, 15, 13, 30, 0).unwrap();
        let day = sun_day(&noon, &loc, &cfg);
        assert_eq!(day.phase_at(&noon), Some(SunPhaseName::Daylight));
        let late = cet.with_ymd_and_hms(2024, 3, 15, 23, 30, 0).unwrap();
        assert_eq!(day.phase_at(&late), Some(SunPhaseName::Night));
        let early = cet.with_ymd_and_hms(2024, 3, 15, 2, 0, 0).unwrap();
        assert_eq!(day.phase_at(&early), Some(SunPhaseName::Night));
    }

    #[test]
    fn polar_night_has_no_rise() {
        let loc = GeoLocation::new(78.22, 15.63, None).unwrap();
        let date = utc().with_ymd_and_hms(2024, 12, 21, 12, 0, 0).unwrap();
        let day = sun_day(&date, &loc, &SunConfig::default());
        assert!(day.rise.is_empty());
        assert!(day.set.is_empty());
        assert!(day.daylight.is_empty());
        assert!(!day.sun_up_all_day);
    }
}
