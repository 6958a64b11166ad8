//! Coordinate transformations shared by the solar and lunar calculators.
//!
//! Ecliptic → equatorial (mean obliquity, Meeus 22.2), geocentric →
//! topocentric equatorial (parallax via the WGS-84 observer radius), and
//! equatorial → horizontal. All angles are radians unless a name says `_deg`.

use std::f64::consts::FRAC_PI_2;

use astro_time::{julian_centuries, normalize_rad};

/// WGS-84 flattening.
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;

/// WGS-84 equatorial radius in km.
pub const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6_378.137;

/// Standard atmosphere used by the refraction correction.
const PRESSURE_MBAR: f64 = 1015.0;
const TEMPERATURE_C: f64 = 10.0;

/// Mean obliquity of the ecliptic in radians.
pub fn mean_obliquity_rad(jd: f64) -> f64 {
    let t = julian_centuries(jd);
    let arcsec = 21.45 + t * (-46.815 + t * (-0.0006 + t * 0.00181));
    (23.0 + (26.0 + arcsec / 60.0) / 60.0).to_radians()
}

/// Ecliptic latitude/longitude → right ascension/declination.
///
/// Returns `(ra, dec)` with `ra` in [0, 2π).
pub fn ecliptic_to_equatorial(lat: f64, lon: f64, jd: f64) -> (f64, f64) {
    let eps = mean_obliquity_rad(jd);
    let (sin_eps, cos_eps) = eps.sin_cos();
    let sin_lon = lon.sin();
    let ra = normalize_rad((sin_lon * cos_eps - lat.tan() * sin_eps).atan2(lon.cos()));
    let dec = (lat.sin() * cos_eps + lat.cos() * sin_eps * sin_lon).asin();
    (ra, dec)
}

/// Distance of the observer from the Earth's centre in km, for a geodetic
/// latitude on the WGS-84 ellipsoid.
pub fn observer_center_distance_km(lat: f64) -> f64 {
    let co = lat.cos().powi(2);
    let si = lat.sin().powi(2);
    let fl = (1.0 - WGS84_FLATTENING).powi(2);
    let a = EARTH_EQUATORIAL_RADIUS_KM / (co + fl * si).sqrt();
    let b = a * fl;
    (a * a * co + b * b * si).sqrt()
}

/// Geocentric → topocentric equatorial coordinates.
///
/// `distance_km` is the body's geocentric distance, `lmst` the local mean
/// sidereal time. Returns `(ra, dec)`.
pub fn geocentric_to_topocentric(
    ra: f64,
    dec: f64,
    distance_km: f64,
    observer_lat: f64,
    lmst: f64,
) -> (f64, f64) {
    let rho = observer_center_distance_km(observer_lat);
    let cos_dec = dec.cos();
    let cos_lat = observer_lat.cos();

    let x = distance_km * cos_dec * ra.cos() - rho * cos_lat * lmst.cos();
    let y = distance_km * cos_dec * ra.sin() - rho * cos_lat * lmst.sin();
    let z = distance_km * dec.sin() - rho * observer_lat.sin();

    let r = (x * x + y * y + z * z).sqrt();
    if r == 0.0 {
        return (ra, dec);
    }
    (normalize_rad(y.atan2(x)), (z / r).clamp(-1.0, 1.0).asin())
}

/// Equatorial → horizontal coordinates.
///
/// Returns `(azimuth, altitude)`; azimuth counted from north through east.
pub fn equatorial_to_horizontal(ra: f64, dec: f64, lat: f64, lmst: f64) -> (f64, f64) {
    let lha = lmst - ra;
    let (sin_dec, cos_dec) = dec.sin_cos();
    let (sin_lat, cos_lat) = lat.sin_cos();
    let n = -cos_dec * lha.sin();
    let d = sin_dec * cos_lat - cos_dec * lha.cos() * sin_lat;
    let az = normalize_rad(n.atan2(d));
    let alt = (sin_dec * sin_lat + cos_dec * lha.cos() * cos_lat)
        .clamp(-1.0, 1.0)
        .asin();
    (az, alt.clamp(-FRAC_PI_2, FRAC_PI_2))
}

/// Atmospheric refraction in degrees to add to a true altitude.
///
/// Zero outside [-2°, 90°). Above 15° the simple cotangent law is used;
/// closer to the horizon Sæmundsson's formula, scaled for pressure and
/// temperature.
pub fn refraction_deg(altitude_deg: f64) -> f64 {
    if !(-2.0..90.0).contains(&altitude_deg) {
        return 0.0;
    }
    if altitude_deg > 15.0 {
        return 0.00452 * PRESSURE_MBAR
            / ((273.0 + TEMPERATURE_C) * altitude_deg.to_radians().tan());
    }
    let arcmin = 1.02 / (altitude_deg + 10.3 / (altitude_deg + 5.11)).to_radians().tan();
    let scale = (PRESSURE_MBAR / 1010.0) * (283.0 / (273.0 + TEMPERATURE_C));
    arcmin * scale / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obliquity_at_j2000() {
        let eps = mean_obliquity_rad(2_451_545.0).to_degrees();
        assert!((eps - 23.439_291).abs() < 1e-5, "eps = {eps}");
    }

    #[test]
    fn equinox_point_maps_to_origin() {
        let (ra, dec) = ecliptic_to_equatorial(0.0, 0.0, 2_451_545.0);
        assert!(ra.abs() < 1e-12 || (ra - std::f64::consts::TAU).abs() < 1e-12);
        assert!(dec.abs() < 1e-12);
    }

    #[test]
    fn observer_radius_bounds() {
        let eq = observer_center_distance_km(0.0);
        let pole = observer_center_distance_km(FRAC_PI_2);
        assert!((eq - EARTH_EQUATORIAL_RADIUS_KM).abs() < 1e-6);
        assert!((pole - 6_356.752).abs() < 0.01, "polar radius {pole}");
    }

    #[test]
    fn zenith_body() {
        // body on the meridian at the observer's latitude is at the zenith
        let lat = 0.7;
        let (_, alt) = equatorial_to_horizontal(1.0, lat, lat, 1.0);
        assert!((alt - FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn refraction_window() {
        assert_eq!(refraction_deg(-3.0), 0.0);
        assert_eq!(refraction_deg(90.0), 0.0);
        let horizon = refraction_deg(0.0);
        assert!(horizon > 0.4 && horizon < 0.6, "horizon refraction {horizon}");
        assert!(refraction_deg(45.0) < 0.02);
        // continuous enough across the 15° switch
        assert!((refraction_deg(15.0) - refraction_deg(15.0001)).abs() < 0.005);
    }

    #[test]
    fn topocentric_parallax_lowers_moon() {
        // observer north of the body's declination sees it further south
        let (_, dec) = geocentric_to_topocentric(0.0, 0.3, 384_400.0, 0.8, 0.0);
        assert!(dec < 0.3);
    }
}
