//! Clear-sky solar irradiance on a horizontal surface.
//!
//! Top-of-atmosphere irradiance corrected for the Earth–Sun distance,
//! attenuated with a fixed transmissivity raised to the air mass (Kasten's
//! spherical-atmosphere form, scaled by the barometric pressure ratio at
//! the observer's altitude, so thinner air raises the direct part). The diffuse
//! part follows Liu & Jordan.

use astro_time::{cos_deg, day_of_year, days_in_year, sin_deg};
use chrono::{DateTime, FixedOffset};

/// Solar constant in W/m².
pub const SOLAR_CONSTANT: f64 = 1367.0;
/// Atmospheric transmissivity coefficient.
const TRANSMISSIVITY: f64 = 0.6;
/// Below this elevation the air-mass model breaks down and 0 is reported.
const MIN_ELEVATION_DEG: f64 = 3.0;

/// Irradiance components in W/m².
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Radiation {
    pub direct: f64,
    pub diffuse: f64,
    pub total: f64,
}

/// Irradiance for a solar elevation on a given day of the year.
pub fn radiation(
    elevation_deg: f64,
    day_of_year: u32,
    days_in_year: u32,
    altitude_m: Option<f64>,
) -> Radiation {
    if !elevation_deg.is_finite() || elevation_deg <= MIN_ELEVATION_DEG || days_in_year == 0 {
        return Radiation::default();
    }
    let sin_alpha = sin_deg(elevation_deg);
    let r_out = SOLAR_CONSTANT
        * (0.034 * cos_deg(360.0 * f64::from(day_of_year) / f64::from(days_in_year)) + 1.0);
    let altitude_ratio = altitude_m.map_or(1.0, pressure_ratio);
    let air_mass =
        ((1229.0 + (614.0 * sin_alpha).powi(2)).sqrt() - 614.0 * sin_alpha) * altitude_ratio;
    let attenuation = TRANSMISSIVITY.powf(air_mass);

    let direct = r_out * attenuation * sin_alpha;
    let diffuse = r_out * (0.271 - 0.294 * attenuation) * sin_alpha;
    Radiation {
        direct,
        diffuse,
        total: direct + diffuse,
    }
}

/// Standard-atmosphere p/p0 at `altitude_m`, clamped to [0, 1].
fn pressure_ratio(altitude_m: f64) -> f64 {
    let base = (1.0 - 0.0065 * altitude_m / 288.0).clamp(0.0, 1.0);
    base.powf(5.256)
}

/// [`radiation`] with the day of year taken from `date`.
pub fn radiation_at(
    date: &DateTime<FixedOffset>,
    elevation_deg: f64,
    altitude_m: Option<f64>,
) -> Radiation {
    radiation(elevation_deg, day_of_year(date), days_in_year(date), altitude_m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_below_three_degrees() {
        assert_eq!(radiation(2.9, 100, 365, None), Radiation::default());
        assert_eq!(radiation(-20.0, 100, 365, None), Radiation::default());
        assert_eq!(radiation(f64::NAN, 100, 365, None), Radiation::default());
    }

    #[test]
    fn zenith_sun_plausible() {
        let r = radiation(90.0, 172, 366, None);
        // air mass 1: 1367·0.967·0.6 ≈ 793
        assert!(r.direct > 750.0 && r.direct < 830.0, "direct {}", r.direct);
        assert!(r.diffuse > 0.0 && r.diffuse < 150.0, "diffuse {}", r.diffuse);
        assert!((r.total - r.direct - r.diffuse).abs() < 1e-9);
    }

    #[test]
    fn altitude_increases_direct() {
        let sea = radiation(40.0, 180, 365, None);
        let alps = radiation(40.0, 180, 365, Some(3000.0));
        assert!(alps.direct > sea.direct, "{alps:?} vs {sea:?}");
        assert!(alps.diffuse < sea.diffuse);
    }

    #[test]
    fn golden_values_at_forty_degrees() {
        // air mass 1.5539 at sea level, 1.0750 at 3000 m (p/p0 = 0.6918)
        let sea = radiation(40.0, 180, 365, None);
        assert!((sea.direct - 383.79).abs() < 0.05, "direct {}", sea.direct);
        assert!((sea.diffuse - 117.20).abs() < 0.05, "diffuse {}", sea.diffuse);
        let alps = radiation(40.0, 180, 365, Some(3000.0));
        assert!((alps.direct - 490.17).abs() < 0.05, "direct {}", alps.direct);
        assert!((alps.diffuse - 85.93).abs() < 0.05, "diffuse {}", alps.diffuse);
    }

    #[test]
    fn pressure_ratio_bounds() {
        assert_eq!(pressure_ratio(0.0), 1.0);
        assert!((pressure_ratio(3000.0) - 0.6918).abs() < 1e-3);
        assert_eq!(pressure_ratio(1.0e6), 0.0);
    }

    #[test]
    fn perihelion_brighter_than_aphelion() {
        let jan = radiation(30.0, 3, 365, None);
        let jul = radiation(30.0, 185, 365, None);
        assert!(jan.total > jul.total);
    }
}
