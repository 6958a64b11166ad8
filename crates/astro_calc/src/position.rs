//! Horizontal position of a body as seen by the observer.

use astro_time::{normalize_deg, tan_deg};

/// Azimuth/elevation of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Azimuth in degrees from north through east, [0, 360).
    pub azimuth_deg: f64,
    /// Elevation above the horizon in degrees, [-90, 90].
    pub elevation_deg: f64,
    /// Shadow length of a unit-height object, only while the body is up.
    pub shade_length: Option<f64>,
}

impl Position {
    /// Build a position, normalizing azimuth and clamping elevation.
    ///
    /// Non-finite inputs collapse to 0 so that NaN never reaches callers.
    pub fn new(azimuth_deg: f64, elevation_deg: f64) -> Self {
        let azimuth_deg = if azimuth_deg.is_finite() {
            normalize_deg(azimuth_deg)
        } else {
            0.0
        };
        let elevation_deg = if elevation_deg.is_finite() {
            elevation_deg.clamp(-90.0, 90.0)
        } else {
            0.0
        };
        Self {
            azimuth_deg,
            elevation_deg,
            shade_length: None,
        }
    }

    /// Like [`Position::new`], also filling the shade length
    /// (cotangent of the elevation) when the body is above the horizon.
    pub fn with_shade(azimuth_deg: f64, elevation_deg: f64) -> Self {
        let mut p = Self::new(azimuth_deg, elevation_deg);
        if p.elevation_deg > 0.0 {
            p.shade_length = Some(1.0 / tan_deg(p.elevation_deg));
        }
        p
    }

    pub fn is_above_horizon(&self) -> bool {
        self.elevation_deg > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_non_finite() {
        let p = Position::new(f64::NAN, f64::INFINITY);
        assert_eq!(p.azimuth_deg, 0.0);
        assert_eq!(p.elevation_deg, 0.0);
    }

    #[test]
    fn wraps_azimuth() {
        let p = Position::new(-90.0, 10.0);
        assert!((p.azimuth_deg - 270.0).abs() < 1e-12);
        let p = Position::new(540.0, 10.0);
        assert!((p.azimuth_deg - 180.0).abs() < 1e-12);
    }

    #[test]
    fn shade_only_above_horizon() {
        let up = Position::with_shade(180.0, 45.0);
        assert!((up.shade_length.unwrap() - 1.0).abs() < 1e-12);
        assert!(Position::with_shade(180.0, -5.0).shade_length.is_none());
        assert!(Position::with_shade(180.0, 0.0).shade_length.is_none());
    }
}
