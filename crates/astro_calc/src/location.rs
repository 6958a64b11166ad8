//! Observer location on the WGS-84 ellipsoid.

use crate::error::CalcError;

/// Geographic location on Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    /// Geodetic latitude in degrees, north positive. Range: [-90, 90].
    pub latitude_deg: f64,
    /// Geodetic longitude in degrees, east positive. Range: [-180, 180].
    pub longitude_deg: f64,
    /// Altitude above mean sea level in meters, when known.
    pub altitude_m: Option<f64>,
}

impl GeoLocation {
    /// Create a validated location.
    ///
    /// Non-finite values and coordinates outside their ranges are rejected.
    pub fn new(
        latitude_deg: f64,
        longitude_deg: f64,
        altitude_m: Option<f64>,
    ) -> Result<Self, CalcError> {
        if !latitude_deg.is_finite() || !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(CalcError::InvalidLocation("latitude must be within [-90, 90]"));
        }
        if !longitude_deg.is_finite() || !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(CalcError::InvalidLocation(
                "longitude must be within [-180, 180]",
            ));
        }
        if altitude_m.is_some_and(|a| !a.is_finite()) {
            return Err(CalcError::InvalidLocation("altitude must be finite"));
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
            altitude_m,
        })
    }

    /// Latitude in radians.
    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    /// Longitude in radians (east positive).
    pub fn longitude_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    /// Whether the observer is in the southern hemisphere.
    pub fn is_southern(&self) -> bool {
        self.latitude_deg < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_location() {
        let loc = GeoLocation::new(48.1, 11.6, Some(520.0)).unwrap();
        assert!((loc.latitude_rad() - 48.1_f64.to_radians()).abs() < 1e-15);
        assert!(!loc.is_southern());
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            GeoLocation::new(91.0, 0.0, None),
            Err(CalcError::InvalidLocation("latitude must be within [-90, 90]"))
        );
        assert!(GeoLocation::new(0.0, -180.5, None).is_err());
        assert!(GeoLocation::new(f64::NAN, 0.0, None).is_err());
        assert!(GeoLocation::new(0.0, 0.0, Some(f64::INFINITY)).is_err());
    }

    #[test]
    fn poles_are_valid() {
        assert!(GeoLocation::new(90.0, 180.0, None).is_ok());
        assert!(GeoLocation::new(-90.0, -180.0, None).unwrap().is_southern());
    }
}
