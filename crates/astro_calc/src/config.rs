//! Tunable parameters for the solar and circadian calculators.

/// Altitude thresholds for the solar rise/set and twilight ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunConfig {
    /// Altitude of the Sun's centre at sunrise/sunset in degrees. Default: -0.83.
    pub horizon_deg: f64,
    /// Apparent solar diameter in degrees, separating the start and end of
    /// sunrise/sunset. Default: 0.53.
    pub diameter_deg: f64,
    /// Civil twilight depression. Default: -6.
    pub civil_deg: f64,
    /// Nautical twilight depression. Default: -12.
    pub nautical_deg: f64,
    /// Astronomical twilight depression. Default: -18.
    pub astronomical_deg: f64,
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            horizon_deg: -0.83,
            diameter_deg: 0.53,
            civil_deg: -6.0,
            nautical_deg: -12.0,
            astronomical_deg: -18.0,
        }
    }
}

/// Colour temperature range of the circadian lighting curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircadianConfig {
    /// Colour temperature at 0 % brightness. Default: 2500 K.
    pub min_kelvin: f64,
    /// Colour temperature at 100 % brightness. Default: 5500 K.
    pub max_kelvin: f64,
}

impl Default for CircadianConfig {
    fn default() -> Self {
        Self {
            min_kelvin: 2500.0,
            max_kelvin: 5500.0,
        }
    }
}

impl CircadianConfig {
    /// Colour temperature for a brightness percentage; the sign is ignored.
    pub fn kelvin_for(&self, percentage: f64) -> f64 {
        let p = (percentage.abs() / 100.0).clamp(0.0, 1.0);
        self.min_kelvin + (self.max_kelvin - self.min_kelvin) * p
    }
}
