//! Degree-based trigonometry and angle normalization.

use std::f64::consts::TAU;

pub fn sin_deg(deg: f64) -> f64 {
    deg.to_radians().sin()
}

pub fn cos_deg(deg: f64) -> f64 {
    deg.to_radians().cos()
}

pub fn tan_deg(deg: f64) -> f64 {
    deg.to_radians().tan()
}

/// Fractional part, always in [0, 1) (also for negative input).
pub fn frac(x: f64) -> f64 {
    x - x.floor()
}

/// Normalize degrees to [0, 360).
pub fn normalize_deg(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative input
    if d >= 360.0 { 0.0 } else { d }
}

/// Normalize radians to [0, 2π).
pub fn normalize_rad(rad: f64) -> f64 {
    let r = rad.rem_euclid(TAU);
    if r >= TAU { 0.0 } else { r }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trig_in_degrees() {
        assert!((sin_deg(30.0) - 0.5).abs() < 1e-12);
        assert!((cos_deg(60.0) - 0.5).abs() < 1e-12);
        assert!((tan_deg(45.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn frac_negative() {
        assert!((frac(-0.25) - 0.75).abs() < 1e-12);
        assert!((frac(3.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn normalize_wraps() {
        assert!((normalize_deg(-30.0) - 330.0).abs() < 1e-12);
        assert!((normalize_deg(725.0) - 5.0).abs() < 1e-12);
        assert_eq!(normalize_deg(-1e-20), 0.0);
        assert!((0.0..TAU).contains(&normalize_rad(-1e-20)));
    }
}
