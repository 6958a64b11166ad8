//! Zodiac signs from ecliptic longitude.
//!
//! The ecliptic is divided into 12 equal signs of 30° starting at Aries
//! (0°). A sign's validity is estimated by converting the angular distance
//! to the sector edges into time at the Sun's mean rate.

use chrono::{DateTime, FixedOffset};

use astro_time::{datetime_to_jd, normalize_deg};

use crate::range::Range;

/// Mean motion of the Sun along the ecliptic, degrees per day.
pub const SUN_MEAN_RATE_DEG_PER_DAY: f64 = 360.0 / 365.2422;

/// Width of one sign in degrees.
const SIGN_WIDTH_DEG: f64 = 30.0;

/// The 12 zodiac signs starting from Aries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// All 12 signs in order (0 = Aries, 11 = Pisces).
pub const ALL_SIGNS: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

impl ZodiacSign {
    /// 0-based index (Aries = 0).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Sign for an index, wrapping modulo 12.
    pub const fn from_index(index: usize) -> Self {
        ALL_SIGNS[index % 12]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }
}

/// A sign, with the estimated time range it is valid for when known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zodiac {
    pub sign: ZodiacSign,
    pub validity: Option<Range>,
}

impl Zodiac {
    /// Sign containing an ecliptic longitude; any real longitude is accepted.
    pub fn from_longitude(longitude_deg: f64) -> Self {
        Self {
            sign: sign_of(longitude_deg),
            validity: None,
        }
    }

    /// Sign containing `longitude_deg` at instant `at`, with the sector's
    /// start and end estimated from the Sun's mean rate.
    pub fn with_validity(longitude_deg: f64, at: &DateTime<FixedOffset>) -> Self {
        let lon = normalize_deg(longitude_deg);
        let sign = sign_of(lon);
        let sector_start = f64::from(sign.index()) * SIGN_WIDTH_DEG;
        let jd = datetime_to_jd(at);
        let since_start = (lon - sector_start) / SUN_MEAN_RATE_DEG_PER_DAY;
        let until_end = (sector_start + SIGN_WIDTH_DEG - lon) / SUN_MEAN_RATE_DEG_PER_DAY;
        Self {
            sign,
            validity: Some(Range::from_jd(jd - since_start, jd + until_end, *at.offset())),
        }
    }
}

fn sign_of(longitude_deg: f64) -> ZodiacSign {
    let lon = if longitude_deg.is_finite() {
        normalize_deg(longitude_deg)
    } else {
        0.0
    };
    ZodiacSign::from_index((lon / SIGN_WIDTH_DEG).floor() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn sign_boundaries() {
        assert_eq!(Zodiac::from_longitude(0.0).sign, ZodiacSign::Aries);
        assert_eq!(Zodiac::from_longitude(29.999).sign, ZodiacSign::Aries);
        assert_eq!(Zodiac::from_longitude(30.0).sign, ZodiacSign::Taurus);
        assert_eq!(Zodiac::from_longitude(359.9).sign, ZodiacSign::Pisces);
        assert_eq!(Zodiac::from_longitude(-15.0).sign, ZodiacSign::Pisces);
        assert_eq!(Zodiac::from_longitude(725.0).sign, ZodiacSign::Aries);
    }

    #[test]
    fn contiguous_probes() {
        let mut prev = Zodiac::from_longitude(12.5).sign.index();
        for i in 1..=24 {
            let idx = Zodiac::from_longitude(12.5 + 30.0 * i as f64).sign.index();
            assert_eq!(idx, (prev + 1) % 12, "probe {i}");
            prev = idx;
        }
    }

    #[test]
    fn validity_brackets_instant() {
        let at = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 4, 5, 0, 0, 0)
            .unwrap();
        let z = Zodiac::with_validity(15.0, &at);
        let r = z.validity.unwrap();
        assert!(r.matches(&at));
        let days = r.duration().unwrap().num_hours() as f64 / 24.0;
        assert!((days - 30.44).abs() < 0.1, "sign spans {days} days");
    }

    #[test]
    fn nan_longitude_does_not_panic() {
        assert_eq!(Zodiac::from_longitude(f64::NAN).sign, ZodiacSign::Aries);
    }
}
