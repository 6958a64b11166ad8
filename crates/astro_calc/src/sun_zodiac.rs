//! Calendar-banded zodiac sign of the Sun.
//!
//! Thirteen fixed calendar bands per year (Capricorn straddles New Year and
//! appears twice). [`SunZodiacCache`] keeps one year's bands for one UTC
//! offset and replaces them wholesale when either changes.

use std::sync::{Arc, Mutex, PoisonError};

use astro_time::{add_days, local_midnight};
use chrono::{DateTime, Datelike, FixedOffset};
use log::debug;

use crate::error::CalcError;
use crate::range::Range;
use crate::zodiac::ZodiacSign;

/// Sign of the Sun with its calendar validity range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunZodiac {
    pub sign: ZodiacSign,
    pub range: Range,
}

/// (sign, start (year delta, month, day), last day (year delta, month, day))
type Band = (ZodiacSign, (i32, u32, u32), (i32, u32, u32));

const BANDS: [Band; 13] = [
    (ZodiacSign::Capricorn, (-1, 12, 22), (0, 1, 19)),
    (ZodiacSign::Aquarius, (0, 1, 20), (0, 2, 18)),
    (ZodiacSign::Pisces, (0, 2, 19), (0, 3, 20)),
    (ZodiacSign::Aries, (0, 3, 21), (0, 4, 19)),
    (ZodiacSign::Taurus, (0, 4, 20), (0, 5, 20)),
    (ZodiacSign::Gemini, (0, 5, 21), (0, 6, 20)),
    (ZodiacSign::Cancer, (0, 6, 21), (0, 7, 22)),
    (ZodiacSign::Leo, (0, 7, 23), (0, 8, 22)),
    (ZodiacSign::Virgo, (0, 8, 23), (0, 9, 22)),
    (ZodiacSign::Libra, (0, 9, 23), (0, 10, 22)),
    (ZodiacSign::Scorpio, (0, 10, 23), (0, 11, 21)),
    (ZodiacSign::Sagittarius, (0, 11, 22), (0, 12, 21)),
    (ZodiacSign::Capricorn, (0, 12, 22), (1, 1, 19)),
];

/// The 13 calendar bands of `year`, each from local midnight of its first
/// day to local midnight after its last day.
pub fn sun_zodiac_bands(year: i32, offset: FixedOffset) -> Result<Vec<SunZodiac>, CalcError> {
    BANDS
        .iter()
        .map(|&(sign, (sy, sm, sd), (ey, em, ed))| {
            let start = local_midnight(year + sy, sm, sd, offset)?;
            let last_day = local_midnight(year + ey, em, ed, offset)?;
            Ok(SunZodiac {
                sign,
                range: Range::new(Some(start), Some(add_days(&last_day, 1))),
            })
        })
        .collect()
}

/// Band containing `date`, by linear scan.
pub fn find_sun_zodiac(bands: &[SunZodiac], date: &DateTime<FixedOffset>) -> Option<SunZodiac> {
    bands.iter().find(|z| z.range.matches(date)).copied()
}

#[derive(Debug)]
struct CachedBands {
    year: i32,
    offset_seconds: i32,
    bands: Arc<[SunZodiac]>,
}

/// Caller-owned memo of one year's sun zodiac bands.
///
/// Safe to share between threads; the recompute-and-replace step runs
/// under a lock.
#[derive(Debug, Default)]
pub struct SunZodiacCache {
    cached: Mutex<Option<CachedBands>>,
}

impl SunZodiacCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bands for `year` in `offset`, recomputed when the key changed.
    pub fn bands(&self, year: i32, offset: FixedOffset) -> Result<Arc<[SunZodiac]>, CalcError> {
        let offset_seconds = offset.local_minus_utc();
        let mut guard = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(c) = guard.as_ref() {
            if c.year == year && c.offset_seconds == offset_seconds {
                return Ok(Arc::clone(&c.bands));
            }
        }
        debug!("computing sun zodiac bands for {year} at offset {offset}");
        let bands: Arc<[SunZodiac]> = sun_zodiac_bands(year, offset)?.into();
        *guard = Some(CachedBands {
            year,
            offset_seconds,
            bands: Arc::clone(&bands),
        });
        Ok(bands)
    }

    /// Sun sign for the local date of `date`.
    pub fn zodiac_at(&self, date: &DateTime<FixedOffset>) -> Result<Option<SunZodiac>, CalcError> {
        let bands = self.bands(date.year(), *date.offset())?;
        Ok(find_sun_zodiac(&bands, date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn cet() -> FixedOffset {
        FixedOffset::east_opt(3600).unwrap()
    }

    #[test]
    fn bands_are_contiguous() {
        let bands = sun_zodiac_bands(2024, cet()).unwrap();
        assert_eq!(bands.len(), 13);
        for w in bands.windows(2) {
            assert_eq!(w[0].range.end(), w[1].range.start(), "{:?} / {:?}", w[0].sign, w[1].sign);
        }
    }

    #[test]
    fn band_edges() {
        let cache = SunZodiacCache::new();
        let last_aries = cet().with_ymd_and_hms(2024, 4, 19, 23, 59, 0).unwrap();
        let first_taurus = cet().with_ymd_and_hms(2024, 4, 20, 0, 0, 0).unwrap();
        assert_eq!(cache.zodiac_at(&last_aries).unwrap().unwrap().sign, ZodiacSign::Aries);
        assert_eq!(cache.zodiac_at(&first_taurus).unwrap().unwrap().sign, ZodiacSign::Taurus);
    }

    #[test]
    fn capricorn_on_both_year_ends() {
        let cache = SunZodiacCache::new();
        let jan = cet().with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();
        let dec = cet().with_ymd_and_hms(2024, 12, 30, 12, 0, 0).unwrap();
        assert_eq!(cache.zodiac_at(&jan).unwrap().unwrap().sign, ZodiacSign::Capricorn);
        assert_eq!(cache.zodiac_at(&dec).unwrap().unwrap().sign, ZodiacSign::Capricorn);
    }

    #[test]
    fn cache_is_replaced_on_new_year() {
        let cache = SunZodiacCache::new();
        let a = cache.bands(2024, cet()).unwrap();
        let b = cache.bands(2024, cet()).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        let c = cache.bands(2025, cet()).unwrap();
        assert!(!Arc::ptr_eq(&a, &c));
        let utc = FixedOffset::east_opt(0).unwrap();
        let d = cache.bands(2025, utc).unwrap();
        assert!(!Arc::ptr_eq(&c, &d));
    }

    #[test]
    fn shared_between_threads() {
        let cache = Arc::new(SunZodiacCache::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    let date = cet().with_ymd_and_hms(2020 + i, 7, 1, 12, 0, 0).unwrap();
                    cache.zodiac_at(&date).unwrap().unwrap().sign
                })
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), ZodiacSign::Cancer);
        }
    }
}
