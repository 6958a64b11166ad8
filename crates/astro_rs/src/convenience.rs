//! Sun and Moon summaries for one instant and location.

use std::sync::{Mutex, PoisonError};

use astro_calc::{
    Circadian, CircadianConfig, GeoLocation, MoonPosition, MoonRiseSet, Outcome, Position,
    Radiation, Season, SeasonConvention, SunConfig, SunDay, SunPhaseName, SunZodiac,
    SunZodiacCache, Zodiac, circadian_for_day, moon_position, moon_rise_set, radiation_at,
    season_at, sun_day, sun_position,
};
use astro_search::{
    ApsisKind, EclipseStrategy, LUNAR, LocalizedEclipse, MoonDistance, MoonPhaseSet,
    MoonPhaseTracker, SOLAR, localize, moon_distance, next_apsis, next_eclipses,
};
use astro_time::{add_days, datetime_to_jd, midnight_jd, truncate_to_midnight};
use chrono::{DateTime, FixedOffset};
use log::debug;

use crate::error::AstroError;

/// Settings shared by every call on an [`Astro`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AstroConfig {
    pub convention: SeasonConvention,
    pub sun: SunConfig,
    pub circadian: CircadianConfig,
}

/// Everything about the Sun at one instant and place.
#[derive(Debug, Clone, PartialEq)]
pub struct SunInfo {
    pub position: Position,
    pub day: SunDay,
    pub phase: Option<SunPhaseName>,
    pub radiation: Radiation,
    pub zodiac: Option<SunZodiac>,
    pub season: Season,
    /// Next partial, total and ring eclipse from local midnight, in time order.
    pub eclipses: Vec<LocalizedEclipse>,
    pub circadian: Outcome<Circadian>,
}

/// Everything about the Moon at one instant and place.
#[derive(Debug, Clone, PartialEq)]
pub struct MoonInfo {
    pub position: MoonPosition,
    /// Events missing on the local day are taken from the following day.
    pub rise_set: MoonRiseSet,
    pub phase: Option<MoonPhaseSet>,
    /// Next partial and total eclipse from local midnight, in time order.
    pub eclipses: Vec<LocalizedEclipse>,
    pub distance: MoonDistance,
    pub apogee: Option<MoonDistance>,
    pub perigee: Option<MoonDistance>,
    /// Sign from the ecliptic longitude; no validity range.
    pub zodiac: Zodiac,
}

/// Entry point owning the per-process caches.
///
/// `Astro` is `Sync`; share it between threads behind an `Arc`.
#[derive(Debug, Default)]
pub struct Astro {
    config: AstroConfig,
    zodiac_cache: SunZodiacCache,
    phase_tracker: Mutex<MoonPhaseTracker>,
}

impl Astro {
    pub fn new(config: AstroConfig) -> Self {
        Self {
            config,
            zodiac_cache: SunZodiacCache::new(),
            phase_tracker: Mutex::new(MoonPhaseTracker::new()),
        }
    }

    pub fn config(&self) -> &AstroConfig {
        &self.config
    }

    pub fn sun_info(
        &self,
        date: &DateTime<FixedOffset>,
        location: &GeoLocation,
    ) -> Result<SunInfo, AstroError> {
        let jd = datetime_to_jd(date);
        let position = sun_position(jd, location);
        let day = sun_day(date, location, &self.config.sun);
        Ok(SunInfo {
            position,
            phase: day.phase_at(date),
            radiation: radiation_at(date, position.elevation_deg, location.altitude_m),
            zodiac: self.zodiac_cache.zodiac_at(date)?,
            season: season_at(date, location.latitude_deg, self.config.convention)?,
            eclipses: localized_eclipses(&SOLAR, date, location),
            circadian: circadian_for_day(date, &day, &self.config.circadian),
            day,
        })
    }

    pub fn moon_info(
        &self,
        date: &DateTime<FixedOffset>,
        location: &GeoLocation,
    ) -> Result<MoonInfo, AstroError> {
        let jd = datetime_to_jd(date);
        let position = moon_position(jd, location);
        let phase = self
            .phase_tracker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .calculate(date);
        Ok(MoonInfo {
            position,
            rise_set: rise_set_with_next_day(date, location),
            phase,
            eclipses: localized_eclipses(&LUNAR, date, location),
            distance: moon_distance(jd),
            apogee: next_apsis(ApsisKind::Apogee, jd),
            perigee: next_apsis(ApsisKind::Perigee, jd),
            zodiac: Zodiac::from_longitude(position.ecliptic_longitude_deg),
        })
    }
}

fn localized_eclipses(
    strategy: &EclipseStrategy,
    date: &DateTime<FixedOffset>,
    location: &GeoLocation,
) -> Vec<LocalizedEclipse> {
    next_eclipses(strategy, midnight_jd(date))
        .iter()
        .filter_map(|e| localize(e, location, *date.offset()))
        .collect()
}

fn rise_set_with_next_day(date: &DateTime<FixedOffset>, location: &GeoLocation) -> MoonRiseSet {
    let today = moon_rise_set(date, location);
    if today.rise.is_some() && today.set.is_some() {
        return today;
    }
    debug!("moon event missing on {}; using the next day", date.date_naive());
    let tomorrow = moon_rise_set(&add_days(&truncate_to_midnight(date), 1), location);
    MoonRiseSet {
        rise: today.rise.or(tomorrow.rise),
        set: today.set.or(tomorrow.set),
    }
}
