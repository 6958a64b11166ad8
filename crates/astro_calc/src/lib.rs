//! Positional and calendar calculators for the Sun and Moon.
//!
//! This crate provides:
//! - Solar azimuth/elevation and the rise/set/twilight/night ranges of a day
//! - Lunar topocentric position and moonrise/moonset
//! - Equinox/solstice instants and the current season
//! - Zodiac signs from ecliptic longitude and the Sun's calendar bands
//! - Clear-sky radiation and the circadian lighting curve
//!
//! Every calculator is a pure function of its inputs. The only state is
//! [`SunZodiacCache`], which the caller owns.

pub mod circadian;
pub mod config;
pub mod error;
pub mod frames;
pub mod location;
pub mod moon;
pub mod moon_types;
pub mod outcome;
pub mod position;
pub mod radiation;
pub mod range;
pub mod season;
pub mod sun;
pub mod sun_types;
pub mod sun_zodiac;
pub mod zodiac;

pub use circadian::{Circadian, circadian, circadian_for_day};
pub use config::{CircadianConfig, SunConfig};
pub use error::CalcError;
pub use location::GeoLocation;
pub use moon::{moon_position, moon_rise_set};
pub use moon_types::{MoonPosition, MoonRiseSet};
pub use outcome::{FallbackReason, Outcome};
pub use position::Position;
pub use radiation::{Radiation, radiation, radiation_at};
pub use range::Range;
pub use season::{
    Season, SeasonConvention, SeasonMarker, SeasonMarkers, SeasonName, marker_jd, season_at,
    season_markers,
};
pub use sun::{
    is_sun_up_all_day, sun_day, sun_ecliptic_longitude_deg, sun_position, sun_position_at,
};
pub use sun_types::{SunDay, SunPhaseName};
pub use sun_zodiac::{SunZodiac, SunZodiacCache, find_sun_zodiac, sun_zodiac_bands};
pub use zodiac::{ALL_SIGNS, Zodiac, ZodiacSign};
