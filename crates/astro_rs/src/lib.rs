//! Convenience wrapper over the Sun and Moon calculators.
//!
//! [`Astro`] owns the caches that outlive a single call (the Sun's zodiac
//! bands and the lunar phase tracker) and bundles everything known about the
//! Sun or the Moon at one instant and place.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use astro_rs::*;
//! use chrono::DateTime;
//!
//! let astro = Astro::new(AstroConfig::default());
//! let munich = GeoLocation::new(48.137, 11.575, Some(519.0))?;
//! let now = DateTime::parse_from_rfc3339("2024-06-21T12:00:00+02:00")?;
//! let sun = astro.sun_info(&now, &munich)?;
//! println!("sunrise {:?}, season {}", sun.day.rise.start(), sun.season.name.name());
//! ```

pub mod convenience;
pub mod error;

pub use convenience::{Astro, AstroConfig, MoonInfo, SunInfo};
pub use error::AstroError;

// Re-export the value types so callers can depend on this crate alone.
pub use astro_calc::{
    Circadian, CircadianConfig, FallbackReason, GeoLocation, MoonPosition, MoonRiseSet, Outcome,
    Position, Radiation, Range, Season, SeasonConvention, SeasonName, SunConfig, SunDay,
    SunPhaseName, SunZodiac, Zodiac, ZodiacSign,
};
pub use astro_search::{
    EclipseKind, EclipsedBody, LocalizedEclipse, MoonDistance, MoonPhase, MoonPhaseName,
    MoonPhaseSet,
};
