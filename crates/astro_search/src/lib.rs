//! Iterative lunar searches built on Meeus periodic series.
//!
//! This crate provides:
//! - New moon, quarter and full moon instants with forward/backward search
//! - Illuminated fraction and a caller-owned [`MoonPhaseTracker`]
//! - Solar and lunar eclipse search behind one [`EclipseStrategy`] value
//! - Earth–Moon distance and apogee/perigee search
//!
//! Every search is bounded; an exhausted search returns `None` and logs a
//! warning.

pub mod distance;
pub mod eclipse;
pub mod eclipse_types;
pub mod lunar_phase;
pub mod lunar_phase_types;
pub mod lunation;

pub use distance::{
    ApsisKind, MEAN_DISTANCE_KM, MoonDistance, apsis_jd, moon_distance, moon_distance_km,
    next_apsis,
};
pub use eclipse::{LUNAR, SOLAR, localize, next_eclipses, search_eclipse};
pub use eclipse_types::{
    Eclipse, EclipseGeometry, EclipseKind, EclipseStrategy, EclipsedBody, LocalizedEclipse,
};
pub use lunar_phase::{MoonPhaseTracker, illumination, phase_jd, search_phase};
pub use lunar_phase_types::{
    ALL_PHASES, MoonPhase, MoonPhaseName, MoonPhaseSet, SearchDirection,
};
pub use lunation::{LUNATION_EPOCH_JD, SYNODIC_MONTH_DAYS, lunation_index};
