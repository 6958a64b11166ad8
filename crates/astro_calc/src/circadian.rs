//! Circadian lighting curve: brightness and colour temperature over the day.
//!
//! Inside daylight the brightness follows a parabola with its vertex
//! (100 %) at solar noon and zeros at sunrise and sunset. The sign tells
//! the caller which half of the day it is: positive before noon, negative
//! after. Outside daylight the curve is 0 %.

use chrono::{DateTime, FixedOffset};
use log::warn;

use crate::config::CircadianConfig;
use crate::outcome::{FallbackReason, Outcome};
use crate::sun_types::SunDay;

/// Brightness percentage and colour temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circadian {
    /// -100..=100; positive before solar noon, negative after.
    pub percentage: f64,
    pub kelvin: f64,
}

impl Circadian {
    fn new(percentage: f64, config: &CircadianConfig) -> Self {
        Self {
            percentage,
            kelvin: config.kelvin_for(percentage),
        }
    }
}

/// Evaluate the curve at `now` for the given sunrise, sunset and noon.
///
/// A missing event yields 0 % and a vertex on its endpoint yields 100 %,
/// both reported as [`Outcome::Defaulted`].
pub fn circadian(
    now: &DateTime<FixedOffset>,
    rise: Option<DateTime<FixedOffset>>,
    set: Option<DateTime<FixedOffset>>,
    noon: Option<DateTime<FixedOffset>>,
    config: &CircadianConfig,
) -> Outcome<Circadian> {
    let (Some(rise), Some(set), Some(noon)) = (rise, set, noon) else {
        warn!("circadian curve needs sunrise, sunset and noon; defaulting to 0 %");
        return Outcome::Defaulted {
            value: Circadian::new(0.0, config),
            reason: FallbackReason::MissingSunEvent,
        };
    };

    if rise == noon || set == noon {
        warn!("circadian parabola vertex coincides with an endpoint at {noon}; defaulting to 100 %");
        return Outcome::Defaulted {
            value: Circadian::new(100.0, config),
            reason: FallbackReason::DegenerateParabola,
        };
    }
    if *now < rise || *now >= set {
        return Outcome::Computed(Circadian::new(0.0, config));
    }

    let (endpoint, sign) = if *now < noon { (rise, 1.0) } else { (set, -1.0) };
    let x = (*now - noon).num_milliseconds() as f64
        / (endpoint - noon).num_milliseconds() as f64;
    let percentage = (100.0 * (1.0 - x * x)).clamp(0.0, 100.0);
    Outcome::Computed(Circadian::new(sign * percentage, config))
}

/// [`circadian`] using the sunrise start, sunset end and noon of a [`SunDay`].
pub fn circadian_for_day(
    now: &DateTime<FixedOffset>,
    day: &SunDay,
    config: &CircadianConfig,
) -> Outcome<Circadian> {
    circadian(now, day.rise.start(), day.set.end(), day.noon.start(), config)
}
