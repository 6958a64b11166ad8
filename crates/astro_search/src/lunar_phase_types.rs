//! Types for lunar phase search and the per-day phase set.

use astro_calc::Outcome;
use chrono::{DateTime, FixedOffset};

/// One of the four remarkable lunar phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoonPhase {
    New,
    FirstQuarter,
    Full,
    ThirdQuarter,
}

/// All remarkable phases, in lunation order.
pub const ALL_PHASES: [MoonPhase; 4] = [
    MoonPhase::New,
    MoonPhase::FirstQuarter,
    MoonPhase::Full,
    MoonPhase::ThirdQuarter,
];

impl MoonPhase {
    /// Fraction of a lunation after new moon.
    pub const fn offset(self) -> f64 {
        match self {
            Self::New => 0.0,
            Self::FirstQuarter => 0.25,
            Self::Full => 0.5,
            Self::ThirdQuarter => 0.75,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::New => 0,
            Self::FirstQuarter => 1,
            Self::Full => 2,
            Self::ThirdQuarter => 3,
        }
    }
}

/// Display name of the Moon's phase on a local day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoonPhaseName {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    ThirdQuarter,
    WaningCrescent,
}

impl MoonPhaseName {
    pub const fn name(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::WaxingCrescent => "WAXING_CRESCENT",
            Self::FirstQuarter => "FIRST_QUARTER",
            Self::WaxingGibbous => "WAXING_GIBBOUS",
            Self::Full => "FULL",
            Self::WaningGibbous => "WANING_GIBBOUS",
            Self::ThirdQuarter => "THIRD_QUARTER",
            Self::WaningCrescent => "WANING_CRESCENT",
        }
    }

    /// Intermediate name for a fraction of the lunation elapsed.
    pub fn from_age_fraction(fraction: f64) -> Self {
        if fraction < 0.25 {
            Self::WaxingCrescent
        } else if fraction < 0.5 {
            Self::WaxingGibbous
        } else if fraction < 0.75 {
            Self::WaningGibbous
        } else {
            Self::WaningCrescent
        }
    }
}

impl From<MoonPhase> for MoonPhaseName {
    fn from(phase: MoonPhase) -> Self {
        match phase {
            MoonPhase::New => Self::New,
            MoonPhase::FirstQuarter => Self::FirstQuarter,
            MoonPhase::Full => Self::Full,
            MoonPhase::ThirdQuarter => Self::ThirdQuarter,
        }
    }
}

/// Direction of a phase search relative to the start instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchDirection {
    /// First occurrence strictly after the instant.
    Forward,
    /// Last occurrence at or before the instant.
    Backward,
}

/// Lunar phase state for one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct MoonPhaseSet {
    /// New moon that started the current lunation.
    pub parent_new_moon: DateTime<FixedOffset>,
    /// Next occurrence of each remarkable phase from local midnight,
    /// indexed by [`MoonPhase::index`].
    pub next: [Option<DateTime<FixedOffset>>; 4],
    /// Illuminated fraction of the disc, [0, 1].
    pub illumination: f64,
    /// Days since the parent new moon.
    pub age_days: f64,
    /// Elapsed fraction of the lunation, [0, 1).
    pub age_fraction: Outcome<f64>,
    pub name: MoonPhaseName,
}

impl MoonPhaseSet {
    /// Next occurrence of `phase` from local midnight.
    pub fn next_phase(&self, phase: MoonPhase) -> Option<DateTime<FixedOffset>> {
        self.next[phase.index()]
    }

    /// Age as a phase angle in degrees.
    pub fn age_degrees(&self) -> f64 {
        self.age_fraction.value() * 360.0
    }
}
