//! Types for the solar day: named phases and their time ranges.

use chrono::{DateTime, FixedOffset};

use crate::range::Range;

/// Named phases of the solar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SunPhaseName {
    SunRise,
    AstroDawn,
    NauticDawn,
    CivilDawn,
    CivilDusk,
    NauticDusk,
    AstroDusk,
    SunSet,
    Daylight,
    Noon,
    Night,
    MorningNight,
    EveningNight,
}

impl SunPhaseName {
    pub const fn name(self) -> &'static str {
        match self {
            Self::SunRise => "SUN_RISE",
            Self::AstroDawn => "ASTRO_DAWN",
            Self::NauticDawn => "NAUTIC_DAWN",
            Self::CivilDawn => "CIVIL_DAWN",
            Self::CivilDusk => "CIVIL_DUSK",
            Self::NauticDusk => "NAUTIC_DUSK",
            Self::AstroDusk => "ASTRO_DUSK",
            Self::SunSet => "SUN_SET",
            Self::Daylight => "DAYLIGHT",
            Self::Noon => "NOON",
            Self::Night => "NIGHT",
            Self::MorningNight => "MORNING_NIGHT",
            Self::EveningNight => "EVENING_NIGHT",
        }
    }
}

/// All rise/set, twilight and night ranges of one local day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunDay {
    /// Start to end of sunrise (centre at -0.83° to upper limb risen).
    pub rise: Range,
    /// Start to end of sunset.
    pub set: Range,
    /// Solar transit, one minute long.
    pub noon: Range,
    pub astro_dawn: Range,
    pub nautic_dawn: Range,
    pub civil_dawn: Range,
    pub civil_dusk: Range,
    pub nautic_dusk: Range,
    pub astro_dusk: Range,
    pub daylight: Range,
    /// From the end of last night's astronomical dusk to this morning's dawn.
    pub morning_night: Range,
    /// From tonight's astronomical dusk to midnight.
    pub evening_night: Range,
    /// From tonight's astronomical dusk to tomorrow's astronomical dawn.
    pub night: Range,
    /// Whether the Sun stays above the horizon for the whole day.
    pub sun_up_all_day: bool,
}

impl SunDay {
    /// Every range with its phase name.
    pub fn ranges(&self) -> [(SunPhaseName, Range); 13] {
        [
            (SunPhaseName::SunRise, self.rise),
            (SunPhaseName::SunSet, self.set),
            (SunPhaseName::Noon, self.noon),
            (SunPhaseName::Night, self.night),
            (SunPhaseName::MorningNight, self.morning_night),
            (SunPhaseName::AstroDawn, self.astro_dawn),
            (SunPhaseName::NauticDawn, self.nautic_dawn),
            (SunPhaseName::CivilDawn, self.civil_dawn),
            (SunPhaseName::AstroDusk, self.astro_dusk),
            (SunPhaseName::NauticDusk, self.nautic_dusk),
            (SunPhaseName::CivilDusk, self.civil_dusk),
            (SunPhaseName::EveningNight, self.evening_night),
            (SunPhaseName::Daylight, self.daylight),
        ]
    }

    /// Phase containing `t`.
    ///
    /// Ranges are visited in order of their start; when several contain `t`
    /// the one starting last wins. Morning and evening night are reported
    /// as [`SunPhaseName::Night`].
    pub fn phase_at(&self, t: &DateTime<FixedOffset>) -> Option<SunPhaseName> {
        let mut ranges = self.ranges();
        ranges.sort_by(|a, b| a.1.cmp_by_start(&b.1));
        ranges
            .iter()
            .filter(|(_, r)| r.matches(t))
            .map(|(name, _)| match name {
                SunPhaseName::MorningNight | SunPhaseName::EveningNight => SunPhaseName::Night,
                other => *other,
            })
            .last()
    }
}
