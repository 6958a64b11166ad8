//! New moon, quarters and full moon; illuminated fraction.
//!
//! Phase instants are the mean lunation plus the periodic terms of
//! Meeus ch. 49. Searches step the lunation index one month at a time and give
//! up after [`MAX_LUNATION_STEPS`], returning `None`.
//!
//! The illuminated fraction uses the low-accuracy phase angle of Meeus ch. 48
//! (eq. 48.4 with the D/M/M′ series).

use astro_calc::{FallbackReason, Outcome};
use astro_time::{
    cos_deg, datetime_to_jd, is_same_day, jd_to_datetime, julian_centuries, midnight_jd, sin_deg,
};
use chrono::{DateTime, FixedOffset};
use log::{debug, warn};

use crate::lunar_phase_types::{
    ALL_PHASES, MoonPhase, MoonPhaseName, MoonPhaseSet, SearchDirection,
};
use crate::lunation::{LunationArgs, lunation_index, planetary_correction};

/// Lunations tried before a phase search gives up.
pub const MAX_LUNATION_STEPS: usize = 8;

// ---------------------------------------------------------------------------
// Periodic terms
// ---------------------------------------------------------------------------

/// `(coefficient, power of E, M, M′, F)`: coefficient·Eⁿ·sin(a·M + b·M′ + c·F).
type PhaseTerm = (f64, i32, f64, f64, f64);

const NEW_HEAD: [PhaseTerm; 7] = [
    (-0.407_20, 0, 0.0, 1.0, 0.0),
    (0.172_41, 1, 1.0, 0.0, 0.0),
    (0.016_08, 0, 0.0, 2.0, 0.0),
    (0.010_39, 0, 0.0, 0.0, 2.0),
    (0.007_39, 1, -1.0, 1.0, 0.0),
    (-0.005_14, 1, 1.0, 1.0, 0.0),
    (0.002_08, 2, 2.0, 0.0, 0.0),
];

const FULL_HEAD: [PhaseTerm; 7] = [
    (-0.406_14, 0, 0.0, 1.0, 0.0),
    (0.173_02, 1, 1.0, 0.0, 0.0),
    (0.016_14, 0, 0.0, 2.0, 0.0),
    (0.010_43, 0, 0.0, 0.0, 2.0),
    (0.007_34, 1, -1.0, 1.0, 0.0),
    (-0.005_15, 1, 1.0, 1.0, 0.0),
    (0.002_09, 2, 2.0, 0.0, 0.0),
];

/// Terms shared by new and full moon.
const SYZYGY_TAIL: [PhaseTerm; 17] = [
    (-0.001_11, 0, 0.0, 1.0, -2.0),
    (-0.000_57, 0, 0.0, 1.0, 2.0),
    (0.000_56, 1, 1.0, 2.0, 0.0),
    (-0.000_42, 0, 0.0, 3.0, 0.0),
    (0.000_42, 1, 1.0, 0.0, 2.0),
    (0.000_38, 1, 1.0, 0.0, -2.0),
    (-0.000_24, 1, -1.0, 2.0, 0.0),
    (-0.000_07, 0, 2.0, 1.0, 0.0),
    (0.000_04, 0, 0.0, 2.0, -2.0),
    (0.000_04, 0, 3.0, 0.0, 0.0),
    (0.000_03, 0, 1.0, 1.0, -2.0),
    (0.000_03, 0, 0.0, 2.0, 2.0),
    (-0.000_03, 0, 1.0, 1.0, 2.0),
    (0.000_03, 0, -1.0, 1.0, 2.0),
    (-0.000_02, 0, -1.0, 1.0, -2.0),
    (-0.000_02, 0, 1.0, 3.0, 0.0),
    (0.000_02, 0, 0.0, 4.0, 0.0),
];

const QUARTER: [PhaseTerm; 24] = [
    (-0.628_01, 0, 0.0, 1.0, 0.0),
    (0.171_72, 1, 1.0, 0.0, 0.0),
    (-0.011_83, 1, 1.0, 1.0, 0.0),
    (0.008_62, 0, 0.0, 2.0, 0.0),
    (0.008_04, 0, 0.0, 0.0, 2.0),
    (0.004_54, 1, -1.0, 1.0, 0.0),
    (0.002_04, 2, 2.0, 0.0, 0.0),
    (-0.001_80, 0, 0.0, 1.0, -2.0),
    (-0.000_70, 0, 0.0, 1.0, 2.0),
    (-0.000_40, 0, 0.0, 3.0, 0.0),
    (-0.000_34, 1, -1.0, 2.0, 0.0),
    (0.000_32, 1, 1.0, 0.0, 2.0),
    (0.000_32, 1, 1.0, 0.0, -2.0),
    (-0.000_28, 2, 2.0, 1.0, 0.0),
    (0.000_27, 1, 1.0, 2.0, 0.0),
    (-0.000_05, 0, -1.0, 1.0, -2.0),
    (0.000_04, 0, 0.0, 2.0, 2.0),
    (-0.000_04, 0, 1.0, 1.0, 2.0),
    (0.000_04, 0, -2.0, 1.0, 0.0),
    (0.000_03, 0, 1.0, 1.0, -2.0),
    (0.000_03, 0, 3.0, 0.0, 0.0),
    (0.000_02, 0, 0.0, 2.0, -2.0),
    (0.000_02, 0, -1.0, 1.0, 2.0),
    (-0.000_02, 0, 1.0, 3.0, 0.0),
];

fn sum_terms(terms: &[PhaseTerm], a: &LunationArgs) -> f64 {
    terms
        .iter()
        .map(|&(coef, e_pow, m, m1, f)| {
            coef * a.e.powi(e_pow) * sin_deg(m * a.m + m1 * a.m1 + f * a.f)
        })
        .sum()
}

/// Quarter-phase W correction; added at first quarter, subtracted at third.
fn quarter_w(a: &LunationArgs) -> f64 {
    0.003_06 - 0.000_38 * a.e * cos_deg(a.m) + 0.000_26 * cos_deg(a.m1)
        - 0.000_02 * cos_deg(a.m1 - a.m)
        + 0.000_02 * cos_deg(a.m1 + a.m)
        + 0.000_02 * cos_deg(2.0 * a.f)
}

/// Instant (JD) of `phase` in the lunation whose index floors to `k`.
pub fn phase_jd(k: f64, phase: MoonPhase) -> f64 {
    let a = LunationArgs::at(k.floor() + phase.offset());
    let node = -0.000_17 * sin_deg(a.omega);
    let periodic = match phase {
        MoonPhase::New => sum_terms(&NEW_HEAD, &a) + sum_terms(&SYZYGY_TAIL, &a),
        MoonPhase::Full => sum_terms(&FULL_HEAD, &a) + sum_terms(&SYZYGY_TAIL, &a),
        MoonPhase::FirstQuarter => sum_terms(&QUARTER, &a) + quarter_w(&a),
        MoonPhase::ThirdQuarter => sum_terms(&QUARTER, &a) - quarter_w(&a),
    };
    a.mean_jd + periodic + node + planetary_correction(&a)
}

/// Nearest occurrence of `phase` in `direction` from `jd`.
///
/// Forward returns the first instant strictly after `jd`; backward the last
/// instant at or before it.
pub fn search_phase(jd: f64, phase: MoonPhase, direction: SearchDirection) -> Option<f64> {
    let k0 = lunation_index(jd).floor();
    let found = match direction {
        SearchDirection::Forward => (0..MAX_LUNATION_STEPS)
            .map(|i| phase_jd(k0 - 1.0 + i as f64, phase))
            .find(|&candidate| candidate > jd),
        SearchDirection::Backward => (0..MAX_LUNATION_STEPS)
            .map(|i| phase_jd(k0 + 1.0 - i as f64, phase))
            .find(|&candidate| candidate <= jd),
    };
    if found.is_none() {
        warn!(
            "{phase:?} search {direction:?} from JD {jd} exhausted {MAX_LUNATION_STEPS} lunations"
        );
    }
    found
}

/// Illuminated fraction of the lunar disc, in [0, 1].
pub fn illumination(jd: f64) -> f64 {
    let t = julian_centuries(jd);
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let d = 297.850_204_2 + 445_267.111_516_86 * t - 0.001_63 * t2 + t3 / 545_868.0
        - t4 / 113_065_000.0;
    let m = 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0;
    let m1 = 134.963_411_4 + 477_198.867_631_3 * t + 0.008_997 * t2 + t3 / 69_699.0
        - t4 / 14_712_000.0;
    let phase_angle = 180.0 - d - 6.289 * sin_deg(m1) + 2.100 * sin_deg(m)
        - 1.274 * sin_deg(2.0 * d - m1)
        - 0.658 * sin_deg(2.0 * d)
        - 0.241 * sin_deg(2.0 * m1)
        - 0.110 * sin_deg(d);
    ((1.0 + cos_deg(phase_angle)) / 2.0).clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Phase tracker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
struct CachedPhases {
    parent_jd: f64,
    /// Last occurrence of each phase at or before the midnight searched from.
    prev_jd: [Option<f64>; 4],
    next_jd: [Option<f64>; 4],
}

impl CachedPhases {
    fn search(parent_jd: f64, midnight: f64) -> Self {
        Self {
            parent_jd,
            prev_jd: ALL_PHASES.map(|p| search_phase(midnight, p, SearchDirection::Backward)),
            next_jd: ALL_PHASES.map(|p| search_phase(midnight, p, SearchDirection::Forward)),
        }
    }

    /// Each phase has `prev <= midnight < next`, so `next` is the first one after midnight.
    fn brackets(&self, midnight: f64) -> bool {
        self.prev_jd.iter().zip(&self.next_jd).all(|(prev, next)| match (prev, next) {
            (Some(prev), Some(next)) => *prev <= midnight && midnight < *next,
            _ => false,
        })
    }
}

/// Caller-owned memo of the current lunation's phase instants.
///
/// The searches only rerun when the parent new moon changes or a cached
/// phase instant is no longer the first one after the requested day's
/// midnight. Dates may be requested in any order.
#[derive(Debug, Clone, Default)]
pub struct MoonPhaseTracker {
    cached: Option<CachedPhases>,
}

impl MoonPhaseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Phase state at `date`, or `None` when the parent new moon cannot be found.
    pub fn calculate(&mut self, date: &DateTime<FixedOffset>) -> Option<MoonPhaseSet> {
        let offset = *date.offset();
        let jd = datetime_to_jd(date);
        let midnight = midnight_jd(date);
        let parent_jd = search_phase(jd, MoonPhase::New, SearchDirection::Backward)?;

        let phases = match self.cached {
            Some(c) if c.parent_jd == parent_jd && c.brackets(midnight) => c,
            _ => {
                debug!("recomputing lunar phases from JD {midnight}");
                let fresh = CachedPhases::search(parent_jd, midnight);
                self.cached = Some(fresh);
                fresh
            }
        };

        let next = phases
            .next_jd
            .map(|n| n.and_then(|n| jd_to_datetime(n, offset).ok()));
        let age_fraction = age_fraction(jd, parent_jd, &phases);
        let name = ALL_PHASES
            .iter()
            .find(|p| next[p.index()].is_some_and(|t| is_same_day(date, &t)))
            .map(|&p| MoonPhaseName::from(p))
            .unwrap_or_else(|| MoonPhaseName::from_age_fraction(*age_fraction.value()));

        Some(MoonPhaseSet {
            parent_new_moon: jd_to_datetime(parent_jd, offset).ok()?,
            next,
            illumination: illumination(jd),
            age_days: jd - parent_jd,
            age_fraction,
            name,
        })
    }
}

fn age_fraction(jd: f64, parent_jd: f64, phases: &CachedPhases) -> Outcome<f64> {
    // the new moon searched from midnight may be the parent itself
    let next_new = phases.next_jd[MoonPhase::New.index()]
        .filter(|&n| n > parent_jd)
        .or_else(|| search_phase(jd, MoonPhase::New, SearchDirection::Forward));
    match next_new.map(|n| n - parent_jd) {
        Some(length) if length > 0.0 => {
            Outcome::Computed(((jd - parent_jd) / length).clamp(0.0, 1.0))
        }
        _ => {
            warn!("lunation starting at JD {parent_jd} has no length; age fraction defaults to 0");
            Outcome::Defaulted {
                value: 0.0,
                reason: FallbackReason::ZeroLunation,
            }
        }
    }
}
