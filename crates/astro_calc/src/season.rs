//! Equinoxes, solstices and the current season.
//!
//! Source: Meeus, "Astronomical Algorithms", ch. 27 (tables 27.B and 27.C),
//! valid for years 1000–3000.

use astro_time::{cos_deg, datetime_to_jd, jd_to_datetime, local_midnight};
use chrono::{DateTime, Datelike, FixedOffset, TimeDelta};

use crate::error::CalcError;

/// Equinox or solstice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeasonMarker {
    MarchEquinox,
    JuneSolstice,
    SeptemberEquinox,
    DecemberSolstice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeasonName {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl SeasonName {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Spring => "SPRING",
            Self::Summer => "SUMMER",
            Self::Autumn => "AUTUMN",
            Self::Winter => "WINTER",
        }
    }
}

/// Where season boundaries lie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SeasonConvention {
    /// Equinox and solstice instants.
    #[default]
    Astronomical,
    /// First day of March, June, September and December at local midnight.
    Meteorological,
}

/// Quartic coefficients in Y = (year - 2000) / 1000 (Meeus table 27.B).
fn mean_marker_jde(marker: SeasonMarker, y: f64) -> f64 {
    let c: [f64; 5] = match marker {
        SeasonMarker::MarchEquinox => [2_451_623.809_84, 365_242.374_04, 0.051_69, -0.004_11, -0.000_57],
        SeasonMarker::JuneSolstice => [2_451_716.567_67, 365_241.626_03, 0.003_25, 0.008_88, -0.000_30],
        SeasonMarker::SeptemberEquinox => [2_451_810.217_15, 365_242.017_67, -0.115_75, 0.003_37, 0.000_78],
        SeasonMarker::DecemberSolstice => [2_451_900.059_52, 365_242.740_49, -0.062_23, -0.008_23, 0.000_32],
    };
    c[0] + y * (c[1] + y * (c[2] + y * (c[3] + y * c[4])))
}

/// Periodic terms A·cos(B + C·T) (Meeus table 27.C).
const PERIODIC_TERMS: [(f64, f64, f64); 24] = [
    (485.0, 324.96, 1934.136),
    (203.0, 337.23, 32964.467),
    (199.0, 342.08, 20.186),
    (182.0, 27.85, 445267.112),
    (156.0, 73.14, 45036.886),
    (136.0, 171.52, 22518.443),
    (77.0, 222.54, 65928.934),
    (74.0, 296.72, 3034.906),
    (70.0, 243.58, 9037.513),
    (58.0, 119.81, 33718.147),
    (52.0, 297.17, 150.678),
    (50.0, 21.02, 2281.226),
    (45.0, 247.54, 29929.562),
    (44.0, 325.15, 31555.956),
    (29.0, 60.93, 4443.417),
    (18.0, 155.12, 67555.328),
    (17.0, 288.79, 4562.452),
    (16.0, 198.04, 62894.029),
    (14.0, 199.76, 31436.921),
    (12.0, 95.39, 14577.848),
    (12.0, 287.11, 31931.756),
    (12.0, 320.81, 34777.259),
    (9.0, 227.73, 1222.114),
    (8.0, 15.45, 16859.074),
];

/// Julian Date of an equinox or solstice in `year`.
pub fn marker_jd(marker: SeasonMarker, year: i32) -> f64 {
    let jde0 = mean_marker_jde(marker, (f64::from(year) - 2000.0) / 1000.0);
    let t = (jde0 - 2_451_545.0) / 36_525.0;
    let w = 35_999.373 * t - 2.47;
    let dl = 1.0 + 0.0334 * cos_deg(w) + 0.0007 * cos_deg(2.0 * w);
    let s: f64 = PERIODIC_TERMS
        .iter()
        .map(|&(a, b, c)| a * cos_deg(b + c * t))
        .sum();
    jde0 + 0.00001 * s / dl
}

/// Six consecutive equinox/solstice instants around one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonMarkers {
    pub previous_december: DateTime<FixedOffset>,
    pub march: DateTime<FixedOffset>,
    pub june: DateTime<FixedOffset>,
    pub september: DateTime<FixedOffset>,
    pub december: DateTime<FixedOffset>,
    pub next_march: DateTime<FixedOffset>,
}

impl SeasonMarkers {
    pub fn as_array(&self) -> [DateTime<FixedOffset>; 6] {
        [
            self.previous_december,
            self.march,
            self.june,
            self.september,
            self.december,
            self.next_march,
        ]
    }
}

/// Previous December solstice through next March equinox for `year`.
pub fn season_markers(year: i32, offset: FixedOffset) -> Result<SeasonMarkers, CalcError> {
    let at = |marker, y| jd_to_datetime(marker_jd(marker, y), offset);
    Ok(SeasonMarkers {
        previous_december: at(SeasonMarker::DecemberSolstice, year - 1)?,
        march: at(SeasonMarker::MarchEquinox, year)?,
        june: at(SeasonMarker::JuneSolstice, year)?,
        september: at(SeasonMarker::SeptemberEquinox, year)?,
        december: at(SeasonMarker::DecemberSolstice, year)?,
        next_march: at(SeasonMarker::MarchEquinox, year + 1)?,
    })
}

fn meteorological_boundaries(
    year: i32,
    offset: FixedOffset,
) -> Result<[DateTime<FixedOffset>; 6], CalcError> {
    Ok([
        local_midnight(year - 1, 12, 1, offset)?,
        local_midnight(year, 3, 1, offset)?,
        local_midnight(year, 6, 1, offset)?,
        local_midnight(year, 9, 1, offset)?,
        local_midnight(year, 12, 1, offset)?,
        local_midnight(year + 1, 3, 1, offset)?,
    ])
}

const NORTHERN: [SeasonName; 6] = [
    SeasonName::Winter,
    SeasonName::Spring,
    SeasonName::Summer,
    SeasonName::Autumn,
    SeasonName::Winter,
    SeasonName::Spring,
];

const SOUTHERN: [SeasonName; 6] = [
    SeasonName::Summer,
    SeasonName::Autumn,
    SeasonName::Winter,
    SeasonName::Spring,
    SeasonName::Summer,
    SeasonName::Autumn,
];

/// Season state of a date for one hemisphere and convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Season {
    /// Astronomical markers, independent of convention.
    pub markers: SeasonMarkers,
    /// Start of each season in the current year under the chosen
    /// convention, mapped to the observer's hemisphere.
    pub spring: DateTime<FixedOffset>,
    pub summer: DateTime<FixedOffset>,
    pub autumn: DateTime<FixedOffset>,
    pub winter: DateTime<FixedOffset>,
    pub name: SeasonName,
    pub next_name: SeasonName,
    pub next_start: DateTime<FixedOffset>,
    pub time_left: TimeDelta,
}

impl Season {
    /// Whole days until the next season starts.
    pub fn days_left(&self) -> i64 {
        self.time_left.num_days()
    }
}

/// Current season at `date` for an observer at `latitude_deg`.
pub fn season_at(
    date: &DateTime<FixedOffset>,
    latitude_deg: f64,
    convention: SeasonConvention,
) -> Result<Season, CalcError> {
    let offset = *date.offset();
    let year = date.year();
    let markers = season_markers(year, offset)?;
    let bounds = match convention {
        SeasonConvention::Astronomical => markers.as_array(),
        SeasonConvention::Meteorological => meteorological_boundaries(year, offset)?,
    };
    let names = if latitude_deg < 0.0 { &SOUTHERN } else { &NORTHERN };

    let jd = datetime_to_jd(date);
    // bounds[0] < Jan 1 and bounds[5] > Dec 31, so an interval always matches
    let idx = (0..5)
        .find(|&i| datetime_to_jd(&bounds[i + 1]) > jd)
        .unwrap_or(4);

    let (spring, summer, autumn, winter) = if latitude_deg < 0.0 {
        (bounds[3], bounds[4], bounds[1], bounds[2])
    } else {
        (bounds[1], bounds[2], bounds[3], bounds[4])
    };
    let next_start = bounds[idx + 1];
    Ok(Season {
        markers,
        spring,
        summer,
        autumn,
        winter,
        name: names[idx],
        next_name: names[idx + 1],
        next_start,
        time_left: next_start - *date,
    })
}
