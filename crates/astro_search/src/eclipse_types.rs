//! Types for eclipse search.

use chrono::{DateTime, FixedOffset};

/// Eclipse classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EclipseKind {
    Partial,
    Total,
    /// Annular; solar only.
    Ring,
}

impl EclipseKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Partial => "PARTIAL",
            Self::Total => "TOTAL",
            Self::Ring => "RING",
        }
    }
}

/// Body that is eclipsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EclipsedBody {
    Sun,
    Moon,
}

/// Intermediate quantities handed to an eclipse classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipseGeometry {
    /// Eccentricity factor.
    pub e: f64,
    /// Sun's mean anomaly, degrees.
    pub m: f64,
    /// Moon's mean anomaly, degrees.
    pub m1: f64,
    /// Least distance of the shadow axis from the Earth's centre, Earth radii.
    pub gamma: f64,
    /// Radius of the umbral cone in the fundamental plane, Earth radii.
    pub u: f64,
}

/// Everything that differs between solar and lunar eclipse search.
#[derive(Debug, Clone, Copy)]
pub struct EclipseStrategy {
    pub body: EclipsedBody,
    /// Kinds this body can show.
    pub kinds: &'static [EclipseKind],
    /// Lunation fraction of the syzygy: 0 for new moon, 0.5 for full moon.
    pub lunation_offset: f64,
    /// Coefficients of `sin M′` and `E·sin M` in the instant correction.
    pub anomaly_terms: (f64, f64),
    /// Kind of eclipse at a candidate, `None` when there is none.
    pub classify: fn(&EclipseGeometry) -> Option<EclipseKind>,
}

impl EclipseStrategy {
    /// Whether this body can show an eclipse of `kind`.
    pub fn accepts(&self, kind: EclipseKind) -> bool {
        self.kinds.contains(&kind)
    }
}

/// One eclipse, geocentric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eclipse {
    pub kind: EclipseKind,
    pub body: EclipsedBody,
    /// Instant of greatest eclipse (JD).
    pub jd: f64,
    pub gamma: f64,
}

/// An eclipse with the eclipsed body's elevation for one observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalizedEclipse {
    pub eclipse: Eclipse,
    pub instant: DateTime<FixedOffset>,
    /// Elevation of the eclipsed body at the instant, degrees.
    pub elevation_deg: f64,
}

impl LocalizedEclipse {
    /// Eclipsed body above the horizon at greatest eclipse.
    pub fn visible(&self) -> bool {
        self.elevation_deg > 0.0
    }
}
