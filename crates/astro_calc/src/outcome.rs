//! Values that may have been replaced by a documented default.

/// Why a calculation fell back to its default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackReason {
    /// The fitted parabola has its vertex on an endpoint.
    DegenerateParabola,
    /// A sunrise, sunset or noon instant needed for the curve is absent.
    MissingSunEvent,
    /// Two consecutive new moons coincide, so the lunation has no length.
    ZeroLunation,
}

/// A computed value, or the default used when geometry degenerates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome<T> {
    Computed(T),
    Defaulted { value: T, reason: FallbackReason },
}

impl<T> Outcome<T> {
    /// The carried value, computed or defaulted.
    pub fn value(&self) -> &T {
        match self {
            Self::Computed(v) | Self::Defaulted { value: v, .. } => v,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Computed(v) | Self::Defaulted { value: v, .. } => v,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Self::Defaulted { .. })
    }

    pub fn reason(&self) -> Option<FallbackReason> {
        match self {
            Self::Computed(_) => None,
            Self::Defaulted { reason, .. } => Some(*reason),
        }
    }

    /// Transform the carried value, keeping the fallback reason.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Computed(v) => Outcome::Computed(f(v)),
            Self::Defaulted { value, reason } => Outcome::Defaulted {
                value: f(value),
                reason,
            },
        }
    }
}
