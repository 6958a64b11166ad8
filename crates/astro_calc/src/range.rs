//! Time ranges with optional endpoints.
//!
//! An absent endpoint means the bounding event does not happen on the
//! requested day (e.g. the Sun never sets).

use std::cmp::Ordering;

use astro_time::{add_days, jd_to_datetime, truncate_to_midnight};
use chrono::{DateTime, FixedOffset, TimeDelta};

/// A `[start, end)` interval; either endpoint may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
    start: Option<DateTime<FixedOffset>>,
    end: Option<DateTime<FixedOffset>>,
}

impl Range {
    /// Create a range. Inverted endpoints are swapped so that start ≤ end.
    pub fn new(start: Option<DateTime<FixedOffset>>, end: Option<DateTime<FixedOffset>>) -> Self {
        match (start, end) {
            (Some(s), Some(e)) if e < s => Self {
                start: Some(e),
                end: Some(s),
            },
            _ => Self { start, end },
        }
    }

    /// Range with both endpoints absent.
    pub const fn empty() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Build a range from two Julian Dates, expressed in `offset`.
    ///
    /// Non-finite or unrepresentable Julian Dates become absent endpoints.
    pub fn from_jd(start_jd: f64, end_jd: f64, offset: FixedOffset) -> Self {
        Self::new(
            jd_to_datetime(start_jd, offset).ok(),
            jd_to_datetime(end_jd, offset).ok(),
        )
    }

    pub fn start(&self) -> Option<DateTime<FixedOffset>> {
        self.start
    }

    pub fn end(&self) -> Option<DateTime<FixedOffset>> {
        self.end
    }

    /// True when both endpoints are absent.
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Length of the range when both endpoints are present.
    pub fn duration(&self) -> Option<TimeDelta> {
        Some(self.end? - self.start?)
    }

    /// Whether `t` lies in `[start, end)`.
    ///
    /// An absent start is read as local midnight of `t`'s day and an absent
    /// end as the following midnight. An empty range matches nothing.
    pub fn matches(&self, t: &DateTime<FixedOffset>) -> bool {
        if self.is_empty() {
            return false;
        }
        let day_start = truncate_to_midnight(t);
        let start = self.start.unwrap_or(day_start);
        let end = self.end.unwrap_or_else(|| add_days(&day_start, 1));
        start <= *t && *t < end
    }

    /// Order by start instant, absent starts last.
    pub fn cmp_by_start(&self, other: &Self) -> Ordering {
        match (self.start, other.start) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}
