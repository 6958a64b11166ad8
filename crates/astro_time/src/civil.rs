//! Civil instants (`chrono::DateTime`) ↔ Julian Date, and local-day helpers.
//!
//! The UTC offset of a `DateTime<FixedOffset>` defines the local calendar
//! day: local midnight, "same day" checks and day-of-year all follow it.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeDelta, TimeZone, Timelike, Utc};

use crate::error::TimeError;
use crate::julian::{SECONDS_PER_DAY, UNIX_EPOCH_JD};

const MILLIS_PER_DAY: f64 = SECONDS_PER_DAY * 1000.0;

/// Julian Date (UT) of an instant.
pub fn datetime_to_jd<Tz: TimeZone>(dt: &DateTime<Tz>) -> f64 {
    UNIX_EPOCH_JD + dt.timestamp_millis() as f64 / MILLIS_PER_DAY
}

/// Civil instant for a Julian Date, expressed in `offset`.
///
/// Rounded to the millisecond.
pub fn jd_to_datetime(jd: f64, offset: FixedOffset) -> Result<DateTime<FixedOffset>, TimeError> {
    if !jd.is_finite() {
        return Err(TimeError::NonFinite);
    }
    let millis = ((jd - UNIX_EPOCH_JD) * MILLIS_PER_DAY).round();
    if millis.abs() >= i64::MAX as f64 {
        return Err(TimeError::OutOfRange(jd));
    }
    DateTime::<Utc>::from_timestamp_millis(millis as i64)
        .map(|utc| utc.with_timezone(&offset))
        .ok_or(TimeError::OutOfRange(jd))
}

/// Julian Date of local midnight starting the calendar day of `dt`.
pub fn midnight_jd(dt: &DateTime<FixedOffset>) -> f64 {
    let offset_days = dt.offset().local_minus_utc() as f64 / SECONDS_PER_DAY;
    let local_jd = datetime_to_jd(dt) + offset_days;
    // civil days start at JD x.5
    (local_jd - 0.5).floor() + 0.5 - offset_days
}

/// Local midnight starting the calendar day of `dt`.
pub fn truncate_to_midnight(dt: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let since_midnight = TimeDelta::seconds(dt.num_seconds_from_midnight() as i64)
        + TimeDelta::nanoseconds(dt.nanosecond() as i64);
    *dt - since_midnight
}

/// Shift by whole days, keeping the offset.
pub fn add_days(dt: &DateTime<FixedOffset>, days: i64) -> DateTime<FixedOffset> {
    *dt + TimeDelta::days(days)
}

/// Whether `other` falls on the same local calendar day as `reference`,
/// judged in the offset of `reference`.
pub fn is_same_day(reference: &DateTime<FixedOffset>, other: &DateTime<FixedOffset>) -> bool {
    reference.date_naive() == other.with_timezone(reference.offset()).date_naive()
}

/// Local midnight of a calendar date in `offset`.
pub fn local_midnight(
    year: i32,
    month: u32,
    day: u32,
    offset: FixedOffset,
) -> Result<DateTime<FixedOffset>, TimeError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .and_then(|ndt| offset.from_local_datetime(&ndt).single())
        .ok_or(TimeError::InvalidDate { year, month, day })
}

/// Day of the year, 1-based.
pub fn day_of_year(dt: &DateTime<FixedOffset>) -> u32 {
    dt.ordinal()
}

/// Number of days in the calendar year of `dt` (365 or 366).
pub fn days_in_year(dt: &DateTime<FixedOffset>) -> u32 {
    if NaiveDate::from_ymd_opt(dt.year(), 2, 29).is_some() {
        366
    } else {
        365
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cet() -> FixedOffset {
        FixedOffset::east_opt(3600).unwrap()
    }

    #[test]
    fn unix_epoch_jd() {
        let dt = DateTime::<Utc>::from_timestamp(0, 0).unwrap();
        assert_eq!(datetime_to_jd(&dt), UNIX_EPOCH_JD);
    }

    #[test]
    fn nan_is_rejected() {
        assert_eq!(jd_to_datetime(f64::NAN, cet()), Err(TimeError::NonFinite));
        assert_eq!(
            jd_to_datetime(f64::INFINITY, cet()),
            Err(TimeError::NonFinite)
        );
    }

    #[test]
    fn huge_jd_is_out_of_range() {
        assert!(matches!(
            jd_to_datetime(1e15, cet()),
            Err(TimeError::OutOfRange(_))
        ));
    }

    #[test]
    fn midnight_follows_offset() {
        // 2024-03-10 00:30 at UTC+1 is still 2024-03-09 in UTC
        let dt = cet().with_ymd_and_hms(2024, 3, 10, 0, 30, 0).unwrap();
        let jd = midnight_jd(&dt);
        let midnight = jd_to_datetime(jd, cet()).unwrap();
        assert_eq!(midnight, cet().with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap());
        assert_eq!(midnight, truncate_to_midnight(&dt));
    }

    #[test]
    fn same_day_in_reference_offset() {
        let a = cet().with_ymd_and_hms(2024, 3, 10, 0, 30, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2024, 3, 9, 23, 45, 0).unwrap().fixed_offset();
        assert!(is_same_day(&a, &b));
        let c = Utc.with_ymd_and_hms(2024, 3, 9, 22, 45, 0).unwrap().fixed_offset();
        assert!(!is_same_day(&a, &c));
    }

    #[test]
    fn invalid_calendar_date() {
        assert_eq!(
            local_midnight(2023, 2, 29, cet()),
            Err(TimeError::InvalidDate {
                year: 2023,
                month: 2,
                day: 29
            })
        );
    }

    #[test]
    fn leap_years() {
        let leap = cet().with_ymd_and_hms(2024, 12, 31, 12, 0, 0).unwrap();
        let common = cet().with_ymd_and_hms(2023, 12, 31, 12, 0, 0).unwrap();
        assert_eq!(days_in_year(&leap), 366);
        assert_eq!(day_of_year(&leap), 366);
        assert_eq!(days_in_year(&common), 365);
    }
}
