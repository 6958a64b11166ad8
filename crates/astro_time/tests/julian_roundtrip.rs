use approx::assert_abs_diff_eq;
use astro_time::{
    calendar_to_jd, datetime_to_jd, jd_to_calendar, jd_to_datetime, midnight_jd,
};
use chrono::{FixedOffset, TimeZone};

#[test]
fn calendar_roundtrip_across_centuries() {
    for &(y, m, d) in &[
        (1900, 1, 1.0),
        (1987, 4, 10.25),
        (2000, 2, 29.75),
        (2024, 12, 31.5),
        (2099, 7, 15.125),
    ] {
        let jd = calendar_to_jd(y, m, d);
        let (y2, m2, d2) = jd_to_calendar(jd);
        assert_eq!((y2, m2), (y, m), "year/month for {y}-{m}-{d}");
        assert_abs_diff_eq!(d2, d, epsilon = 1e-6);
    }
}

#[test]
fn instant_roundtrip_is_sub_second() {
    let offset = FixedOffset::west_opt(5 * 3600).unwrap();
    let mut jd = 2_451_545.0;
    while jd < 2_470_000.0 {
        let dt = jd_to_datetime(jd, offset).unwrap();
        let back = datetime_to_jd(&dt);
        assert!(
            (back - jd).abs() * 86_400.0 < 1.0,
            "roundtrip drift at JD {jd}: {back}"
        );
        jd += 123.456_789;
    }
}

#[test]
fn midnight_in_negative_offset() {
    let offset = FixedOffset::west_opt(5 * 3600).unwrap();
    let dt = offset.with_ymd_and_hms(2024, 7, 4, 22, 15, 0).unwrap();
    let mid = jd_to_datetime(midnight_jd(&dt), offset).unwrap();
    assert_eq!(mid, offset.with_ymd_and_hms(2024, 7, 4, 0, 0, 0).unwrap());
}
