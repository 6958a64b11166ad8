//! Integration tests for the convenience wrapper.

use std::sync::Arc;
use std::thread;

use approx::assert_abs_diff_eq;
use astro_rs::*;
use chrono::{DateTime, FixedOffset, TimeZone};

fn munich() -> GeoLocation {
    GeoLocation::new(48.137, 11.575, Some(519.0)).unwrap()
}

fn cest(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(y, mo, d, h, mi, 0)
        .unwrap()
}

#[test]
fn sun_info_midsummer_noon() {
    let astro = Astro::new(AstroConfig::default());
    let date = cest(2024, 6, 21, 13, 30);
    let sun = astro.sun_info(&date, &munich()).unwrap();

    assert!(sun.position.elevation_deg > 60.0);
    assert_eq!(sun.phase, Some(SunPhaseName::Daylight));
    assert!(sun.radiation.total > 500.0, "radiation {:?}", sun.radiation);
    assert_eq!(sun.zodiac.map(|z| z.sign), Some(ZodiacSign::Cancer));
    assert_eq!(sun.season.name, SeasonName::Summer);
    assert_eq!(sun.eclipses.len(), 3);
    let circadian = sun.circadian.value();
    assert!(circadian.percentage.abs() > 95.0, "{circadian:?}");
    assert!(!sun.circadian.is_defaulted());
}

#[test]
fn sun_info_in_the_evening() {
    let astro = Astro::new(AstroConfig::default());
    let sun = astro.sun_info(&cest(2024, 6, 21, 19, 0), &munich()).unwrap();
    assert_eq!(sun.phase, Some(SunPhaseName::Daylight));
    assert!(sun.circadian.value().percentage < 0.0);
    assert!(sun.position.azimuth_deg > 270.0);
}

#[test]
fn meteorological_convention() {
    let astro = Astro::new(AstroConfig {
        convention: SeasonConvention::Meteorological,
        ..AstroConfig::default()
    });
    let sun = astro.sun_info(&cest(2024, 6, 5, 12, 0), &munich()).unwrap();
    assert_eq!(sun.season.name, SeasonName::Summer);
}

#[test]
fn moon_info_on_full_moon_day() {
    // full moon 2024-01-25 17:54 UTC
    let astro = Astro::new(AstroConfig::default());
    let cet = FixedOffset::east_opt(3600).unwrap();
    let date = cet.with_ymd_and_hms(2024, 1, 25, 22, 0, 0).unwrap();
    let moon = astro.moon_info(&date, &munich()).unwrap();

    let phase = moon.phase.expect("phase set");
    assert_eq!(phase.name, MoonPhaseName::Full);
    assert_abs_diff_eq!(phase.illumination, 1.0, epsilon = 0.02);
    assert!(moon.rise_set.rise.is_some() && moon.rise_set.set.is_some());
    assert!(moon.position.position.elevation_deg > 0.0);
    assert_eq!(moon.eclipses.len(), 2);
    for e in &moon.eclipses {
        assert_eq!(e.eclipse.body, EclipsedBody::Moon);
        assert_ne!(e.eclipse.kind, EclipseKind::Ring);
    }
    let apogee = moon.apogee.unwrap();
    let perigee = moon.perigee.unwrap();
    assert!(perigee.distance_km < apogee.distance_km);
    assert!((356_000.0..407_000.0).contains(&moon.distance.distance_km));
    assert_eq!(
        moon.zodiac,
        Zodiac::from_longitude(moon.position.ecliptic_longitude_deg)
    );
}

#[test]
fn shared_between_threads() {
    let astro = Arc::new(Astro::new(AstroConfig::default()));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let astro = Arc::clone(&astro);
            thread::spawn(move || {
                let date = cest(2024, 3 + i, 10, 12, 0);
                let sun = astro.sun_info(&date, &munich()).unwrap();
                let moon = astro.moon_info(&date, &munich()).unwrap();
                (sun.zodiac.is_some(), moon.phase.is_some())
            })
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), (true, true));
    }
}
