use chrono::{DateTime, FixedOffset, Local};
use clap::{Args, Parser, Subcommand};
use log::debug;

use astro_calc::{SunZodiacCache, season_at, sun_ecliptic_longitude_deg};
use astro_rs::{
    Astro, AstroConfig, GeoLocation, MoonDistance, Outcome, Range, SeasonConvention, Zodiac,
};
use astro_search::ALL_PHASES;
use astro_time::{datetime_to_jd, jd_to_datetime};

#[derive(Parser)]
#[command(name = "astro", about = "Sun and Moon ephemeris CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Place {
    /// Instant (RFC 3339, e.g. 2024-06-21T12:00:00+02:00); defaults to now
    #[arg(long)]
    date: Option<String>,
    /// Latitude in degrees, north positive
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,
    /// Longitude in degrees, east positive
    #[arg(long, allow_negative_numbers = true)]
    lon: f64,
    /// Altitude above sea level in meters
    #[arg(long)]
    alt: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sun position, rise/set and twilight ranges, radiation and season
    Sun {
        #[command(flatten)]
        place: Place,
        /// Use meteorological season boundaries
        #[arg(long)]
        meteorological: bool,
    },
    /// Moon position, rise/set, phase, distance and eclipses
    Moon {
        #[command(flatten)]
        place: Place,
    },
    /// Equinoxes, solstices and the current season
    Season {
        #[command(flatten)]
        place: Place,
        /// Use meteorological season boundaries
        #[arg(long)]
        meteorological: bool,
    },
    /// Zodiac sign of the Sun (calendar bands) and the Moon
    Zodiac {
        #[command(flatten)]
        place: Place,
    },
}

fn parse_date(s: Option<&str>) -> Result<DateTime<FixedOffset>, String> {
    match s {
        Some(s) => DateTime::parse_from_rfc3339(s).map_err(|e| format!("invalid --date {s}: {e}")),
        None => Ok(Local::now().fixed_offset()),
    }
}

fn resolve(place: &Place) -> (DateTime<FixedOffset>, GeoLocation) {
    let date = parse_date(place.date.as_deref()).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });
    let location = GeoLocation::new(place.lat, place.lon, place.alt).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });
    debug!("resolved {date} at {location:?}");
    (date, location)
}

fn convention(meteorological: bool) -> SeasonConvention {
    if meteorological {
        SeasonConvention::Meteorological
    } else {
        SeasonConvention::Astronomical
    }
}

fn fmt_time(t: Option<DateTime<FixedOffset>>) -> String {
    t.map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M:%S").to_string())
}

fn print_range(label: &str, range: &Range) {
    println!(
        "  {label:<14} {} .. {}",
        fmt_time(range.start()),
        fmt_time(range.end())
    );
}

fn print_apsis(label: &str, apsis: Option<MoonDistance>, offset: FixedOffset) {
    match apsis {
        Some(a) => println!(
            "{label:<10} {} ({:.0} km)",
            fmt_time(jd_to_datetime(a.jd, offset).ok()),
            a.distance_km
        ),
        None => println!("{label:<10} -"),
    }
}

fn outcome_note<T>(outcome: &Outcome<T>) -> String {
    match outcome.reason() {
        Some(reason) => format!(" (default: {reason:?})"),
        None => String::new(),
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sun {
            place,
            meteorological,
        } => {
            let (date, location) = resolve(&place);
            let astro = Astro::new(AstroConfig {
                convention: convention(meteorological),
                ..AstroConfig::default()
            });
            let sun = astro.sun_info(&date, &location).unwrap_or_else(|e| {
                eprintln!("Sun calculation failed: {e}");
                std::process::exit(1);
            });
            println!(
                "Azimuth {:.2} deg, elevation {:.2} deg",
                sun.position.azimuth_deg, sun.position.elevation_deg
            );
            if let Some(shade) = sun.position.shade_length {
                println!("Shade length {shade:.3}");
            }
            println!("Phase {}", sun.phase.map_or("-", |p| p.name()));
            println!("Ranges:");
            for (name, range) in sun.day.ranges() {
                print_range(name.name(), &range);
            }
            println!(
                "Radiation direct {:.1}, diffuse {:.1}, total {:.1} W/m2",
                sun.radiation.direct, sun.radiation.diffuse, sun.radiation.total
            );
            let circadian = sun.circadian.value();
            println!(
                "Circadian {:.1} %, {:.0} K{}",
                circadian.percentage,
                circadian.kelvin,
                outcome_note(&sun.circadian)
            );
            if let Some(z) = sun.zodiac {
                println!("Zodiac {}", z.sign.name());
            }
            println!("Season {}", sun.season.name.name());
            for e in &sun.eclipses {
                println!(
                    "Eclipse {:<8} {} elevation {:.1} deg{}",
                    e.eclipse.kind.name(),
                    fmt_time(Some(e.instant)),
                    e.elevation_deg,
                    if e.visible() { "" } else { " (not visible)" }
                );
            }
        }

        Commands::Moon { place } => {
            let (date, location) = resolve(&place);
            let astro = Astro::new(AstroConfig::default());
            let moon = astro.moon_info(&date, &location).unwrap_or_else(|e| {
                eprintln!("Moon calculation failed: {e}");
                std::process::exit(1);
            });
            let offset = *date.offset();
            println!(
                "Azimuth {:.2} deg, elevation {:.2} deg",
                moon.position.position.azimuth_deg, moon.position.position.elevation_deg
            );
            println!("Rise {}", fmt_time(moon.rise_set.rise));
            println!("Set  {}", fmt_time(moon.rise_set.set));
            match &moon.phase {
                Some(phase) => {
                    println!(
                        "Phase {} ({:.1} % illuminated, age {:.2} d{})",
                        phase.name.name(),
                        phase.illumination * 100.0,
                        phase.age_days,
                        outcome_note(&phase.age_fraction)
                    );
                    for p in ALL_PHASES {
                        let label = format!("{p:?}");
                        println!("  {label:<14} {}", fmt_time(phase.next_phase(p)));
                    }
                }
                None => println!("Phase -"),
            }
            println!("Distance {:.0} km", moon.distance.distance_km);
            print_apsis("Apogee", moon.apogee, offset);
            print_apsis("Perigee", moon.perigee, offset);
            println!("Zodiac {}", moon.zodiac.sign.name());
            for e in &moon.eclipses {
                println!(
                    "Eclipse {:<8} {} elevation {:.1} deg{}",
                    e.eclipse.kind.name(),
                    fmt_time(Some(e.instant)),
                    e.elevation_deg,
                    if e.visible() { "" } else { " (not visible)" }
                );
            }
        }

        Commands::Season {
            place,
            meteorological,
        } => {
            let (date, location) = resolve(&place);
            let season = season_at(&date, location.latitude_deg, convention(meteorological))
                .unwrap_or_else(|e| {
                    eprintln!("Season calculation failed: {e}");
                    std::process::exit(1);
                });
            let markers = season.markers;
            println!("March equinox      {}", fmt_time(Some(markers.march)));
            println!("June solstice      {}", fmt_time(Some(markers.june)));
            println!("September equinox  {}", fmt_time(Some(markers.september)));
            println!("December solstice  {}", fmt_time(Some(markers.december)));
            println!(
                "Current {}, next {} on {} ({} days left)",
                season.name.name(),
                season.next_name.name(),
                fmt_time(Some(season.next_start)),
                season.days_left()
            );
        }

        Commands::Zodiac { place } => {
            let (date, location) = resolve(&place);
            let cache = SunZodiacCache::new();
            match cache.zodiac_at(&date) {
                Ok(Some(z)) => println!(
                    "Sun  {} ({} .. {})",
                    z.sign.name(),
                    fmt_time(z.range.start()),
                    fmt_time(z.range.end())
                ),
                Ok(None) => println!("Sun  -"),
                Err(e) => {
                    eprintln!("Zodiac calculation failed: {e}");
                    std::process::exit(1);
                }
            }
            let estimate =
                Zodiac::with_validity(sun_ecliptic_longitude_deg(datetime_to_jd(&date)), &date);
            match estimate.validity {
                Some(range) => println!(
                    "Sun  {} by longitude (~{} .. ~{})",
                    estimate.sign.name(),
                    fmt_time(range.start()),
                    fmt_time(range.end())
                ),
                None => println!("Sun  {} by longitude", estimate.sign.name()),
            }
            let moon = Astro::new(AstroConfig::default())
                .moon_info(&date, &location)
                .unwrap_or_else(|e| {
                    eprintln!("Moon calculation failed: {e}");
                    std::process::exit(1);
                });
            println!("Moon {}", moon.zodiac.sign.name());
        }
    }
}
