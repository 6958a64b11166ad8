//! Solar and lunar eclipses from the lunation series.
//!
//! One search walks the lunation index upward from the requested instant. At
//! each syzygy the Moon's argument of latitude rules out most candidates; the
//! rest get γ and u (Meeus ch. 54) and are classified by the body's
//! [`EclipseStrategy`].
//!
//! Source: Meeus, "Astronomical Algorithms", ch. 54.

use astro_calc::{GeoLocation, moon_position, sun_position};
use astro_time::{cos_deg, jd_to_datetime, sin_deg};
use chrono::FixedOffset;
use log::{trace, warn};

use crate::eclipse_types::{
    Eclipse, EclipseGeometry, EclipseKind, EclipseStrategy, EclipsedBody, LocalizedEclipse,
};
use crate::lunation::{LunationArgs, lunation_index};

/// Lunations tried before an eclipse search gives up.
pub const MAX_ECLIPSE_LUNATIONS: usize = 600;

/// No eclipse when |sin F| exceeds this.
const MAX_SIN_F: f64 = 0.36;

/// Solar eclipses, at new moon.
pub const SOLAR: EclipseStrategy = EclipseStrategy {
    body: EclipsedBody::Sun,
    kinds: &[EclipseKind::Partial, EclipseKind::Total, EclipseKind::Ring],
    lunation_offset: 0.0,
    anomaly_terms: (-0.4075, 0.1721),
    classify: classify_solar,
};

/// Lunar eclipses, at full moon. Penumbral eclipses are not reported.
pub const LUNAR: EclipseStrategy = EclipseStrategy {
    body: EclipsedBody::Moon,
    kinds: &[EclipseKind::Partial, EclipseKind::Total],
    lunation_offset: 0.5,
    anomaly_terms: (-0.4065, 0.1727),
    classify: classify_lunar,
};

/// Central total/annular/hybrid split and partial eclipses.
///
/// Hybrid eclipses are reported as total.
pub fn classify_solar(g: &EclipseGeometry) -> Option<EclipseKind> {
    let gamma = g.gamma.abs();
    if gamma > 1.5433 + g.u {
        return None;
    }
    let kind = if gamma < 0.9972 {
        if g.u < 0.0 {
            EclipseKind::Total
        } else if g.u > 0.0047 {
            EclipseKind::Ring
        } else if g.u < 0.00464 * (1.0 - g.gamma * g.gamma).sqrt() {
            EclipseKind::Total
        } else {
            EclipseKind::Ring
        }
    } else if gamma < 0.9972 + g.u.abs() {
        // non-central
        if g.u < 0.0 {
            EclipseKind::Total
        } else {
            EclipseKind::Ring
        }
    } else {
        EclipseKind::Partial
    };
    Some(kind)
}

/// Umbral lunar eclipses.
pub fn classify_lunar(g: &EclipseGeometry) -> Option<EclipseKind> {
    let gamma = g.gamma.abs();
    let umbral_magnitude = (1.0248 - g.u - gamma) / 0.545;
    if umbral_magnitude <= 0.0 {
        return None;
    }
    if gamma < 0.4678 - g.u && umbral_magnitude >= 1.0 {
        Some(EclipseKind::Total)
    } else {
        Some(EclipseKind::Partial)
    }
}

/// Corrected instant and geometry of the syzygy at lunation `k`, or `None`
/// when the Moon is too far from a node.
fn candidate(k: f64, strategy: &EclipseStrategy) -> Option<(f64, EclipseGeometry)> {
    let a = LunationArgs::at(k);
    if sin_deg(a.f).abs() > MAX_SIN_F {
        return None;
    }
    let (e, m, m1) = (a.e, a.m, a.m1);
    let f1 = a.f - 0.026_65 * sin_deg(a.omega);
    let a1 = 299.77 + 0.107_408 * k - 0.009_173 * a.t * a.t;
    let (c_m1, c_m) = strategy.anomaly_terms;

    let jd = a.mean_jd + c_m1 * sin_deg(m1) + c_m * e * sin_deg(m)
        + 0.0161 * sin_deg(2.0 * m1)
        - 0.0097 * sin_deg(2.0 * f1)
        + 0.0073 * e * sin_deg(m1 - m)
        - 0.0050 * e * sin_deg(m1 + m)
        - 0.0023 * sin_deg(m1 - 2.0 * f1)
        + 0.0021 * e * sin_deg(2.0 * m)
        + 0.0012 * sin_deg(m1 + 2.0 * f1)
        + 0.0006 * e * sin_deg(2.0 * m1 + m)
        - 0.0004 * sin_deg(3.0 * m1)
        - 0.0003 * e * sin_deg(m + 2.0 * f1)
        + 0.0003 * sin_deg(a1)
        - 0.0002 * e * sin_deg(m - 2.0 * f1)
        - 0.0002 * e * sin_deg(2.0 * m1 - m)
        - 0.0002 * sin_deg(a.omega);

    let p = 0.2070 * e * sin_deg(m) + 0.0024 * e * sin_deg(2.0 * m) - 0.0392 * sin_deg(m1)
        + 0.0116 * sin_deg(2.0 * m1)
        - 0.0073 * e * sin_deg(m1 + m)
        + 0.0067 * e * sin_deg(m1 - m)
        + 0.0118 * sin_deg(2.0 * f1);
    let q = 5.2207 - 0.0048 * e * cos_deg(m) + 0.0020 * e * cos_deg(2.0 * m)
        - 0.3299 * cos_deg(m1)
        - 0.0060 * e * cos_deg(m1 + m)
        + 0.0041 * e * cos_deg(m1 - m);
    let w = cos_deg(f1).abs();
    let gamma = (p * cos_deg(f1) + q * sin_deg(f1)) * (1.0 - 0.0048 * w);
    let u = 0.0059 + 0.0046 * e * cos_deg(m) - 0.0182 * cos_deg(m1) + 0.0004 * cos_deg(2.0 * m1)
        - 0.0005 * cos_deg(m + m1);

    Some((
        jd,
        EclipseGeometry {
            e,
            m,
            m1,
            gamma,
            u,
        },
    ))
}

/// First eclipse of `kind` after `jd`.
///
/// `None` when the body cannot show `kind` or no such eclipse occurs within
/// [`MAX_ECLIPSE_LUNATIONS`].
pub fn search_eclipse(strategy: &EclipseStrategy, jd: f64, kind: EclipseKind) -> Option<Eclipse> {
    if !strategy.accepts(kind) {
        return None;
    }
    let k0 = lunation_index(jd).floor() - 1.0;
    for step in 0..MAX_ECLIPSE_LUNATIONS {
        let k = k0 + step as f64 + strategy.lunation_offset;
        let Some((instant, geometry)) = candidate(k, strategy) else {
            continue;
        };
        if instant <= jd {
            continue;
        }
        match (strategy.classify)(&geometry) {
            Some(found) if found == kind => {
                return Some(Eclipse {
                    kind,
                    body: strategy.body,
                    jd: instant,
                    gamma: geometry.gamma,
                });
            }
            other => trace!(
                "k={k}: {other:?} (gamma {:.4}, u {:.4})",
                geometry.gamma,
                geometry.u
            ),
        }
    }
    warn!(
        "no {:?} eclipse of the {:?} within {MAX_ECLIPSE_LUNATIONS} lunations of JD {jd}",
        kind, strategy.body
    );
    None
}

/// Next eclipse of every kind the body can show, in time order.
pub fn next_eclipses(strategy: &EclipseStrategy, jd: f64) -> Vec<Eclipse> {
    let mut found: Vec<Eclipse> = strategy
        .kinds
        .iter()
        .filter_map(|&kind| search_eclipse(strategy, jd, kind))
        .collect();
    found.sort_by(|a, b| a.jd.total_cmp(&b.jd));
    found
}

/// Attach the eclipsed body's elevation for `location`.
pub fn localize(
    eclipse: &Eclipse,
    location: &GeoLocation,
    offset: FixedOffset,
) -> Option<LocalizedEclipse> {
    let instant = jd_to_datetime(eclipse.jd, offset).ok()?;
    let elevation_deg = match eclipse.body {
        EclipsedBody::Sun => sun_position(eclipse.jd, location).elevation_deg,
        EclipsedBody::Moon => moon_position(eclipse.jd, location).position.elevation_deg,
    };
    Some(LocalizedEclipse {
        eclipse: *eclipse,
        instant,
        elevation_deg,
    })
}
