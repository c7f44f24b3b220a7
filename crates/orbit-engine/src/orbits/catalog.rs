//! Orbit catalog: period and display color for every named trajectory.
//!
//! Periods are in simulated seconds at speed 1.0 and drive trail decay only:
//! one period of history stays fully lit, the next fades out. They are tuned
//! per orbit for trail length and are not the repeat time of the curves in
//! `trajectory.rs`, except for the five Lagrange points, which ride the
//! Moon and share its 60 s revolution.

use crate::api::types::{OrbitFamily, Rgb};

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSpec {
    pub id: &'static str,
    /// Human-readable label for selection lists.
    pub name: &'static str,
    /// Trail lap length in seconds at speed 1.0.
    pub period_seconds: f64,
    pub color: Rgb,
}

/// Result of a catalog lookup (always succeeds, see `lookup`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitInfo {
    pub period_seconds: f64,
    pub base_color: Rgb,
}

/// Color of the moving body, chosen by family only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyAppearance {
    pub color: Rgb,
    pub emissive: Rgb,
    pub emissive_intensity: f32,
}

pub const ORBIT_COUNT: usize = 20;

// ── Per-family fallbacks ─────────────────────────────────────────────

pub const LAGRANGE_DEFAULT_PERIOD: f64 = 60.0;
pub const EARTH_SYNCHRONOUS_DEFAULT_PERIOD: f64 = 40.0;
pub const MOON_RELATIVE_DEFAULT_PERIOD: f64 = 30.0;

const LAGRANGE_DEFAULT_COLOR: Rgb = Rgb::new(1.0, 0.6, 0.2);
const EARTH_SYNCHRONOUS_DEFAULT_COLOR: Rgb = Rgb::new(0.3, 0.7, 1.0);
const MOON_RELATIVE_DEFAULT_COLOR: Rgb = Rgb::new(0.8, 0.8, 0.9);

// ── Lagrange points ──────────────────────────────────────────────────

static LAGRANGE: [OrbitSpec; 10] = [
    OrbitSpec { id: "l1",           name: "L1 point",         period_seconds: 60.0, color: Rgb::new(1.00, 0.55, 0.20) },
    OrbitSpec { id: "l2",           name: "L2 point",         period_seconds: 60.0, color: Rgb::new(1.00, 0.40, 0.30) },
    OrbitSpec { id: "l3",           name: "L3 point",         period_seconds: 60.0, color: Rgb::new(0.90, 0.30, 0.50) },
    OrbitSpec { id: "l4",           name: "L4 point",         period_seconds: 60.0, color: Rgb::new(0.95, 0.80, 0.25) },
    OrbitSpec { id: "l5",           name: "L5 point",         period_seconds: 60.0, color: Rgb::new(0.80, 0.90, 0.30) },
    OrbitSpec { id: "l1_halo",      name: "L1 halo",          period_seconds: 45.0, color: Rgb::new(1.00, 0.70, 0.40) },
    OrbitSpec { id: "l2_halo",      name: "L2 halo",          period_seconds: 50.0, color: Rgb::new(1.00, 0.50, 0.50) },
    OrbitSpec { id: "l1_lissajous", name: "L1 Lissajous",     period_seconds: 55.0, color: Rgb::new(0.95, 0.60, 0.80) },
    OrbitSpec { id: "l2_lissajous", name: "L2 Lissajous",     period_seconds: 55.0, color: Rgb::new(0.85, 0.50, 0.95) },
    OrbitSpec { id: "l4_tadpole",   name: "L4 tadpole",       period_seconds: 70.0, color: Rgb::new(1.00, 0.90, 0.50) },
];

// ── Earth-synchronous ────────────────────────────────────────────────

static EARTH_SYNCHRONOUS: [OrbitSpec; 4] = [
    OrbitSpec { id: "geo",       name: "Geostationary",           period_seconds: 40.0, color: Rgb::new(0.30, 0.70, 1.00) },
    OrbitSpec { id: "igso",      name: "Inclined geosynchronous", period_seconds: 40.0, color: Rgb::new(0.30, 0.90, 0.90) },
    OrbitSpec { id: "tundra",    name: "Tundra",                  period_seconds: 45.0, color: Rgb::new(0.40, 0.60, 0.95) },
    OrbitSpec { id: "graveyard", name: "Graveyard",               period_seconds: 50.0, color: Rgb::new(0.55, 0.55, 0.75) },
];

// ── Moon-relative ────────────────────────────────────────────────────

static MOON_RELATIVE: [OrbitSpec; 6] = [
    OrbitSpec { id: "llo_circular",   name: "Low lunar (circular)",   period_seconds: 20.0, color: Rgb::new(0.85, 0.85, 0.95) },
    OrbitSpec { id: "llo_polar",      name: "Low lunar (polar)",      period_seconds: 20.0, color: Rgb::new(0.70, 0.85, 1.00) },
    OrbitSpec { id: "llo_elliptical", name: "Low lunar (elliptical)", period_seconds: 25.0, color: Rgb::new(0.90, 0.75, 1.00) },
    OrbitSpec { id: "lunar_frozen",   name: "Frozen lunar",           period_seconds: 30.0, color: Rgb::new(0.60, 0.95, 0.80) },
    OrbitSpec { id: "lunar_transfer", name: "Trans-lunar transfer",   period_seconds: 35.0, color: Rgb::new(1.00, 0.95, 0.70) },
    OrbitSpec { id: "dro",            name: "Distant retrograde",     period_seconds: 40.0, color: Rgb::new(0.75, 0.75, 0.75) },
];

/// All catalog entries for `family`, in selection order.
pub fn orbits(family: OrbitFamily) -> &'static [OrbitSpec] {
    match family {
        OrbitFamily::Lagrange => &LAGRANGE,
        OrbitFamily::EarthSynchronous => &EARTH_SYNCHRONOUS,
        OrbitFamily::MoonRelative => &MOON_RELATIVE,
    }
}

/// Valid specific-orbit ids for `family`, in selection order.
pub fn ids(family: OrbitFamily) -> impl Iterator<Item = &'static str> {
    orbits(family).iter().map(|o| o.id)
}

/// The id selected when the user switches to `family`.
pub fn default_id(family: OrbitFamily) -> &'static str {
    orbits(family)[0].id
}

pub fn find(family: OrbitFamily, id: &str) -> Option<&'static OrbitSpec> {
    orbits(family).iter().find(|o| o.id == id)
}

pub fn default_period(family: OrbitFamily) -> f64 {
    match family {
        OrbitFamily::Lagrange => LAGRANGE_DEFAULT_PERIOD,
        OrbitFamily::EarthSynchronous => EARTH_SYNCHRONOUS_DEFAULT_PERIOD,
        OrbitFamily::MoonRelative => MOON_RELATIVE_DEFAULT_PERIOD,
    }
}

fn default_color(family: OrbitFamily) -> Rgb {
    match family {
        OrbitFamily::Lagrange => LAGRANGE_DEFAULT_COLOR,
        OrbitFamily::EarthSynchronous => EARTH_SYNCHRONOUS_DEFAULT_COLOR,
        OrbitFamily::MoonRelative => MOON_RELATIVE_DEFAULT_COLOR,
    }
}

/// Period and base color for an orbit. Unknown ids get the family defaults.
pub fn lookup(family: OrbitFamily, id: &str) -> OrbitInfo {
    match find(family, id) {
        Some(spec) => OrbitInfo {
            period_seconds: spec.period_seconds,
            base_color: spec.color,
        },
        None => OrbitInfo {
            period_seconds: default_period(family),
            base_color: default_color(family),
        },
    }
}

/// Moving-body color table, one entry per family.
pub fn body_appearance(family: OrbitFamily) -> BodyAppearance {
    match family {
        OrbitFamily::Lagrange => BodyAppearance {
            color: Rgb::new(1.0, 0.55, 0.15),
            emissive: Rgb::new(1.0, 0.35, 0.0),
            emissive_intensity: 0.6,
        },
        OrbitFamily::EarthSynchronous => BodyAppearance {
            color: Rgb::new(0.25, 0.6, 1.0),
            emissive: Rgb::new(0.0, 0.35, 1.0),
            emissive_intensity: 0.5,
        },
        OrbitFamily::MoonRelative => BodyAppearance {
            color: Rgb::new(0.85, 0.85, 0.95),
            emissive: Rgb::new(0.5, 0.5, 0.7),
            emissive_intensity: 0.4,
        },
    }
}
