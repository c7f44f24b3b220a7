//! Parametric trajectories: pure math, no engine state.
//!
//! Every shape is a closed-form curve of a single phase angle
//! `elapsed * BASE_RATE * speed`. There is no force model; the curves only
//! resemble the named regimes. Uses f64 throughout; callers convert to f32
//! at the render boundary.
//!
//! Frame: Earth at the origin, the Moon circling it in the x-z plane,
//! +y out of plane.

use std::f64::consts::{FRAC_PI_3, TAU};

use glam::DVec3;

use crate::api::types::OrbitFamily;

/// Radians of phase per simulated second at speed 1.0.
/// One Moon revolution (and one `l1` cycle) takes 60 s.
pub const BASE_RATE: f64 = TAU / 60.0;

pub const MOON_ORBIT_RADIUS: f64 = 10.0;

/// Returned for an unknown id within a known family, and for unknown families.
pub const FALLBACK_POSITION: DVec3 = DVec3::new(5.0, 0.0, 0.0);

// ── Lagrange geometry ────────────────────────────────────────────────

const L1_FRACTION: f64 = 0.85;
const L2_FRACTION: f64 = 1.15;

// ── Earth-synchronous ────────────────────────────────────────────────

/// Earth-synchronous orbits run at a tenth of the Moon's phase rate.
const EARTH_SYNC_RATE: f64 = 0.1;
const GEO_RADIUS: f64 = 4.2;
const GRAVEYARD_RADIUS: f64 = 4.8;

// ── Moon-relative ────────────────────────────────────────────────────

/// Local phase multiplier for low lunar orbits.
pub const LOW_LUNAR_RATE: f64 = 5.0;
pub const LLO_RADIUS: f64 = 1.5;
const ELLIPSE_SEMI_MAJOR: f64 = 1.8;
const ELLIPSE_ECCENTRICITY: f64 = 0.3;
const FROZEN_RADIUS: f64 = 2.0;
const PARKING_RADIUS: f64 = 3.0;
const CAPTURE_RADIUS: f64 = 2.0;
const DRO_RADIUS: f64 = 3.0;
const DRO_SWING: f64 = 0.8;

/// Phase angle in radians for a simulation time (seconds) and speed multiplier.
pub fn phase_angle(elapsed: f64, speed: f64) -> f64 {
    elapsed * BASE_RATE * speed
}

/// Point on a circle in the orbital (x-z) plane.
fn circle(radius: f64, angle: f64) -> DVec3 {
    DVec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
}

/// Moon position for a phase angle.
pub fn moon_at(angle: f64) -> DVec3 {
    circle(MOON_ORBIT_RADIUS, angle)
}

/// Live Moon position. Shares `phase_angle` with every trajectory so the
/// Moon and Moon-relative orbits stay in phase within a tick.
pub fn moon_position(elapsed: f64, speed: f64) -> DVec3 {
    moon_at(phase_angle(elapsed, speed))
}

// ── Lagrange family ──────────────────────────────────────────────────

fn l1(a: f64) -> DVec3 {
    moon_at(a) * L1_FRACTION
}

fn l2(a: f64) -> DVec3 {
    moon_at(a) * L2_FRACTION
}

fn l3(a: f64) -> DVec3 {
    -moon_at(a)
}

fn l4(a: f64) -> DVec3 {
    moon_at(a + FRAC_PI_3)
}

fn l5(a: f64) -> DVec3 {
    moon_at(a - FRAC_PI_3)
}

fn l1_halo(a: f64) -> DVec3 {
    let w = 2.0 * a;
    l1(a) + DVec3::new(0.5 * w.cos(), 0.8 * w.sin(), 0.5 * w.sin())
}

fn l2_halo(a: f64) -> DVec3 {
    let w = 2.0 * a;
    l2(a) + DVec3::new(0.6 * w.cos(), 1.0 * w.sin(), 0.6 * w.sin())
}

fn l1_lissajous(a: f64) -> DVec3 {
    l1(a) + DVec3::new(0.7 * (2.0 * a).sin(), 0.5 * (3.0 * a).sin(), 0.7 * (2.0 * a).cos())
}

fn l2_lissajous(a: f64) -> DVec3 {
    l2(a) + DVec3::new(0.8 * (3.0 * a).cos(), 0.6 * (2.0 * a).sin(), 0.8 * (3.0 * a).sin())
}

fn l4_tadpole(a: f64) -> DVec3 {
    l4(a) + DVec3::new((2.0 * a).cos(), 0.3 * (4.0 * a).sin(), (2.0 * a).sin())
}

// ── Earth-synchronous family ─────────────────────────────────────────

fn geo(a: f64) -> DVec3 {
    circle(GEO_RADIUS, a * EARTH_SYNC_RATE)
}

fn igso(a: f64) -> DVec3 {
    let e = a * EARTH_SYNC_RATE;
    DVec3::new(GEO_RADIUS * e.cos(), 0.8 * e.sin(), GEO_RADIUS * e.sin())
}

fn tundra(a: f64) -> DVec3 {
    let e = a * EARTH_SYNC_RATE;
    DVec3::new(4.6 * e.cos(), 1.2 * e.sin(), 4.0 * e.sin())
}

fn graveyard(a: f64) -> DVec3 {
    circle(GRAVEYARD_RADIUS, a * EARTH_SYNC_RATE)
}

// ── Moon-relative family ─────────────────────────────────────────────

fn llo_circular(a: f64) -> DVec3 {
    moon_at(a) + circle(LLO_RADIUS, a * LOW_LUNAR_RATE)
}

/// Same loop as `llo_circular` with the z and y axes exchanged.
fn llo_polar(a: f64) -> DVec3 {
    let l = a * LOW_LUNAR_RATE;
    moon_at(a) + DVec3::new(LLO_RADIUS * l.cos(), LLO_RADIUS * l.sin(), 0.0)
}

/// Polar conic radius r = a(1 - e cos θ).
fn llo_elliptical(a: f64) -> DVec3 {
    let theta = a * LOW_LUNAR_RATE;
    let r = ELLIPSE_SEMI_MAJOR * (1.0 - ELLIPSE_ECCENTRICITY * theta.cos());
    moon_at(a) + circle(r, theta)
}

/// Out-of-plane libration on a slower independent phase.
fn lunar_frozen(a: f64) -> DVec3 {
    let f = 3.0 * a;
    let libration = 0.2 * (0.7 * a).sin();
    moon_at(a) + DVec3::new(FROZEN_RADIUS * f.cos(), 0.6 * f.sin() + libration, FROZEN_RADIUS * f.sin())
}

/// Blends an Earth parking loop into a lunar capture loop and back.
fn lunar_transfer(a: f64) -> DVec3 {
    let w = ((0.5 * a).sin() + 1.0) / 2.0;
    let loop_phase = 2.0 * a;
    let parking = circle(PARKING_RADIUS, loop_phase);
    let capture = moon_at(a) + circle(CAPTURE_RADIUS, loop_phase);
    parking.lerp(capture, w)
}

/// Retrograde loop whose distance from the Moon breathes slowly.
fn dro(a: f64) -> DVec3 {
    let r = DRO_RADIUS + DRO_SWING * (0.5 * a).sin();
    moon_at(a) + circle(r, -2.0 * a)
}

// ── Registry ─────────────────────────────────────────────────────────

/// Maps a phase angle to a position.
pub type Evaluator = fn(f64) -> DVec3;

struct Trajectory {
    family: OrbitFamily,
    id: &'static str,
    eval: Evaluator,
}

const fn entry(family: OrbitFamily, id: &'static str, eval: Evaluator) -> Trajectory {
    Trajectory { family, id, eval }
}

static TRAJECTORIES: [Trajectory; 20] = [
    entry(OrbitFamily::Lagrange, "l1", l1),
    entry(OrbitFamily::Lagrange, "l2", l2),
    entry(OrbitFamily::Lagrange, "l3", l3),
    entry(OrbitFamily::Lagrange, "l4", l4),
    entry(OrbitFamily::Lagrange, "l5", l5),
    entry(OrbitFamily::Lagrange, "l1_halo", l1_halo),
    entry(OrbitFamily::Lagrange, "l2_halo", l2_halo),
    entry(OrbitFamily::Lagrange, "l1_lissajous", l1_lissajous),
    entry(OrbitFamily::Lagrange, "l2_lissajous", l2_lissajous),
    entry(OrbitFamily::Lagrange, "l4_tadpole", l4_tadpole),
    entry(OrbitFamily::EarthSynchronous, "geo", geo),
    entry(OrbitFamily::EarthSynchronous, "igso", igso),
    entry(OrbitFamily::EarthSynchronous, "tundra", tundra),
    entry(OrbitFamily::EarthSynchronous, "graveyard", graveyard),
    entry(OrbitFamily::MoonRelative, "llo_circular", llo_circular),
    entry(OrbitFamily::MoonRelative, "llo_polar", llo_polar),
    entry(OrbitFamily::MoonRelative, "llo_elliptical", llo_elliptical),
    entry(OrbitFamily::MoonRelative, "lunar_frozen", lunar_frozen),
    entry(OrbitFamily::MoonRelative, "lunar_transfer", lunar_transfer),
    entry(OrbitFamily::MoonRelative, "dro", dro),
];

/// The evaluator registered for `(family, id)`, if any.
pub fn evaluator(family: OrbitFamily, id: &str) -> Option<Evaluator> {
    TRAJECTORIES
        .iter()
        .find(|t| t.family == family && t.id == id)
        .map(|t| t.eval)
}

/// Position of the orbiting body at `elapsed` seconds and `speed` multiplier.
/// Unknown ids resolve to `FALLBACK_POSITION`.
pub fn position(family: OrbitFamily, id: &str, elapsed: f64, speed: f64) -> DVec3 {
    let angle = phase_angle(elapsed, speed);
    evaluator(family, id).map_or(FALLBACK_POSITION, |eval| eval(angle))
}

/// Name-based variant of `position` for hosts that pass raw strings.
pub fn position_by_name(family: &str, id: &str, elapsed: f64, speed: f64) -> DVec3 {
    match OrbitFamily::from_name(family) {
        Some(family) => position(family, id, elapsed, speed),
        None => FALLBACK_POSITION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbits::catalog;

    const EPS: f64 = 1e-9;

    fn close(a: DVec3, b: DVec3, tol: f64) -> bool {
        (a - b).length() < tol
    }

    #[test]
    fn registry_matches_catalog() {
        for family in OrbitFamily::ALL {
            for id in catalog::ids(family) {
                assert!(evaluator(family, id).is_some(), "no trajectory for {family:?}/{id}");
            }
        }
        assert_eq!(TRAJECTORIES.len(), catalog::ORBIT_COUNT);
    }

    #[test]
    fn all_positions_finite() {
        let speeds = [0.1, 0.5, 1.0, 3.3, 10.0];
        for family in OrbitFamily::ALL {
            for id in catalog::ids(family) {
                for &speed in &speeds {
                    for step in 0..200 {
                        let t = step as f64 * 7.3;
                        let p = position(family, id, t, speed);
                        assert!(p.is_finite(), "{id} at t={t} speed={speed}: {p:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn l1_repeats_after_one_period() {
        let period = catalog::lookup(OrbitFamily::Lagrange, "l1").period_seconds;
        for &speed in &[0.1, 1.0, 2.5, 10.0] {
            for &t in &[0.0, 3.7, 42.0, 1000.0] {
                let a = position(OrbitFamily::Lagrange, "l1", t, speed);
                let b = position(OrbitFamily::Lagrange, "l1", t + period / speed, speed);
                assert!(close(a, b, 1e-6), "speed {speed}, t {t}: {a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn unknown_lagrange_id_falls_back() {
        for &t in &[0.0, 1.0, 17.5, 600.0] {
            let p = position(OrbitFamily::Lagrange, "nonexistent", t, 1.0);
            assert_eq!(p, DVec3::new(5.0, 0.0, 0.0));
        }
    }

    #[test]
    fn unknown_family_falls_back() {
        assert_eq!(position_by_name("jovian", "io", 12.0, 1.0), FALLBACK_POSITION);
        assert_eq!(
            position_by_name("lagrange", "l3", 12.0, 1.0),
            position(OrbitFamily::Lagrange, "l3", 12.0, 1.0)
        );
    }

    #[test]
    fn moon_phase_matches_low_lunar_orbit() {
        for &(t, speed) in &[(0.0, 1.0), (5.0, 1.0), (33.3, 2.0), (120.0, 0.1)] {
            let moon = moon_position(t, speed);
            let angle = phase_angle(t, speed);
            let local = angle * LOW_LUNAR_RATE;
            let offset = DVec3::new(LLO_RADIUS * local.cos(), 0.0, LLO_RADIUS * local.sin());
            let center = position(OrbitFamily::MoonRelative, "llo_circular", t, speed) - offset;
            assert!(close(moon, center, EPS), "t {t}: {moon:?} vs {center:?}");
        }
    }

    #[test]
    fn collinear_points_lie_on_moon_line() {
        let t = 13.0;
        let moon = moon_position(t, 1.0);
        let l1 = position(OrbitFamily::Lagrange, "l1", t, 1.0);
        let l2 = position(OrbitFamily::Lagrange, "l2", t, 1.0);
        let l3 = position(OrbitFamily::Lagrange, "l3", t, 1.0);
        assert!(l1.length() < moon.length());
        assert!(l2.length() > moon.length());
        assert!(close(l3, -moon, EPS));
        assert!(l1.normalize().dot(moon.normalize()) > 1.0 - EPS);
    }

    #[test]
    fn triangular_points_sit_sixty_degrees_off() {
        let moon = moon_position(8.0, 1.0);
        for id in ["l4", "l5"] {
            let p = position(OrbitFamily::Lagrange, id, 8.0, 1.0);
            let cos = p.normalize().dot(moon.normalize());
            assert!((cos - 0.5).abs() < 1e-9, "{id}: cos = {cos}");
            assert!((p.length() - MOON_ORBIT_RADIUS).abs() < 1e-9);
        }
    }

    #[test]
    fn halo_leaves_the_orbital_plane() {
        let max_y = (0..120)
            .map(|i| position(OrbitFamily::Lagrange, "l1_halo", i as f64 * 0.5, 1.0).y.abs())
            .fold(0.0, f64::max);
        assert!(max_y > 0.5, "halo stayed flat: {max_y}");
        let planar = position(OrbitFamily::Lagrange, "l1", 9.0, 1.0);
        assert_eq!(planar.y, 0.0);
    }

    #[test]
    fn geo_keeps_constant_radius_in_plane() {
        for i in 0..50 {
            let p = position(OrbitFamily::EarthSynchronous, "geo", i as f64 * 3.0, 1.0);
            assert!((p.length() - GEO_RADIUS).abs() < EPS);
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn elliptical_distance_spans_periapsis_to_apoapsis() {
        let (mut lo, mut hi) = (f64::MAX, 0.0_f64);
        for i in 0..2000 {
            let t = i as f64 * 0.01;
            let moon = moon_position(t, 1.0);
            let d = (position(OrbitFamily::MoonRelative, "llo_elliptical", t, 1.0) - moon).length();
            lo = lo.min(d);
            hi = hi.max(d);
        }
        assert!((lo - 1.8 * 0.7).abs() < 1e-3, "periapsis {lo}");
        assert!((hi - 1.8 * 1.3).abs() < 1e-3, "apoapsis {hi}");
    }

    #[test]
    fn polar_orbit_stays_in_vertical_plane_about_moon() {
        for i in 0..40 {
            let t = i as f64 * 0.37;
            let rel = position(OrbitFamily::MoonRelative, "llo_polar", t, 1.0) - moon_position(t, 1.0);
            assert!(rel.z.abs() < EPS);
            assert!((rel.length() - LLO_RADIUS).abs() < EPS);
        }
    }

    #[test]
    fn transfer_starts_between_earth_and_moon_loops() {
        // sin(0) = 0 → equal blend at t = 0.
        let p = position(OrbitFamily::MoonRelative, "lunar_transfer", 0.0, 1.0);
        let expected = DVec3::new(PARKING_RADIUS, 0.0, 0.0)
            .lerp(moon_at(0.0) + DVec3::new(CAPTURE_RADIUS, 0.0, 0.0), 0.5);
        assert!(close(p, expected, EPS));
    }
}
