//! Simulation clock: owns the selector, time, and trail, and rebuilds the
//! ribbon on every fixed tick.

use glam::{DVec3, Vec3};

use crate::api::config::SimulationConfig;
use crate::api::types::{FrameInfo, OrbitFamily, OrbitSelector};
use crate::input::queue::{ControlEvent, ControlQueue};
use crate::orbits::catalog::{self, BodyAppearance};
use crate::orbits::trajectory;
use crate::systems::ribbon::{build_ribbon, RibbonGeometry};
use crate::systems::trail::{TrailBuffer, TrailSample};
use super::time::FixedTimestep;

/// What the host needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub body_position: Vec3,
    pub body_scale: f32,
    pub appearance: BodyAppearance,
    /// Present when the trail is shown and holds at least two samples.
    pub ribbon: Option<&'a RibbonGeometry>,
}

pub struct Simulation {
    config: SimulationConfig,
    selector: OrbitSelector,
    /// Speed multiplier, always within the configured range.
    speed: f64,
    paused: bool,
    /// Simulated seconds; advances only while running.
    elapsed: f64,
    trail_enabled: bool,
    body_scale: f32,
    trail: TrailBuffer,
    timestep: FixedTimestep,
    body_position: DVec3,
    ribbon: Option<RibbonGeometry>,
    ticks: u64,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        let selector = config.initial_selector();
        if !selector.is_known() {
            log::warn!(
                "initial orbit {}/{} is not in the catalog",
                selector.family.name(),
                selector.specific_id
            );
        }
        let mut trail = TrailBuffer::new(config.max_trail_samples);
        trail.set_recording(config.trail_enabled);

        let mut sim = Self {
            speed: config.clamp_speed(config.default_speed),
            paused: false,
            elapsed: 0.0,
            trail_enabled: config.trail_enabled,
            body_scale: config.body_scale(),
            timestep: FixedTimestep::from_millis(config.tick_ms),
            body_position: DVec3::ZERO,
            ribbon: None,
            ticks: 0,
            trail,
            selector,
            config,
        };
        sim.refresh_position();
        sim
    }

    // ── Accessors ──────────────────────────────────────────────────

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn selector(&self) -> &OrbitSelector {
        &self.selector
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Simulated seconds since start.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn trail_enabled(&self) -> bool {
        self.trail_enabled
    }

    pub fn body_scale(&self) -> f32 {
        self.body_scale
    }

    pub fn trail(&self) -> &TrailBuffer {
        &self.trail
    }

    /// Body position from the most recent tick (or selector change).
    pub fn body_position(&self) -> DVec3 {
        self.body_position
    }

    /// Live Moon position, in phase with the current trajectory.
    pub fn moon_position(&self) -> DVec3 {
        trajectory::moon_position(self.elapsed, self.speed)
    }

    pub fn ribbon(&self) -> Option<&RibbonGeometry> {
        self.ribbon.as_ref()
    }

    pub fn appearance(&self) -> BodyAppearance {
        catalog::body_appearance(self.selector.family)
    }

    /// Fixed ticks run so far, including paused ones.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            body_position: self.body_position.as_vec3(),
            body_scale: self.body_scale,
            appearance: self.appearance(),
            ribbon: self.ribbon.as_ref(),
        }
    }

    pub fn frame_info(&self) -> FrameInfo {
        let (vertex_count, index_count) = self
            .ribbon
            .as_ref()
            .map_or((0, 0), |r| (r.vertex_count(), r.indices.len()));
        FrameInfo {
            elapsed: self.elapsed as f32,
            speed: self.speed as f32,
            paused: if self.paused { 1.0 } else { 0.0 },
            sample_count: self.trail.len() as f32,
            vertex_count: vertex_count as f32,
            index_count: index_count as f32,
            body_scale: self.body_scale,
            tick: (self.ticks % FrameInfo::TICK_WRAP) as f32,
        }
    }

    // ── Controls ───────────────────────────────────────────────────

    /// Replace the active orbit. A different selector drops the trail.
    pub fn set_selector(&mut self, selector: OrbitSelector) {
        if selector == self.selector {
            return;
        }
        if !selector.is_known() {
            log::warn!(
                "unknown orbit {}/{}, using fallback trajectory",
                selector.family.name(),
                selector.specific_id
            );
        }
        log::info!("orbit selected: {}/{}", selector.family.name(), selector.specific_id);
        self.selector = selector;
        self.clear_trail();
        self.refresh_position();
    }

    /// Switch family, landing on its first catalog orbit.
    pub fn select_family(&mut self, family: OrbitFamily) {
        self.set_selector(OrbitSelector::family_default(family));
    }

    /// Set the speed multiplier, clamped to the configured range.
    /// A different speed drops the trail.
    pub fn set_speed(&mut self, speed: f64) {
        let clamped = self.config.clamp_speed(speed);
        if clamped != speed {
            log::warn!("speed {speed} out of range, clamped to {clamped}");
        }
        if clamped == self.speed {
            return;
        }
        self.speed = clamped;
        self.clear_trail();
        self.refresh_position();
    }

    /// Freeze or resume time. Pausing keeps the trail as it is.
    pub fn set_paused(&mut self, paused: bool) {
        if paused != self.paused {
            log::debug!("simulation {}", if paused { "paused" } else { "resumed" });
        }
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    /// Show or hide the trail. Hiding drops its history.
    pub fn set_trail_enabled(&mut self, enabled: bool) {
        self.trail_enabled = enabled;
        self.trail.set_recording(enabled);
        if !enabled {
            self.ribbon = None;
        }
    }

    pub fn set_body_scale(&mut self, scale: f32) {
        if scale.is_finite() && scale > 0.0 {
            self.body_scale = scale;
        } else {
            log::warn!("ignoring body scale {scale}");
        }
    }

    /// Restore default speed, body scale, trail visibility and pause state,
    /// and clear the trail. Elapsed time and the selector are kept.
    pub fn reset(&mut self) {
        self.speed = self.config.clamp_speed(self.config.default_speed);
        self.body_scale = self.config.body_scale();
        self.paused = false;
        self.trail_enabled = self.config.trail_enabled;
        self.trail.set_recording(self.trail_enabled);
        let dropped = self.trail.reset_trail();
        self.ribbon = None;
        self.timestep.reset();
        self.refresh_position();
        log::info!("simulation reset ({dropped} trail samples dropped)");
    }

    pub fn apply(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::SelectOrbit(selector) => self.set_selector(selector),
            ControlEvent::SelectFamily(family) => self.select_family(family),
            ControlEvent::SetSpeed(speed) => self.set_speed(speed),
            ControlEvent::SetPaused(paused) => self.set_paused(paused),
            ControlEvent::TogglePause => self.toggle_pause(),
            ControlEvent::SetTrailEnabled(enabled) => self.set_trail_enabled(enabled),
            ControlEvent::SetBodyScale(scale) => self.set_body_scale(scale),
            ControlEvent::Reset => self.reset(),
        }
    }

    /// Apply and remove every pending control event, in order.
    pub fn handle_controls(&mut self, queue: &mut ControlQueue) {
        for event in queue.drain() {
            self.apply(event);
        }
    }

    // ── Ticking ────────────────────────────────────────────────────

    /// Feed host frame time (seconds). Runs zero or more fixed ticks and
    /// returns how many ran.
    pub fn advance(&mut self, frame_dt: f64) -> u32 {
        let steps = self.timestep.accumulate(frame_dt);
        for _ in 0..steps {
            self.step();
        }
        steps
    }

    /// One fixed tick: advance time, move the body, record and age the
    /// trail, rebuild the ribbon. Does nothing to state while paused.
    pub fn step(&mut self) {
        self.ticks += 1;
        if self.paused {
            return;
        }

        self.elapsed += self.timestep.dt();
        self.refresh_position();

        let now_ms = self.elapsed * 1000.0;
        let info = catalog::lookup(self.selector.family, &self.selector.specific_id);
        if self.trail_enabled {
            self.trail.record(TrailSample::new(self.body_position.as_vec3(), now_ms));
        }
        self.trail.tick(now_ms, self.lap_seconds(info.period_seconds));

        self.ribbon = if self.trail_enabled && self.trail.len() >= 2 {
            Some(build_ribbon(self.trail.samples(), info.base_color, self.config.trail_width))
        } else {
            None
        };
    }

    /// Simulated seconds for one catalog period at the current speed.
    fn lap_seconds(&self, period_seconds: f64) -> f64 {
        period_seconds / self.speed
    }

    fn refresh_position(&mut self) {
        self.body_position = trajectory::position(
            self.selector.family,
            &self.selector.specific_id,
            self.elapsed,
            self.speed,
        );
    }

    fn clear_trail(&mut self) {
        if !self.trail.is_empty() {
            log::debug!("trail cleared ({} samples)", self.trail.len());
        }
        self.trail.clear();
        self.ribbon = None;
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: f64 = 0.016;

    fn run_ticks(sim: &mut Simulation, n: usize) {
        for _ in 0..n {
            sim.step();
        }
    }

    #[test]
    fn starts_on_family_default() {
        let sim = Simulation::default();
        assert_eq!(sim.selector().specific_id, "l1");
        assert_eq!(sim.speed(), 1.0);
        assert!(sim.trail().is_empty());
        assert!(sim.ribbon().is_none());
    }

    #[test]
    fn step_advances_time_and_records() {
        let mut sim = Simulation::default();
        run_ticks(&mut sim, 3);
        assert!((sim.elapsed() - 3.0 * TICK).abs() < 1e-12);
        assert_eq!(sim.trail().len(), 3);
        let expected = trajectory::position(OrbitFamily::Lagrange, "l1", sim.elapsed(), 1.0);
        assert_eq!(sim.body_position(), expected);
    }

    #[test]
    fn ribbon_appears_with_two_samples() {
        let mut sim = Simulation::default();
        sim.step();
        assert!(sim.ribbon().is_none());
        sim.step();
        let ribbon = sim.ribbon().unwrap();
        assert_eq!(ribbon.vertex_count(), 4);
        run_ticks(&mut sim, 8);
        let ribbon = sim.ribbon().unwrap();
        assert_eq!(ribbon.vertex_count(), 20);
        assert_eq!(ribbon.indices.len(), 6 * 8);
    }

    #[test]
    fn paused_freezes_time_and_keeps_trail() {
        let mut sim = Simulation::default();
        run_ticks(&mut sim, 5);
        let elapsed = sim.elapsed();
        sim.set_paused(true);
        run_ticks(&mut sim, 20);
        assert_eq!(sim.elapsed(), elapsed);
        assert_eq!(sim.trail().len(), 5);
        assert!(sim.ribbon().is_some());
        sim.toggle_pause();
        sim.step();
        assert_eq!(sim.trail().len(), 6);
    }

    #[test]
    fn speed_change_clears_trail() {
        let mut sim = Simulation::default();
        run_ticks(&mut sim, 10);
        assert_eq!(sim.trail().len(), 10);
        let elapsed = sim.elapsed();
        sim.set_speed(2.0);
        assert!(sim.trail().is_empty());
        assert!(sim.ribbon().is_none());
        assert_eq!(sim.elapsed(), elapsed);
    }

    #[test]
    fn same_speed_keeps_trail() {
        let mut sim = Simulation::default();
        run_ticks(&mut sim, 4);
        sim.set_speed(1.0);
        assert_eq!(sim.trail().len(), 4);
    }

    #[test]
    fn speed_is_clamped() {
        let mut sim = Simulation::default();
        sim.set_speed(100.0);
        assert_eq!(sim.speed(), 10.0);
        sim.set_speed(0.0);
        assert_eq!(sim.speed(), 0.1);
    }

    #[test]
    fn selector_change_clears_trail_and_moves_body() {
        let mut sim = Simulation::default();
        run_ticks(&mut sim, 10);
        sim.set_selector(OrbitSelector::new(OrbitFamily::MoonRelative, "llo_polar"));
        assert!(sim.trail().is_empty());
        let expected = trajectory::position(OrbitFamily::MoonRelative, "llo_polar", sim.elapsed(), 1.0);
        assert_eq!(sim.body_position(), expected);
    }

    #[test]
    fn select_family_uses_catalog_order() {
        let mut sim = Simulation::default();
        sim.select_family(OrbitFamily::EarthSynchronous);
        assert_eq!(sim.selector().specific_id, "geo");
        assert_eq!(sim.appearance(), catalog::body_appearance(OrbitFamily::EarthSynchronous));
    }

    #[test]
    fn unknown_orbit_uses_fallback() {
        let mut sim = Simulation::default();
        sim.set_selector(OrbitSelector::new(OrbitFamily::Lagrange, "l7"));
        run_ticks(&mut sim, 3);
        assert_eq!(sim.body_position(), trajectory::FALLBACK_POSITION);
        // Coincident samples still produce finite geometry.
        let ribbon = sim.ribbon().unwrap();
        assert!(ribbon.position_floats().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn disabling_trail_clears_and_stops_recording() {
        let mut sim = Simulation::default();
        run_ticks(&mut sim, 5);
        sim.set_trail_enabled(false);
        assert!(sim.trail().is_empty());
        run_ticks(&mut sim, 5);
        assert!(sim.trail().is_empty());
        assert!(sim.ribbon().is_none());
        sim.set_trail_enabled(true);
        run_ticks(&mut sim, 2);
        assert_eq!(sim.trail().len(), 2);
    }

    #[test]
    fn reset_restores_defaults_and_clears_synchronously() {
        let mut sim = Simulation::default();
        run_ticks(&mut sim, 10);
        sim.set_speed(4.0);
        run_ticks(&mut sim, 10);
        sim.set_body_scale(3.0);
        sim.set_trail_enabled(false);
        sim.set_paused(true);
        let selector = sim.selector().clone();
        let elapsed = sim.elapsed();

        sim.reset();

        assert_eq!(sim.speed(), 1.0);
        assert_eq!(sim.body_scale(), 1.0);
        assert!(sim.trail_enabled());
        assert!(!sim.is_paused());
        assert!(sim.trail().is_empty());
        assert!(sim.ribbon().is_none());
        assert_eq!(sim.selector(), &selector);
        assert_eq!(sim.elapsed(), elapsed);
    }

    #[test]
    fn reset_clears_a_recording_trail() {
        let mut sim = Simulation::default();
        run_ticks(&mut sim, 10);
        sim.reset();
        assert!(sim.trail().is_empty());
        sim.step();
        assert_eq!(sim.trail().len(), 1);
    }

    #[test]
    fn moon_tracks_moon_relative_orbit() {
        let mut sim = Simulation::default();
        sim.select_family(OrbitFamily::MoonRelative);
        sim.set_speed(3.0);
        run_ticks(&mut sim, 37);
        let offset = sim.body_position() - sim.moon_position();
        assert!((offset.length() - trajectory::LLO_RADIUS).abs() < 1e-9);
    }

    #[test]
    fn advance_runs_fixed_ticks() {
        let mut sim = Simulation::default();
        assert_eq!(sim.advance(0.008), 0);
        assert_eq!(sim.advance(0.010), 1);
        assert_eq!(sim.advance(0.032), 2);
        assert_eq!(sim.ticks(), 3);
    }

    #[test]
    fn controls_apply_in_order() {
        let mut sim = Simulation::default();
        let mut queue = ControlQueue::new();
        queue.push(ControlEvent::SelectFamily(OrbitFamily::MoonRelative));
        queue.push(ControlEvent::SelectOrbit(OrbitSelector::new(OrbitFamily::MoonRelative, "dro")));
        queue.push(ControlEvent::SetSpeed(2.0));
        queue.push(ControlEvent::SetBodyScale(1.5));
        queue.push(ControlEvent::TogglePause);
        sim.handle_controls(&mut queue);
        assert!(queue.is_empty());
        assert_eq!(sim.selector().specific_id, "dro");
        assert_eq!(sim.speed(), 2.0);
        assert_eq!(sim.body_scale(), 1.5);
        assert!(sim.is_paused());
    }

    #[test]
    fn trail_stays_bounded() {
        let config = SimulationConfig {
            initial_family: OrbitFamily::MoonRelative,
            ..SimulationConfig::default()
        };
        let mut sim = Simulation::new(config);
        // llo_circular period 20s → at most 40s of samples at 16ms.
        run_ticks(&mut sim, 4000);
        let max = (2.0 * 20.0 / TICK).ceil() as usize + 1;
        assert!(sim.trail().len() <= max, "trail grew to {}", sim.trail().len());
        let info = sim.frame_info();
        assert_eq!(info.sample_count as usize, sim.trail().len());
    }

    #[test]
    fn frame_reports_body_and_ribbon() {
        let mut sim = Simulation::default();
        run_ticks(&mut sim, 3);
        let frame = sim.frame();
        assert_eq!(frame.body_position, sim.body_position().as_vec3());
        assert_eq!(frame.ribbon.map(|r| r.vertex_count()), Some(6));
        assert_eq!(frame.appearance, catalog::body_appearance(OrbitFamily::Lagrange));
    }

    /// Simulated seconds between the oldest and newest retained samples.
    fn trail_span_seconds(sim: &Simulation) -> f64 {
        let samples = sim.trail().samples();
        match (samples.first(), samples.last()) {
            (Some(first), Some(last)) => (last.captured_at - first.captured_at) / 1000.0,
            _ => 0.0,
        }
    }

    fn laps_after(speed: f64, ticks: usize) -> (Simulation, f64) {
        let config = SimulationConfig {
            tick_ms: 100.0,
            initial_family: OrbitFamily::MoonRelative,
            ..SimulationConfig::default()
        };
        let mut sim = Simulation::new(config);
        sim.set_speed(speed);
        run_ticks(&mut sim, ticks);
        // llo_circular is a 20 s orbit at speed 1.0.
        let lap = 20.0 / speed;
        let laps = trail_span_seconds(&sim) / lap;
        (sim, laps)
    }

    #[test]
    fn trail_covers_two_laps_at_any_speed() {
        // 0.1x: 200 s per lap, run 600 s.
        let (slow, laps) = laps_after(0.1, 6000);
        assert!((laps - 2.0).abs() < 0.01, "0.1x trail spans {laps} laps");
        assert!(slow.trail().len() < slow.trail().capacity());

        // 10x: 2 s per lap, run 30 s.
        let (fast, laps) = laps_after(10.0, 300);
        assert!((laps - 2.0).abs() < 0.1, "10x trail spans {laps} laps");
        let opaque = fast.trail().samples().iter().filter(|s| s.opacity == 1.0).count();
        let total = fast.trail().len();
        // One lap lit, one lap fading.
        let lit = opaque as f64 / total as f64;
        assert!((lit - 0.5).abs() < 0.1, "{opaque} of {total} samples fully opaque");
    }

    #[test]
    fn invalid_config_body_scale_is_replaced() {
        let config = SimulationConfig { body_scale: 0.0, ..SimulationConfig::default() };
        let mut sim = Simulation::new(config);
        assert_eq!(sim.body_scale(), 1.0);
        sim.set_body_scale(2.0);
        sim.reset();
        assert_eq!(sim.body_scale(), 1.0);
        assert_eq!(sim.frame_info().body_scale, 1.0);
    }

    #[test]
    fn frame_tick_wraps_before_losing_precision() {
        let mut sim = Simulation::default();
        sim.ticks = FrameInfo::TICK_WRAP - 1;
        assert_eq!(sim.frame_info().tick, (FrameInfo::TICK_WRAP - 1) as f32);
        sim.step();
        assert_eq!(sim.frame_info().tick, 0.0);
        run_ticks(&mut sim, 5);
        assert_eq!(sim.frame_info().tick, 5.0);
        assert_eq!(sim.ticks(), FrameInfo::TICK_WRAP + 5);
    }
}
