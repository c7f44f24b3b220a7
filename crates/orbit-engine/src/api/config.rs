use serde::{Deserialize, Serialize};

use super::types::{OrbitFamily, OrbitSelector};

/// Lower bound applied to `min_speed` so the multiplier stays strictly positive.
const SPEED_FLOOR: f64 = 0.01;

/// Two laps of the slowest catalog orbit (70 s) at speed 0.1, sampled every 16 ms.
pub const DEFAULT_MAX_TRAIL_SAMPLES: usize = 1 << 17;

/// Simulation configuration, supplied by the host once at startup.
/// Every field has a default, so a partial JSON object is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed tick cadence in milliseconds (default: 16).
    pub tick_ms: f64,
    /// Speed multiplier at startup and after reset (default: 1.0).
    pub default_speed: f64,
    /// Slowest allowed speed multiplier (default: 0.1).
    pub min_speed: f64,
    /// Fastest allowed speed multiplier (default: 10.0).
    pub max_speed: f64,
    /// Ribbon half-width at full opacity, in world units (default: 0.15).
    pub trail_width: f32,
    /// Whether the trail records and renders at startup (default: true).
    pub trail_enabled: bool,
    /// Rendered size factor of the moving body (default: 1.0).
    pub body_scale: f32,
    /// Hard cap on retained trail samples (default: 131072).
    pub max_trail_samples: usize,
    /// Family selected at startup (default: lagrange).
    pub initial_family: OrbitFamily,
    /// Orbit selected at startup; `None` picks the family default.
    pub initial_orbit: Option<String>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_ms: 16.0,
            default_speed: 1.0,
            min_speed: 0.1,
            max_speed: 10.0,
            trail_width: 0.15,
            trail_enabled: true,
            body_scale: 1.0,
            max_trail_samples: DEFAULT_MAX_TRAIL_SAMPLES,
            initial_family: OrbitFamily::Lagrange,
            initial_orbit: None,
        }
    }
}

impl SimulationConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Configured body scale, or 1.0 when it is not a positive finite number.
    pub fn body_scale(&self) -> f32 {
        if self.body_scale.is_finite() && self.body_scale > 0.0 {
            self.body_scale
        } else {
            log::warn!("config body_scale {} is invalid, using 1.0", self.body_scale);
            1.0
        }
    }

    pub fn initial_selector(&self) -> OrbitSelector {
        match &self.initial_orbit {
            Some(id) => OrbitSelector::new(self.initial_family, id.clone()),
            None => OrbitSelector::family_default(self.initial_family),
        }
    }

    /// Clamp a requested speed into the configured range.
    /// Non-finite requests fall back to `default_speed`.
    pub fn clamp_speed(&self, speed: f64) -> f64 {
        let lo = self.min_speed.max(SPEED_FLOOR);
        let hi = self.max_speed.max(lo);
        let speed = if speed.is_finite() { speed } else { self.default_speed };
        speed.max(lo).min(hi)
    }
}
