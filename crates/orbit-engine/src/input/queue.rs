use crate::api::types::{OrbitFamily, OrbitSelector};

/// Control events the simulation understands.
/// Sent by the host UI; applied at the start of the next frame.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    /// Switch to a specific orbit.
    SelectOrbit(OrbitSelector),
    /// Switch family, landing on that family's first catalog orbit.
    SelectFamily(OrbitFamily),
    /// Set the speed multiplier (clamped by the simulation).
    SetSpeed(f64),
    SetPaused(bool),
    TogglePause,
    /// Show or hide the trail. Hiding drops its history.
    SetTrailEnabled(bool),
    /// Rendered body size. Does not affect the trajectory.
    SetBodyScale(f32),
    /// Restore default speed, size, trail visibility and pause state.
    Reset,
}

/// A queue of control events.
/// The host pushes; the simulation drains once per frame.
pub struct ControlQueue {
    events: Vec<ControlEvent>,
}

impl ControlQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: ControlEvent) {
        self.events.push(event);
    }

    /// Take all pending events, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<ControlEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for ControlQueue {
    fn default() -> Self {
        Self::new()
    }
}
