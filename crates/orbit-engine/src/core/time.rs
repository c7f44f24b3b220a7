/// Maximum fixed steps run for a single frame. Keeps a stalled tab from
/// replaying minutes of simulation in one frame.
pub const MAX_STEPS_PER_FRAME: u32 = 10;

/// Fixed timestep accumulator.
/// Converts variable host frame times into a whole number of fixed ticks.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// Length of one tick in seconds.
    dt: f64,
    /// Frame time not yet consumed by a tick.
    accumulator: f64,
}

impl FixedTimestep {
    pub fn new(dt: f64) -> Self {
        Self {
            dt: if dt.is_finite() && dt > 0.0 { dt } else { 0.016 },
            accumulator: 0.0,
        }
    }

    /// Build from a cadence in milliseconds.
    pub fn from_millis(ms: f64) -> Self {
        Self::new(ms / 1000.0)
    }

    /// Add frame time to the accumulator. Returns the number of ticks to run.
    pub fn accumulate(&mut self, frame_dt: f64) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }
        // Tolerance absorbs rounding when the frame time is an exact multiple of dt.
        let steps = (self.accumulator / self.dt + 1e-9) as u32;
        if steps >= MAX_STEPS_PER_FRAME {
            self.accumulator = 0.0;
            return MAX_STEPS_PER_FRAME;
        }
        self.accumulator = (self.accumulator - steps as f64 * self.dt).max(0.0);
        steps
    }

    /// Tick length in seconds.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Discard any partial tick.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
