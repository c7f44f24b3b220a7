//! Time-ordered trail of sampled body positions with age-based fade.

use glam::Vec3;

/// Smallest period `tick` will honour. Guards the fade division and keeps
/// the eviction horizon finite.
pub const MIN_PERIOD_SECONDS: f64 = 0.1;

/// One recorded body position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSample {
    pub position: Vec3,
    /// Capture time in milliseconds of simulation time.
    pub captured_at: f64,
    /// 0.0 (invisible) to 1.0 (fully opaque); rewritten every `tick`.
    pub opacity: f32,
}

impl TrailSample {
    pub fn new(position: Vec3, captured_at: f64) -> Self {
        Self {
            position,
            captured_at,
            opacity: 1.0,
        }
    }
}

/// Opacity for a sample `age_seconds` old under orbit period `period`:
/// full for one period, then linear down to zero at two periods.
pub fn fade_opacity(age_seconds: f64, period: f64) -> f32 {
    (1.0 - (age_seconds - period) / period).clamp(0.0, 1.0) as f32
}

/// Append-only, front-evicted sample history.
pub struct TrailBuffer {
    samples: Vec<TrailSample>,
    recording: bool,
    capacity: usize,
}

impl TrailBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity.min(4096)),
            recording: true,
            capacity: capacity.max(2),
        }
    }

    /// Enable or disable recording. Disabling drops the existing history.
    pub fn set_recording(&mut self, recording: bool) {
        if !recording {
            self.clear();
        }
        self.recording = recording;
    }

    /// Append a sample. No-op while recording is off.
    ///
    /// Samples not strictly newer than the last one are dropped to keep the
    /// buffer ordered by capture time.
    pub fn record(&mut self, sample: TrailSample) {
        if !self.recording {
            return;
        }
        if let Some(last) = self.samples.last() {
            if sample.captured_at <= last.captured_at {
                log::debug!(
                    "trail: dropping out-of-order sample at {} (last {})",
                    sample.captured_at,
                    last.captured_at
                );
                return;
            }
        }
        if self.samples.len() >= self.capacity {
            let overflow = self.samples.len() + 1 - self.capacity;
            self.samples.drain(..overflow);
        }
        self.samples.push(sample);
    }

    /// Recompute every sample's opacity against `active_period` (seconds) at
    /// time `now` (milliseconds), then evict samples two or more periods old.
    pub fn tick(&mut self, now: f64, active_period: f64) {
        let period = if active_period.is_finite() && active_period > 0.0 {
            active_period
        } else {
            log::warn!("trail: invalid period {active_period}, using {MIN_PERIOD_SECONDS}s");
            MIN_PERIOD_SECONDS
        };
        let horizon = 2.0 * period;

        for sample in &mut self.samples {
            let age = (now - sample.captured_at) / 1000.0;
            sample.opacity = fade_opacity(age, period);
        }

        // Oldest first, so stale samples form a prefix.
        let stale = self
            .samples
            .iter()
            .take_while(|s| (now - s.captured_at) / 1000.0 >= horizon)
            .count();
        self.samples.drain(..stale);
    }

    /// Drop all samples. Called when the trajectory changes.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Drop all samples for a simulation reset. Returns how many were dropped.
    pub fn reset_trail(&mut self) -> usize {
        let dropped = self.samples.len();
        self.samples.clear();
        dropped
    }

    pub fn samples(&self) -> &[TrailSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for TrailBuffer {
    fn default() -> Self {
        Self::new(crate::api::config::DEFAULT_MAX_TRAIL_SAMPLES)
    }
}
