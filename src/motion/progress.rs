/// Critically-damped smoothing of an external progress signal.
///
/// The raw value arrives from the scroll source at arbitrary rates; only the
/// latest value is kept (no queue, intermediate values between ticks are
/// overwritten). Every render tick moves the smoothed value a fixed fraction
/// of the way toward the raw target, a single-pole low-pass, and records the
/// per-tick delta as a velocity proxy. The approach is asymptotic and never
/// reaches the target exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressTracker {
    raw: f64,
    smoothed: f64,
    last_smoothed: f64,
    delta: f64,
    smoothing: f64,
}

/// Per-tick blend factor for a ~100 ms settle at 60 Hz ticks, matching the
/// scroll tween of the original scene.
pub const DEFAULT_SMOOTHING: f64 = 0.39;

/// Derives a per-tick blend factor that reaches 95% of a step input within
/// `settle_secs` at `tick_hz` ticks per second.
#[must_use]
pub fn smoothing_for_settle(settle_secs: f64, tick_hz: f64) -> f64 {
    let ticks = (settle_secs * tick_hz).max(1.0);
    1.0 - 0.05_f64.powf(1.0 / ticks)
}

impl ProgressTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::with_smoothing(DEFAULT_SMOOTHING)
    }

    /// `smoothing` is the per-tick blend factor in (0, 1]; 1 disables
    /// smoothing entirely.
    #[must_use]
    pub fn with_smoothing(smoothing: f64) -> Self {
        Self {
            raw: 0.0,
            smoothed: 0.0,
            last_smoothed: 0.0,
            delta: 0.0,
            smoothing: smoothing.clamp(f64::EPSILON, 1.0),
        }
    }

    /// Stores the latest raw progress value. The source nominally reports
    /// values in [0, 1]; out-of-range values are not clamped here, the
    /// smoothing arithmetic still applies and downstream curve queries clamp.
    pub fn set_raw(&mut self, raw: f64) {
        if raw.is_finite() {
            self.raw = raw;
        } else {
            log::warn!("progress source delivered non-finite value, ignoring");
        }
    }

    /// Advances the filter by one render tick.
    pub fn tick(&mut self) {
        self.last_smoothed = self.smoothed;
        self.smoothed += (self.raw - self.smoothed) * self.smoothing;
        self.delta = self.smoothed - self.last_smoothed;
    }

    #[must_use]
    pub fn raw(&self) -> f64 {
        self.raw
    }

    #[must_use]
    pub fn smoothed(&self) -> f64 {
        self.smoothed
    }

    /// Change in the smoothed value over the last tick.
    #[must_use]
    pub fn delta(&self) -> f64 {
        self.delta
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}
