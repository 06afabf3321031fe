//! Luma rate-of-change tracking
//!
//! First difference of luma over elapsed wall-clock time between consecutive
//! frames, in luma units per second. Runs every frame regardless of
//! recording state because the live display consumes the rate feed too.

use std::time::Instant;

/// Tracks the previous (luma, instant) pair and derives an instantaneous
/// rate of change per update.
#[derive(Debug, Default)]
pub struct RateTracker {
    previous: Option<(f64, Instant)>,
}

impl RateTracker {
    /// Create a tracker with no previous sample.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next (luma, timestamp) pair and get the rate of change.
    ///
    /// The first update returns 0. A non-positive time delta (duplicate or
    /// non-monotonic timestamp) also returns 0 rather than dividing by zero
    /// or flipping sign on a corrupted delta. The stored previous pair is
    /// overwritten on every call.
    pub fn update(&mut self, luma: f64, timestamp: Instant) -> f64 {
        let rate = match self.previous {
            None => 0.0,
            Some((prev_luma, prev_ts)) => {
                // Instant subtraction saturates to zero when non-monotonic
                let dt = timestamp.saturating_duration_since(prev_ts).as_secs_f64();
                if dt <= 0.0 {
                    0.0
                } else {
                    (luma - prev_luma) / dt
                }
            }
        };
        self.previous = Some((luma, timestamp));
        rate
    }

    /// Forget the previous sample; the next update returns 0.
    pub fn reset(&mut self) {
        self.previous = None;
    }
}
