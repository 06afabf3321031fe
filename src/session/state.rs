//! Recording state machine
//!
//! Idle → PendingDelay → Recording. A start command always resets to
//! PendingDelay, even while already recording; the per-frame tick promotes
//! PendingDelay to Recording once the configured delay has elapsed. Nothing
//! leaves Recording except an explicit stop.

use std::time::{Duration, Instant};

/// State of session recording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordingState {
    /// No active session
    #[default]
    Idle,
    /// Start command received, waiting out the delay countdown
    PendingDelay,
    /// Actively accepting rows
    Recording,
}

impl RecordingState {
    /// Check if rows should currently be accepted
    pub fn is_recording(&self) -> bool {
        matches!(self, RecordingState::Recording)
    }

    /// Display name for the state
    pub fn display_name(&self) -> &'static str {
        match self {
            RecordingState::Idle => "Idle",
            RecordingState::PendingDelay => "Pending delay",
            RecordingState::Recording => "Recording",
        }
    }
}

/// Drives Idle/PendingDelay/Recording transitions from operator commands and
/// wall-clock ticks.
///
/// Owned by the frame loop; nothing else mutates the state.
#[derive(Debug)]
pub struct RecordingStateMachine {
    state: RecordingState,
    delay: Duration,
    delay_start: Option<Instant>,
    record_start: Option<Instant>,
}

impl RecordingStateMachine {
    /// Create an idle state machine with the given start delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            state: RecordingState::Idle,
            delay,
            delay_start: None,
            record_start: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> RecordingState {
        self.state
    }

    /// Instant the Recording state was entered, if it has been.
    pub fn record_start(&self) -> Option<Instant> {
        self.record_start
    }

    /// Handle the start command: reset to PendingDelay from any state.
    ///
    /// Re-pressing start while already recording restarts the whole session,
    /// countdown included. The caller clears any accumulated rows.
    pub fn start(&mut self, now: Instant) {
        self.state = RecordingState::PendingDelay;
        self.delay_start = Some(now);
        self.record_start = None;
    }

    /// Handle the stop command: back to Idle, no further rows accepted.
    ///
    /// Already-recorded rows are not touched here; they stay with the
    /// recorder until flushed or cleared by the next start.
    pub fn stop(&mut self) {
        self.state = RecordingState::Idle;
        self.delay_start = None;
        self.record_start = None;
    }

    /// Per-frame tick: promote PendingDelay to Recording once the delay has
    /// elapsed. Returns true on the tick that makes the transition.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.state != RecordingState::PendingDelay {
            return false;
        }
        let Some(delay_start) = self.delay_start else {
            return false;
        };
        if now.saturating_duration_since(delay_start) >= self.delay {
            self.state = RecordingState::Recording;
            self.record_start = Some(now);
            true
        } else {
            false
        }
    }

    /// Time left on the countdown, if one is running. Used for the overlay.
    pub fn remaining_delay(&self, now: Instant) -> Option<Duration> {
        if self.state != RecordingState::PendingDelay {
            return None;
        }
        self.delay_start
            .map(|start| self.delay.saturating_sub(now.saturating_duration_since(start)))
    }

    /// Elapsed recording time, zero while not recording.
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.record_start
            .map(|start| now.saturating_duration_since(start))
            .unwrap_or(Duration::ZERO)
    }
}
