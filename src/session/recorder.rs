//! Session recorder
//!
//! Accumulates one [`RecordedRow`] per sample accepted while the state
//! machine is Recording. The rows are the recording truth; the display
//! history is a separate, bounded projection.

use crate::session::state::RecordingStateMachine;
use crate::types::Sample;
use std::time::Instant;

/// The unit persisted to the output table: one accepted sample.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRow {
    /// Wall-clock timestamp text, millisecond precision
    pub timestamp: String,
    /// Seconds since the Recording state was entered (not since the start
    /// command)
    pub elapsed_secs: f64,
    pub luma: f64,
    pub avg_r: f64,
    pub avg_g: f64,
    pub avg_b: f64,
    pub rate_of_change: f64,
}

/// Appends rows while recording is active.
#[derive(Debug, Default)]
pub struct SessionRecorder {
    rows: Vec<RecordedRow>,
}

impl SessionRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a sample; it becomes a row only while the state machine is
    /// Recording. Elapsed time is measured from `record_start`.
    pub fn observe(&mut self, sample: &Sample, machine: &RecordingStateMachine, now: Instant) {
        if !machine.state().is_recording() {
            return;
        }
        let Some(record_start) = machine.record_start() else {
            return;
        };
        self.rows.push(RecordedRow {
            timestamp: sample.timestamp_text(),
            elapsed_secs: now.saturating_duration_since(record_start).as_secs_f64(),
            luma: sample.luma,
            avg_r: sample.avg_r,
            avg_g: sample.avg_g,
            avg_b: sample.avg_b,
            rate_of_change: sample.rate_of_change,
        });
    }

    /// Discard accumulated rows (a new start command resets the session).
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Rows accepted so far, in arrival order.
    pub fn rows(&self) -> &[RecordedRow] {
        &self.rows
    }

    /// Number of accepted rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Hand the rows over for flushing, leaving the recorder empty.
    pub fn take_rows(&mut self) -> Vec<RecordedRow> {
        std::mem::take(&mut self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use std::time::Duration;

    fn sample_at(luma: f64, instant: Instant) -> Sample {
        Sample {
            captured_at: Local::now(),
            instant,
            luma,
            avg_r: luma,
            avg_g: luma,
            avg_b: luma,
            rate_of_change: 0.0,
        }
    }

    #[test]
    fn test_idle_samples_not_recorded() {
        let machine = RecordingStateMachine::new(Duration::from_secs(30));
        let mut recorder = SessionRecorder::new();
        let now = Instant::now();
        recorder.observe(&sample_at(100.0, now), &machine, now);
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_pending_delay_samples_not_recorded() {
        let mut machine = RecordingStateMachine::new(Duration::from_secs(30));
        let mut recorder = SessionRecorder::new();
        let t0 = Instant::now();
        machine.start(t0);
        let t1 = t0 + Duration::from_secs(10);
        machine.tick(t1);
        recorder.observe(&sample_at(100.0, t1), &machine, t1);
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_delayed_start_scenario() {
        // start() at t=0 with a 30s delay; samples at 10s, 35s, 40s
        let mut machine = RecordingStateMachine::new(Duration::from_secs(30));
        let mut recorder = SessionRecorder::new();
        let t0 = Instant::now();
        machine.start(t0);

        for secs in [10u64, 35, 40] {
            let now = t0 + Duration::from_secs(secs);
            machine.tick(now);
            recorder.observe(&sample_at(100.0, now), &machine, now);
        }

        // The 10s sample fell in the countdown; recording began at t=35s
        assert_eq!(recorder.len(), 2);
        assert!((recorder.rows()[0].elapsed_secs - 0.0).abs() < 1e-9);
        assert!((recorder.rows()[1].elapsed_secs - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_stop_keeps_rows_start_clears_them() {
        let mut machine = RecordingStateMachine::new(Duration::ZERO);
        let mut recorder = SessionRecorder::new();
        let t0 = Instant::now();
        machine.start(t0);
        machine.tick(t0);
        recorder.observe(&sample_at(50.0, t0), &machine, t0);
        assert_eq!(recorder.len(), 1);

        machine.stop();
        let t1 = t0 + Duration::from_secs(1);
        recorder.observe(&sample_at(60.0, t1), &machine, t1);
        // Stop discards nothing but accepts nothing further
        assert_eq!(recorder.len(), 1);

        machine.start(t1);
        recorder.clear();
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_row_captures_sample_fields() {
        let mut machine = RecordingStateMachine::new(Duration::ZERO);
        let mut recorder = SessionRecorder::new();
        let t0 = Instant::now();
        machine.start(t0);
        machine.tick(t0);

        let sample = Sample {
            captured_at: Local::now(),
            instant: t0,
            luma: 128.5,
            avg_r: 200.0,
            avg_g: 100.0,
            avg_b: 50.0,
            rate_of_change: -3.25,
        };
        recorder.observe(&sample, &machine, t0);

        let row = &recorder.rows()[0];
        assert_eq!(row.luma, 128.5);
        assert_eq!(row.avg_r, 200.0);
        assert_eq!(row.avg_g, 100.0);
        assert_eq!(row.avg_b, 50.0);
        assert_eq!(row.rate_of_change, -3.25);
        assert_eq!(row.timestamp, sample.timestamp_text());
    }

    #[test]
    fn test_take_rows_empties_recorder() {
        let mut machine = RecordingStateMachine::new(Duration::ZERO);
        let mut recorder = SessionRecorder::new();
        let t0 = Instant::now();
        machine.start(t0);
        machine.tick(t0);
        recorder.observe(&sample_at(10.0, t0), &machine, t0);

        let rows = recorder.take_rows();
        assert_eq!(rows.len(), 1);
        assert!(recorder.is_empty());
    }
}
