//! Display seam
//!
//! The frame loop pushes structured values out once per frame; whatever
//! renders them (terminal, GUI, nothing) sits behind [`DisplaySink`] and
//! never feeds back into the core.

use crate::session::RecordingState;
use crate::types::Region;
use std::time::Duration;

/// Per-frame overlay values, one set per refresh.
#[derive(Debug, Clone)]
pub struct Overlay {
    pub luma: f64,
    pub avg_r: f64,
    pub avg_g: f64,
    pub avg_b: f64,
    /// Wall-clock timestamp text, millisecond precision
    pub timestamp: String,
    /// Seconds since recording started; 0.0 while not recording
    pub elapsed_secs: f64,
    pub rate_of_change: f64,
    pub state: RecordingState,
    /// Countdown remaining while in the pending-delay state
    pub countdown: Option<Duration>,
    /// The sampled rectangle, so a renderer can draw the ROI box
    pub region: Region,
}

impl Overlay {
    /// Recording-status line, empty while idle.
    pub fn status_text(&self) -> String {
        match self.state {
            RecordingState::Idle => String::new(),
            RecordingState::PendingDelay => {
                let remaining = self.countdown.unwrap_or(Duration::ZERO);
                format!("Recording starts in: {:.1} s", remaining.as_secs_f64())
            }
            RecordingState::Recording => "Recording...".to_string(),
        }
    }
}

/// Chart series for the live plots, oldest first.
#[derive(Debug, Clone)]
pub struct ChartData {
    /// Raw luma history
    pub luma_series: Vec<f64>,
    /// Rate history after display smoothing (raw when too short to smooth)
    pub rate_series: Vec<f64>,
}

/// Accepts one refresh per frame. Purely presentational.
pub trait DisplaySink {
    fn refresh(&mut self, overlay: &Overlay, charts: &ChartData);
}

/// Logs a status line via `tracing`, throttled to one line per interval so
/// a 30 fps source does not flood the terminal.
pub struct ConsoleDisplay {
    every: u32,
    frame_count: u32,
}

impl ConsoleDisplay {
    /// Log one line every `every` frames.
    pub fn new(every: u32) -> Self {
        Self {
            every: every.max(1),
            frame_count: 0,
        }
    }

    pub fn default_rate() -> Self {
        // Roughly once per second at ~30 fps
        Self::new(30)
    }
}

impl DisplaySink for ConsoleDisplay {
    fn refresh(&mut self, overlay: &Overlay, charts: &ChartData) {
        self.frame_count = self.frame_count.wrapping_add(1);
        if self.frame_count % self.every != 0 {
            return;
        }
        let status = overlay.status_text();
        tracing::info!(
            "{} | luma {:6.2} | R {:6.2} G {:6.2} B {:6.2} | rate {:+7.2}/s | elapsed {:6.2}s | {} ({} pts)",
            overlay.timestamp,
            overlay.luma,
            overlay.avg_r,
            overlay.avg_g,
            overlay.avg_b,
            overlay.rate_of_change,
            overlay.elapsed_secs,
            if status.is_empty() { "idle" } else { &status },
            charts.luma_series.len(),
        );
    }
}

/// Discards everything. Used in tests and headless runs.
#[derive(Debug, Default)]
pub struct NullDisplay;

impl DisplaySink for NullDisplay {
    fn refresh(&mut self, _overlay: &Overlay, _charts: &ChartData) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay(state: RecordingState, countdown: Option<Duration>) -> Overlay {
        Overlay {
            luma: 100.0,
            avg_r: 0.0,
            avg_g: 0.0,
            avg_b: 0.0,
            timestamp: String::new(),
            elapsed_secs: 0.0,
            rate_of_change: 0.0,
            state,
            countdown,
            region: Region::new(0, 0, 8, 8),
        }
    }

    #[test]
    fn test_status_text_idle_is_empty() {
        assert_eq!(overlay(RecordingState::Idle, None).status_text(), "");
    }

    #[test]
    fn test_status_text_countdown() {
        let o = overlay(
            RecordingState::PendingDelay,
            Some(Duration::from_secs_f64(12.34)),
        );
        assert_eq!(o.status_text(), "Recording starts in: 12.3 s");
    }

    #[test]
    fn test_status_text_recording() {
        assert_eq!(
            overlay(RecordingState::Recording, None).status_text(),
            "Recording..."
        );
    }
}
