//! The per-frame pipeline
//!
//! One logical actor pulls a frame, derives metrics, updates the rate
//! tracker and history, ticks the recording state machine, offers the
//! sample to the recorder, refreshes the display, and polls for an operator
//! command. The bounded command wait paces the loop; a quit command or
//! source exhaustion are the only ways out.

use crate::analysis::{moving_average, region_metrics, RateTracker};
use crate::config::AppConfig;
use crate::control::{Command, CommandSource};
use crate::display::{ChartData, DisplaySink, Overlay};
use crate::error::{Result, ResultExt};
use crate::history::HistoryBuffer;
use crate::session::{RecordedRow, RecordingStateMachine, SessionRecorder};
use crate::source::FrameSource;
use crate::types::{Frame, Region, Sample};
use std::time::{Duration, Instant};

/// Why the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// Operator quit command
    Quit,
    /// Frame source reported end of stream
    EndOfStream,
    /// Frame source failed mid-stream
    SourceError,
}

/// Owns all mutable pipeline state and drives it frame by frame.
pub struct FrameLoop<S, C, D>
where
    S: FrameSource,
    C: CommandSource,
    D: DisplaySink,
{
    source: S,
    commands: C,
    display: D,
    region: Region,
    smoothing_window: usize,
    poll_wait: Duration,
    history: HistoryBuffer,
    rate_tracker: RateTracker,
    machine: RecordingStateMachine,
    recorder: SessionRecorder,
    frames_processed: u64,
}

impl<S, C, D> FrameLoop<S, C, D>
where
    S: FrameSource,
    C: CommandSource,
    D: DisplaySink,
{
    /// Wire up a loop from the startup config and its three collaborators.
    pub fn new(config: &AppConfig, source: S, commands: C, display: D) -> Self {
        Self {
            source,
            commands,
            display,
            region: config.region,
            smoothing_window: config.display.smoothing_window,
            poll_wait: Duration::from_millis(config.poll_wait_ms),
            history: HistoryBuffer::new(config.display.history_capacity),
            rate_tracker: RateTracker::new(),
            machine: RecordingStateMachine::new(Duration::from_secs(
                config.recording.delay_secs,
            )),
            recorder: SessionRecorder::new(),
            frames_processed: 0,
        }
    }

    /// Run until quit or the source runs out.
    ///
    /// Errors during frame processing (an invalid region against a frame
    /// that changed size mid-stream, for example) propagate after the loop
    /// state is left intact, so the caller can still flush recorded rows.
    pub fn run(&mut self) -> Result<LoopExit> {
        tracing::info!("Frame loop started ({})", self.source.describe());
        loop {
            let frame = match self.source.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    tracing::info!(
                        "End of stream after {} frames",
                        self.frames_processed
                    );
                    return Ok(LoopExit::EndOfStream);
                }
                Err(e) => {
                    tracing::warn!("Frame read failed: {}", e);
                    return Ok(LoopExit::SourceError);
                }
            };

            self.process_frame(&frame)?;

            match self.commands.poll(self.poll_wait) {
                Some(Command::Start) => {
                    self.machine.start(Instant::now());
                    self.recorder.clear();
                    tracing::info!("Recording will start after delay...");
                }
                Some(Command::Stop) => {
                    self.machine.stop();
                    tracing::info!("Recording stopped");
                }
                Some(Command::Quit) => {
                    tracing::info!("Quit requested");
                    return Ok(LoopExit::Quit);
                }
                None => {}
            }
        }
    }

    /// One iteration's measurement-and-state work for a pulled frame.
    fn process_frame(&mut self, frame: &Frame) -> Result<()> {
        let now = Instant::now();
        let metrics = region_metrics(frame, &self.region)
            .with_context(|| format!("Sampling frame {}", self.frames_processed))?;
        let rate_of_change = self.rate_tracker.update(metrics.luma, now);

        let sample = Sample {
            captured_at: chrono::Local::now(),
            instant: now,
            luma: metrics.luma,
            avg_r: metrics.avg_r,
            avg_g: metrics.avg_g,
            avg_b: metrics.avg_b,
            rate_of_change,
        };

        self.history.push(&sample);

        if self.machine.tick(now) {
            tracing::info!("Recording started after delay");
        }
        self.recorder.observe(&sample, &self.machine, now);

        let overlay = Overlay {
            luma: sample.luma,
            avg_r: sample.avg_r,
            avg_g: sample.avg_g,
            avg_b: sample.avg_b,
            timestamp: sample.timestamp_text(),
            elapsed_secs: self.machine.elapsed(now).as_secs_f64(),
            rate_of_change: sample.rate_of_change,
            state: self.machine.state(),
            countdown: self.machine.remaining_delay(now),
            region: self.region,
        };
        let charts = ChartData {
            luma_series: self.history.luma_series(),
            rate_series: moving_average(&self.history.rate_series(), self.smoothing_window),
        };
        self.display.refresh(&overlay, &charts);

        self.frames_processed += 1;
        Ok(())
    }

    /// Frames pulled so far.
    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    /// Live display history (read-only).
    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Current recording state.
    pub fn recording_state(&self) -> crate::session::RecordingState {
        self.machine.state()
    }

    /// Rows recorded so far (read-only).
    pub fn rows(&self) -> &[RecordedRow] {
        self.recorder.rows()
    }

    /// Hand over the recorded rows for flushing.
    pub fn take_rows(&mut self) -> Vec<RecordedRow> {
        self.recorder.take_rows()
    }
}
