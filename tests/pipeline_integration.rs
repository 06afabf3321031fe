//! End-to-end pipeline runs: synthetic source, scripted commands, null
//! display, CSV flush.

mod common;

use common::ScriptedCommands;
use lumatrace::config::AppConfig;
use lumatrace::control::Command;
use lumatrace::display::{ChartData, DisplaySink, NullDisplay, Overlay};
use lumatrace::pipeline::{FrameLoop, LoopExit};
use lumatrace::session::{flush_session, CSV_HEADER};
use lumatrace::source::SyntheticSource;
use lumatrace::types::Region;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.source.width = 64;
    config.source.height = 64;
    config.region = Region::new(16, 16, 8, 8);
    config.poll_wait_ms = 0;
    config.recording.delay_secs = 0;
    config
}

fn source(frames: u64) -> SyntheticSource {
    SyntheticSource::new(64, 64, Duration::ZERO).with_limit(frames)
}

#[test]
fn full_session_flushes_csv_with_fixed_schema() {
    let config = test_config();
    let script = vec![Some(Command::Start), None, None, None, Some(Command::Stop)];
    let mut frame_loop = FrameLoop::new(
        &config,
        source(8),
        ScriptedCommands::new(script),
        NullDisplay,
    );
    let exit = frame_loop.run().unwrap();
    assert_eq!(exit, LoopExit::EndOfStream);

    let rows = frame_loop.take_rows();
    assert_eq!(rows.len(), 4);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.csv");
    let written = flush_session(&path, &rows).unwrap();
    assert_eq!(written, Some(4));

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(lines.len(), 5);
    for line in &lines[1..] {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 7);
        // Timestamp text carries millisecond precision
        assert_eq!(fields[0].len(), "2024-01-01 12:00:00.123".len());
        // Numeric columns parse as reals
        for field in &fields[1..] {
            field.parse::<f64>().unwrap();
        }
    }
}

#[test]
fn quit_without_recording_leaves_nothing_to_flush() {
    let config = test_config();
    let script = vec![None, Some(Command::Quit)];
    let mut frame_loop = FrameLoop::new(
        &config,
        source(100),
        ScriptedCommands::new(script),
        NullDisplay,
    );
    let exit = frame_loop.run().unwrap();
    assert_eq!(exit, LoopExit::Quit);

    let rows = frame_loop.take_rows();
    assert!(rows.is_empty());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    assert_eq!(flush_session(&path, &rows).unwrap(), None);
    assert!(!path.exists());
}

#[test]
fn history_stays_bounded_over_long_runs() {
    let mut config = test_config();
    config.display.history_capacity = 25;
    let mut frame_loop = FrameLoop::new(
        &config,
        source(200),
        ScriptedCommands::new(vec![]),
        NullDisplay,
    );
    frame_loop.run().unwrap();
    assert_eq!(frame_loop.frames_processed(), 200);
    assert_eq!(frame_loop.history().len(), 25);
}

/// Captures every refresh through a shared handle so the test can inspect
/// what the sink saw after the loop has consumed it.
#[derive(Clone, Default)]
struct CapturingDisplay {
    refreshes: Rc<RefCell<Vec<(Overlay, ChartData)>>>,
}

impl DisplaySink for CapturingDisplay {
    fn refresh(&mut self, overlay: &Overlay, charts: &ChartData) {
        self.refreshes
            .borrow_mut()
            .push((overlay.clone(), charts.clone()));
    }
}

#[test]
fn display_receives_one_refresh_per_frame_with_smoothed_rate() {
    let mut config = test_config();
    config.display.smoothing_window = 5;
    let display = CapturingDisplay::default();
    let refreshes = display.refreshes.clone();
    let mut frame_loop = FrameLoop::new(
        &config,
        source(20),
        ScriptedCommands::new(vec![]),
        display,
    );
    frame_loop.run().unwrap();

    let refreshes = refreshes.borrow();
    assert_eq!(refreshes.len(), 20);
    for (i, (_, charts)) in refreshes.iter().enumerate() {
        let len = i + 1;
        assert_eq!(charts.luma_series.len(), len);
        // Raw rate series below the window size, trailing average above
        let expected = if len < 5 { len } else { len - 5 + 1 };
        assert_eq!(charts.rate_series.len(), expected);
    }
}

#[test]
fn overlay_tracks_recording_status() {
    let mut config = test_config();
    config.recording.delay_secs = 3600;
    let display = CapturingDisplay::default();
    let refreshes = display.refreshes.clone();
    let script = vec![None, Some(Command::Start), None, Some(Command::Stop)];
    let mut frame_loop = FrameLoop::new(
        &config,
        source(6),
        ScriptedCommands::new(script),
        display,
    );
    frame_loop.run().unwrap();

    let refreshes = refreshes.borrow();
    assert_eq!(refreshes.len(), 6);
    // Frames 1-2 idle, 3-4 counting down, 5-6 idle again after the stop
    assert_eq!(refreshes[0].0.status_text(), "");
    assert_eq!(refreshes[1].0.status_text(), "");
    assert!(refreshes[2].0.status_text().starts_with("Recording starts in:"));
    assert!(refreshes[3].0.status_text().starts_with("Recording starts in:"));
    assert_eq!(refreshes[4].0.status_text(), "");
    assert_eq!(refreshes[5].0.status_text(), "");
    // Elapsed stays zero while nothing records
    assert!(refreshes.iter().all(|(o, _)| o.elapsed_secs == 0.0));
}
