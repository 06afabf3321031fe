//! # lumatrace: real-time ROI luma monitor
//!
//! Samples a fixed pixel region from a frame source at the source's native
//! rate, derives brightness (BT.601 luma) and per-channel color statistics
//! per frame, tracks the instantaneous rate of change of luma, and records
//! a timestamped session to a CSV table on operator command. Recording
//! starts after a fixed countdown so the operator can step away from the
//! instrument before data collection begins.
//!
//! ## Architecture
//!
//! - **Pipeline**: a single synchronous loop per frame — sample, measure,
//!   tick the recording state machine, refresh the display, poll commands
//! - **Sources**: frame acquisition behind the `FrameSource` trait
//!   (synthetic generator, image-sequence playback)
//! - **Display**: structured per-frame values behind the `DisplaySink`
//!   trait; the core never depends on a renderer
//! - **Commands**: operator start/stop/quit over a bounded-wait poll, which
//!   also paces the loop
//!
//! ## Example
//!
//! ```ignore
//! use lumatrace::{
//!     config::AppConfig,
//!     control::StdinCommands,
//!     display::ConsoleDisplay,
//!     pipeline::FrameLoop,
//!     session::flush_session,
//!     source::SyntheticSource,
//! };
//! use std::time::Duration;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load_or_default("lumatrace.toml")?;
//!     let source = SyntheticSource::new(640, 480, Duration::from_millis(33));
//!     let mut frame_loop = FrameLoop::new(
//!         &config,
//!         source,
//!         StdinCommands::spawn(),
//!         ConsoleDisplay::default_rate(),
//!     );
//!     frame_loop.run()?;
//!     flush_session(&config.recording.output_path, &frame_loop.take_rows())?;
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod control;
pub mod display;
pub mod error;
pub mod history;
pub mod pipeline;
pub mod session;
pub mod source;
pub mod types;

// Re-export commonly used types
pub use config::AppConfig;
pub use control::{Command, CommandSource};
pub use display::{ChartData, DisplaySink, Overlay};
pub use error::{LumaTraceError, Result};
pub use history::HistoryBuffer;
pub use pipeline::{FrameLoop, LoopExit};
pub use session::{RecordedRow, RecordingState, SessionRecorder};
pub use source::FrameSource;
pub use types::{ChannelOrder, Frame, Region, Sample};
