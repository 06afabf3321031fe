//! Recording session handling
//!
//! A session runs from the operator's start command, through a fixed delay
//! countdown, into recording, and ends on the stop command. Rows accepted
//! while recording are flushed to a CSV table once, at program exit or on
//! explicit export.

pub mod export;
pub mod recorder;
pub mod state;

pub use export::{flush_session, CSV_HEADER};
pub use recorder::{RecordedRow, SessionRecorder};
pub use state::{RecordingState, RecordingStateMachine};
