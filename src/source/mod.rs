//! Frame acquisition seam
//!
//! The pipeline only ever talks to [`FrameSource`]; what sits behind it is
//! source-specific. The synthetic source generates deterministic frames for
//! demos and tests, and the sequence source replays a directory of image
//! files. A live capture backend would plug in behind the same trait.

pub mod sequence;
pub mod synthetic;

pub use sequence::ImageSequenceSource;
pub use synthetic::SyntheticSource;

use crate::error::Result;
use crate::types::Frame;

/// A blocking supplier of video frames.
pub trait FrameSource {
    /// Pull the next frame, blocking until one is available.
    ///
    /// `Ok(None)` signals end of stream; the pipeline then unwinds and
    /// flushes. Errors are read/decode failures and are treated the same
    /// way, after being reported.
    fn next_frame(&mut self) -> Result<Option<Frame>>;

    /// Human-readable source description for logs.
    fn describe(&self) -> String;
}

impl FrameSource for Box<dyn FrameSource> {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        (**self).next_frame()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
