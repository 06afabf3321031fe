//! Synthetic frame source
//!
//! Generates gray frames whose level follows a slow sine wave, with a
//! brighter patch that makes region placement visible. Stands in for a live
//! camera in demos and drives the pipeline in tests, the same way a mock
//! backend stands in for real hardware.

use crate::error::Result;
use crate::source::FrameSource;
use crate::types::{ChannelOrder, Frame};
use std::time::Duration;

/// Deterministic generated frames at a fixed simulated rate.
#[derive(Debug)]
pub struct SyntheticSource {
    width: u32,
    height: u32,
    frame_interval: Duration,
    /// Stop after this many frames; `None` = endless
    limit: Option<u64>,
    sequence: u64,
}

impl SyntheticSource {
    /// Create an endless source of `width`x`height` frames, sleeping
    /// `frame_interval` per pull to simulate a capture rate.
    pub fn new(width: u32, height: u32, frame_interval: Duration) -> Self {
        Self {
            width,
            height,
            frame_interval,
            limit: None,
            sequence: 0,
        }
    }

    /// Limit the stream to `limit` frames, after which the source reports
    /// end of stream. Tests use this to terminate the loop without a quit
    /// command.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Gray level for frame `sequence`: a sine between roughly 40 and 215.
    fn level(sequence: u64) -> u8 {
        let phase = sequence as f64 * 0.05;
        (127.5 + 87.5 * phase.sin()).round() as u8
    }
}

impl FrameSource for SyntheticSource {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        if let Some(limit) = self.limit {
            if self.sequence >= limit {
                return Ok(None);
            }
        }
        if !self.frame_interval.is_zero() {
            std::thread::sleep(self.frame_interval);
        }

        let level = Self::level(self.sequence);
        let mut pixels = vec![level; self.width as usize * self.height as usize * 3];

        // Brighter center patch so the default ROI sees structure
        let patch_w = self.width / 4;
        let patch_h = self.height / 4;
        let x0 = (self.width - patch_w) / 2;
        let y0 = (self.height - patch_h) / 2;
        let bright = level.saturating_add(40);
        for y in y0..y0 + patch_h {
            for x in x0..x0 + patch_w {
                let idx = (y as usize * self.width as usize + x as usize) * 3;
                pixels[idx..idx + 3].fill(bright);
            }
        }

        self.sequence += 1;
        Frame::new(pixels, self.width, self.height, ChannelOrder::Bgr).map(Some)
    }

    fn describe(&self) -> String {
        format!("synthetic {}x{}", self.width, self.height)
    }
}
