//! Image-sequence frame source
//!
//! Replays an ordered directory of image files as a frame stream. Files are
//! sorted by name, so zero-padded frame numbers play back in capture order.
//! Decoded frames are RGB; the metric extraction accounts for the order.

use crate::error::{LumaTraceError, Result};
use crate::source::FrameSource;
use crate::types::{ChannelOrder, Frame};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Extensions accepted as frames
const FRAME_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Reads image files from a directory in name order.
#[derive(Debug)]
pub struct ImageSequenceSource {
    files: Vec<PathBuf>,
    next_index: usize,
    frame_interval: Duration,
}

impl ImageSequenceSource {
    /// Scan `dir` for image files. Fails if the directory cannot be read or
    /// contains no frames.
    pub fn open(dir: impl AsRef<Path>, frame_interval: Duration) -> Result<Self> {
        let dir = dir.as_ref();
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(|e| {
                LumaTraceError::Source(format!("Cannot read directory {}: {}", dir.display(), e))
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| {
                        FRAME_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
                    })
            })
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(LumaTraceError::Source(format!(
                "No image frames found in {}",
                dir.display()
            )));
        }

        tracing::info!("Image sequence: {} frames from {}", files.len(), dir.display());
        Ok(Self {
            files,
            next_index: 0,
            frame_interval,
        })
    }

    /// Number of frames remaining.
    pub fn remaining(&self) -> usize {
        self.files.len() - self.next_index
    }
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        if self.next_index >= self.files.len() {
            return Ok(None);
        }
        let path = self.files[self.next_index].clone();
        self.next_index += 1;

        if !self.frame_interval.is_zero() {
            std::thread::sleep(self.frame_interval);
        }

        let decoded = image::open(&path).map_err(|e| {
            LumaTraceError::Source(format!("Failed to decode {}: {}", path.display(), e))
        })?;
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();
        Frame::new(rgb.into_raw(), width, height, ChannelOrder::Rgb).map(Some)
    }

    fn describe(&self) -> String {
        format!("image sequence ({} frames)", self.files.len())
    }
}
