//! Core value types shared across the crate
//!
//! `Frame` is the unit handed over by a [`crate::source::FrameSource`],
//! `Region` is the fixed sampling rectangle, and `Sample` is one per-frame
//! measurement produced by the pipeline.

use crate::error::{LumaTraceError, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Channel ordering of a frame's interleaved pixel buffer.
///
/// Webcam-style sources typically deliver BGR; decoded image files are RGB.
/// The luma/channel-mean computation must know which it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    /// Blue, green, red interleaved (OpenCV-style capture)
    #[default]
    Bgr,
    /// Red, green, blue interleaved (decoded image files)
    Rgb,
}

/// A single captured frame: an interleaved 3-channel pixel buffer.
#[derive(Clone)]
pub struct Frame {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    order: ChannelOrder,
}

impl Frame {
    /// Create a frame, validating that the buffer matches the dimensions.
    pub fn new(pixels: Vec<u8>, width: u32, height: u32, order: ChannelOrder) -> Result<Self> {
        let expected = width as usize * height as usize * 3;
        if pixels.len() != expected {
            return Err(LumaTraceError::Source(format!(
                "pixel buffer has {} bytes, expected {} for {}x{}x3",
                pixels.len(),
                expected,
                width,
                height
            )));
        }
        Ok(Self {
            pixels,
            width,
            height,
            order,
        })
    }

    /// Frame width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel ordering of the pixel buffer.
    #[inline]
    pub fn channel_order(&self) -> ChannelOrder {
        self.order
    }

    /// Raw interleaved pixel data.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The three channel values at (x, y), in buffer order.
    ///
    /// Caller must ensure the coordinate is in bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

/// The fixed region of interest sampled from every frame.
///
/// Coordinates are in source-frame pixels. A region must be non-empty and
/// fully contained in the frame; out-of-bounds regions are rejected, never
/// clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    /// Create a region rectangle.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Number of pixels covered by the region.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Validate this region against a frame's dimensions.
    pub fn validate_for(&self, frame_width: u32, frame_height: u32) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LumaTraceError::invalid_region(
                *self,
                frame_width,
                frame_height,
                "region is empty",
            ));
        }
        let fits_x = self.x.checked_add(self.width).is_some_and(|r| r <= frame_width);
        let fits_y = self
            .y
            .checked_add(self.height)
            .is_some_and(|b| b <= frame_height);
        if !fits_x || !fits_y {
            return Err(LumaTraceError::invalid_region(
                *self,
                frame_width,
                frame_height,
                "region extends past frame edge",
            ));
        }
        Ok(())
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}) {}x{}",
            self.x, self.y, self.width, self.height
        )
    }
}

/// One per-frame measurement, immutable after creation.
///
/// `captured_at` is the wall-clock timestamp used for display and CSV text;
/// `instant` is the monotonic counterpart used for all elapsed/delta math.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    /// Wall-clock capture time, millisecond precision when formatted
    pub captured_at: DateTime<Local>,
    /// Monotonic capture time for elapsed/rate computation
    pub instant: Instant,
    /// Mean BT.601 luma over the region, in [0, 255]
    pub luma: f64,
    /// Mean red channel over the region, in [0, 255]
    pub avg_r: f64,
    /// Mean green channel over the region, in [0, 255]
    pub avg_g: f64,
    /// Mean blue channel over the region, in [0, 255]
    pub avg_b: f64,
    /// Rate of change of luma, in luma units per second
    pub rate_of_change: f64,
}

impl Sample {
    /// Timestamp text with millisecond precision, e.g.
    /// `2024-01-01 12:00:00.123`.
    pub fn timestamp_text(&self) -> String {
        self.captured_at.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_frame_buffer_validation() {
        assert!(Frame::new(vec![0u8; 12], 2, 2, ChannelOrder::Bgr).is_ok());
        assert!(Frame::new(vec![0u8; 11], 2, 2, ChannelOrder::Bgr).is_err());
    }

    #[test]
    fn test_frame_pixel_indexing() {
        // 2x2 BGR frame with distinct values per pixel
        let pixels = vec![
            1, 2, 3, // (0,0)
            4, 5, 6, // (1,0)
            7, 8, 9, // (0,1)
            10, 11, 12, // (1,1)
        ];
        let frame = Frame::new(pixels, 2, 2, ChannelOrder::Bgr).unwrap();
        assert_eq!(frame.pixel(0, 0), [1, 2, 3]);
        assert_eq!(frame.pixel(1, 0), [4, 5, 6]);
        assert_eq!(frame.pixel(1, 1), [10, 11, 12]);
    }

    #[test]
    fn test_region_validation() {
        assert!(Region::new(0, 0, 8, 8).validate_for(640, 480).is_ok());
        assert!(Region::new(632, 472, 8, 8).validate_for(640, 480).is_ok());
        // Empty
        assert!(Region::new(0, 0, 0, 8).validate_for(640, 480).is_err());
        assert!(Region::new(0, 0, 8, 0).validate_for(640, 480).is_err());
        // Past the edge
        assert!(Region::new(633, 0, 8, 8).validate_for(640, 480).is_err());
        assert!(Region::new(0, 473, 8, 8).validate_for(640, 480).is_err());
        // Overflowing coordinates must not wrap
        assert!(Region::new(u32::MAX, 0, 8, 8).validate_for(640, 480).is_err());
    }

    #[test]
    fn test_timestamp_text_millisecond_precision() {
        let captured_at = Local
            .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
            .unwrap()
            .checked_add_signed(chrono::Duration::milliseconds(123))
            .unwrap();
        let sample = Sample {
            captured_at,
            instant: Instant::now(),
            luma: 0.0,
            avg_r: 0.0,
            avg_g: 0.0,
            avg_b: 0.0,
            rate_of_change: 0.0,
        };
        assert_eq!(sample.timestamp_text(), "2024-01-01 12:00:00.123");
    }
}
