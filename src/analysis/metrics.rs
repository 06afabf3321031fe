//! Region metric extraction
//!
//! Computes the mean luma and per-channel means of the region of interest.
//! Luma uses the BT.601 weights (0.299 R + 0.587 G + 0.114 B), the same
//! conversion OpenCV applies for `COLOR_BGR2GRAY`, so the output is a
//! perceptual brightness rather than a plain channel average.

use crate::error::Result;
use crate::types::{ChannelOrder, Frame, Region};

/// BT.601 luma weights for R, G, B
const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// Mean luma and channel means over a region, all in [0, 255]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionMetrics {
    pub luma: f64,
    pub avg_r: f64,
    pub avg_g: f64,
    pub avg_b: f64,
}

/// Compute [`RegionMetrics`] for `region` within `frame`.
///
/// Pure function of the pixel data. Fails with `InvalidRegion` if the region
/// is empty or does not fit inside the frame.
pub fn region_metrics(frame: &Frame, region: &Region) -> Result<RegionMetrics> {
    region.validate_for(frame.width(), frame.height())?;

    let mut sum_r = 0.0f64;
    let mut sum_g = 0.0f64;
    let mut sum_b = 0.0f64;

    for y in region.y..region.y + region.height {
        for x in region.x..region.x + region.width {
            let px = frame.pixel(x, y);
            let (r, g, b) = match frame.channel_order() {
                ChannelOrder::Bgr => (px[2], px[1], px[0]),
                ChannelOrder::Rgb => (px[0], px[1], px[2]),
            };
            sum_r += r as f64;
            sum_g += g as f64;
            sum_b += b as f64;
        }
    }

    let n = region.pixel_count() as f64;
    let avg_r = sum_r / n;
    let avg_g = sum_g / n;
    let avg_b = sum_b / n;

    // Mean of a linear combination equals the combination of the means, so
    // the luma mean can be computed from the channel sums directly.
    let luma = LUMA_R * avg_r + LUMA_G * avg_g + LUMA_B * avg_b;

    Ok(RegionMetrics {
        luma,
        avg_r,
        avg_g,
        avg_b,
    })
}
