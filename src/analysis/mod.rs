//! Per-frame numeric analysis
//!
//! Everything in here is plain arithmetic over the sampled region: the
//! BT.601 luma/channel means, the luma rate-of-change tracker, and the
//! moving-average filter used to smooth the displayed rate series.

pub mod metrics;
pub mod rate;
pub mod smoothing;

pub use metrics::{region_metrics, RegionMetrics};
pub use rate::RateTracker;
pub use smoothing::moving_average;
