//! Bounded sample history for the live display
//!
//! Three parallel bounded series (luma, rate, wall-clock timestamp) kept in
//! lock-step: every push appends to all three and evicts the oldest entry
//! from all three once the capacity is reached. Display reads snapshots;
//! nothing here feeds recording truth.

use crate::types::Sample;
use chrono::{DateTime, Local};
use std::collections::VecDeque;

/// Fixed-capacity FIFO over recent samples' display projections.
#[derive(Debug)]
pub struct HistoryBuffer {
    capacity: usize,
    luma: VecDeque<f64>,
    rate: VecDeque<f64>,
    timestamps: VecDeque<DateTime<Local>>,
}

impl HistoryBuffer {
    /// Create a buffer holding at most `capacity` samples.
    ///
    /// Capacity must be at least 1 (enforced by config validation).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            luma: VecDeque::with_capacity(capacity),
            rate: VecDeque::with_capacity(capacity),
            timestamps: VecDeque::with_capacity(capacity),
        }
    }

    /// Append one sample's projections, evicting the oldest entry when full.
    pub fn push(&mut self, sample: &Sample) {
        if self.luma.len() == self.capacity {
            self.luma.pop_front();
            self.rate.pop_front();
            self.timestamps.pop_front();
        }
        self.luma.push_back(sample.luma);
        self.rate.push_back(sample.rate_of_change);
        self.timestamps.push_back(sample.captured_at);
    }

    /// Number of samples currently held.
    pub fn len(&self) -> usize {
        self.luma.len()
    }

    /// True when no samples have been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.luma.is_empty()
    }

    /// Maximum number of samples retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Luma series in arrival order, oldest first.
    pub fn luma_series(&self) -> Vec<f64> {
        self.luma.iter().copied().collect()
    }

    /// Rate-of-change series in arrival order, oldest first.
    pub fn rate_series(&self) -> Vec<f64> {
        self.rate.iter().copied().collect()
    }

    /// Timestamps in arrival order, oldest first.
    pub fn timestamp_series(&self) -> Vec<DateTime<Local>> {
        self.timestamps.iter().copied().collect()
    }
}
