//! Configuration module for lumatrace
//!
//! All settings are fixed at startup: the config is loaded once from a TOML
//! file, validated, and never reconfigured at runtime. Missing keys fall
//! back to the defaults below, so an empty file (or no file at all) yields a
//! usable instrument.
//!
//! # Example
//!
//! ```toml
//! [source]
//! kind = "sequence"
//! path = "frames/"
//! frame_interval_ms = 33
//!
//! [region]
//! x = 270
//! y = 180
//! width = 8
//! height = 8
//!
//! [display]
//! history_capacity = 100
//! smoothing_window = 5
//!
//! [recording]
//! delay_secs = 30
//! output_path = "luma_data.csv"
//! ```

use crate::error::{LumaTraceError, Result};
use crate::types::Region;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config filename, looked up in the working directory
pub const CONFIG_FILE: &str = "lumatrace.toml";

/// Default region rectangle (x, y, width, height)
pub const DEFAULT_REGION: (u32, u32, u32, u32) = (270, 180, 8, 8);

/// Default number of samples kept for the live display
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Default moving-average window for the displayed rate series
pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;

/// Default delay between the start command and actual recording, seconds
pub const DEFAULT_DELAY_SECS: u64 = 30;

/// Default bounded wait when polling for an operator command, milliseconds.
/// Doubles as the loop's pacing interval.
pub const DEFAULT_POLL_WAIT_MS: u64 = 30;

/// Default output table path
pub const DEFAULT_OUTPUT_PATH: &str = "luma_data.csv";

/// Which frame source implementation to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Deterministic generated frames (demo / testing)
    #[default]
    Synthetic,
    /// Ordered directory of image files
    Sequence,
}

/// Frame source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Source implementation to use
    pub kind: SourceKind,
    /// Directory of image files (sequence source only)
    pub path: Option<PathBuf>,
    /// Synthetic source frame dimensions
    pub width: u32,
    pub height: u32,
    /// Fixed per-frame delay simulating a capture rate (synthetic source)
    pub frame_interval_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Synthetic,
            path: None,
            width: 640,
            height: 480,
            frame_interval_ms: 33,
        }
    }
}

/// Live display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Samples retained for the live charts
    pub history_capacity: usize,
    /// Trailing moving-average window applied to the displayed rate series
    pub smoothing_window: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
        }
    }
}

/// Recording settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingConfig {
    /// Seconds between the start command and the first recorded row
    pub delay_secs: u64,
    /// Destination of the exported CSV table
    pub output_path: PathBuf,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            delay_secs: DEFAULT_DELAY_SECS,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub region: Region,
    pub display: DisplayConfig,
    pub recording: RecordingConfig,
    /// Bounded wait for each command poll, milliseconds
    pub poll_wait_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let (x, y, width, height) = DEFAULT_REGION;
        Self {
            source: SourceConfig::default(),
            region: Region::new(x, y, width, height),
            display: DisplayConfig::default(),
            recording: RecordingConfig::default(),
            poll_wait_ms: DEFAULT_POLL_WAIT_MS,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            LumaTraceError::Config(format!(
                "Failed to read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let config: AppConfig = toml::from_str(&text)
            .map_err(|e| LumaTraceError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the given path if it exists, otherwise fall back to
    /// defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            tracing::info!(
                "Config file {} not found, using defaults",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = toml::to_string_pretty(self)
            .map_err(|e| LumaTraceError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path.as_ref(), text)?;
        Ok(())
    }

    /// Validate settings that would otherwise fail deep inside the pipeline.
    ///
    /// The region is additionally validated against every frame at runtime;
    /// this startup check catches configs that cannot work for the declared
    /// source dimensions.
    pub fn validate(&self) -> Result<()> {
        if self.source.kind == SourceKind::Synthetic {
            self.region
                .validate_for(self.source.width, self.source.height)?;
        } else if self.region.width == 0 || self.region.height == 0 {
            return Err(LumaTraceError::invalid_region(
                self.region,
                0,
                0,
                "region is empty",
            ));
        }
        if self.source.kind == SourceKind::Sequence && self.source.path.is_none() {
            return Err(LumaTraceError::Config(
                "source.kind = \"sequence\" requires source.path".to_string(),
            ));
        }
        if self.display.history_capacity == 0 {
            return Err(LumaTraceError::Config(
                "display.history_capacity must be at least 1".to_string(),
            ));
        }
        if self.display.smoothing_window == 0 {
            return Err(LumaTraceError::Config(
                "display.smoothing_window must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
