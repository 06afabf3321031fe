//! Error handling for lumatrace
//!
//! This module defines custom error types and a Result alias for use
//! throughout the application.

use crate::types::Region;
use thiserror::Error;

/// Main error type for lumatrace operations
#[derive(Error, Debug)]
pub enum LumaTraceError {
    /// The sampling region is empty or does not fit inside the frame
    #[error("Invalid region {region} for {frame_width}x{frame_height} frame: {message}")]
    InvalidRegion {
        region: Region,
        frame_width: u32,
        frame_height: u32,
        message: String,
    },

    /// Errors related to the frame source (decode failure, bad pixel buffer)
    #[error("Frame source error: {0}")]
    Source(String),

    /// Errors related to configuration loading/validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to channel communication with the command reader
    #[error("Channel error: {0}")]
    Channel(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<LumaTraceError>,
    },
}

impl LumaTraceError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        LumaTraceError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create an `InvalidRegion` error for a region/frame mismatch
    pub fn invalid_region(
        region: Region,
        frame_width: u32,
        frame_height: u32,
        message: impl Into<String>,
    ) -> Self {
        LumaTraceError::InvalidRegion {
            region,
            frame_width,
            frame_height,
            message: message.into(),
        }
    }
}

/// Result type alias for lumatrace operations
pub type Result<T> = std::result::Result<T, LumaTraceError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}
