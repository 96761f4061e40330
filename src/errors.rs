//! Error Types
//!
//! This module defines the error types used throughout the engine.
//!
//! # Overview
//!
//! The main error type [`CubismError`] covers the failure modes of the
//! loading and configuration surface:
//! - Timeline document parsing and validation
//! - Scene layout configuration
//! - The optional animation thread hand-off
//!
//! The per-frame hot paths (transform composition, culling, curve evaluation,
//! handle resolution) are total and never produce errors.
//!
//! # Usage
//!
//! All fallible public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, CubismError>`.
//!
//! ```rust,ignore
//! use cubism::errors::Result;
//! use cubism::animation::Timeline;
//!
//! fn load(json: &str) -> Result<Timeline> {
//!     Timeline::from_json_str(json)
//! }
//! ```

use thiserror::Error;

/// The main error type for the Cubism engine.
#[derive(Error, Debug)]
pub enum CubismError {
    // ========================================================================
    // Timeline Errors
    // ========================================================================
    /// The timeline document is not valid JSON or does not match the schema.
    #[error("Timeline JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A numeric field of a control segment could not be parsed.
    #[error("Malformed number in segment #{segment} field '{field}': '{value}'")]
    MalformedNumber {
        /// Index of the segment in document order
        segment: usize,
        /// Attribute name (`id`, `c0`, ...)
        field: &'static str,
        /// The offending text
        value: String,
    },

    /// A segment's time window is reversed or not finite.
    #[error("Invalid time range in segment #{segment}: t0 = {start}, t1 = {end}")]
    InvalidTimeRange {
        /// Index of the segment in document order
        segment: usize,
        /// Authored start time
        start: f32,
        /// Authored end time
        end: f32,
    },

    /// The segment names a channel tag that does not exist.
    #[error("Unknown channel tag '{0}'")]
    UnknownChannel(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// A scene layout was configured with inconsistent parameters.
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    // ========================================================================
    // Threading Errors
    // ========================================================================
    /// The animation thread stopped before delivering a frame.
    #[error("Animation thread disconnected")]
    AnimationThreadDisconnected,
}

/// Alias for `Result<T, CubismError>`.
pub type Result<T> = std::result::Result<T, CubismError>;
