//! Error types for bandview operations.
//!
//! This module provides a unified error handling system for raster display
//! and color conversion operations.
//!
//! # Overview
//!
//! The [`Error`] enum covers the hard failure modes:
//!
//! - Invalid construction arguments (degenerate ranges, bad dimensions)
//! - Unsupported accessors that cannot be meaningfully implemented
//! - Bounds/region/channel violations during raster access
//!
//! Soft failures are deliberately *not* errors: malformed metadata tags and
//! empty brute-force scans are absorbed as `None` by the display layer and
//! fall through to the next tier.
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation
//!
//! # Used By
//!
//! - [`crate::raster::Raster`] - Buffer and region operations
//! - `bandview-display` - Mapper construction
//! - `bandview-color` - Space and session validation

use crate::sample::SampleType;
use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during raster display and color conversion.
///
/// This enum uses [`thiserror`] for automatic [`std::error::Error`] and
/// [`std::fmt::Display`] implementations.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid construction arguments.
    ///
    /// Fails fast at construction time; a caller that materializes an
    /// invalid configuration anyway (e.g. a degenerate min == max display
    /// range) gets this instead of silently broken output.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What was wrong with the arguments.
        reason: String,
    },

    /// Display range with min == max, or non-finite bounds.
    ///
    /// The linear gray mapping degenerates when the range is empty; callers
    /// must treat the band as having no usable range instead of building a
    /// mapper from it.
    #[error("degenerate display range: min {min} max {max}")]
    DegenerateRange {
        /// Resolved minimum.
        min: f64,
        /// Resolved maximum.
        max: f64,
    },

    /// Accessor that cannot be meaningfully implemented.
    ///
    /// A wide-sample single-band pixel cannot be recovered from a packed
    /// 32-bit integer, so the packed-pixel decomposition accessors always
    /// reject rather than approximate.
    #[error("unsupported operation: {what}")]
    Unsupported {
        /// The rejected operation.
        what: &'static str,
    },

    /// Pixel coordinates are outside raster bounds.
    #[error("pixel ({x}, {y}) out of bounds for raster at ({min_x}, {min_y}) size {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds.
        x: u32,
        /// Y coordinate that was out of bounds.
        y: u32,
        /// Raster origin X.
        min_x: u32,
        /// Raster origin Y.
        min_y: u32,
        /// Raster width.
        width: u32,
        /// Raster height.
        height: u32,
    },

    /// Region extends beyond raster bounds, or is misaligned.
    #[error("region ({rx}, {ry}, {rw}x{rh}) invalid for raster at ({min_x}, {min_y}) size {width}x{height}")]
    InvalidRegion {
        /// Region X origin.
        rx: u32,
        /// Region Y origin.
        ry: u32,
        /// Region width.
        rw: u32,
        /// Region height.
        rh: u32,
        /// Raster origin X.
        min_x: u32,
        /// Raster origin Y.
        min_y: u32,
        /// Raster width.
        width: u32,
        /// Raster height.
        height: u32,
    },

    /// Component/channel count mismatch between two sides of an operation.
    #[error("component mismatch: expected {expected}, got {got}")]
    ComponentMismatch {
        /// Expected component count.
        expected: usize,
        /// Actual component count.
        got: usize,
    },

    /// Component slice shorter than the color space requires.
    #[error("component slice too short: needed {needed}, got {got}")]
    ComponentsTooShort {
        /// Required component count for the conversion direction.
        needed: usize,
        /// Provided slice length.
        got: usize,
    },

    /// Sample type mismatch between a raster and the expected type.
    #[error("sample type mismatch: expected {expected}, got {got}")]
    SampleTypeMismatch {
        /// Expected sample type.
        expected: SampleType,
        /// Actual sample type.
        got: SampleType,
    },
}
