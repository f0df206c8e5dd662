//! # bandview-core
//!
//! Core types for numeric raster display and color bridging.
//!
//! This crate provides the foundational types used throughout the bandview
//! workspace:
//!
//! - [`SampleType`] - Runtime numeric sample kind with its natural-range table
//! - [`SampleBuffer`] - Typed flat sample storage with scan/remap operations
//! - [`Raster`] - Origin-carrying rectangular sample block
//! - [`Rect`] - Region definitions for tiled processing
//! - [`Error`], [`Result`] - Unified error handling
//!
//! ## Design Philosophy
//!
//! Raster contents are dynamically typed: the same display and conversion
//! code must handle unsigned bytes, signed shorts, and double-precision
//! elevation grids decided at decode time. Rather than branching on the
//! sample kind at every call site, all per-type behavior (natural range,
//! signed/unsigned remapping, brute-force scanning) is looked up through the
//! [`SampleType`] table and the [`SampleBuffer`] enum.
//!
//! ## Crate Structure
//!
//! This crate is the foundation of bandview and has no internal dependencies.
//! The other bandview crates depend on it:
//!
//! ```text
//! bandview-core (this crate)
//!    ^
//!    |
//!    +-- bandview-display (range statistics, gray+alpha mapping)
//!    +-- bandview-color   (color space bridging)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;
pub mod raster;
pub mod rect;
pub mod sample;

// Re-exports for convenience
pub use buffer::*;
pub use error::*;
pub use raster::*;
pub use rect::*;
pub use sample::*;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use bandview_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::SampleBuffer;
    pub use crate::error::{Error, Result};
    pub use crate::raster::Raster;
    pub use crate::rect::Rect;
    pub use crate::sample::SampleType;
}
