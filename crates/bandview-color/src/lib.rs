//! # bandview-color
//!
//! Color space bridging for tiled raster conversion.
//!
//! Conversion between two arbitrary color spaces is not one algorithm: the
//! path depends on whether each endpoint is a standard device space or a
//! perceptual space that only knows how to reach device RGB. This crate
//! classifies an endpoint pair once and runs the right plan per raster:
//!
//! - [`ColorSpace`] - Runtime seam over device and perceptual spaces, with
//!   [`SrgbSpace`] and [`GraySpace`] shipped
//! - [`PseudoColorSpace`] - Structural stand-in for bands with no color
//!   interpretation
//! - [`ConvertSession`] - Six-case conversion plan over a device RGB bridge
//! - [`DeviceConverter`] / [`ConverterCache`] - Deduplicated integral
//!   fast-path converters, weakly held
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use bandview_core::{Raster, Rect, SampleType};
//! use bandview_color::{ConvertSession, ConvertSide, ConverterCache, GraySpace, SrgbSpace};
//!
//! let cache = ConverterCache::new();
//! let session = ConvertSession::new(
//!     ConvertSide::new(Arc::new(SrgbSpace), SampleType::U8),
//!     ConvertSide::new(Arc::new(GraySpace), SampleType::U8),
//!     &cache,
//! );
//!
//! let region = Rect::from_size(1, 1);
//! let mut src = Raster::new(SampleType::U8, region, 3);
//! src.set_pixel(0, 0, &[255.0, 255.0, 255.0]).unwrap();
//! let mut dst = Raster::new(SampleType::U8, region, 1);
//! session.convert(&src, &mut dst, region).unwrap();
//! assert_eq!(dst.sample(0, 0, 0).unwrap(), 255.0);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod bridge;
pub mod cache;
pub mod device;
pub mod pseudo;
pub mod space;

pub use bridge::{ConversionCase, ConvertSession, ConvertSide, PixelDescription};
pub use cache::{CacheStats, ConverterCache};
pub use device::{DeviceConverter, SharedConverter};
pub use pseudo::PseudoColorSpace;
pub use space::{ColorSpace, GraySpace, SharedSpace, SpaceId, SpaceKind, SpaceType, SrgbSpace};
