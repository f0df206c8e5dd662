//! # bandview-display
//!
//! Statistical display normalization for single-band numeric rasters.
//!
//! Scientific and geospatial imagery arrives as raw measurements (elevation,
//! temperature, radar return) in signed or floating-point sample types that
//! no display pipeline can show directly. This crate determines a usable
//! display range for such a band and maps each sample to an 8-bit gray level
//! plus an 8-bit alpha mask:
//!
//! - [`determine_range`] - Three-tier range discovery: explicit metadata,
//!   optional brute-force scan, natural type range
//! - [`TagDirectory`] - Seam to the container's metadata tags (min/max
//!   sample value, no-data sentinel)
//! - [`DisplayColorMapper`] - Sample -> gray/alpha/packed-ARGB mapping
//! - [`resolve_display_config`] - Consumer glue deciding whether a raster
//!   gets a normalized display mapping at all
//!
//! # Example
//!
//! ```rust
//! use bandview_core::SampleType;
//! use bandview_display::{DisplayColorMapper, DisplayMapperConfig, RangeSpec};
//!
//! let config = DisplayMapperConfig {
//!     range: RangeSpec { min: 0.0, max: 100.0, no_data: Some(-1.0) },
//!     has_alpha: true,
//!     sample_type: SampleType::F32,
//! };
//! let mapper = DisplayColorMapper::new(config).unwrap();
//! assert_eq!(mapper.gray(50.0), 127);
//! assert_eq!(mapper.alpha(-1.0), 0);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod mapper;
pub mod options;
pub mod range;
pub mod resolve;
pub mod tags;

pub use mapper::{DisplayColorMapper, DisplayMapperConfig};
pub use options::DisplayOptions;
pub use range::{determine_range, RangeSpec};
pub use resolve::{resolve_display_config, ExistingModel};
pub use tags::{
    no_data_value, range_tags, tag_as_f64, MemoryTagDirectory, TagDirectory, TagValue,
    TAG_MAX_SAMPLE_VALUE, TAG_MIN_SAMPLE_VALUE, TAG_NO_DATA,
};
