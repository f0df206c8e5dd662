//! Sample-to-display mapping for wide single-band pixels.
//!
//! A [`DisplayColorMapper`] turns one raw numeric sample into an 8-bit gray
//! level plus an 8-bit alpha, and packs both into a 32-bit ARGB pixel. Gray
//! is a linear rescale of the display range; alpha is a binary mask that
//! makes out-of-range and no-data samples fully transparent.
//!
//! # Packed Pixels Are One-Way
//!
//! The original wide sample (say, a 32-bit float elevation) cannot be
//! recovered from a packed 32-bit ARGB value, so the decomposition
//! accessors taking a packed pixel always reject with
//! [`Error::Unsupported`] instead of silently approximating.

use bandview_core::{Error, Raster, Result, SampleType};

use crate::range::RangeSpec;

/// Immutable configuration of a display mapping.
///
/// Computed once when a raster is first opened for display and held for
/// the life of that raster's visual representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMapperConfig {
    /// Resolved display range and optional no-data sentinel.
    pub range: RangeSpec,
    /// Whether the rendered pixel carries a meaningful alpha channel.
    pub has_alpha: bool,
    /// Sample type of the band this mapping applies to.
    pub sample_type: SampleType,
}

/// Maps raw numeric samples to 8-bit gray + alpha.
#[derive(Debug, Clone, Copy)]
pub struct DisplayColorMapper {
    config: DisplayMapperConfig,
}

impl DisplayColorMapper {
    /// Builds a mapper, rejecting configurations with no usable range.
    ///
    /// # Errors
    ///
    /// [`Error::DegenerateRange`] when `min >= max` or either bound is NaN;
    /// [`Error::InvalidConfig`] when a bound is infinite. Callers that got
    /// their range from [`crate::determine_range`] should have skipped
    /// construction instead of landing here.
    pub fn new(config: DisplayMapperConfig) -> Result<Self> {
        let RangeSpec { min, max, .. } = config.range;
        if !(min < max) {
            return Err(Error::DegenerateRange { min, max });
        }
        if !min.is_finite() || !max.is_finite() {
            return Err(Error::InvalidConfig {
                reason: format!("non-finite display range {min}..{max}"),
            });
        }
        Ok(Self { config })
    }

    /// The configuration this mapper was built from.
    #[inline]
    pub const fn config(&self) -> &DisplayMapperConfig {
        &self.config
    }

    /// Lower display bound.
    #[inline]
    pub const fn min_value(&self) -> f64 {
        self.config.range.min
    }

    /// Upper display bound.
    #[inline]
    pub const fn max_value(&self) -> f64 {
        self.config.range.max
    }

    /// No-data sentinel, when configured.
    #[inline]
    pub const fn no_data_value(&self) -> Option<f64> {
        self.config.range.no_data
    }

    /// Gray level in [0, 255] for a sample.
    ///
    /// The sentinel maps to 0. Everything else rescales linearly over the
    /// display range, truncating toward zero, clamped to [0, 255]. The
    /// clamp is NaN-safe: only a value proven `>= 0` can take the upper
    /// branch, so NaN falls to the floor.
    pub fn gray(&self, value: f64) -> u8 {
        if let Some(no_data) = self.config.range.no_data {
            if value == no_data {
                return 0;
            }
        }
        let RangeSpec { min, max, .. } = self.config.range;
        let scaled = (value - min) / (max - min) * 255.0;
        if scaled >= 0.0 {
            if scaled > 255.0 {
                255
            } else {
                scaled as u8
            }
        } else {
            0
        }
    }

    /// Alpha in {0, 255} for a sample: a binary mask, not a gradient.
    ///
    /// Out-of-range samples and the sentinel are fully transparent;
    /// everything in range is fully opaque.
    pub fn alpha(&self, value: f64) -> u8 {
        let RangeSpec { min, max, no_data } = self.config.range;
        if value < min || value > max {
            return 0;
        }
        if let Some(no_data) = no_data {
            if value == no_data {
                return 0;
            }
        }
        255
    }

    /// Packed ARGB pixel: gray replicated into R, G, B with the alpha mask.
    pub fn packed_argb(&self, value: f64) -> u32 {
        let gray = self.gray(value) as u32;
        let alpha = self.alpha(value) as u32;
        (alpha << 24) | (gray << 16) | (gray << 8) | gray
    }

    /// Always rejected: a packed ARGB value cannot recover the original
    /// wide sample, so there is no gray to derive it from.
    pub fn gray_from_packed(&self, _packed: u32) -> Result<u8> {
        Err(Error::Unsupported {
            what: "gray from packed pixel of a wide-sample single-band mapping",
        })
    }

    /// Always rejected, for the same reason as
    /// [`gray_from_packed`](Self::gray_from_packed).
    pub fn alpha_from_packed(&self, _packed: u32) -> Result<u8> {
        Err(Error::Unsupported {
            what: "alpha from packed pixel of a wide-sample single-band mapping",
        })
    }

    /// Always rejected: component decomposition needs the sample array,
    /// not a packed integer.
    pub fn components_from_packed(&self, _packed: u32) -> Result<[u8; 4]> {
        Err(Error::Unsupported {
            what: "component decomposition of a packed pixel",
        })
    }

    /// Whether a sample layout is compatible with this mapping: exactly one
    /// band of exactly the configured sample type.
    pub fn is_compatible_sample_model(&self, ty: SampleType, bands: usize) -> bool {
        bands == 1 && ty == self.config.sample_type
    }

    /// Whether a raster is compatible with this mapping: one channel of
    /// exactly the configured sample type (which fixes the per-sample bit
    /// width as well).
    pub fn is_compatible_raster(&self, raster: &Raster) -> bool {
        self.is_compatible_sample_model(raster.sample_type(), raster.channels())
    }
}
