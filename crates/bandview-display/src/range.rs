//! Display-range discovery with tiered fallback.
//!
//! A single-band numeric raster needs a (min, max) range before it can be
//! normalized for display. Three tiers, cheapest first:
//!
//! 1. **Explicit metadata** - the container's min/max sample-value tags,
//!    taken verbatim. Metadata beats computed statistics.
//! 2. **Brute-force scan** (opt-in) - observed min/max over every sample,
//!    excluding the no-data sentinel by exact equality.
//! 3. **Natural range** - the sample type's full representable range.
//!
//! A scan that finds no usable sample does not fall through to the natural
//! range: a raster that is all sentinel (or empty) has no displayable data,
//! and pretending the full type range applies would render noise as
//! structure. The whole discovery yields `None` instead and the consumer
//! keeps whatever rendering behavior already applied.
//!
//! # Used By
//!
//! - [`crate::resolve_display_config`] - Once per raster at open time

use bandview_core::{SampleBuffer, SampleType};
use tracing::debug;

/// A resolved display range with an optional no-data sentinel.
///
/// # Invariants
///
/// `min <= max` when both are finite. A spec with `min == max` carries no
/// usable range; callers must reject it instead of building a mapper
/// (see [`crate::DisplayColorMapper::new`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeSpec {
    /// Lower display bound.
    pub min: f64,
    /// Upper display bound.
    pub max: f64,
    /// Sentinel value meaning "no valid measurement", rendered transparent.
    pub no_data: Option<f64>,
}

impl RangeSpec {
    /// Whether the range admits no linear mapping (`min >= max`, or either
    /// bound is NaN).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.min < self.max)
    }
}

/// Determines the display range for one band.
///
/// `samples` is invoked at most once, and only when `brute_force` is set
/// and the explicit tags did not already decide the range; it must yield
/// the band's full sample data in its native type.
///
/// Returns `None` when a brute-force scan finds no sample differing from
/// the sentinel (including an empty raster) - "no usable range" - and the
/// caller must then skip normalized display for this band.
pub fn determine_range(
    sample_type: SampleType,
    no_data: Option<f64>,
    tag_min: Option<f64>,
    tag_max: Option<f64>,
    brute_force: bool,
    samples: impl FnOnce() -> SampleBuffer,
) -> Option<RangeSpec> {
    if let (Some(min), Some(max)) = (tag_min, tag_max) {
        debug!(min, max, "display range from metadata tags");
        return Some(RangeSpec { min, max, no_data });
    }

    if brute_force {
        // A sentinel of NaN excludes nothing: NaN compares unequal to
        // every sample.
        let sentinel = no_data.unwrap_or(f64::NAN);
        let scanned = samples().min_max_excluding(sentinel);
        debug!(?scanned, sentinel, "display range from brute-force scan");
        let (min, max) = scanned?;
        return Some(RangeSpec { min, max, no_data });
    }

    Some(RangeSpec {
        min: sample_type.natural_min(),
        max: sample_type.natural_max(),
        no_data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_samples() -> SampleBuffer {
        panic!("sample provider must not be called for this tier");
    }

    #[test]
    fn test_metadata_takes_precedence() {
        // Tags win even over an enabled brute-force scan; the provider is
        // never touched.
        let range = determine_range(
            SampleType::I16,
            Some(-1.0),
            Some(3.0),
            Some(97.0),
            true,
            no_samples,
        )
        .unwrap();
        assert_eq!(range.min, 3.0);
        assert_eq!(range.max, 97.0);
        assert_eq!(range.no_data, Some(-1.0));
    }

    #[test]
    fn test_one_tag_is_not_enough() {
        // min without max falls through to the natural range.
        let range = determine_range(SampleType::I16, None, Some(3.0), None, false, no_samples)
            .unwrap();
        assert_eq!(range.min, -32768.0);
        assert_eq!(range.max, 32767.0);
    }

    #[test]
    fn test_brute_force_scan() {
        let range = determine_range(SampleType::I32, Some(-999.0), None, None, true, || {
            SampleBuffer::I32(vec![-999, 14, -3, 78, -999])
        })
        .unwrap();
        assert_eq!(range.min, -3.0);
        assert_eq!(range.max, 78.0);
    }

    #[test]
    fn test_brute_force_without_sentinel_scans_everything() {
        let range = determine_range(SampleType::F32, None, None, None, true, || {
            SampleBuffer::F32(vec![-2.5, 0.0, 11.0])
        })
        .unwrap();
        assert_eq!(range.min, -2.5);
        assert_eq!(range.max, 11.0);
    }

    #[test]
    fn test_all_sentinel_yields_no_range() {
        let range = determine_range(SampleType::F64, Some(-1.0), None, None, true, || {
            SampleBuffer::F64(vec![-1.0, -1.0])
        });
        assert!(range.is_none());

        let empty = determine_range(SampleType::U16, Some(0.0), None, None, true, || {
            SampleBuffer::U16(vec![])
        });
        assert!(empty.is_none());
    }

    #[test]
    fn test_natural_range_fallback() {
        let range = determine_range(SampleType::F32, None, None, None, false, no_samples)
            .unwrap();
        assert_eq!(range.min, -f32::MAX as f64);
        assert_eq!(range.max, f32::MAX as f64);

        let range = determine_range(SampleType::U16, None, None, None, false, no_samples)
            .unwrap();
        assert_eq!(range.min, 0.0);
        assert_eq!(range.max, 65535.0);
    }

    #[test]
    fn test_degenerate_detection() {
        assert!(RangeSpec { min: 5.0, max: 5.0, no_data: None }.is_degenerate());
        assert!(RangeSpec { min: 6.0, max: 5.0, no_data: None }.is_degenerate());
        assert!(RangeSpec { min: f64::NAN, max: 5.0, no_data: None }.is_degenerate());
        assert!(!RangeSpec { min: 0.0, max: 1.0, no_data: None }.is_degenerate());
    }
}
