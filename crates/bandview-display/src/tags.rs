//! Metadata tag lookup for range enrichment.
//!
//! The container layer (TIFF directory parsing and friends) stays outside
//! this crate; range discovery only needs three numeric tags, requested by
//! integer code through the [`TagDirectory`] seam:
//!
//! - [`TAG_MIN_SAMPLE_VALUE`] / [`TAG_MAX_SAMPLE_VALUE`] - Explicit display
//!   range written by the producer
//! - [`TAG_NO_DATA`] - GDAL-style no-data sentinel
//!
//! # Error Policy
//!
//! This is a best-effort enrichment path. Absent tags, malformed text,
//! wrong field kinds - everything degrades to `None` and range discovery
//! proceeds to the next fallback tier. Nothing here returns a hard error.
//!
//! # Value Narrowing
//!
//! Tag values arrive either as text or as 16-bit codes. Text is parsed as
//! f64 and then narrowed through the requested sample type (saturating to
//! i32, then wrapping to the 16-bit domain of that type), so a producer
//! that wrote "-32768.7" for a signed short band yields the sentinel the
//! samples actually contain. The narrowed value stays in the band's native
//! domain: an unsigned short band keeps "40000" as 40000, matching the
//! comparison domain of the brute-force scan. Binary 16-bit codes are
//! reinterpreted as signed.

use bandview_core::SampleType;
use std::collections::HashMap;

/// Tag code of the minimum sample value ("MinSampleValue", TIFF 280).
pub const TAG_MIN_SAMPLE_VALUE: u16 = 280;

/// Tag code of the maximum sample value ("MaxSampleValue", TIFF 281).
pub const TAG_MAX_SAMPLE_VALUE: u16 = 281;

/// Tag code of the no-data sentinel (GDAL "GDAL_NODATA", TIFF 42113).
pub const TAG_NO_DATA: u16 = 42113;

/// A metadata tag value as handed over by the container layer.
///
/// Only the kinds that can carry a numeric range value are represented;
/// anything else is simply not offered through the seam.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    /// Text field, e.g. `"-9999"` or `"3.25"`.
    Ascii(String),
    /// Unsigned 16-bit codes (covers both the signed and unsigned short
    /// field kinds; sign is reapplied during interpretation).
    Shorts(Vec<u16>),
}

/// Metadata lookup seam implemented by the container layer.
pub trait TagDirectory {
    /// Whether a tag with this code is present. Absence is not an error.
    fn has_tag(&self, code: u16) -> bool;

    /// The value of a tag, or `None` when absent.
    fn tag(&self, code: u16) -> Option<TagValue>;
}

/// Simple in-memory [`TagDirectory`] for tests and embedders without a
/// container format.
#[derive(Debug, Clone, Default)]
pub struct MemoryTagDirectory {
    tags: HashMap<u16, TagValue>,
}

impl MemoryTagDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a tag.
    pub fn insert(&mut self, code: u16, value: TagValue) {
        self.tags.insert(code, value);
    }
}

impl TagDirectory for MemoryTagDirectory {
    fn has_tag(&self, code: u16) -> bool {
        self.tags.contains_key(&code)
    }

    fn tag(&self, code: u16) -> Option<TagValue> {
        self.tags.get(&code).cloned()
    }
}

/// Interprets a tag as an f64 in the domain of `ty`.
///
/// Returns `None` for absent tags and for every parse failure; this path
/// never produces a hard error.
pub fn tag_as_f64(dir: &dyn TagDirectory, code: u16, ty: SampleType) -> Option<f64> {
    if !dir.has_tag(code) {
        return None;
    }
    match dir.tag(code)? {
        TagValue::Ascii(s) => {
            let text = s.trim();
            match ty {
                SampleType::I16 => {
                    // f64 -> i32 saturates, i32 -> i16 wraps; short-typed
                    // bands store the wrapped bit pattern.
                    let parsed: f64 = text.parse().ok()?;
                    Some(((parsed as i32) as i16) as f64)
                }
                SampleType::U16 => {
                    // Same wrap, but into the unsigned domain the samples
                    // (and the brute-force scan) actually compare in.
                    let parsed: f64 = text.parse().ok()?;
                    Some(((parsed as i32) as u16) as f64)
                }
                SampleType::I32 => {
                    let parsed: f64 = text.parse().ok()?;
                    Some((parsed as i32) as f64)
                }
                SampleType::F32 => {
                    let parsed: f32 = text.parse().ok()?;
                    Some(parsed as f64)
                }
                _ => text.parse().ok(),
            }
        }
        TagValue::Shorts(values) => {
            let raw = *values.first()?;
            Some((raw as i16) as f64)
        }
    }
}

/// The no-data sentinel for a band of type `ty`, when present and parseable.
pub fn no_data_value(dir: &dyn TagDirectory, ty: SampleType) -> Option<f64> {
    tag_as_f64(dir, TAG_NO_DATA, ty)
}

/// The explicit (min, max) sample-value tags.
///
/// The range tags are specified as 16-bit quantities regardless of the
/// band's sample type, so both are interpreted in the signed-short domain.
pub fn range_tags(dir: &dyn TagDirectory) -> (Option<f64>, Option<f64>) {
    (
        tag_as_f64(dir, TAG_MIN_SAMPLE_VALUE, SampleType::I16),
        tag_as_f64(dir, TAG_MAX_SAMPLE_VALUE, SampleType::I16),
    )
}
