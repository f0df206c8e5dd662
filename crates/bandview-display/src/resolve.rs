//! Deciding whether a raster gets a normalized display mapping.
//!
//! This is the consumer glue that the container codec runs once per image
//! at open time: it inspects the band layout, queries the metadata tags,
//! runs range discovery, and either produces a [`DisplayMapperConfig`] or
//! leaves the raster's existing rendering behavior untouched.
//!
//! Two situations install a mapping:
//!
//! 1. **No color model yet** - an eligible single-band numeric raster gets
//!    a fresh mapping; alpha only when a no-data sentinel exists.
//! 2. **Legacy float color model** - some producers attach a float/double
//!    color model that renders such bands as garbage. When the embedding
//!    application opts in *and* a sentinel is present, the legacy model is
//!    replaced.
//!
//! Every failure along the way (ineligible type, missing sentinel where
//! required, empty scan, degenerate range) resolves to `None`, never an
//! error: not installing a mapping is a valid outcome.

use bandview_core::{Raster, SampleType};
use tracing::debug;

use crate::mapper::DisplayMapperConfig;
use crate::options::DisplayOptions;
use crate::range::determine_range;
use crate::tags::{no_data_value, range_tags, TagDirectory};

/// What kind of color model the raster already carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistingModel {
    /// No color model attached; a mapping may be installed freely.
    None,
    /// A known-degenerate legacy float/double color model that may be
    /// overwritten when [`DisplayOptions::overwrite_float_model`] is set.
    LegacyFloat,
    /// Any other color model; always left alone.
    Other,
}

/// Sample types eligible for normalized display.
///
/// Unsigned bytes are excluded: they already render directly.
fn eligible(ty: SampleType) -> bool {
    matches!(
        ty,
        SampleType::U16 | SampleType::I16 | SampleType::I32 | SampleType::F32 | SampleType::F64
    )
}

/// Resolves the display configuration for a freshly opened raster.
///
/// Returns `None` whenever normalized display does not apply; the caller
/// then keeps whatever rendering behavior already exists.
pub fn resolve_display_config(
    raster: &Raster,
    tags: &dyn TagDirectory,
    existing: ExistingModel,
    options: &DisplayOptions,
) -> Option<DisplayMapperConfig> {
    if raster.channels() != 1 {
        return None;
    }
    let ty = raster.sample_type();
    if !eligible(ty) {
        return None;
    }

    let (has_alpha, no_data) = match existing {
        ExistingModel::None => {
            let no_data = no_data_value(tags, ty);
            (no_data.is_some(), no_data)
        }
        ExistingModel::LegacyFloat => {
            if !options.overwrite_float_model {
                return None;
            }
            // Overwriting an existing model is only justified when a
            // sentinel proves the band is masked measurement data.
            let no_data = no_data_value(tags, ty)?;
            (true, Some(no_data))
        }
        ExistingModel::Other => return None,
    };

    let (tag_min, tag_max) = range_tags(tags);
    let range = determine_range(
        ty,
        no_data,
        tag_min,
        tag_max,
        options.brute_force_minmax,
        || raster.buffer().clone(),
    )?;
    if range.is_degenerate() {
        return None;
    }

    debug!(
        min = range.min,
        max = range.max,
        no_data = ?range.no_data,
        sample_type = %ty,
        "installing normalized display mapping"
    );
    Some(DisplayMapperConfig {
        range,
        has_alpha,
        sample_type: ty,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::{MemoryTagDirectory, TagValue, TAG_NO_DATA};
    use bandview_core::{Rect, SampleBuffer};

    fn raster_i16(samples: Vec<i16>) -> Raster {
        let w = samples.len() as u32;
        Raster::from_buffer(Rect::from_size(w, 1), 1, SampleBuffer::I16(samples)).unwrap()
    }

    fn nodata_dir(text: &str) -> MemoryTagDirectory {
        let mut dir = MemoryTagDirectory::new();
        dir.insert(TAG_NO_DATA, TagValue::Ascii(text.into()));
        dir
    }

    #[test]
    fn test_fresh_raster_with_sentinel() {
        let raster = raster_i16(vec![-999, 5, 80, -999, 12]);
        let options = DisplayOptions {
            brute_force_minmax: true,
            ..DisplayOptions::new()
        };
        let config = resolve_display_config(
            &raster,
            &nodata_dir("-999"),
            ExistingModel::None,
            &options,
        )
        .unwrap();
        assert_eq!(config.range.min, 5.0);
        assert_eq!(config.range.max, 80.0);
        assert_eq!(config.range.no_data, Some(-999.0));
        assert!(config.has_alpha);
        assert_eq!(config.sample_type, SampleType::I16);
    }

    #[test]
    fn test_fresh_raster_without_sentinel_has_no_alpha() {
        let raster = raster_i16(vec![1, 2, 3]);
        let config = resolve_display_config(
            &raster,
            &MemoryTagDirectory::new(),
            ExistingModel::None,
            &DisplayOptions::new(),
        )
        .unwrap();
        // Without brute force or tags, the natural range applies.
        assert_eq!(config.range.min, -32768.0);
        assert_eq!(config.range.max, 32767.0);
        assert!(!config.has_alpha);
        assert_eq!(config.range.no_data, None);
    }

    #[test]
    fn test_unsigned_short_sentinel_above_signed_max() {
        // A u16 sentinel past i16::MAX must be excluded from the scan and
        // end up transparent, not treated as an in-range opaque sample.
        let raster = Raster::from_buffer(
            Rect::from_size(4, 1),
            1,
            SampleBuffer::U16(vec![40000, 40000, 10, 20]),
        )
        .unwrap();
        let options = DisplayOptions {
            brute_force_minmax: true,
            ..DisplayOptions::new()
        };
        let config = resolve_display_config(
            &raster,
            &nodata_dir("40000"),
            ExistingModel::None,
            &options,
        )
        .unwrap();
        assert_eq!(config.range.no_data, Some(40000.0));
        assert_eq!(config.range.min, 10.0);
        assert_eq!(config.range.max, 20.0);

        let mapper = crate::mapper::DisplayColorMapper::new(config).unwrap();
        assert_eq!(mapper.alpha(40000.0), 0);
        assert_eq!(mapper.gray(40000.0), 0);
        assert_eq!(mapper.alpha(15.0), 255);
    }

    #[test]
    fn test_multi_band_left_alone() {
        let raster = Raster::new(SampleType::I16, Rect::from_size(2, 2), 3);
        assert!(resolve_display_config(
            &raster,
            &MemoryTagDirectory::new(),
            ExistingModel::None,
            &DisplayOptions::new(),
        )
        .is_none());
    }

    #[test]
    fn test_byte_band_left_alone() {
        let raster = Raster::new(SampleType::U8, Rect::from_size(4, 1), 1);
        assert!(resolve_display_config(
            &raster,
            &MemoryTagDirectory::new(),
            ExistingModel::None,
            &DisplayOptions::new(),
        )
        .is_none());
    }

    #[test]
    fn test_legacy_float_requires_opt_in_and_sentinel() {
        let raster = raster_i16(vec![-999, 5, 80]);
        let opted_in = DisplayOptions {
            overwrite_float_model: true,
            brute_force_minmax: true,
        };

        // Opted out: left alone even with a sentinel.
        assert!(resolve_display_config(
            &raster,
            &nodata_dir("-999"),
            ExistingModel::LegacyFloat,
            &DisplayOptions::new(),
        )
        .is_none());

        // Opted in but no sentinel: left alone.
        assert!(resolve_display_config(
            &raster,
            &MemoryTagDirectory::new(),
            ExistingModel::LegacyFloat,
            &opted_in,
        )
        .is_none());

        // Opted in with sentinel: overwritten, always with alpha.
        let config = resolve_display_config(
            &raster,
            &nodata_dir("-999"),
            ExistingModel::LegacyFloat,
            &opted_in,
        )
        .unwrap();
        assert!(config.has_alpha);
        assert_eq!(config.range.min, 5.0);
        assert_eq!(config.range.max, 80.0);
    }

    #[test]
    fn test_other_model_left_alone() {
        let raster = raster_i16(vec![1, 2]);
        assert!(resolve_display_config(
            &raster,
            &nodata_dir("-999"),
            ExistingModel::Other,
            &DisplayOptions {
                overwrite_float_model: true,
                brute_force_minmax: true,
            },
        )
        .is_none());
    }

    #[test]
    fn test_all_sentinel_band_gets_nothing() {
        let raster = raster_i16(vec![-999, -999]);
        let options = DisplayOptions {
            brute_force_minmax: true,
            ..DisplayOptions::new()
        };
        assert!(resolve_display_config(
            &raster,
            &nodata_dir("-999"),
            ExistingModel::None,
            &options,
        )
        .is_none());
    }

    #[test]
    fn test_constant_band_is_degenerate() {
        let raster = raster_i16(vec![7, 7, 7, -999]);
        let options = DisplayOptions {
            brute_force_minmax: true,
            ..DisplayOptions::new()
        };
        assert!(resolve_display_config(
            &raster,
            &nodata_dir("-999"),
            ExistingModel::None,
            &options,
        )
        .is_none());
    }
}
