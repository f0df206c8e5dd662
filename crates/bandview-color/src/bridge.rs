//! Six-case conversion sessions between arbitrary color space pairs.
//!
//! Device-to-device conversion is cheap and well supported; everything
//! involving a perceptual space must detour through device RGB. A
//! [`ConvertSession`] classifies its (source, destination) pair once into
//! one of six [`ConversionCase`]s and reuses that plan for every raster it
//! converts:
//!
//! 1. Both perceptual: src -> RGB -> dst, two perceptual legs over an
//!    intermediate bridge raster.
//! 2. Src perceptual, dst device non-RGB: perceptual leg to the bridge,
//!    then a device leg to the destination.
//! 3. Src perceptual, dst device RGB: single perceptual leg straight into
//!    the destination.
//! 4. Src device non-RGB, dst perceptual: device leg to the bridge, then a
//!    perceptual leg.
//! 5. Src device RGB, dst perceptual: single perceptual leg.
//! 6. Both device: single device leg.
//!
//! # The Bridge
//!
//! The intermediate representation is always device RGB, carried at the
//! *wider* of the two endpoint sample types so neither side loses
//! precision crossing it.
//!
//! # Signed Samples
//!
//! Perceptual legs reason in unsigned sample space. Signed integer rasters
//! are remapped whole to their unsigned working representation before a
//! perceptual leg and shifted back afterward, so ordering and spacing of
//! values survive the trip.

use bandview_core::{Error, Raster, Rect, Result, SampleType};
use std::sync::Arc;
use tracing::debug;

use crate::cache::ConverterCache;
use crate::device::SharedConverter;
use crate::space::{SharedSpace, SpaceKind, SrgbSpace};

/// How one side of a conversion stores its pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelDescription {
    /// Per-component bit widths. Uniform for all shipped layouts.
    pub component_sizes: Vec<u32>,
    /// Sample type the raster carries its components in.
    pub data_type: SampleType,
    /// Kind of the side's color space.
    pub kind: SpaceKind,
    /// Number of components per pixel.
    pub num_components: usize,
}

impl PixelDescription {
    fn from_space(space: &SharedSpace, data_type: SampleType) -> Self {
        let num_components = space.num_components();
        Self {
            component_sizes: vec![data_type.bits(); num_components],
            data_type,
            kind: space.kind(),
            num_components,
        }
    }
}

/// One endpoint of a session: a color space plus its pixel layout.
#[derive(Debug, Clone)]
pub struct ConvertSide {
    /// The color space interpreting the pixels.
    pub space: SharedSpace,
    /// How those pixels are stored.
    pub desc: PixelDescription,
}

impl ConvertSide {
    /// Pairs a space with the sample type its rasters use.
    pub fn new(space: SharedSpace, data_type: SampleType) -> Self {
        let desc = PixelDescription::from_space(&space, data_type);
        Self { space, desc }
    }
}

/// The conversion plan, decided once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionCase {
    /// Perceptual -> RGB bridge -> perceptual.
    BothPerceptual,
    /// Perceptual -> RGB bridge -> device leg to a non-RGB device space.
    SrcPerceptualToNonRgb,
    /// Perceptual -> device RGB in one leg.
    SrcPerceptualToRgb,
    /// Device leg from a non-RGB device space -> RGB bridge -> perceptual.
    NonRgbToDstPerceptual,
    /// Device RGB -> perceptual in one leg.
    RgbToDstPerceptual,
    /// Device -> device in one leg.
    NeitherPerceptual,
}

/// A classified, reusable conversion between two color space endpoints.
#[derive(Debug)]
pub struct ConvertSession {
    src: ConvertSide,
    dst: ConvertSide,
    bridge: ConvertSide,
    case: ConversionCase,
    converter: Option<SharedConverter>,
}

impl ConvertSession {
    /// Classifies the endpoint pair and pre-fetches the device converter
    /// the plan needs (if any) from `cache`.
    pub fn new(src: ConvertSide, dst: ConvertSide, cache: &ConverterCache) -> Self {
        let case = match (src.desc.kind, dst.desc.kind) {
            (SpaceKind::Perceptual, SpaceKind::Perceptual) => ConversionCase::BothPerceptual,
            (SpaceKind::Perceptual, SpaceKind::Device) => {
                if dst.space.is_device_rgb() {
                    ConversionCase::SrcPerceptualToRgb
                } else {
                    ConversionCase::SrcPerceptualToNonRgb
                }
            }
            (SpaceKind::Device, SpaceKind::Perceptual) => {
                if src.space.is_device_rgb() {
                    ConversionCase::RgbToDstPerceptual
                } else {
                    ConversionCase::NonRgbToDstPerceptual
                }
            }
            (SpaceKind::Device, SpaceKind::Device) => ConversionCase::NeitherPerceptual,
        };

        let bridge_space: SharedSpace = Arc::new(SrgbSpace);
        let bridge_type = src.desc.data_type.wider(dst.desc.data_type);
        let bridge = ConvertSide::new(bridge_space, bridge_type);

        let converter = match case {
            ConversionCase::SrcPerceptualToNonRgb => {
                Some(cache.get_or_build(&bridge.space, &dst.space))
            }
            ConversionCase::NonRgbToDstPerceptual => {
                Some(cache.get_or_build(&src.space, &bridge.space))
            }
            ConversionCase::NeitherPerceptual => Some(cache.get_or_build(&src.space, &dst.space)),
            _ => None,
        };

        debug!(
            ?case,
            src_type = %src.desc.data_type,
            dst_type = %dst.desc.data_type,
            bridge_type = %bridge_type,
            "classified conversion session"
        );
        Self {
            src,
            dst,
            bridge,
            case,
            converter,
        }
    }

    /// The plan this session was classified into.
    #[inline]
    pub const fn case(&self) -> ConversionCase {
        self.case
    }

    /// Source endpoint.
    #[inline]
    pub const fn src(&self) -> &ConvertSide {
        &self.src
    }

    /// Destination endpoint.
    #[inline]
    pub const fn dst(&self) -> &ConvertSide {
        &self.dst
    }

    /// Converts `region` of `src` into `dst` following the session plan.
    ///
    /// Both rasters must contain `region`, match their endpoint's channel
    /// count and sample type, and `region` must be non-empty. `dst` is
    /// only written inside `region`.
    pub fn convert(&self, src: &Raster, dst: &mut Raster, region: Rect) -> Result<()> {
        if region.is_empty() || !src.bounds().contains_rect(&region) {
            return Err(region_error(region, src.bounds()));
        }
        if !dst.bounds().contains_rect(&region) {
            return Err(region_error(region, dst.bounds()));
        }
        check_side(src, &self.src)?;
        check_side(dst, &self.dst)?;

        // Legs want a region-aligned source.
        let cropped;
        let src_ref = if src.bounds() == region {
            src
        } else {
            cropped = src.crop(region)?;
            &cropped
        };

        match self.case {
            ConversionCase::BothPerceptual => {
                let temp = self.perceptual_to_rgb(src_ref, &self.src, &self.bridge, region)?;
                let out = self.rgb_to_perceptual(&temp, &self.dst, region)?;
                dst.copy_from(&out)
            }
            ConversionCase::SrcPerceptualToRgb => {
                let out = self.perceptual_to_rgb(src_ref, &self.src, &self.dst, region)?;
                dst.copy_from(&out)
            }
            ConversionCase::SrcPerceptualToNonRgb => {
                let temp = self.perceptual_to_rgb(src_ref, &self.src, &self.bridge, region)?;
                self.device_leg(&temp, &self.bridge, dst, &self.dst, region)
            }
            ConversionCase::RgbToDstPerceptual => {
                let out = self.rgb_to_perceptual(src_ref, &self.dst, region)?;
                dst.copy_from(&out)
            }
            ConversionCase::NonRgbToDstPerceptual => {
                let mut temp = Raster::new(self.bridge.desc.data_type, region, 3);
                self.device_leg(src_ref, &self.src, &mut temp, &self.bridge, region)?;
                let out = self.rgb_to_perceptual(&temp, &self.dst, region)?;
                dst.copy_from(&out)
            }
            ConversionCase::NeitherPerceptual => {
                self.device_leg(src_ref, &self.src, dst, &self.dst, region)
            }
        }
    }

    /// Perceptual leg: src space -> device RGB raster of `dst_side`'s type.
    ///
    /// `src` must be region-aligned. Works in unsigned sample space; the
    /// returned raster already carries `dst_side`'s native signedness.
    fn perceptual_to_rgb(
        &self,
        src: &Raster,
        src_side: &ConvertSide,
        dst_side: &ConvertSide,
        region: Rect,
    ) -> Result<Raster> {
        let unsigned = src.to_unsigned_repr();
        let s_range = unsigned.sample_type().norm_range() as f32;
        let d_unsigned = dst_side.desc.data_type.unsigned_repr();
        let d_range = d_unsigned.norm_range() as f32;

        let mut out = Raster::new(d_unsigned, region, 3);
        let mut px = vec![0.0f32; src_side.desc.num_components];
        let mut rgb = [0.0f32; 3];
        for y in region.y..region.bottom() {
            for x in region.x..region.right() {
                unsigned.pixel(x, y, &mut px)?;
                for v in px.iter_mut() {
                    *v /= s_range;
                }
                src_side.space.to_rgb(&px, &mut rgb)?;
                for v in rgb.iter_mut() {
                    *v *= d_range;
                    if d_unsigned.is_integer() {
                        *v = v.round();
                    }
                }
                out.set_pixel(x, y, &rgb)?;
            }
        }
        Ok(out.to_signed_repr(dst_side.desc.data_type))
    }

    /// Perceptual leg: device RGB raster -> dst space raster of
    /// `dst_side`'s type. The mirror of
    /// [`perceptual_to_rgb`](Self::perceptual_to_rgb).
    fn rgb_to_perceptual(
        &self,
        src: &Raster,
        dst_side: &ConvertSide,
        region: Rect,
    ) -> Result<Raster> {
        let unsigned = src.to_unsigned_repr();
        let s_range = unsigned.sample_type().norm_range() as f32;
        let d_unsigned = dst_side.desc.data_type.unsigned_repr();
        let d_range = d_unsigned.norm_range() as f32;

        let mut out = Raster::new(d_unsigned, region, dst_side.desc.num_components);
        let mut rgb_px = [0.0f32; 3];
        let mut dst_px = vec![0.0f32; dst_side.desc.num_components];
        for y in region.y..region.bottom() {
            for x in region.x..region.right() {
                unsigned.pixel(x, y, &mut rgb_px)?;
                for v in rgb_px.iter_mut() {
                    *v /= s_range;
                }
                dst_side.space.from_rgb(&rgb_px, &mut dst_px)?;
                for v in dst_px.iter_mut() {
                    *v *= d_range;
                    if d_unsigned.is_integer() {
                        *v = v.round();
                    }
                }
                out.set_pixel(x, y, &dst_px)?;
            }
        }
        Ok(out.to_signed_repr(dst_side.desc.data_type))
    }

    /// Device leg: integral pairs go through the cached converter on
    /// region-aligned children; any float side takes the per-pixel XYZ
    /// path, normalizing by type range and rescaling every destination
    /// component.
    fn device_leg(
        &self,
        src: &Raster,
        src_side: &ConvertSide,
        dst: &mut Raster,
        dst_side: &ConvertSide,
        region: Rect,
    ) -> Result<()> {
        if src.sample_type().is_integer() && dst.sample_type().is_integer() {
            let converter = self.converter.as_ref().ok_or_else(|| Error::InvalidConfig {
                reason: "device leg reached without a converter".into(),
            })?;
            let mut child = dst.crop(region)?;
            converter.convert(src, &mut child, region)?;
            return dst.copy_from(&child);
        }

        let s_min = src.sample_type().norm_min() as f32;
        let s_range = src.sample_type().norm_range() as f32;
        let d_min = dst.sample_type().norm_min() as f32;
        let d_range = dst.sample_type().norm_range() as f32;

        let mut src_px = vec![0.0f32; src_side.desc.num_components];
        let mut dst_px = vec![0.0f32; dst_side.desc.num_components];
        let mut xyz = [0.0f32; 3];
        for y in region.y..region.bottom() {
            for x in region.x..region.right() {
                src.pixel(x, y, &mut src_px)?;
                for v in src_px.iter_mut() {
                    *v = (*v - s_min) / s_range;
                }
                src_side.space.to_xyz(&src_px, &mut xyz)?;
                dst_side.space.from_xyz(&xyz, &mut dst_px)?;
                for v in dst_px.iter_mut() {
                    *v = *v * d_range + d_min;
                    if dst.sample_type().is_integer() {
                        *v = v.round();
                    }
                }
                dst.set_pixel(x, y, &dst_px)?;
            }
        }
        Ok(())
    }
}

fn region_error(region: Rect, bounds: Rect) -> Error {
    Error::InvalidRegion {
        rx: region.x,
        ry: region.y,
        rw: region.width,
        rh: region.height,
        min_x: bounds.x,
        min_y: bounds.y,
        width: bounds.width,
        height: bounds.height,
    }
}

fn check_side(raster: &Raster, side: &ConvertSide) -> Result<()> {
    if raster.channels() != side.desc.num_components {
        return Err(Error::ComponentMismatch {
            expected: side.desc.num_components,
            got: raster.channels(),
        });
    }
    if raster.sample_type() != side.desc.data_type {
        return Err(Error::SampleTypeMismatch {
            expected: side.desc.data_type,
            got: raster.sample_type(),
        });
    }
    Ok(())
}
