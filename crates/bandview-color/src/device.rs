//! Device-to-device raster conversion through CIE XYZ.
//!
//! A [`DeviceConverter`] is the expensive, reusable artifact of pairing two
//! device color spaces: the per-raster entry point for the integral fast
//! path. Instances are shared across conversion sessions through
//! [`crate::ConverterCache`], so the per-pixel scratch lives behind a
//! mutex and `convert` takes `&self`.
//!
//! # Alignment
//!
//! `convert` requires both rasters to be exactly co-located with the
//! requested region. Callers working with larger tiles crop aligned
//! children first and blit the result back (see the session layer).

use bandview_core::{Error, Raster, Rect, Result};
use std::sync::{Arc, Mutex};

use crate::space::SharedSpace;

#[derive(Debug, Default)]
struct Scratch {
    src_px: Vec<f32>,
    dst_px: Vec<f32>,
}

/// A reusable converter between two device color spaces.
#[derive(Debug)]
pub struct DeviceConverter {
    src_space: SharedSpace,
    dst_space: SharedSpace,
    scratch: Mutex<Scratch>,
}

impl DeviceConverter {
    /// Pairs two device spaces into a converter.
    pub fn new(src_space: SharedSpace, dst_space: SharedSpace) -> Self {
        Self {
            src_space,
            dst_space,
            scratch: Mutex::new(Scratch::default()),
        }
    }

    /// The source space handle.
    #[inline]
    pub fn src_space(&self) -> &SharedSpace {
        &self.src_space
    }

    /// The destination space handle.
    #[inline]
    pub fn dst_space(&self) -> &SharedSpace {
        &self.dst_space
    }

    /// Converts `region` of `src` into `dst` through XYZ.
    ///
    /// Integral rasters only: samples are normalized by the full unsigned
    /// range of their type, pushed through `src -> XYZ -> dst`, and
    /// rescaled into the destination type's range. Both rasters must have
    /// bounds equal to `region` and channel counts matching their space.
    ///
    /// # Errors
    ///
    /// [`Error::Unsupported`] for float rasters (the session layer owns
    /// that path), [`Error::InvalidRegion`] on misaligned bounds,
    /// [`Error::ComponentMismatch`] on channel/space width mismatch.
    pub fn convert(&self, src: &Raster, dst: &mut Raster, region: Rect) -> Result<()> {
        if src.sample_type().is_float() || dst.sample_type().is_float() {
            return Err(Error::Unsupported {
                what: "device converter on float rasters",
            });
        }
        check_aligned(src, region)?;
        check_aligned(dst, region)?;
        check_channels(src.channels(), self.src_space.num_components())?;
        check_channels(dst.channels(), self.dst_space.num_components())?;

        let s_range = src.sample_type().norm_range() as f32;
        let s_min = src.sample_type().norm_min() as f32;
        let d_range = dst.sample_type().norm_range() as f32;
        let d_min = dst.sample_type().norm_min() as f32;

        let mut guard = self
            .scratch
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let Scratch { src_px, dst_px } = &mut *guard;
        src_px.resize(src.channels(), 0.0);
        dst_px.resize(dst.channels(), 0.0);
        let mut xyz = [0.0f32; 3];

        for y in region.y..region.bottom() {
            for x in region.x..region.right() {
                src.pixel(x, y, src_px)?;
                for v in src_px.iter_mut() {
                    *v = (*v - s_min) / s_range;
                }
                self.src_space.to_xyz(src_px, &mut xyz)?;
                self.dst_space.from_xyz(&xyz, dst_px)?;
                for v in dst_px.iter_mut() {
                    // Nearest code, not truncation.
                    *v = (v.clamp(0.0, 1.0) * d_range + d_min).round();
                }
                dst.set_pixel(x, y, dst_px)?;
            }
        }
        Ok(())
    }
}

/// Cheap shared handle; the scratch mutex makes sharing sound.
pub type SharedConverter = Arc<DeviceConverter>;

fn check_aligned(raster: &Raster, region: Rect) -> Result<()> {
    let b = raster.bounds();
    if b != region {
        return Err(Error::InvalidRegion {
            rx: region.x,
            ry: region.y,
            rw: region.width,
            rh: region.height,
            min_x: b.x,
            min_y: b.y,
            width: b.width,
            height: b.height,
        });
    }
    Ok(())
}

fn check_channels(channels: usize, components: usize) -> Result<()> {
    if channels != components {
        return Err(Error::ComponentMismatch {
            expected: components,
            got: channels,
        });
    }
    Ok(())
}
