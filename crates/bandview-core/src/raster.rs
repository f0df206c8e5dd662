//! Origin-carrying rectangular sample blocks.
//!
//! A [`Raster`] is a materialized rectangle of samples: an origin in the
//! absolute coordinate space of the image, dimensions, a channel count, and
//! an interleaved [`SampleBuffer`]. The tile scheduler that drives this core
//! hands each operation a fully materialized source raster and a destination
//! raster to mutate over a [`Rect`].
//!
//! # Memory Layout
//!
//! Samples are stored row-major, channels interleaved:
//!
//! ```text
//! [c0 c1 .. cN c0 c1 .. cN ...]  <- Row 0
//! [c0 c1 .. cN c0 c1 .. cN ...]  <- Row 1
//! ```
//!
//! # Coordinates
//!
//! All pixel accessors take *absolute* coordinates; the raster's origin is
//! subtracted internally. Cropping preserves absolute coordinates, so a
//! cropped child of a tile still answers for the same (x, y) as its parent.
//!
//! # Usage
//!
//! ```rust
//! use bandview_core::{Raster, Rect, SampleType};
//!
//! let mut tile = Raster::new(SampleType::F32, Rect::new(64, 64, 32, 32), 3);
//! tile.set_pixel(70, 70, &[0.5, 0.25, 1.0]).unwrap();
//!
//! let mut px = [0.0f32; 3];
//! tile.pixel(70, 70, &mut px).unwrap();
//! assert_eq!(px, [0.5, 0.25, 1.0]);
//! ```
//!
//! # Used By
//!
//! - `bandview-display` - Range discovery, compatibility predicates
//! - `bandview-color` - All conversion legs

use crate::buffer::SampleBuffer;
use crate::error::{Error, Result};
use crate::rect::Rect;
use crate::sample::SampleType;

/// A rectangular block of interleaved samples with an absolute origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    bounds: Rect,
    channels: usize,
    data: SampleBuffer,
}

impl Raster {
    /// Creates a zero-filled raster.
    ///
    /// # Panics
    ///
    /// Panics if `channels` is zero.
    pub fn new(ty: SampleType, bounds: Rect, channels: usize) -> Self {
        assert!(channels > 0, "raster needs at least one channel");
        let len = bounds.area() as usize * channels;
        Self {
            bounds,
            channels,
            data: SampleBuffer::zeroed(ty, len),
        }
    }

    /// Wraps an existing buffer.
    ///
    /// The buffer length must be exactly `bounds.area() * channels`.
    pub fn from_buffer(bounds: Rect, channels: usize, data: SampleBuffer) -> Result<Self> {
        let expected = bounds.area() as usize * channels;
        if channels == 0 || data.len() != expected {
            return Err(Error::InvalidConfig {
                reason: format!(
                    "buffer of {} samples does not cover {} with {} channels",
                    data.len(),
                    bounds,
                    channels
                ),
            });
        }
        Ok(Self {
            bounds,
            channels,
            data,
        })
    }

    /// Bounds in absolute coordinates.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Width in pixels.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.bounds.width
    }

    /// Height in pixels.
    #[inline]
    pub const fn height(&self) -> u32 {
        self.bounds.height
    }

    /// Number of interleaved channels.
    #[inline]
    pub const fn channels(&self) -> usize {
        self.channels
    }

    /// Sample type of the backing buffer.
    #[inline]
    pub const fn sample_type(&self) -> SampleType {
        self.data.sample_type()
    }

    /// Borrow of the backing buffer.
    #[inline]
    pub const fn buffer(&self) -> &SampleBuffer {
        &self.data
    }

    /// Flat index of (x, y, channel), bounds-checked.
    fn index(&self, x: u32, y: u32, channel: usize) -> Result<usize> {
        if !self.bounds.contains(x, y) || channel >= self.channels {
            return Err(Error::OutOfBounds {
                x,
                y,
                min_x: self.bounds.x,
                min_y: self.bounds.y,
                width: self.bounds.width,
                height: self.bounds.height,
            });
        }
        let row = (y - self.bounds.y) as usize;
        let col = (x - self.bounds.x) as usize;
        Ok((row * self.bounds.width as usize + col) * self.channels + channel)
    }

    /// Reads one sample as f64.
    #[inline]
    pub fn sample(&self, x: u32, y: u32, channel: usize) -> Result<f64> {
        Ok(self.data.get(self.index(x, y, channel)?))
    }

    /// Writes one sample from an f64 value.
    #[inline]
    pub fn set_sample(&mut self, x: u32, y: u32, channel: usize, v: f64) -> Result<()> {
        let i = self.index(x, y, channel)?;
        self.data.set(i, v);
        Ok(())
    }

    /// Reads all channels of a pixel into `out` as f32.
    ///
    /// `out` must hold at least [`channels`](Self::channels) values.
    pub fn pixel(&self, x: u32, y: u32, out: &mut [f32]) -> Result<()> {
        if out.len() < self.channels {
            return Err(Error::ComponentMismatch {
                expected: self.channels,
                got: out.len(),
            });
        }
        let base = self.index(x, y, 0)?;
        for (c, slot) in out.iter_mut().enumerate().take(self.channels) {
            *slot = self.data.get(base + c) as f32;
        }
        Ok(())
    }

    /// Writes all channels of a pixel from f32 values.
    pub fn set_pixel(&mut self, x: u32, y: u32, px: &[f32]) -> Result<()> {
        if px.len() < self.channels {
            return Err(Error::ComponentMismatch {
                expected: self.channels,
                got: px.len(),
            });
        }
        let base = self.index(x, y, 0)?;
        for (c, &v) in px.iter().enumerate().take(self.channels) {
            self.data.set(base + c, v as f64);
        }
        Ok(())
    }

    /// Copies out an aligned child raster covering `region`.
    ///
    /// The child keeps absolute coordinates: its origin is `region`'s
    /// origin, and `child.sample(x, y, c)` answers the same as the parent
    /// for every (x, y) inside the region. Converters that require raster
    /// and rectangle to be co-located are handed crops.
    pub fn crop(&self, region: Rect) -> Result<Raster> {
        if !self.bounds.contains_rect(&region) || region.is_empty() {
            return Err(self.region_error(region));
        }
        let mut out = Raster::new(self.sample_type(), region, self.channels);
        for y in region.y..region.bottom() {
            for x in region.x..region.right() {
                // Indices are in bounds by construction.
                let src = self.index(x, y, 0)?;
                let dst = out.index(x, y, 0)?;
                for c in 0..self.channels {
                    out.data.set(dst + c, self.data.get(src + c));
                }
            }
        }
        Ok(out)
    }

    /// Blits `child` back into this raster by absolute coordinates.
    ///
    /// The child must lie entirely within bounds and match in channel count
    /// and sample type.
    pub fn copy_from(&mut self, child: &Raster) -> Result<()> {
        if child.channels != self.channels {
            return Err(Error::ComponentMismatch {
                expected: self.channels,
                got: child.channels,
            });
        }
        if child.sample_type() != self.sample_type() {
            return Err(Error::SampleTypeMismatch {
                expected: self.sample_type(),
                got: child.sample_type(),
            });
        }
        let region = child.bounds;
        if !self.bounds.contains_rect(&region) || region.is_empty() {
            return Err(self.region_error(region));
        }
        for y in region.y..region.bottom() {
            for x in region.x..region.right() {
                let src = child.index(x, y, 0)?;
                let dst = self.index(x, y, 0)?;
                for c in 0..self.channels {
                    self.data.set(dst + c, child.data.get(src + c));
                }
            }
        }
        Ok(())
    }

    /// Remaps signed samples into the unsigned working representation.
    ///
    /// Geometry is preserved; only the buffer type changes (see
    /// [`SampleBuffer::to_unsigned`]).
    pub fn to_unsigned_repr(&self) -> Raster {
        Raster {
            bounds: self.bounds,
            channels: self.channels,
            data: self.data.to_unsigned(),
        }
    }

    /// Shifts an unsigned working raster back to `original` signedness.
    pub fn to_signed_repr(&self, original: SampleType) -> Raster {
        Raster {
            bounds: self.bounds,
            channels: self.channels,
            data: self.data.to_signed(original),
        }
    }

    fn region_error(&self, region: Rect) -> Error {
        Error::InvalidRegion {
            rx: region.x,
            ry: region.y,
            rw: region.width,
            rh: region.height,
            min_x: self.bounds.x,
            min_y: self.bounds.y,
            width: self.bounds.width,
            height: self.bounds.height,
        }
    }
}
