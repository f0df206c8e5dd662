//! Typed flat sample storage.
//!
//! A [`SampleBuffer`] holds the raw samples of a raster in their native
//! numeric type. All per-type algorithms live here so the rest of the
//! workspace never branches on the sample kind:
//!
//! - f64 get/set accessors for type-erased per-sample work
//! - Brute-force min/max scanning with a no-data sentinel, using each type's
//!   own comparison semantics (a signed and an unsigned short scan order
//!   values differently)
//! - Whole-buffer signed/unsigned remapping for conversion functions that
//!   assume unsigned input
//!
//! # Scan Semantics
//!
//! The no-data sentinel is compared by exact equality against the sample's
//! true numeric value, with no narrowing cast: a u16 sample 40000 is 40000,
//! never -25536. NaN float samples are excluded from the extremes; they can
//! never equal a sentinel and would otherwise poison the comparisons.
//!
//! # Usage
//!
//! ```rust
//! use bandview_core::{SampleBuffer, SampleType};
//!
//! let buf = SampleBuffer::I16(vec![-5, 0, 7, -999, 3]);
//! let (min, max) = buf.min_max_excluding(-999.0).unwrap();
//! assert_eq!((min, max), (-5.0, 7.0));
//! ```
//!
//! # Used By
//!
//! - [`crate::raster::Raster`] - Backing storage
//! - `bandview-display` - Brute-force range discovery
//! - `bandview-color` - Perceptual-leg remapping

use crate::sample::{
    i16_to_unsigned, i32_to_unsigned, u16_to_signed, u32_to_signed, SampleType,
};
use rayon::prelude::*;

/// Chunk size for the parallel min/max scan.
const SCAN_CHUNK: usize = 64 * 1024;

/// Flat sample storage in one of the supported native types.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleBuffer {
    /// 8-bit unsigned samples.
    U8(Vec<u8>),
    /// 16-bit unsigned samples.
    U16(Vec<u16>),
    /// 32-bit unsigned samples (remap working type).
    U32(Vec<u32>),
    /// 16-bit signed samples.
    I16(Vec<i16>),
    /// 32-bit signed samples.
    I32(Vec<i32>),
    /// 32-bit float samples.
    F32(Vec<f32>),
    /// 64-bit float samples.
    F64(Vec<f64>),
}

impl SampleBuffer {
    /// Creates a zero-filled buffer of `len` samples of the given type.
    pub fn zeroed(ty: SampleType, len: usize) -> Self {
        match ty {
            SampleType::U8 => Self::U8(vec![0; len]),
            SampleType::U16 => Self::U16(vec![0; len]),
            SampleType::U32 => Self::U32(vec![0; len]),
            SampleType::I16 => Self::I16(vec![0; len]),
            SampleType::I32 => Self::I32(vec![0; len]),
            SampleType::F32 => Self::F32(vec![0.0; len]),
            SampleType::F64 => Self::F64(vec![0.0; len]),
        }
    }

    /// The sample type stored in this buffer.
    #[inline]
    pub const fn sample_type(&self) -> SampleType {
        match self {
            Self::U8(_) => SampleType::U8,
            Self::U16(_) => SampleType::U16,
            Self::U32(_) => SampleType::U32,
            Self::I16(_) => SampleType::I16,
            Self::I32(_) => SampleType::I32,
            Self::F32(_) => SampleType::F32,
            Self::F64(_) => SampleType::F64,
        }
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::U8(d) => d.len(),
            Self::U16(d) => d.len(),
            Self::U32(d) => d.len(),
            Self::I16(d) => d.len(),
            Self::I32(d) => d.len(),
            Self::F32(d) => d.len(),
            Self::F64(d) => d.len(),
        }
    }

    /// Whether the buffer holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads sample `i` as f64.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds; callers are expected to have
    /// validated indices via [`crate::raster::Raster`] bounds checks.
    #[inline]
    pub fn get(&self, i: usize) -> f64 {
        match self {
            Self::U8(d) => d[i] as f64,
            Self::U16(d) => d[i] as f64,
            Self::U32(d) => d[i] as f64,
            Self::I16(d) => d[i] as f64,
            Self::I32(d) => d[i] as f64,
            Self::F32(d) => d[i] as f64,
            Self::F64(d) => d[i],
        }
    }

    /// Writes sample `i` from an f64 value.
    ///
    /// Integer destinations truncate toward zero and saturate at the type
    /// bounds.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    #[inline]
    pub fn set(&mut self, i: usize, v: f64) {
        match self {
            Self::U8(d) => d[i] = v as u8,
            Self::U16(d) => d[i] = v as u16,
            Self::U32(d) => d[i] = v as u32,
            Self::I16(d) => d[i] = v as i16,
            Self::I32(d) => d[i] = v as i32,
            Self::F32(d) => d[i] = v as f32,
            Self::F64(d) => d[i] = v,
        }
    }

    /// Brute-force scan: observed (min, max) of all samples not exactly
    /// equal to `no_data`.
    ///
    /// Returns `None` when no sample differs from the sentinel (or the
    /// buffer is empty). Pass `f64::NAN` to exclude nothing. Comparisons
    /// happen in the native type; the scan is chunked and reduced in
    /// parallel and is deterministic.
    pub fn min_max_excluding(&self, no_data: f64) -> Option<(f64, f64)> {
        match self {
            Self::U8(d) => scan_slice(d, no_data),
            Self::U16(d) => scan_slice(d, no_data),
            Self::U32(d) => scan_slice(d, no_data),
            Self::I16(d) => scan_slice(d, no_data),
            Self::I32(d) => scan_slice(d, no_data),
            Self::F32(d) => scan_slice(d, no_data),
            Self::F64(d) => scan_slice(d, no_data),
        }
    }

    /// Remaps signed samples into the unsigned working representation.
    ///
    /// `I16` becomes `U16` and `I32` becomes `U32`, each value offset by the
    /// type's minimum magnitude. All other types are returned unchanged; the
    /// perceptual conversion functions assume unsigned input, and unsigned
    /// and float data already satisfy that.
    pub fn to_unsigned(&self) -> SampleBuffer {
        match self {
            Self::I16(d) => Self::U16(d.iter().map(|&v| i16_to_unsigned(v)).collect()),
            Self::I32(d) => Self::U32(d.iter().map(|&v| i32_to_unsigned(v)).collect()),
            other => other.clone(),
        }
    }

    /// Inverse of [`to_unsigned`](Self::to_unsigned), driven by the original
    /// sample type.
    ///
    /// When `original` is a signed integer type the buffer is shifted back;
    /// otherwise it is returned unchanged.
    pub fn to_signed(&self, original: SampleType) -> SampleBuffer {
        match (self, original) {
            (Self::U16(d), SampleType::I16) => {
                Self::I16(d.iter().map(|&v| u16_to_signed(v)).collect())
            }
            (Self::U32(d), SampleType::I32) => {
                Self::I32(d.iter().map(|&v| u32_to_signed(v)).collect())
            }
            (other, _) => other.clone(),
        }
    }
}

/// Chunked parallel min/max over one typed slice.
fn scan_slice<T>(data: &[T], no_data: f64) -> Option<(f64, f64)>
where
    T: Copy + PartialOrd + Send + Sync + Into<f64>,
{
    data.par_chunks(SCAN_CHUNK)
        .map(|chunk| {
            let mut acc: Option<(T, T)> = None;
            for &v in chunk {
                let vd: f64 = v.into();
                if vd == no_data || vd.is_nan() {
                    continue;
                }
                match acc {
                    None => acc = Some((v, v)),
                    Some((mn, mx)) => {
                        acc = Some((
                            if v < mn { v } else { mn },
                            if v > mx { v } else { mx },
                        ));
                    }
                }
            }
            acc
        })
        .reduce(
            || None,
            |a, b| match (a, b) {
                (None, x) | (x, None) => x,
                (Some((amn, amx)), Some((bmn, bmx))) => Some((
                    if bmn < amn { bmn } else { amn },
                    if bmx > amx { bmx } else { amx },
                )),
            },
        )
        .map(|(mn, mx)| (mn.into(), mx.into()))
}
