//! Numeric sample types and their natural-range table.
//!
//! Every raster carries samples of exactly one [`SampleType`]. The type is
//! decided at decode time, so all behavior that depends on it (natural range,
//! signedness, widening for intermediate formats, signed/unsigned remapping)
//! is exposed here as one constant table instead of per-call-site branching.
//!
//! # Types
//!
//! - [`SampleType`] - Runtime sample kind (U8, U16, U32, I16, I32, F32, F64)
//! - Remap helpers - [`i16_to_unsigned`], [`u16_to_signed`],
//!   [`i32_to_unsigned`], [`u32_to_signed`]
//!
//! # Usage
//!
//! ```rust
//! use bandview_core::SampleType;
//!
//! let ty = SampleType::I16;
//! assert_eq!(ty.natural_min(), -32768.0);
//! assert_eq!(ty.natural_max(), 32767.0);
//! assert_eq!(ty.unsigned_repr(), SampleType::U16);
//! ```
//!
//! # Used By
//!
//! - [`crate::buffer::SampleBuffer`] - Typed storage and scans
//! - `bandview-display` - Range discovery fallback tiers
//! - `bandview-color` - Normalization and bridge-type selection

/// Runtime numeric sample kind.
///
/// Covers the sample types that appear in single- and multi-band numeric
/// rasters. `U32` never occurs in decoded imagery; it exists as the unsigned
/// working representation produced when `I32` samples are remapped for
/// conversion functions that assume unsigned input.
///
/// # Natural Ranges
///
/// Each type has a natural (min, max) range: the full representable range
/// for integers, `-MAX..MAX` for floating point. The natural range is the
/// last fallback tier of range discovery and the normalization domain of
/// device color conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SampleType {
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit unsigned integer.
    #[default]
    U16,
    /// 32-bit unsigned integer (remap working type only).
    U32,
    /// 16-bit signed integer.
    I16,
    /// 32-bit signed integer.
    I32,
    /// 32-bit single-precision float.
    F32,
    /// 64-bit double-precision float.
    F64,
}

impl SampleType {
    /// Number of bits per sample.
    #[inline]
    pub const fn bits(&self) -> u32 {
        match self {
            Self::U8 => 8,
            Self::U16 | Self::I16 => 16,
            Self::U32 | Self::I32 | Self::F32 => 32,
            Self::F64 => 64,
        }
    }

    /// Number of bytes per sample.
    #[inline]
    pub const fn bytes(&self) -> usize {
        (self.bits() / 8) as usize
    }

    /// Whether this is a floating-point type.
    #[inline]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Whether this is a signed integer type.
    #[inline]
    pub const fn is_signed_int(&self) -> bool {
        matches!(self, Self::I16 | Self::I32)
    }

    /// Whether this is an integer type.
    #[inline]
    pub const fn is_integer(&self) -> bool {
        !self.is_float()
    }

    /// Smallest representable value, as f64.
    ///
    /// For floating-point types this is `-MAX` (the most negative finite
    /// value), matching the display-range fallback semantics.
    #[inline]
    pub const fn natural_min(&self) -> f64 {
        match self {
            Self::U8 | Self::U16 | Self::U32 => 0.0,
            Self::I16 => i16::MIN as f64,
            Self::I32 => i32::MIN as f64,
            Self::F32 => -f32::MAX as f64,
            Self::F64 => -f64::MAX,
        }
    }

    /// Largest representable value, as f64.
    #[inline]
    pub const fn natural_max(&self) -> f64 {
        match self {
            Self::U8 => u8::MAX as f64,
            Self::U16 => u16::MAX as f64,
            Self::U32 => u32::MAX as f64,
            Self::I16 => i16::MAX as f64,
            Self::I32 => i32::MAX as f64,
            Self::F32 => f32::MAX as f64,
            Self::F64 => f64::MAX,
        }
    }

    /// Normalization range for device conversion.
    ///
    /// Integer types span their full representable range; floating-point
    /// samples are assumed already normalized, so the range is 1.
    #[inline]
    pub const fn norm_range(&self) -> f64 {
        match self {
            Self::U8 => 255.0,
            Self::U16 | Self::I16 => 65535.0,
            Self::U32 | Self::I32 => u32::MAX as f64,
            Self::F32 | Self::F64 => 1.0,
        }
    }

    /// Normalization minimum for device conversion.
    ///
    /// Zero for unsigned and floating-point types, the type minimum for
    /// signed integers.
    #[inline]
    pub const fn norm_min(&self) -> f64 {
        match self {
            Self::I16 => i16::MIN as f64,
            Self::I32 => i32::MIN as f64,
            _ => 0.0,
        }
    }

    /// Widening ordinal used to pick the intermediate ("bridge") type.
    ///
    /// When two sides of a conversion disagree, the bridge representation
    /// takes the type with the larger ordinal to avoid precision loss.
    #[inline]
    pub const fn ordinal(&self) -> u8 {
        match self {
            Self::U8 => 0,
            Self::U16 => 1,
            Self::I16 => 2,
            Self::U32 => 3,
            Self::I32 => 4,
            Self::F32 => 5,
            Self::F64 => 6,
        }
    }

    /// Returns the wider of two types by [`ordinal`](Self::ordinal).
    #[inline]
    pub const fn wider(self, other: Self) -> Self {
        if self.ordinal() >= other.ordinal() {
            self
        } else {
            other
        }
    }

    /// The unsigned working representation of this type.
    ///
    /// Signed integer samples must be shifted into an unsigned domain before
    /// perceptual color conversion; this is the storage type of the shifted
    /// data. Types that pass through unshifted map to themselves.
    #[inline]
    pub const fn unsigned_repr(&self) -> Self {
        match self {
            Self::I16 => Self::U16,
            Self::I32 => Self::U32,
            other => *other,
        }
    }

    /// Short name for display.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}

impl std::fmt::Display for SampleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Shifts a signed 16-bit sample by `-i16::MIN` into the unsigned domain.
///
/// Equivalent to `(v as i32 - i16::MIN as i32) as u16`, implemented as a
/// sign-bit flip.
#[inline]
pub const fn i16_to_unsigned(v: i16) -> u16 {
    (v as u16) ^ 0x8000
}

/// Inverse of [`i16_to_unsigned`].
#[inline]
pub const fn u16_to_signed(v: u16) -> i16 {
    (v ^ 0x8000) as i16
}

/// Shifts a signed 32-bit sample by `-i32::MIN` into the unsigned domain.
#[inline]
pub const fn i32_to_unsigned(v: i32) -> u32 {
    (v as u32) ^ 0x8000_0000
}

/// Inverse of [`i32_to_unsigned`].
#[inline]
pub const fn u32_to_signed(v: u32) -> i32 {
    (v ^ 0x8000_0000) as i32
}
