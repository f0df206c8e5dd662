//! Runtime color space abstraction and the shipped device spaces.
//!
//! Conversion sessions deal with color spaces decided at image-open time,
//! so the seam is a runtime trait rather than a compile-time marker. A
//! space is either **Device** (standard, universally interpretable - sRGB,
//! gray) or **Perceptual** (a non-standard space whose conversion to and
//! from device RGB is domain-specific).
//!
//! # Shipped Spaces
//!
//! - [`SrgbSpace`] - Device RGB. IEC 61966-2-1 transfer function, D65
//!   matrices. Always the bridge space for chained perceptual conversions.
//! - [`GraySpace`] - Device gray. Linear luminance against D65.
//!
//! # Component Domains
//!
//! All per-pixel operations work on f32 component slices normalized to
//! [0, 1]; the session layer owns normalization from and to native sample
//! ranges (including the signed/unsigned shift).

use bandview_core::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Whether a space has off-the-shelf conversion support or needs custom
/// domain logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpaceKind {
    /// Standard device space (sRGB, gray): directly convertible.
    Device,
    /// Non-standard space bridged through device RGB.
    Perceptual,
}

/// Structural classification of a color space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpaceType {
    /// Single-component gray.
    Gray,
    /// Three-component RGB.
    Rgb,
    /// Anything else, tagged by component count.
    Extended(usize),
}

impl SpaceType {
    /// Numeric type tag.
    ///
    /// Gray and RGB use the conventional tag values; extended types are
    /// offset by their component count past the standard tags so they can
    /// never collide with them.
    #[inline]
    pub const fn tag(&self) -> usize {
        match self {
            Self::Rgb => 5,
            Self::Gray => 6,
            Self::Extended(n) => *n + 10,
        }
    }
}

/// Stable identity of a color space, used as the converter-cache key.
///
/// Two spaces with equal ids convert identically; the cache may hand out
/// one converter for both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpaceId {
    /// Space family name.
    pub name: &'static str,
    /// Component count (distinguishes pseudo spaces of different widths).
    pub components: usize,
}

/// Runtime color space seam.
///
/// Implementations must be cheap to call per pixel; expensive setup
/// belongs in the constructed converter, not here.
pub trait ColorSpace: fmt::Debug + Send + Sync {
    /// Device or perceptual.
    fn kind(&self) -> SpaceKind;

    /// Structural classification.
    fn space_type(&self) -> SpaceType;

    /// Number of components per pixel.
    fn num_components(&self) -> usize;

    /// Stable identity for cache keys.
    fn id(&self) -> SpaceId;

    /// Whether this is the device RGB space (the bridge representation).
    fn is_device_rgb(&self) -> bool {
        self.kind() == SpaceKind::Device && self.space_type() == SpaceType::Rgb
    }

    /// Converts one pixel to device RGB.
    ///
    /// `components` must hold at least [`num_components`](Self::num_components)
    /// values.
    fn to_rgb(&self, components: &[f32], rgb: &mut [f32; 3]) -> Result<()>;

    /// Converts one device RGB pixel into this space.
    ///
    /// `components` must have room for at least
    /// [`num_components`](Self::num_components) values.
    fn from_rgb(&self, rgb: &[f32; 3], components: &mut [f32]) -> Result<()>;

    /// Converts one pixel to CIE XYZ.
    fn to_xyz(&self, components: &[f32], xyz: &mut [f32; 3]) -> Result<()>;

    /// Converts one CIE XYZ pixel into this space.
    fn from_xyz(&self, xyz: &[f32; 3], components: &mut [f32]) -> Result<()>;
}

/// Shared handle to a color space.
pub type SharedSpace = Arc<dyn ColorSpace>;

pub(crate) fn check_input_len(needed: usize, got: usize) -> Result<()> {
    if got < needed {
        return Err(Error::ComponentsTooShort { needed, got });
    }
    Ok(())
}

// sRGB <-> XYZ matrices, D65 white (IEC 61966-2-1).
const SRGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.412_390_8, 0.357_584_33, 0.180_480_8],
    [0.212_639_0, 0.715_168_65, 0.072_192_32],
    [0.019_330_82, 0.119_194_78, 0.950_532_14],
];

const XYZ_TO_SRGB: [[f32; 3]; 3] = [
    [3.240_97, -1.537_383_2, -0.498_610_76],
    [-0.969_243_65, 1.875_967_5, 0.041_555_06],
    [0.055_630_08, -0.203_976_96, 1.056_971_5],
];

/// D65 white point in XYZ.
const D65_XYZ: [f32; 3] = [0.950_47, 1.0, 1.088_83];

/// sRGB EOTF: gamma-encoded [0, 1] to linear light.
#[inline]
fn srgb_eotf(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB OETF: linear light to gamma-encoded [0, 1].
#[inline]
fn srgb_oetf(v: f32) -> f32 {
    if v <= 0.003_130_8 {
        v * 12.92
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

#[inline]
fn mat_mul(m: &[[f32; 3]; 3], v: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// The device RGB space: sRGB with the standard transfer function.
#[derive(Debug, Clone, Copy, Default)]
pub struct SrgbSpace;

impl ColorSpace for SrgbSpace {
    fn kind(&self) -> SpaceKind {
        SpaceKind::Device
    }

    fn space_type(&self) -> SpaceType {
        SpaceType::Rgb
    }

    fn num_components(&self) -> usize {
        3
    }

    fn id(&self) -> SpaceId {
        SpaceId {
            name: "srgb",
            components: 3,
        }
    }

    fn to_rgb(&self, components: &[f32], rgb: &mut [f32; 3]) -> Result<()> {
        check_input_len(3, components.len())?;
        rgb.copy_from_slice(&components[..3]);
        Ok(())
    }

    fn from_rgb(&self, rgb: &[f32; 3], components: &mut [f32]) -> Result<()> {
        check_input_len(3, components.len())?;
        components[..3].copy_from_slice(rgb);
        Ok(())
    }

    fn to_xyz(&self, components: &[f32], xyz: &mut [f32; 3]) -> Result<()> {
        check_input_len(3, components.len())?;
        let linear = [
            srgb_eotf(components[0]),
            srgb_eotf(components[1]),
            srgb_eotf(components[2]),
        ];
        *xyz = mat_mul(&SRGB_TO_XYZ, linear);
        Ok(())
    }

    fn from_xyz(&self, xyz: &[f32; 3], components: &mut [f32]) -> Result<()> {
        check_input_len(3, components.len())?;
        let linear = mat_mul(&XYZ_TO_SRGB, *xyz);
        for (out, lin) in components[..3].iter_mut().zip(linear) {
            *out = srgb_oetf(lin.clamp(0.0, 1.0));
        }
        Ok(())
    }
}

/// Rec.709 luma weights for RGB -> gray reduction.
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

/// The device gray space: a single linear luminance component.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraySpace;

impl ColorSpace for GraySpace {
    fn kind(&self) -> SpaceKind {
        SpaceKind::Device
    }

    fn space_type(&self) -> SpaceType {
        SpaceType::Gray
    }

    fn num_components(&self) -> usize {
        1
    }

    fn id(&self) -> SpaceId {
        SpaceId {
            name: "gray",
            components: 1,
        }
    }

    fn to_rgb(&self, components: &[f32], rgb: &mut [f32; 3]) -> Result<()> {
        check_input_len(1, components.len())?;
        *rgb = [components[0]; 3];
        Ok(())
    }

    fn from_rgb(&self, rgb: &[f32; 3], components: &mut [f32]) -> Result<()> {
        check_input_len(1, components.len())?;
        components[0] = LUMA_R * rgb[0] + LUMA_G * rgb[1] + LUMA_B * rgb[2];
        Ok(())
    }

    fn to_xyz(&self, components: &[f32], xyz: &mut [f32; 3]) -> Result<()> {
        check_input_len(1, components.len())?;
        let y = components[0];
        *xyz = [y * D65_XYZ[0], y, y * D65_XYZ[2]];
        Ok(())
    }

    fn from_xyz(&self, xyz: &[f32; 3], components: &mut [f32]) -> Result<()> {
        check_input_len(1, components.len())?;
        components[0] = xyz[1];
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_srgb_white_to_xyz() {
        let mut xyz = [0.0f32; 3];
        SrgbSpace.to_xyz(&[1.0, 1.0, 1.0], &mut xyz).unwrap();
        assert_relative_eq!(xyz[0], 0.9505, epsilon = 1e-3);
        assert_relative_eq!(xyz[1], 1.0, epsilon = 1e-3);
        assert_relative_eq!(xyz[2], 1.089, epsilon = 1e-3);
    }

    #[test]
    fn test_srgb_xyz_round_trip() {
        let px = [0.5f32, 0.3, 0.2];
        let mut xyz = [0.0f32; 3];
        let mut back = [0.0f32; 3];
        SrgbSpace.to_xyz(&px, &mut xyz).unwrap();
        SrgbSpace.from_xyz(&xyz, &mut back).unwrap();
        for (a, b) in px.iter().zip(back) {
            assert_relative_eq!(*a, b, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_gray_xyz_round_trip() {
        let mut xyz = [0.0f32; 3];
        let mut back = [0.0f32; 1];
        GraySpace.to_xyz(&[0.42], &mut xyz).unwrap();
        GraySpace.from_xyz(&xyz, &mut back).unwrap();
        assert_relative_eq!(back[0], 0.42, epsilon = 1e-6);
    }

    #[test]
    fn test_gray_is_not_device_rgb() {
        assert!(SrgbSpace.is_device_rgb());
        assert!(!GraySpace.is_device_rgb());
        assert_eq!(GraySpace.space_type().tag(), 6);
        assert_eq!(SrgbSpace.space_type().tag(), 5);
    }

    #[test]
    fn test_short_input_rejected() {
        let mut xyz = [0.0f32; 3];
        assert!(SrgbSpace.to_xyz(&[0.5, 0.5], &mut xyz).is_err());
        let mut out = [0.0f32; 0];
        assert!(GraySpace.from_xyz(&xyz, &mut out).is_err());
    }
}
