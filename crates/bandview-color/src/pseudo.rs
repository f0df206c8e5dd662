//! Placeholder color space for bands with no real color interpretation.
//!
//! Scientific containers routinely carry rasters whose bands are
//! measurements, not colors. The rest of the pipeline still insists every
//! raster has *a* color space, so [`PseudoColorSpace`] stands in: it
//! accepts any component count and "converts" by positional copying with
//! no colorimetric math at all.
//!
//! Conversions copy the first `min(3, n)` components between the pixel and
//! the three-component RGB/XYZ slot and zero-fill whatever remains. The
//! copy is symmetric, so a round trip through RGB or XYZ preserves the
//! first three components exactly and zeroes the rest.

use bandview_core::{Error, Result};

use crate::space::{check_input_len, ColorSpace, SpaceId, SpaceKind, SpaceType};

/// A structural stand-in color space of arbitrary width.
#[derive(Debug, Clone, Copy)]
pub struct PseudoColorSpace {
    num_components: usize,
    kind: SpaceKind,
}

impl PseudoColorSpace {
    /// Builds a device-kind pseudo space with `num_components` components.
    ///
    /// A one-component space classifies as gray so single-band rasters slot
    /// into gray-aware pipelines; anything wider is an extended type.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] when `num_components` is zero.
    pub fn new(num_components: usize) -> Result<Self> {
        if num_components == 0 {
            return Err(Error::InvalidConfig {
                reason: "pseudo color space needs at least one component".into(),
            });
        }
        Ok(Self {
            num_components,
            kind: SpaceKind::Device,
        })
    }

    /// Builds a perceptual-kind pseudo space, forcing conversions through
    /// the device RGB bridge.
    pub fn perceptual(num_components: usize) -> Result<Self> {
        let mut space = Self::new(num_components)?;
        space.kind = SpaceKind::Perceptual;
        Ok(space)
    }

    /// Copies `min(3, n)` components and zero-fills the rest of `target`.
    fn copy_prefix(&self, source: &[f32], target: &mut [f32]) {
        target.fill(0.0);
        let n = self.num_components.min(3);
        target[..n].copy_from_slice(&source[..n]);
    }
}

impl ColorSpace for PseudoColorSpace {
    fn kind(&self) -> SpaceKind {
        self.kind
    }

    fn space_type(&self) -> SpaceType {
        if self.num_components == 1 {
            SpaceType::Gray
        } else {
            SpaceType::Extended(self.num_components)
        }
    }

    fn num_components(&self) -> usize {
        self.num_components
    }

    fn id(&self) -> SpaceId {
        SpaceId {
            name: match self.kind {
                SpaceKind::Device => "pseudo",
                SpaceKind::Perceptual => "pseudo-perceptual",
            },
            components: self.num_components,
        }
    }

    fn to_rgb(&self, components: &[f32], rgb: &mut [f32; 3]) -> Result<()> {
        check_input_len(self.num_components, components.len())?;
        self.copy_prefix(components, rgb);
        Ok(())
    }

    fn from_rgb(&self, rgb: &[f32; 3], components: &mut [f32]) -> Result<()> {
        check_input_len(self.num_components, components.len())?;
        self.copy_prefix(rgb, &mut components[..self.num_components]);
        Ok(())
    }

    fn to_xyz(&self, components: &[f32], xyz: &mut [f32; 3]) -> Result<()> {
        self.to_rgb(components, xyz)
    }

    fn from_xyz(&self, xyz: &[f32; 3], components: &mut [f32]) -> Result<()> {
        self.from_rgb(xyz, components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_components_rejected() {
        assert!(PseudoColorSpace::new(0).is_err());
        assert!(PseudoColorSpace::perceptual(0).is_err());
    }

    #[test]
    fn test_one_component_is_gray() {
        let space = PseudoColorSpace::new(1).unwrap();
        assert_eq!(space.space_type(), SpaceType::Gray);
        assert_eq!(space.space_type().tag(), 6);

        let wide = PseudoColorSpace::new(5).unwrap();
        assert_eq!(wide.space_type(), SpaceType::Extended(5));
        assert_eq!(wide.space_type().tag(), 15);
    }

    #[test]
    fn test_narrow_round_trip_zero_extends() {
        let space = PseudoColorSpace::new(1).unwrap();
        let mut rgb = [9.0f32; 3];
        space.to_rgb(&[0.7], &mut rgb).unwrap();
        assert_eq!(rgb, [0.7, 0.0, 0.0]);

        let mut back = [0.0f32; 1];
        space.from_rgb(&rgb, &mut back).unwrap();
        assert_eq!(back, [0.7]);
    }

    #[test]
    fn test_wide_round_trip_keeps_prefix() {
        let space = PseudoColorSpace::new(5).unwrap();
        let px = [0.1f32, 0.2, 0.3, 0.4, 0.5];
        let mut xyz = [0.0f32; 3];
        space.to_xyz(&px, &mut xyz).unwrap();
        assert_eq!(xyz, [0.1, 0.2, 0.3]);

        let mut back = [9.0f32; 5];
        space.from_xyz(&xyz, &mut back).unwrap();
        assert_eq!(back, [0.1, 0.2, 0.3, 0.0, 0.0]);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(PseudoColorSpace::new(3).unwrap().kind(), SpaceKind::Device);
        assert_eq!(
            PseudoColorSpace::perceptual(3).unwrap().kind(),
            SpaceKind::Perceptual
        );
        // Pseudo RGB-width is still not *the* device RGB.
        assert!(!PseudoColorSpace::new(3).unwrap().is_device_rgb());
    }

    #[test]
    fn test_short_buffers_rejected() {
        let space = PseudoColorSpace::new(4).unwrap();
        let mut rgb = [0.0f32; 3];
        assert!(space.to_rgb(&[1.0, 2.0], &mut rgb).is_err());
        let mut out = [0.0f32; 2];
        assert!(space.from_rgb(&rgb, &mut out).is_err());
    }
}
