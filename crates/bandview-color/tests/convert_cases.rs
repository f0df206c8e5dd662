//! End-to-end conversion through every session plan.

use std::sync::Arc;

use approx::assert_relative_eq;
use bandview_color::{
    ConversionCase, ConvertSession, ConvertSide, ConverterCache, GraySpace, PseudoColorSpace,
    SharedSpace, SrgbSpace,
};
use bandview_core::{Raster, Rect, SampleType};

fn perceptual(n: usize, ty: SampleType) -> ConvertSide {
    ConvertSide::new(Arc::new(PseudoColorSpace::perceptual(n).unwrap()), ty)
}

fn srgb(ty: SampleType) -> ConvertSide {
    ConvertSide::new(Arc::new(SrgbSpace), ty)
}

fn gray(ty: SampleType) -> ConvertSide {
    ConvertSide::new(Arc::new(GraySpace), ty)
}

#[test]
fn perceptual_to_rgb_remaps_signed_samples() {
    let cache = ConverterCache::new();
    let session = ConvertSession::new(perceptual(3, SampleType::I16), srgb(SampleType::U8), &cache);
    assert_eq!(session.case(), ConversionCase::SrcPerceptualToRgb);

    let region = Rect::from_size(1, 1);
    let mut src = Raster::new(SampleType::I16, region, 3);
    src.set_pixel(0, 0, &[-32768.0, 0.0, 32767.0]).unwrap();
    let mut dst = Raster::new(SampleType::U8, region, 3);
    session.convert(&src, &mut dst, region).unwrap();

    // The unsigned shift puts the type minimum at black and the maximum at
    // white; zero lands mid-scale.
    assert_eq!(dst.sample(0, 0, 0).unwrap(), 0.0);
    assert_eq!(dst.sample(0, 0, 1).unwrap(), 128.0);
    assert_eq!(dst.sample(0, 0, 2).unwrap(), 255.0);
}

#[test]
fn rgb_to_perceptual_rescales_to_dst_type() {
    let cache = ConverterCache::new();
    let session = ConvertSession::new(srgb(SampleType::U8), perceptual(3, SampleType::U16), &cache);
    assert_eq!(session.case(), ConversionCase::RgbToDstPerceptual);

    let region = Rect::from_size(1, 1);
    let mut src = Raster::new(SampleType::U8, region, 3);
    src.set_pixel(0, 0, &[255.0, 0.0, 255.0]).unwrap();
    let mut dst = Raster::new(SampleType::U16, region, 3);
    session.convert(&src, &mut dst, region).unwrap();

    assert_eq!(dst.sample(0, 0, 0).unwrap(), 65535.0);
    assert_eq!(dst.sample(0, 0, 1).unwrap(), 0.0);
    assert_eq!(dst.sample(0, 0, 2).unwrap(), 65535.0);
}

#[test]
fn both_perceptual_preserves_extremes() {
    let cache = ConverterCache::new();
    let session = ConvertSession::new(
        perceptual(3, SampleType::U16),
        perceptual(3, SampleType::U16),
        &cache,
    );
    assert_eq!(session.case(), ConversionCase::BothPerceptual);

    let region = Rect::from_size(2, 1);
    let mut src = Raster::new(SampleType::U16, region, 3);
    src.set_pixel(0, 0, &[0.0, 65535.0, 0.0]).unwrap();
    src.set_pixel(1, 0, &[65535.0, 0.0, 65535.0]).unwrap();
    let mut dst = Raster::new(SampleType::U16, region, 3);
    session.convert(&src, &mut dst, region).unwrap();

    let mut px = [0.0f32; 3];
    dst.pixel(0, 0, &mut px).unwrap();
    assert_eq!(px, [0.0, 65535.0, 0.0]);
    dst.pixel(1, 0, &mut px).unwrap();
    assert_eq!(px, [65535.0, 0.0, 65535.0]);
}

#[test]
fn both_perceptual_round_trip_is_close_midscale() {
    let cache = ConverterCache::new();
    let session = ConvertSession::new(
        perceptual(3, SampleType::U16),
        perceptual(3, SampleType::U16),
        &cache,
    );
    let region = Rect::from_size(1, 1);
    let mut src = Raster::new(SampleType::U16, region, 3);
    src.set_pixel(0, 0, &[12000.0, 32768.0, 51234.0]).unwrap();
    let mut dst = Raster::new(SampleType::U16, region, 3);
    session.convert(&src, &mut dst, region).unwrap();

    for c in 0..3 {
        let input = src.sample(0, 0, c).unwrap();
        let output = dst.sample(0, 0, c).unwrap();
        assert!(
            (input - output).abs() <= 1.0,
            "channel {c}: {input} became {output}"
        );
    }
}

#[test]
fn perceptual_to_non_rgb_device_runs_device_leg() {
    let cache = ConverterCache::new();
    let session = ConvertSession::new(perceptual(3, SampleType::U8), gray(SampleType::U8), &cache);
    assert_eq!(session.case(), ConversionCase::SrcPerceptualToNonRgb);
    assert_eq!(cache.stats().built, 1);

    let region = Rect::from_size(2, 1);
    let mut src = Raster::new(SampleType::U8, region, 3);
    src.set_pixel(0, 0, &[255.0, 255.0, 255.0]).unwrap();
    src.set_pixel(1, 0, &[0.0, 0.0, 0.0]).unwrap();
    let mut dst = Raster::new(SampleType::U8, region, 1);
    session.convert(&src, &mut dst, region).unwrap();

    assert_eq!(dst.sample(0, 0, 0).unwrap(), 255.0);
    assert_eq!(dst.sample(1, 0, 0).unwrap(), 0.0);
}

#[test]
fn non_rgb_device_to_perceptual_bridges_through_rgb() {
    let cache = ConverterCache::new();
    let session = ConvertSession::new(gray(SampleType::U8), perceptual(3, SampleType::U8), &cache);
    assert_eq!(session.case(), ConversionCase::NonRgbToDstPerceptual);

    let region = Rect::from_size(1, 1);
    let mut src = Raster::new(SampleType::U8, region, 1);
    src.set_sample(0, 0, 0, 255.0).unwrap();
    let mut dst = Raster::new(SampleType::U8, region, 3);
    session.convert(&src, &mut dst, region).unwrap();

    // Full-scale gray reaches the bridge as white and copies through.
    let mut px = [0.0f32; 3];
    dst.pixel(0, 0, &mut px).unwrap();
    assert_eq!(px, [255.0, 255.0, 255.0]);
}

#[test]
fn device_to_device_float_path() {
    let cache = ConverterCache::new();
    let session = ConvertSession::new(srgb(SampleType::F32), gray(SampleType::F32), &cache);
    assert_eq!(session.case(), ConversionCase::NeitherPerceptual);

    let region = Rect::from_size(2, 1);
    let mut src = Raster::new(SampleType::F32, region, 3);
    src.set_pixel(0, 0, &[1.0, 1.0, 1.0]).unwrap();
    src.set_pixel(1, 0, &[0.0, 0.0, 0.0]).unwrap();
    let mut dst = Raster::new(SampleType::F32, region, 1);
    session.convert(&src, &mut dst, region).unwrap();

    assert_relative_eq!(dst.sample(0, 0, 0).unwrap() as f32, 1.0, epsilon = 1e-4);
    assert_relative_eq!(dst.sample(1, 0, 0).unwrap() as f32, 0.0, epsilon = 1e-4);
}

#[test]
fn sessions_share_cached_converters() {
    let cache = ConverterCache::new();
    let a = ConvertSession::new(srgb(SampleType::U8), gray(SampleType::U8), &cache);
    let b = ConvertSession::new(srgb(SampleType::U8), gray(SampleType::U8), &cache);
    assert_eq!(cache.stats().built, 1);
    assert_eq!(cache.stats().hits, 1);

    // A perceptual source with the same bridge/destination pair reuses the
    // same device converter again.
    let c = ConvertSession::new(perceptual(4, SampleType::U8), gray(SampleType::U8), &cache);
    assert_eq!(cache.stats().built, 1);
    assert_eq!(cache.stats().hits, 2);

    drop((a, b, c));
    // All users gone: the next session rebuilds.
    let _d = ConvertSession::new(srgb(SampleType::U8), gray(SampleType::U8), &cache);
    assert_eq!(cache.stats().built, 2);
}

#[test]
fn offset_tiles_convert_in_place() {
    let cache = ConverterCache::new();
    let session = ConvertSession::new(srgb(SampleType::U8), gray(SampleType::U8), &cache);

    // Tile with a non-zero origin, converted over an interior region only.
    let bounds = Rect::new(128, 64, 4, 4);
    let mut src = Raster::new(SampleType::U8, bounds, 3);
    for y in bounds.y..bounds.bottom() {
        for x in bounds.x..bounds.right() {
            src.set_pixel(x, y, &[255.0, 255.0, 255.0]).unwrap();
        }
    }
    let mut dst = Raster::new(SampleType::U8, bounds, 1);
    let region = Rect::new(129, 65, 2, 2);
    session.convert(&src, &mut dst, region).unwrap();

    assert_eq!(dst.sample(129, 65, 0).unwrap(), 255.0);
    assert_eq!(dst.sample(130, 66, 0).unwrap(), 255.0);
    assert_eq!(dst.sample(128, 64, 0).unwrap(), 0.0);

    let pseudo_session =
        ConvertSession::new(perceptual(3, SampleType::U8), srgb(SampleType::U8), &cache);
    let mut rgb_dst = Raster::new(SampleType::U8, bounds, 3);
    pseudo_session.convert(&src, &mut rgb_dst, region).unwrap();
    assert_eq!(rgb_dst.sample(129, 65, 0).unwrap(), 255.0);
    assert_eq!(rgb_dst.sample(128, 64, 0).unwrap(), 0.0);
}
