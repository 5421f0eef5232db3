mod common;

use glance_core::error::GlanceError;
use glance_core::histogram::ChannelDistribution;
use glance_core::raster::{ChannelLayout, Raster, SampleDepth};

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn test_new_rejects_zero_dimensions() {
    let err = Raster::new::<u8>(0, 3, 1, vec![]).unwrap_err();
    assert!(matches!(err, GlanceError::InvalidDimensions { width: 0, height: 3 }));
}

#[test]
fn test_new_rejects_five_channels() {
    let err = Raster::new(1, 1, 5, vec![0u8; 5]).unwrap_err();
    assert!(matches!(err, GlanceError::UnsupportedChannelCount(5)));
}

#[test]
fn test_new_rejects_short_buffer() {
    let err = Raster::new(2, 2, 3, vec![0u16; 11]).unwrap_err();
    assert!(matches!(
        err,
        GlanceError::SampleCountMismatch { actual: 11, .. }
    ));
}

#[test]
fn test_layout_and_depth() {
    let r = common::solid_rgba8(3, 2, [1, 2, 3, 4]);
    assert_eq!(r.layout(), ChannelLayout::Rgba);
    assert_eq!(r.depth(), SampleDepth::U8);
    assert_eq!(r.width(), 3);
    assert_eq!(r.height(), 2);
    assert_eq!(r.channels(), 4);
    assert_eq!(r.representable_range(), (0.0, 255.0));
}

#[test]
fn test_float_raster_accepts_nan() {
    let r = common::gray_f32(3, 1, vec![f32::NAN, -2.0, 4.5]);
    assert_eq!(r.depth(), SampleDepth::F32);
    assert_eq!(r.channel_range(0).unwrap(), (-2.0, 4.5));
    assert!(r.sample(0, 0, 0).unwrap().is_nan());
}

// ---------------------------------------------------------------------------
// Sample access
// ---------------------------------------------------------------------------

#[test]
fn test_sample_is_row_major_interleaved() {
    // Pixel (x, y) channel c holds 10*y + 3*x + c.
    let mut samples = Vec::new();
    for y in 0..2u16 {
        for x in 0..3u16 {
            for c in 0..3u16 {
                samples.push(10 * y + 3 * x + c);
            }
        }
    }
    let r = Raster::new(3, 2, 3, samples).unwrap();
    assert_eq!(r.sample(2, 1, 1).unwrap(), 17.0);
    assert_eq!(r.sample(0, 1, 2).unwrap(), 12.0);
    assert_eq!(r.pixel(1, 0).unwrap(), vec![3.0, 4.0, 5.0]);
}

#[test]
fn test_sample_out_of_range() {
    let r = common::gray8_sequence(4, 3);
    for (x, y, c) in [(-1, 0, 0), (0, -1, 0), (4, 0, 0), (0, 3, 0), (0, 0, 1)] {
        assert!(
            matches!(r.sample(x, y, c), Err(GlanceError::OutOfRange { .. })),
            "({x}, {y}, {c}) should be out of range"
        );
    }
    assert_eq!(r.sample(3, 2, 0).unwrap(), 11.0);
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

#[test]
fn test_stats_per_channel() {
    let r = Raster::new(2, 2, 2, vec![10u8, 255, 20, 255, 10, 0, 40, 255]).unwrap();
    let stats = r.stats().unwrap();
    assert_eq!(stats.width, 2);
    assert_eq!(stats.height, 2);
    assert_eq!(stats.layout, ChannelLayout::GrayAlpha);
    assert_eq!(stats.channels.len(), 2);
    assert_eq!(stats.channels[0].min, 10.0);
    assert_eq!(stats.channels[0].max, 40.0);
    assert_eq!(stats.channels[0].distinct, 3);
    assert_eq!(stats.channels[1].distinct, 2);
}

#[test]
fn test_distribution_percentiles_16bit() {
    let r = common::gray16_from_fn(100, 10, |x, y| (x + 100 * y) as u16);
    let dist = ChannelDistribution::from_raster(&r, 0).unwrap();
    assert_eq!(dist.total(), 1000);
    assert_eq!(dist.percentile(0.0).unwrap(), 0.0);
    assert_eq!(dist.percentile(0.5).unwrap(), 500.0);
    assert_eq!(dist.percentile(1.0).unwrap(), 999.0);
    assert_eq!(dist.distinct(), 1000);
}

#[test]
fn test_distribution_skips_nan() {
    let r = common::gray_f32(4, 1, vec![1.0, f32::NAN, 3.0, 2.0]);
    let dist = ChannelDistribution::from_raster(&r, 0).unwrap();
    assert_eq!(dist.total(), 3);
    assert_eq!(dist.percentile(1.0).unwrap(), 3.0);
}
