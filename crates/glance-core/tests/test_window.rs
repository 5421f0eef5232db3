mod common;

use glance_core::error::GlanceError;
use glance_core::window::{auto_window, AutoWindowParams, ChannelWindow, WindowSet};

// ---------------------------------------------------------------------------
// ChannelWindow::map
// ---------------------------------------------------------------------------

#[test]
fn test_map_endpoints_and_midpoint() {
    let w = ChannelWindow::new(100.0, 200.0).unwrap();
    assert_eq!(w.map(100.0), 0);
    assert_eq!(w.map(200.0), 255);
    assert_eq!(w.map(150.0), 128);
    assert_eq!(w.map(50.0), 0);
    assert_eq!(w.map(1e9), 255);
}

#[test]
fn test_map_is_monotonic() {
    let w = ChannelWindow::new(-3.5, 17.25).unwrap();
    let mut prev = 0u8;
    let mut v = -10.0;
    while v < 25.0 {
        let out = w.map(v);
        assert!(out >= prev, "map({v}) = {out} < {prev}");
        prev = out;
        v += 0.01;
    }
}

#[test]
fn test_degenerate_window_thresholds() {
    let raster = common::gray8_sequence(4, 4);
    let mut set = WindowSet::for_raster(&raster);
    set.set_window(0, 100.0, 100.0).unwrap();
    assert_eq!(set.map(99.0, 0).unwrap(), 0);
    assert_eq!(set.map(100.0, 0).unwrap(), 255);
    assert_eq!(set.map(101.0, 0).unwrap(), 255);
}

#[test]
fn test_nan_maps_to_zero() {
    let w = ChannelWindow::new(0.0, 1.0).unwrap();
    assert_eq!(w.map(f64::NAN), 0);
}

// ---------------------------------------------------------------------------
// WindowSet
// ---------------------------------------------------------------------------

#[test]
fn test_defaults_cover_representable_range() {
    let raster = common::gray16_from_fn(2, 2, |x, _| x as u16 * 1000);
    let set = WindowSet::for_raster(&raster);
    assert_eq!(set.len(), 1);
    assert_eq!(set.get(0).unwrap(), ChannelWindow { lower: 0.0, upper: 65535.0 });
}

#[test]
fn test_float_defaults_to_observed_range() {
    let raster = common::gray_f32(3, 1, vec![-0.5, 0.25, 2.0]);
    let set = WindowSet::for_raster(&raster);
    assert_eq!(set.get(0).unwrap(), ChannelWindow { lower: -0.5, upper: 2.0 });
}

#[test]
fn test_inverted_window_rejected_and_prior_kept() {
    let raster = common::solid_rgb8(2, 2, [10, 20, 30]);
    let mut set = WindowSet::for_raster(&raster);
    set.set_window(1, 5.0, 50.0).unwrap();

    let err = set.set_window(1, 60.0, 40.0).unwrap_err();
    assert!(matches!(err, GlanceError::InvalidWindow { .. }));
    assert_eq!(set.get(1).unwrap(), ChannelWindow { lower: 5.0, upper: 50.0 });
}

#[test]
fn test_set_window_unknown_channel() {
    let raster = common::gray8_sequence(2, 2);
    let mut set = WindowSet::for_raster(&raster);
    assert!(matches!(
        set.set_window(1, 0.0, 1.0),
        Err(GlanceError::OutOfRange { channel: 1, .. })
    ));
}

#[test]
fn test_set_all_links_color_channels() {
    let raster = common::solid_rgba8(2, 2, [1, 2, 3, 4]);
    let mut set = WindowSet::for_raster(&raster);
    set.set_all(0..3, 10.0, 20.0).unwrap();
    for c in 0..3 {
        assert_eq!(set.get(c).unwrap(), ChannelWindow { lower: 10.0, upper: 20.0 });
    }
    assert_eq!(set.get(3).unwrap(), ChannelWindow { lower: 0.0, upper: 255.0 });
}

// ---------------------------------------------------------------------------
// auto_window
// ---------------------------------------------------------------------------

#[test]
fn test_auto_window_trims_outliers() {
    // 1000 samples: 0..=997 plus two hot pixels.
    let raster = common::gray16_from_fn(1000, 1, |x, _| match x {
        998 | 999 => 60_000,
        x => x as u16,
    });
    let windows = auto_window(&raster, &AutoWindowParams::default()).unwrap();
    // rank floor(1000 * 0.0035) = 3, floor(1000 * 0.9965) = 996.
    assert_eq!(windows[0], ChannelWindow { lower: 3.0, upper: 996.0 });
}

#[test]
fn test_auto_window_is_deterministic() {
    let raster = common::gray8_sequence(37, 29);
    let params = AutoWindowParams {
        low_percentile: 0.1,
        high_percentile: 0.9,
    };
    let a = auto_window(&raster, &params).unwrap();
    let b = auto_window(&raster, &params).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_auto_window_constant_image_is_degenerate() {
    let raster = common::solid_rgb8(5, 5, [42, 42, 42]);
    let windows = auto_window(&raster, &AutoWindowParams::default()).unwrap();
    assert_eq!(windows.len(), 3);
    for w in windows {
        assert_eq!(w, ChannelWindow { lower: 42.0, upper: 42.0 });
        assert_eq!(w.map(42.0), 255);
    }
}

#[test]
fn test_auto_window_float_ignores_nan() {
    let raster = common::gray_f32(4, 1, vec![f32::NAN, 0.0, 1.0, 2.0]);
    let params = AutoWindowParams {
        low_percentile: 0.0,
        high_percentile: 1.0,
    };
    let windows = auto_window(&raster, &params).unwrap();
    assert_eq!(windows[0], ChannelWindow { lower: 0.0, upper: 2.0 });
}
