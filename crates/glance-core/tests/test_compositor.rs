mod common;

use glance_core::compositor::render;
use glance_core::error::GlanceError;
use glance_core::probe::{probe, ProbeReadout};
use glance_core::raster::Raster;
use glance_core::viewport::{ViewState, ZoomLimits};
use glance_core::window::WindowSet;

const BG: [u8; 3] = [30, 30, 30];

// ---------------------------------------------------------------------------
// Basic composition
// ---------------------------------------------------------------------------

#[test]
fn test_bitmap_matches_viewport() {
    let raster = common::gray8_sequence(8, 8);
    let view = common::fitted_view(&raster, 123, 45);
    let bitmap = render(&raster, &WindowSet::for_raster(&raster), &view, BG).unwrap();
    assert_eq!(bitmap.width, 123);
    assert_eq!(bitmap.height, 45);
    assert_eq!(bitmap.pixels.len(), 123 * 45);
    assert_eq!(bitmap.as_rgba_bytes().len(), 123 * 45 * 4);
}

#[test]
fn test_gray_replicated_to_rgb() {
    let raster = common::row_ramp_4x4();
    let view = common::fitted_view(&raster, 400, 400);
    let bitmap = render(&raster, &WindowSet::for_raster(&raster), &view, BG).unwrap();
    assert_eq!(bitmap.pixel(50, 50), Some([0, 0, 0, 255]));
    assert_eq!(bitmap.pixel(50, 150), Some([85, 85, 85, 255]));
    assert_eq!(bitmap.pixel(399, 399), Some([255, 255, 255, 255]));
}

#[test]
fn test_background_outside_image() {
    let raster = common::solid_rgb8(200, 100, [200, 100, 50]);
    let view = common::fitted_view(&raster, 400, 400);
    let bitmap = render(&raster, &WindowSet::for_raster(&raster), &view, BG).unwrap();
    assert_eq!(bitmap.pixel(10, 10), Some([30, 30, 30, 255]));
    assert_eq!(bitmap.pixel(10, 200), Some([200, 100, 50, 255]));
    assert_eq!(bitmap.pixel(10, 399), Some([30, 30, 30, 255]));
}

#[test]
fn test_windows_apply_per_channel() {
    let raster = common::solid_rgb8(2, 2, [100, 100, 100]);
    let mut windows = WindowSet::for_raster(&raster);
    windows.set_window(0, 0.0, 100.0).unwrap();
    windows.set_window(2, 100.0, 200.0).unwrap();
    let view = common::fitted_view(&raster, 2, 2);
    let bitmap = render(&raster, &windows, &view, BG).unwrap();
    assert_eq!(bitmap.pixel(0, 0), Some([255, 100, 0, 255]));
}

#[test]
fn test_alpha_passes_through() {
    let raster = common::solid_rgba8(2, 2, [10, 20, 30, 128]);
    let mut windows = WindowSet::for_raster(&raster);
    // The alpha window is not used for display.
    windows.set_window(3, 200.0, 210.0).unwrap();
    let view = common::fitted_view(&raster, 4, 4);
    let bitmap = render(&raster, &windows, &view, BG).unwrap();
    assert_eq!(bitmap.pixel(1, 1), Some([10, 20, 30, 128]));
}

#[test]
fn test_16bit_gray_alpha() {
    let raster = Raster::new(1, 1, 2, vec![32_768u16, 65_535]).unwrap();
    let view = common::fitted_view(&raster, 3, 3);
    let bitmap = render(&raster, &WindowSet::for_raster(&raster), &view, BG).unwrap();
    assert_eq!(bitmap.pixel(1, 1), Some([128, 128, 128, 255]));
}

#[test]
fn test_float_nan_renders_black() {
    let raster = common::gray_f32(2, 1, vec![f32::NAN, 1.0]);
    let view = common::fitted_view(&raster, 2, 1);
    let bitmap = render(&raster, &WindowSet::for_raster(&raster), &view, BG).unwrap();
    assert_eq!(bitmap.pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(bitmap.pixel(1, 0), Some([255, 255, 255, 255]));
}

#[test]
fn test_empty_viewport_renders_nothing() {
    let raster = common::gray8_sequence(4, 4);
    let view = common::fitted_view(&raster, 0, 0);
    let bitmap = render(&raster, &WindowSet::for_raster(&raster), &view, BG).unwrap();
    assert!(bitmap.pixels.is_empty());
}

#[test]
fn test_mismatched_view_rejected() {
    let raster = common::gray8_sequence(4, 4);
    let view = ViewState::new((5, 4), (10, 10), ZoomLimits::default());
    assert!(render(&raster, &WindowSet::for_raster(&raster), &view, BG).is_err());
}

#[test]
fn test_window_count_mismatch_names_both_counts() {
    let raster = common::gray8_sequence(4, 4);
    let rgb_windows = WindowSet::for_raster(&common::solid_rgb8(4, 4, [1, 2, 3]));
    let view = common::fitted_view(&raster, 10, 10);
    let err = render(&raster, &rgb_windows, &view, BG).unwrap_err();
    assert!(matches!(
        err,
        GlanceError::WindowCountMismatch {
            windows: 3,
            channels: 1
        }
    ));
    assert_eq!(err.to_string(), "3 channel windows for a 1-channel raster");
}

#[test]
fn test_render_is_pure() {
    let raster = common::gray8_sequence(31, 17);
    let view = common::fitted_view(&raster, 100, 80);
    let windows = WindowSet::for_raster(&raster);
    let a = render(&raster, &windows, &view, BG).unwrap();
    let b = render(&raster, &windows, &view, BG).unwrap();
    assert_eq!(a, b);
}

// ---------------------------------------------------------------------------
// Probe / display consistency
// ---------------------------------------------------------------------------

fn assert_consistent(raster: &Raster, windows: &WindowSet, view: &ViewState) {
    let bitmap = render(raster, windows, view, BG).unwrap();
    let (vw, vh) = view.viewport_size();
    for sy in (0..vh).step_by(3) {
        for sx in (0..vw).step_by(3) {
            let shown = bitmap.pixel(sx, sy).unwrap();
            match probe(raster, view, sx as f64, sy as f64) {
                ProbeReadout::OutOfImage => assert_eq!(shown, [30, 30, 30, 255]),
                ProbeReadout::Pixel { values, .. } => {
                    let expected = windows.map(values[0], 0).unwrap();
                    assert_eq!(shown[0], expected, "screen ({sx}, {sy})");
                }
            }
        }
    }
}

#[test]
fn test_probe_matches_display_sequential() {
    let raster = common::gray8_sequence(13, 7);
    let mut view = common::fitted_view(&raster, 97, 61);
    view.zoom_by(2.3, (20.0, 41.0));
    view.pan_by((-7.5, 3.0));
    let mut windows = WindowSet::for_raster(&raster);
    windows.set_window(0, 10.0, 80.0).unwrap();
    assert_consistent(&raster, &windows, &view);
}

#[test]
fn test_probe_matches_display_parallel() {
    let raster = common::gray16_from_fn(50, 40, |x, y| (x * 1000 + y * 7) as u16);
    let mut view = ViewState::new((50, 40), (320, 240), ZoomLimits::default());
    view.zoom_by(1.7, (100.0, 100.0));
    let windows = WindowSet::for_raster(&raster);
    assert_consistent(&raster, &windows, &view);
}
