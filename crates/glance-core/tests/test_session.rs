mod common;

use approx::assert_abs_diff_eq;

use glance_core::config::ViewerConfig;
use glance_core::error::{DecodeError, GlanceError};
use glance_core::probe::ProbeReadout;
use glance_core::session::{LoadOutcome, Session};
use glance_core::viewport::{InitialView, ViewMode};
use glance_core::window::ChannelWindow;

fn session() -> Session {
    Session::new(ViewerConfig::default(), (400, 400))
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
fn test_empty_session() {
    let s = session();
    assert!(s.image().is_none());
    assert!(s.render().is_none());
    assert_eq!(s.probe(10.0, 10.0), ProbeReadout::OutOfImage);
}

#[test]
fn test_complete_load_applies_latest() {
    let mut s = session();
    let ticket = s.begin_load("a.png");
    let outcome = s.complete_load(ticket, Ok(common::row_ramp_4x4()));
    assert!(matches!(outcome, LoadOutcome::Applied));
    let img = s.image().unwrap();
    assert_eq!(img.raster.width(), 4);
    assert_eq!(img.view.mode(), ViewMode::Fit);
    assert_eq!(s.path().unwrap().to_str(), Some("a.png"));
}

#[test]
fn test_stale_result_discarded() {
    let mut s = session();
    let first = s.begin_load("slow.png");
    let second = s.begin_load("fast.png");
    assert!(!s.is_latest(&first));

    let outcome = s.complete_load(second, Ok(common::solid_rgb8(2, 2, [1, 2, 3])));
    assert!(matches!(outcome, LoadOutcome::Applied));

    let outcome = s.complete_load(first, Ok(common::row_ramp_4x4()));
    assert!(matches!(outcome, LoadOutcome::Stale));
    assert_eq!(s.image().unwrap().raster.channels(), 3);
    assert_eq!(s.path().unwrap().to_str(), Some("fast.png"));
}

#[test]
fn test_failed_load_keeps_previous_image() {
    let mut s = session();
    s.load_raster(common::row_ramp_4x4(), None);
    s.set_window(0, 85.0, 170.0).unwrap();

    let ticket = s.begin_load("broken.png");
    let outcome = s.complete_load(ticket, Err(DecodeError::CorruptFile("bad crc".into())));
    assert!(matches!(outcome, LoadOutcome::Failed(DecodeError::CorruptFile(_))));
    let img = s.image().unwrap();
    assert_eq!(img.raster.height(), 4);
    assert_eq!(img.windows.get(0).unwrap(), ChannelWindow { lower: 85.0, upper: 170.0 });
}

#[test]
fn test_new_load_resets_windows_and_view() {
    let mut s = session();
    s.load_raster(common::row_ramp_4x4(), None);
    s.set_window(0, 85.0, 170.0).unwrap();
    s.zoom_by(3.0, (10.0, 10.0));

    s.load_raster(common::row_ramp_4x4(), None);
    let img = s.image().unwrap();
    assert_eq!(img.windows.get(0).unwrap(), ChannelWindow { lower: 0.0, upper: 255.0 });
    assert_eq!(img.view.mode(), ViewMode::Fit);
    assert_abs_diff_eq!(img.view.zoom(), 100.0);
}

#[test]
fn test_auto_on_load() {
    let mut config = ViewerConfig::default();
    config.contrast.auto_on_load = true;
    config.contrast.low_percentile = 0.0;
    config.contrast.high_percentile = 1.0;
    let mut s = Session::new(config, (100, 100));
    s.load_raster(common::gray16_from_fn(4, 4, |x, y| (100 + x + y) as u16), None);
    let img = s.image().unwrap();
    assert_eq!(img.windows.get(0).unwrap(), ChannelWindow { lower: 100.0, upper: 106.0 });
}

#[test]
fn test_auto_on_load_float_with_missing_samples() {
    let mut config = ViewerConfig::default();
    config.contrast.auto_on_load = true;
    config.contrast.low_percentile = 0.0;
    config.contrast.high_percentile = 1.0;
    let mut s = Session::new(config, (100, 100));
    s.load_raster(common::gray_f32(2, 2, vec![f32::NAN, 1.0, 2.0, 3.0]), None);
    let img = s.image().unwrap();
    assert_eq!(img.windows.get(0).unwrap(), ChannelWindow { lower: 1.0, upper: 3.0 });
}

#[test]
fn test_initial_view_from_config() {
    let mut config = ViewerConfig::default();
    config.view.initial_view = InitialView::ActualSizeIfSmaller;
    let mut s = Session::new(config, (400, 400));
    s.load_raster(common::row_ramp_4x4(), None);
    assert_abs_diff_eq!(s.image().unwrap().view.zoom(), 1.0);
}

// ---------------------------------------------------------------------------
// Contrast
// ---------------------------------------------------------------------------

#[test]
fn test_contrast_without_image() {
    let mut s = session();
    assert!(matches!(s.set_window(0, 0.0, 1.0), Err(GlanceError::EmptyImage)));
    assert!(matches!(s.auto_contrast(), Err(GlanceError::EmptyImage)));
}

#[test]
fn test_set_all_windows_skips_alpha() {
    let mut s = session();
    s.load_raster(common::solid_rgba8(2, 2, [5, 6, 7, 8]), None);
    s.set_all_windows(1.0, 9.0).unwrap();
    let windows = &s.image().unwrap().windows;
    assert_eq!(windows.get(2).unwrap(), ChannelWindow { lower: 1.0, upper: 9.0 });
    assert_eq!(windows.get(3).unwrap(), ChannelWindow { lower: 0.0, upper: 255.0 });
}

#[test]
fn test_reset_windows() {
    let mut s = session();
    s.load_raster(common::row_ramp_4x4(), None);
    s.auto_contrast().unwrap();
    s.reset_windows().unwrap();
    assert_eq!(
        s.image().unwrap().windows.get(0).unwrap(),
        ChannelWindow { lower: 0.0, upper: 255.0 }
    );
}

#[test]
fn test_windows_survive_pan_and_zoom() {
    let mut s = session();
    s.load_raster(common::row_ramp_4x4(), None);
    s.set_window(0, 10.0, 20.0).unwrap();
    s.zoom_in();
    s.pan_by((15.0, -4.0));
    s.resize_viewport(640, 480);
    s.fit_to_window();
    assert_eq!(
        s.image().unwrap().windows.get(0).unwrap(),
        ChannelWindow { lower: 10.0, upper: 20.0 }
    );
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

#[test]
fn test_resize_before_load_applies_to_next_image() {
    let mut s = Session::new(ViewerConfig::default(), (0, 0));
    s.resize_viewport(800, 400);
    s.load_raster(common::row_ramp_4x4(), None);
    assert_abs_diff_eq!(s.image().unwrap().view.zoom(), 100.0);
    assert_eq!(s.viewport(), (800, 400));
}

#[test]
fn test_clear_drops_image() {
    let mut s = session();
    s.load_raster(common::row_ramp_4x4(), None);
    s.clear();
    assert!(s.image().is_none());
}
