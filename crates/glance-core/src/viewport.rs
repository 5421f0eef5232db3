//! Pan/zoom state and the screen <-> image coordinate mapping.
//!
//! Image space has pixel `(x, y)` covering `[x, x+1) x [y, y+1)`. The pan
//! offset is the image-space point shown at the centre of the viewport, so
//!
//! ```text
//! image = (screen - viewport / 2) / zoom + pan
//! screen = (image - pan) * zoom + viewport / 2
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{DEFAULT_ZOOM_MAX, DEFAULT_ZOOM_MIN, DEFAULT_ZOOM_STEP};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    /// Zoom follows the viewport size.
    Fit,
    /// Zoom and pan set by the user; resizing only changes the visible crop.
    Free,
}

/// How the view is initialised when an image is loaded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InitialView {
    /// Always fit the image to the viewport.
    #[default]
    Fit,
    /// Show at 1:1 when the image fits, otherwise fit.
    ActualSizeIfSmaller,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
    /// Factor applied by one zoom in / zoom out step.
    pub step: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: DEFAULT_ZOOM_MIN,
            max: DEFAULT_ZOOM_MAX,
            step: DEFAULT_ZOOM_STEP,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    zoom: f64,
    pan: (f64, f64),
    viewport: (usize, usize),
    image: (usize, usize),
    mode: ViewMode,
    limits: ZoomLimits,
}

impl ViewState {
    /// New view over an `image_w x image_h` raster, fitted to the viewport.
    pub fn new(image: (usize, usize), viewport: (usize, usize), limits: ZoomLimits) -> Self {
        let mut view = Self {
            zoom: 1.0,
            pan: (image.0 as f64 / 2.0, image.1 as f64 / 2.0),
            viewport,
            image,
            mode: ViewMode::Fit,
            limits,
        };
        view.fit_to_window();
        view
    }

    /// Apply the load-time policy.
    pub fn reset(&mut self, initial: InitialView) {
        match initial {
            InitialView::Fit => self.fit_to_window(),
            InitialView::ActualSizeIfSmaller => {
                let (vw, vh) = self.viewport;
                let (w, h) = self.image;
                if w <= vw && h <= vh {
                    self.actual_size();
                } else {
                    self.fit_to_window();
                }
            }
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> (f64, f64) {
        self.pan
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn viewport_size(&self) -> (usize, usize) {
        self.viewport
    }

    pub fn image_size(&self) -> (usize, usize) {
        self.image
    }

    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Enter Fit mode: the whole image fits and is centred.
    pub fn fit_to_window(&mut self) {
        self.mode = ViewMode::Fit;
        let (vw, vh) = self.viewport;
        let (w, h) = self.image;
        if vw > 0 && vh > 0 {
            self.zoom = (vw as f64 / w as f64).min(vh as f64 / h as f64);
        }
        self.center();
        debug!(zoom = self.zoom, "Fit to window");
    }

    /// Enter Free mode at 1:1, centred.
    pub fn actual_size(&mut self) {
        self.mode = ViewMode::Free;
        self.zoom = 1.0;
        self.center();
        debug!("Actual size");
    }

    /// Multiply the zoom by `factor`, keeping the image point under `anchor`
    /// (screen coordinates) fixed on screen.
    ///
    /// Pan is not clamped here, so the anchor holds even over the background
    /// around the image. The next `pan_by` or `resize` clamps again.
    pub fn zoom_by(&mut self, factor: f64, anchor: (f64, f64)) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        self.mode = ViewMode::Free;

        let before = self.screen_to_image(anchor.0, anchor.1);
        let new_zoom = (self.zoom * factor).clamp(self.limits.min, self.limits.max);
        self.zoom = new_zoom;

        let (cx, cy) = self.viewport_center();
        self.pan = (
            before.0 - (anchor.0 - cx) / new_zoom,
            before.1 - (anchor.1 - cy) / new_zoom,
        );
        debug!(zoom = self.zoom, "Zoom");
    }

    /// One zoom step in, anchored at the viewport centre.
    pub fn zoom_in(&mut self) {
        let anchor = self.viewport_center();
        self.zoom_by(self.limits.step, anchor);
    }

    /// One zoom step out, anchored at the viewport centre.
    pub fn zoom_out(&mut self) {
        let anchor = self.viewport_center();
        self.zoom_by(1.0 / self.limits.step, anchor);
    }

    /// Drag the image by `delta` screen pixels.
    pub fn pan_by(&mut self, delta: (f64, f64)) {
        self.mode = ViewMode::Free;
        self.pan.0 -= delta.0 / self.zoom;
        self.pan.1 -= delta.1 / self.zoom;
        self.clamp_pan();
    }

    /// The host viewport changed size.
    pub fn resize(&mut self, viewport: (usize, usize)) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        match self.mode {
            ViewMode::Fit => self.fit_to_window(),
            ViewMode::Free => self.clamp_pan(),
        }
    }

    pub fn screen_to_image(&self, sx: f64, sy: f64) -> (f64, f64) {
        let (cx, cy) = self.viewport_center();
        (
            (sx - cx) / self.zoom + self.pan.0,
            (sy - cy) / self.zoom + self.pan.1,
        )
    }

    pub fn image_to_screen(&self, ix: f64, iy: f64) -> (f64, f64) {
        let (cx, cy) = self.viewport_center();
        (
            (ix - self.pan.0) * self.zoom + cx,
            (iy - self.pan.1) * self.zoom + cy,
        )
    }

    /// Integer image pixel under a screen coordinate, if any.
    pub fn pixel_at(&self, sx: f64, sy: f64) -> Option<(usize, usize)> {
        let (ix, iy) = self.screen_to_image(sx, sy);
        let (x, y) = (ix.floor(), iy.floor());
        let (w, h) = self.image;
        if x >= 0.0 && y >= 0.0 && x < w as f64 && y < h as f64 {
            Some((x as usize, y as usize))
        } else {
            None
        }
    }

    fn viewport_center(&self) -> (f64, f64) {
        (self.viewport.0 as f64 / 2.0, self.viewport.1 as f64 / 2.0)
    }

    fn center(&mut self) {
        self.pan = (self.image.0 as f64 / 2.0, self.image.1 as f64 / 2.0);
    }

    /// Keep at least one image pixel inside the viewport.
    fn clamp_pan(&mut self) {
        let (vw, vh) = self.viewport;
        if vw == 0 || vh == 0 {
            return;
        }
        self.pan.0 = clamp_axis(self.pan.0, self.image.0 as f64, vw as f64, self.zoom);
        self.pan.1 = clamp_axis(self.pan.1, self.image.1 as f64, vh as f64, self.zoom);
    }
}

fn clamp_axis(pan: f64, extent: f64, viewport: f64, zoom: f64) -> f64 {
    let half = viewport / (2.0 * zoom);
    let margin = extent.min(1.0);
    let lo = margin - half;
    let hi = extent - margin + half;
    if lo > hi {
        extent / 2.0
    } else {
        pan.clamp(lo, hi)
    }
}
