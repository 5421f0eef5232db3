//! The viewer session: the single owner of the loaded raster, its channel
//! windows and the view state.
//!
//! Decoding happens elsewhere (usually on a worker thread). A load is
//! bracketed by [`Session::begin_load`], which hands out a sequence-numbered
//! [`LoadTicket`], and [`Session::complete_load`], which swaps the new raster
//! in only if no newer load has started since. The swap replaces raster,
//! windows and view together, so the render path never sees a mix of old and
//! new state.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::compositor::{self, DisplayBitmap};
use crate::config::ViewerConfig;
use crate::error::{DecodeError, GlanceError, Result};
use crate::probe::{self, ProbeReadout};
use crate::raster::Raster;
use crate::viewport::ViewState;
use crate::window::{auto_window, ChannelWindow, WindowSet};

/// Pairs a decode request with its eventual result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    pub seq: u64,
    pub path: PathBuf,
}

#[derive(Debug)]
pub enum LoadOutcome {
    /// The raster is now current.
    Applied,
    /// A newer load was started; the result was dropped.
    Stale,
    /// Decoding failed; whatever was shown before stays shown.
    Failed(DecodeError),
}

/// Everything scoped to one loaded raster.
#[derive(Clone, Debug)]
pub struct LoadedImage {
    pub path: Option<PathBuf>,
    pub raster: Arc<Raster>,
    pub windows: WindowSet,
    pub view: ViewState,
}

pub struct Session {
    config: ViewerConfig,
    viewport: (usize, usize),
    current: Option<LoadedImage>,
    latest_seq: u64,
}

impl Session {
    pub fn new(config: ViewerConfig, viewport: (usize, usize)) -> Self {
        Self {
            config,
            viewport,
            current: None,
            latest_seq: 0,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.current.as_ref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.current.as_ref().and_then(|img| img.path.as_deref())
    }

    /// Start a load. Any ticket issued earlier becomes stale.
    pub fn begin_load(&mut self, path: impl Into<PathBuf>) -> LoadTicket {
        self.latest_seq += 1;
        LoadTicket {
            seq: self.latest_seq,
            path: path.into(),
        }
    }

    pub fn is_latest(&self, ticket: &LoadTicket) -> bool {
        ticket.seq == self.latest_seq
    }

    /// Hand back the result of the decode started with `ticket`.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: std::result::Result<Raster, DecodeError>,
    ) -> LoadOutcome {
        if !self.is_latest(&ticket) {
            info!(seq = ticket.seq, latest = self.latest_seq, "Discarding stale load");
            return LoadOutcome::Stale;
        }
        match result {
            Ok(raster) => {
                self.install(raster, Some(ticket.path));
                LoadOutcome::Applied
            }
            Err(e) => {
                warn!(path = %ticket.path.display(), error = %e, "Load failed");
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Install an already-decoded raster synchronously.
    pub fn load_raster(&mut self, raster: Raster, path: Option<PathBuf>) {
        self.latest_seq += 1;
        self.install(raster, path);
    }

    fn install(&mut self, raster: Raster, path: Option<PathBuf>) {
        let mut windows = WindowSet::for_raster(&raster);
        if self.config.contrast.auto_on_load {
            match auto_window(&raster, &self.config.auto_window_params()) {
                Ok(auto) => {
                    for (c, w) in auto.into_iter().enumerate() {
                        if let Err(e) = windows.set_window(c, w.lower, w.upper) {
                            warn!(channel = c, error = %e, "Auto-window not applied");
                        }
                    }
                }
                Err(e) => warn!(error = %e, "Auto-window on load skipped"),
            }
        }

        let mut view = ViewState::new(
            (raster.width(), raster.height()),
            self.viewport,
            self.config.zoom_limits(),
        );
        view.reset(self.config.view.initial_view);

        info!(
            width = raster.width(),
            height = raster.height(),
            channels = raster.channels(),
            depth = %raster.depth(),
            "Image loaded"
        );
        self.current = Some(LoadedImage {
            path,
            raster: Arc::new(raster),
            windows,
            view,
        });
    }

    /// Forget the current image. Loads still in flight become stale.
    pub fn clear(&mut self) {
        self.latest_seq += 1;
        self.current = None;
    }

    fn loaded_mut(&mut self) -> Result<&mut LoadedImage> {
        self.current.as_mut().ok_or(GlanceError::EmptyImage)
    }

    // ---------------------------------------------------------------------
    // Contrast
    // ---------------------------------------------------------------------

    pub fn set_window(&mut self, channel: usize, lower: f64, upper: f64) -> Result<()> {
        self.loaded_mut()?.windows.set_window(channel, lower, upper)
    }

    /// Linked adjustment of every intensity channel (alpha is left alone).
    pub fn set_all_windows(&mut self, lower: f64, upper: f64) -> Result<()> {
        let img = self.loaded_mut()?;
        let channels = img.raster.layout().color_channels();
        img.windows.set_all(0..channels, lower, upper)
    }

    pub fn reset_windows(&mut self) -> Result<()> {
        let img = self.loaded_mut()?;
        img.windows = WindowSet::for_raster(&img.raster);
        Ok(())
    }

    /// Compute and apply the auto-window. Returns the windows applied.
    pub fn auto_contrast(&mut self) -> Result<Vec<ChannelWindow>> {
        let params = self.config.auto_window_params();
        let img = self.loaded_mut()?;
        let windows = auto_window(&img.raster, &params)?;
        for (c, w) in windows.iter().enumerate() {
            img.windows.set_window(c, w.lower, w.upper)?;
        }
        Ok(windows)
    }

    // ---------------------------------------------------------------------
    // View
    // ---------------------------------------------------------------------

    pub fn resize_viewport(&mut self, width: usize, height: usize) {
        self.viewport = (width, height);
        if let Some(img) = self.current.as_mut() {
            img.view.resize((width, height));
        }
    }

    pub fn viewport(&self) -> (usize, usize) {
        self.viewport
    }

    pub fn fit_to_window(&mut self) {
        if let Some(img) = self.current.as_mut() {
            img.view.fit_to_window();
        }
    }

    pub fn actual_size(&mut self) {
        if let Some(img) = self.current.as_mut() {
            img.view.actual_size();
        }
    }

    pub fn zoom_by(&mut self, factor: f64, anchor: (f64, f64)) {
        if let Some(img) = self.current.as_mut() {
            img.view.zoom_by(factor, anchor);
        }
    }

    pub fn zoom_in(&mut self) {
        if let Some(img) = self.current.as_mut() {
            img.view.zoom_in();
        }
    }

    pub fn zoom_out(&mut self) {
        if let Some(img) = self.current.as_mut() {
            img.view.zoom_out();
        }
    }

    pub fn pan_by(&mut self, delta: (f64, f64)) {
        if let Some(img) = self.current.as_mut() {
            img.view.pan_by(delta);
        }
    }

    // ---------------------------------------------------------------------
    // Output
    // ---------------------------------------------------------------------

    /// Composite the current view. `None` when nothing is loaded.
    pub fn render(&self) -> Option<Result<DisplayBitmap>> {
        let img = self.current.as_ref()?;
        Some(compositor::render(
            &img.raster,
            &img.windows,
            &img.view,
            self.config.display.background,
        ))
    }

    pub fn probe(&self, sx: f64, sy: f64) -> ProbeReadout {
        match self.current.as_ref() {
            Some(img) => probe::probe(&img.raster, &img.view, sx, sy),
            None => ProbeReadout::OutOfImage,
        }
    }
}
