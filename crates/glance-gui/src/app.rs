use std::path::PathBuf;
use std::sync::{mpsc, Arc};

use glance_core::config::ViewerConfig;
use glance_core::io::decode::FileDecoder;
use glance_core::io::navigation::FileCycle;
use glance_core::session::{LoadOutcome, Session};
use tracing::{debug, warn};

use crate::convert::bitmap_to_color_image;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{ContrastState, UIState, ViewportState};
use crate::workers;

pub struct GlanceApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub session: Session,
    pub ui_state: UIState,
    pub viewport: ViewportState,
    pub contrast: ContrastState,
    /// Siblings of the current file for next/previous.
    pub cycle: Option<FileCycle>,
}

impl GlanceApp {
    pub fn new(
        ctx: &egui::Context,
        config: ViewerConfig,
        initial: Option<PathBuf>,
    ) -> std::io::Result<Self> {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = workers::spawn_worker(result_tx.clone(), ctx.clone(), Arc::new(FileDecoder))?;

        let mut app = Self {
            cmd_tx,
            result_tx,
            result_rx,
            session: Session::new(config, (0, 0)),
            ui_state: UIState {
                probe_text: "-".into(),
                ..Default::default()
            },
            viewport: ViewportState::default(),
            contrast: ContrastState::default(),
            cycle: None,
        };
        if let Some(path) = initial {
            app.load_image(path);
        }
        Ok(app)
    }

    /// Start decoding `path` in the background. The current image stays up
    /// until the result arrives.
    pub fn load_image(&mut self, path: PathBuf) {
        let ticket = self.session.begin_load(path);
        self.ui_state.add_log(format!("Loading {}", ticket.path.display()));
        self.ui_state.loading = true;
        self.send_command(WorkerCommand::Decode { ticket });
    }

    pub fn close_image(&mut self) {
        self.session.clear();
        self.cycle = None;
        self.ui_state.loading = false;
        self.ui_state.stats = None;
        self.ui_state.show_info = false;
        self.ui_state.show_contrast = false;
        self.ui_state.probe_text = "-".into();
        self.viewport.dirty = true;
    }

    pub fn next_image(&mut self) {
        if let Some(path) = self.cycle.as_mut().and_then(|c| c.next_file()).map(|p| p.to_path_buf()) {
            self.load_image(path);
        }
    }

    pub fn previous_image(&mut self) {
        if let Some(path) = self
            .cycle
            .as_mut()
            .and_then(|c| c.previous_file())
            .map(|p| p.to_path_buf())
        {
            self.load_image(path);
        }
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::Decoded { ticket, result } => {
                    let path = ticket.path.clone();
                    match self.session.complete_load(ticket, result) {
                        LoadOutcome::Applied => self.on_loaded(path),
                        LoadOutcome::Stale => {
                            debug!(path = %path.display(), "Stale decode dropped");
                        }
                        LoadOutcome::Failed(e) => self.ui_state.report_load_error(&path, &e),
                    }
                }
                WorkerResult::FileChosen { path } => self.load_image(path),
            }
        }
    }

    fn on_loaded(&mut self, path: PathBuf) {
        self.ui_state.loading = false;
        self.ui_state.stats = None;
        self.ui_state.load_error = None;
        self.viewport.dirty = true;

        if let Some(img) = self.session.image() {
            self.contrast.reset(&img.raster);
            self.ui_state.add_log(format!(
                "Opened: {} ({}x{}, {} {})",
                path.display(),
                img.raster.width(),
                img.raster.height(),
                img.raster.layout(),
                img.raster.depth(),
            ));
        }

        // Keep the existing cycle when stepping inside the same directory.
        let same_dir = self
            .cycle
            .as_ref()
            .and_then(|c| c.current())
            .is_some_and(|p| p == path.as_path());
        if !same_dir {
            self.cycle = match FileCycle::around(&path) {
                Ok(cycle) => Some(cycle),
                Err(e) => {
                    warn!(error = %e, "Directory listing failed");
                    None
                }
            };
        }
    }

    pub fn auto_contrast(&mut self) {
        match self.session.auto_contrast() {
            Ok(windows) => {
                let text: Vec<String> = windows
                    .iter()
                    .map(|w| format!("[{}, {}]", w.lower, w.upper))
                    .collect();
                self.ui_state.add_log(format!("Auto contrast: {}", text.join(" ")));
                self.contrast.error = None;
                self.viewport.dirty = true;
            }
            Err(e) => self.ui_state.add_log(format!("ERROR: auto contrast: {e}")),
        }
    }

    pub fn reset_contrast(&mut self) {
        if self.session.reset_windows().is_ok() {
            self.contrast.error = None;
            self.viewport.dirty = true;
        }
    }

    pub fn fit_to_window(&mut self) {
        self.session.fit_to_window();
        self.viewport.dirty = true;
    }

    pub fn actual_size(&mut self) {
        self.session.actual_size();
        self.viewport.dirty = true;
    }

    pub fn zoom_in(&mut self) {
        self.session.zoom_in();
        self.viewport.dirty = true;
    }

    pub fn zoom_out(&mut self) {
        self.session.zoom_out();
        self.viewport.dirty = true;
    }

    /// Re-composite into the viewport texture if anything changed.
    pub fn refresh_texture(&mut self, ctx: &egui::Context) {
        if !self.viewport.dirty {
            return;
        }
        self.viewport.dirty = false;

        match self.session.render() {
            Some(Ok(bitmap)) => {
                if bitmap.width == 0 || bitmap.height == 0 {
                    return;
                }
                let image = bitmap_to_color_image(&bitmap);
                match self.viewport.texture.as_mut() {
                    Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
                    None => {
                        self.viewport.texture =
                            Some(ctx.load_texture("viewport", image, egui::TextureOptions::NEAREST));
                    }
                }
            }
            Some(Err(e)) => warn!(error = %e, "Render skipped"),
            None => self.viewport.texture = None,
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.first().and_then(|f| f.path.clone()));
        if let Some(path) = dropped {
            self.load_image(path);
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let pressed = |key| ctx.input(|i| i.key_pressed(key));
        if pressed(egui::Key::A) {
            self.auto_contrast();
        }
        if pressed(egui::Key::F) {
            self.fit_to_window();
        }
        if pressed(egui::Key::R) {
            self.actual_size();
        }
        if pressed(egui::Key::Plus) || pressed(egui::Key::Equals) {
            self.zoom_in();
        }
        if pressed(egui::Key::Minus) {
            self.zoom_out();
        }
        if pressed(egui::Key::ArrowRight) {
            self.next_image();
        }
        if pressed(egui::Key::ArrowLeft) {
            self.previous_image();
        }
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }
}

impl eframe::App for GlanceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();
        self.handle_dropped_files(ctx);
        self.handle_keys(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::viewport::show(ctx, self);
        panels::contrast::show(ctx, self);
        panels::info::show(ctx, self);

        // Load error dialog; the previous image stays on screen behind it.
        if let Some(msg) = self.ui_state.load_error.clone() {
            egui::Window::new("Cannot Open Image")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(msg);
                    ui.add_space(8.0);
                    ui.vertical_centered(|ui| {
                        if ui.button("OK").clicked() {
                            self.ui_state.load_error = None;
                        }
                    });
                });
        }

        // About dialog
        if self.ui_state.show_about {
            egui::Window::new("About Glance")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Glance");
                        ui.label("Scientific Image Viewer");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }
    }
}
