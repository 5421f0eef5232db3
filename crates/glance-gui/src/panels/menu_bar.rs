use glance_core::consts::SUPPORTED_EXTENSIONS;

use crate::app::GlanceApp;
use crate::messages::WorkerResult;

pub fn show(ctx: &egui::Context, app: &mut GlanceApp) {
    let loaded = app.session.image().is_some();

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Open...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_file(ctx, app);
                }

                if ui.add_enabled(loaded, egui::Button::new("Close")).clicked() {
                    ui.close();
                    app.close_image();
                }

                ui.separator();

                let has_siblings = app.cycle.as_ref().is_some_and(|c| c.len() > 1);
                if ui
                    .add_enabled(has_siblings, egui::Button::new("Next Image").shortcut_text("Right"))
                    .clicked()
                {
                    ui.close();
                    app.next_image();
                }
                if ui
                    .add_enabled(has_siblings, egui::Button::new("Previous Image").shortcut_text("Left"))
                    .clicked()
                {
                    ui.close();
                    app.previous_image();
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                ui.add_enabled_ui(loaded, |ui| {
                    if ui.add(egui::Button::new("Fit to Window").shortcut_text("F")).clicked() {
                        ui.close();
                        app.fit_to_window();
                    }
                    if ui.add(egui::Button::new("Actual Size").shortcut_text("R")).clicked() {
                        ui.close();
                        app.actual_size();
                    }
                    if ui.add(egui::Button::new("Zoom In").shortcut_text("+")).clicked() {
                        ui.close();
                        app.zoom_in();
                    }
                    if ui.add(egui::Button::new("Zoom Out").shortcut_text("-")).clicked() {
                        ui.close();
                        app.zoom_out();
                    }
                });
            });

            ui.menu_button("Image", |ui| {
                ui.add_enabled_ui(loaded, |ui| {
                    if ui.button("Contrast...").clicked() {
                        ui.close();
                        app.ui_state.show_contrast = true;
                    }
                    if ui.add(egui::Button::new("Auto Contrast").shortcut_text("A")).clicked() {
                        ui.close();
                        app.auto_contrast();
                    }
                    if ui.button("Reset Contrast").clicked() {
                        ui.close();
                        app.reset_contrast();
                    }

                    ui.separator();

                    if ui.button("Information...").clicked() {
                        ui.close();
                        app.ui_state.show_info = true;
                    }
                });
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.ui_state.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            open_file(ctx, app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// Pick a file on a helper thread; the choice comes back as a worker result.
fn open_file(ctx: &egui::Context, app: &GlanceApp) {
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    let start_dir = app
        .session
        .path()
        .and_then(|p| p.parent())
        .map(|p| p.to_path_buf());
    std::thread::spawn(move || {
        let mut dialog = rfd::FileDialog::new()
            .add_filter("Images", SUPPORTED_EXTENSIONS)
            .add_filter("All files", &["*"]);
        if let Some(dir) = start_dir {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_file() {
            let _ = result_tx.send(WorkerResult::FileChosen { path });
            ctx.request_repaint();
        }
    });
}
