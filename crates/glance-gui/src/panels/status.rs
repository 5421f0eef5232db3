use crate::app::GlanceApp;

pub fn show(ctx: &egui::Context, app: &mut GlanceApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area, fixed height for 3 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 3.0 + spacing * 2.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..3 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.separator();

        // Status line
        ui.horizontal(|ui| {
            ui.monospace(&app.ui_state.probe_text);

            let Some(img) = app.session.image() else {
                if app.ui_state.loading {
                    ui.separator();
                    ui.spinner();
                }
                return;
            };
            let dims = format!(
                "{}x{} {} {}",
                img.raster.width(),
                img.raster.height(),
                img.raster.layout(),
                img.raster.depth()
            );
            let zoom = img.view.zoom();
            let name = img
                .path
                .as_deref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned());

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("1:1").clicked() {
                    app.actual_size();
                }
                if ui.small_button("Fit").clicked() {
                    app.fit_to_window();
                }
                if ui.small_button("+").clicked() {
                    app.zoom_in();
                }
                ui.label(format!("{:.0}%", zoom * 100.0));
                if ui.small_button("\u{2212}").clicked() {
                    app.zoom_out();
                }
                ui.separator();
                ui.label(dims);
                if let Some(name) = name {
                    ui.separator();
                    ui.label(name);
                }
                if app.ui_state.loading {
                    ui.spinner();
                }
            });
        });

        ui.add_space(2.0);
    });
}
