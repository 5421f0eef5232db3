use crate::app::GlanceApp;

pub fn show(ctx: &egui::Context, app: &mut GlanceApp) {
    if !app.ui_state.show_info {
        return;
    }
    let Some(img) = app.session.image() else {
        return;
    };

    if app.ui_state.stats.is_none() {
        match img.raster.stats() {
            Ok(stats) => app.ui_state.stats = Some(stats),
            Err(e) => {
                app.ui_state.add_log(format!("ERROR: statistics: {e}"));
                app.ui_state.show_info = false;
                return;
            }
        }
    }
    let Some(stats) = app.ui_state.stats.as_ref() else {
        return;
    };
    let file = img
        .path
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".into());

    let mut open = true;
    egui::Window::new("Information")
        .open(&mut open)
        .resizable(false)
        .show(ctx, |ui| {
            crate::panels::section_header(ui, "Image", None);
            egui::Grid::new("info_image").num_columns(2).striped(true).show(ui, |ui| {
                ui.label("File");
                ui.label(&file);
                ui.end_row();
                ui.label("Format");
                ui.label(format!("{} ({}-bit)", stats.depth, stats.depth.bits()));
                ui.end_row();
                ui.label("Layout");
                ui.label(stats.layout.to_string());
                ui.end_row();
                ui.label("Width");
                ui.label(stats.width.to_string());
                ui.end_row();
                ui.label("Height");
                ui.label(stats.height.to_string());
                ui.end_row();
            });

            ui.add_space(6.0);
            crate::panels::section_header(ui, "Channels", Some(&stats.channels.len().to_string()));
            egui::Grid::new("info_channels").num_columns(4).striped(true).show(ui, |ui| {
                ui.strong("#");
                ui.strong("Min");
                ui.strong("Max");
                ui.strong("Distinct");
                ui.end_row();
                for (c, ch) in stats.channels.iter().enumerate() {
                    ui.label(c.to_string());
                    ui.monospace(format_value(ch.min));
                    ui.monospace(format_value(ch.max));
                    ui.monospace(ch.distinct.to_string());
                    ui.end_row();
                }
            });
        });

    app.ui_state.show_info = open;
}

fn format_value(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.6}")
    }
}
