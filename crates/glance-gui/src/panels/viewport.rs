use crate::app::GlanceApp;

pub fn show(ctx: &egui::Context, app: &mut GlanceApp) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let rect = ui.available_rect_before_wrap();
            paint_background(ui, rect, app);

            // The session works in physical pixels.
            let ppp = ctx.pixels_per_point();
            sync_viewport_size(app, rect, ppp);

            let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());

            if app.session.image().is_some() {
                handle_zoom(ui, &response, app, rect, ppp);
                handle_pan(&response, app, ppp);
                if response.double_clicked() {
                    app.fit_to_window();
                }
                update_probe(&response, app, rect, ppp);
            }

            app.refresh_texture(ctx);

            if let Some(texture) = app.viewport.texture.as_ref() {
                draw_image(ui, texture.id(), rect);
            } else {
                show_placeholder(ui, rect, app.ui_state.loading);
            }
        });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect, app: &GlanceApp) {
    let [r, g, b] = app.session.config().display.background;
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_rgb(r, g, b));
}

fn sync_viewport_size(app: &mut GlanceApp, rect: egui::Rect, ppp: f32) {
    let size = (
        (rect.width() * ppp).round().max(0.0) as usize,
        (rect.height() * ppp).round().max(0.0) as usize,
    );
    if size != app.viewport.size {
        app.viewport.size = size;
        app.session.resize_viewport(size.0, size.1);
        app.viewport.dirty = true;
    }
}

/// Pointer position relative to the viewport, in physical pixels.
fn to_physical(pos: egui::Pos2, rect: egui::Rect, ppp: f32) -> (f64, f64) {
    let rel = (pos - rect.min) * ppp;
    (rel.x as f64, rel.y as f64)
}

fn handle_zoom(ui: &egui::Ui, response: &egui::Response, app: &mut GlanceApp, rect: egui::Rect, ppp: f32) {
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
    if scroll_delta == 0.0 || !response.hovered() {
        return;
    }
    let Some(mouse_pos) = ui.input(|i| i.pointer.hover_pos()) else {
        return;
    };

    let factor = (scroll_delta as f64 * 0.005).exp();
    app.session.zoom_by(factor, to_physical(mouse_pos, rect, ppp));
    app.viewport.dirty = true;
}

fn handle_pan(response: &egui::Response, app: &mut GlanceApp, ppp: f32) {
    if response.dragged_by(egui::PointerButton::Primary)
        || response.dragged_by(egui::PointerButton::Middle)
    {
        let delta = response.drag_delta() * ppp;
        if delta != egui::Vec2::ZERO {
            app.session.pan_by((delta.x as f64, delta.y as f64));
            app.viewport.dirty = true;
        }
    }
}

fn update_probe(response: &egui::Response, app: &mut GlanceApp, rect: egui::Rect, ppp: f32) {
    app.ui_state.probe_text = match response.hover_pos() {
        Some(pos) => {
            let (sx, sy) = to_physical(pos, rect, ppp);
            app.session.probe(sx, sy).to_string()
        }
        None => "-".into(),
    };
}

fn draw_image(ui: &egui::Ui, texture_id: egui::TextureId, rect: egui::Rect) {
    ui.painter().image(
        texture_id,
        rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn show_placeholder(ui: &egui::Ui, rect: egui::Rect, loading: bool) {
    let text = if loading { "Loading..." } else { "Open or drop an image" };
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::proportional(18.0),
        egui::Color32::from_gray(100),
    );
}
