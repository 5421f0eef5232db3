use std::sync::Arc;

use egui_plot::{Bar, BarChart, Plot, VLine};
use glance_core::window::ChannelWindow;

use crate::app::GlanceApp;
use crate::states::ChannelChoice;

/// Height of the histogram chart in pixels.
const CHART_HEIGHT: f32 = 120.0;

pub fn show(ctx: &egui::Context, app: &mut GlanceApp) {
    if !app.ui_state.show_contrast {
        return;
    }
    let Some(img) = app.session.image() else {
        return;
    };
    let raster = Arc::clone(&img.raster);

    let mut open = true;
    egui::Window::new("Contrast")
        .open(&mut open)
        .resizable(false)
        .default_width(320.0)
        .show(ctx, |ui| {
            let options = ChannelChoice::options(raster.layout());
            if options.len() > 1 {
                crate::panels::enum_combo(ui, "Channel", &mut app.contrast.choice, &options);
            }

            let (lo, hi) = app.contrast.slider_range(&raster);
            let hi = if hi > lo { hi } else { lo + 1.0 };
            let channel = app.contrast.choice.channels(raster.layout()).start;
            let current = app
                .session
                .image()
                .and_then(|img| img.windows.get(channel).ok())
                .unwrap_or(ChannelWindow { lower: lo, upper: hi });

            ui.add_space(4.0);
            let bins = app.contrast.histogram(&raster).to_vec();
            histogram_chart(ui, &bins, current);

            ui.add_space(4.0);
            let integer = raster.depth().is_integer();
            let mut lower = current.lower;
            let mut upper = current.upper;
            let mut changed = false;
            changed |= bound_row(ui, "Lower", &mut lower, (lo, hi), integer);
            changed |= bound_row(ui, "Upper", &mut upper, (lo, hi), integer);

            if changed {
                let result = match app.contrast.choice {
                    ChannelChoice::All => app.session.set_all_windows(lower, upper),
                    ChannelChoice::Channel(c) => app.session.set_window(c, lower, upper),
                };
                match result {
                    Ok(()) => {
                        app.contrast.error = None;
                        app.viewport.dirty = true;
                    }
                    Err(e) => app.contrast.error = Some(e.to_string()),
                }
            }

            if let Some(err) = &app.contrast.error {
                ui.colored_label(egui::Color32::from_rgb(220, 80, 80), err);
            }

            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.button("Auto").clicked() {
                    app.auto_contrast();
                }
                if ui.button("Reset").clicked() {
                    app.reset_contrast();
                }
            });
        });

    app.ui_state.show_contrast = open;
}

/// Slider plus a drag value for precise entry. Returns `true` if edited.
fn bound_row(ui: &mut egui::Ui, label: &str, value: &mut f64, (lo, hi): (f64, f64), integer: bool) -> bool {
    ui.horizontal(|ui| {
        let mut slider = egui::Slider::new(&mut *value, lo..=hi).show_value(false).text(label);
        if integer {
            slider = slider.integer();
        }
        let mut changed = ui.add(slider).changed();

        let speed = if integer { 1.0 } else { (hi - lo) / 1000.0 };
        let mut drag = egui::DragValue::new(&mut *value).speed(speed);
        if integer {
            drag = drag.fixed_decimals(0);
        }
        changed |= ui.add(drag).changed();
        changed
    })
    .inner
}

fn histogram_chart(ui: &mut egui::Ui, bins: &[(f64, u64)], window: ChannelWindow) {
    let width = match bins {
        [a, b, ..] => b.0 - a.0,
        _ => 1.0,
    };
    let bars: Vec<Bar> = bins
        .iter()
        .map(|&(start, count)| {
            Bar::new(start + width / 2.0, count as f64)
                .width(width)
                .fill(egui::Color32::from_gray(160))
        })
        .collect();

    let marker = egui::Color32::from_rgb(255, 160, 40);
    Plot::new("contrast_histogram")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_grid(false)
        .show_y(false)
        .y_axis_label("count")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new("histogram", bars));
            plot_ui.vline(VLine::new("lower", window.lower).color(marker).width(1.5));
            plot_ui.vline(VLine::new("upper", window.upper).color(marker).width(1.5));
        });
}
