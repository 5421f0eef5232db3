mod app;
mod convert;
mod messages;
mod panels;
mod states;
mod workers;

use std::path::PathBuf;

use clap::Parser;
use glance_core::config::ViewerConfig;
use tracing::warn;

#[derive(Parser)]
#[command(name = "glance-gui", about = "Scientific image viewer")]
#[command(version)]
struct Args {
    /// Image to open on start
    path: Option<PathBuf>,

    /// Viewer config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let config = match args.config.as_deref() {
        Some(path) => ViewerConfig::load(path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Config not loaded, using defaults");
            ViewerConfig::default()
        }),
        None => ViewerConfig::default(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([480.0, 360.0])
            .with_drag_and_drop(true)
            .with_title("Glance"),
        ..Default::default()
    };

    eframe::run_native(
        "Glance",
        options,
        Box::new(move |cc| {
            let app = app::GlanceApp::new(&cc.egui_ctx, config, args.path)?;
            Ok(Box::new(app))
        }),
    )
}
