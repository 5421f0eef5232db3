pub mod config;
pub mod info;
pub mod probe;
pub mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use glance_core::config::ViewerConfig;
use glance_core::io::decode::{Decoder, FileDecoder};
use glance_core::session::{LoadOutcome, Session};

/// Viewport and config flags shared by `render` and `probe`.
#[derive(Args)]
pub struct ViewArgs {
    /// Viewport width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: usize,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: usize,

    /// Viewer config file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub fn load_config(path: Option<&Path>) -> Result<ViewerConfig> {
    match path {
        Some(p) => ViewerConfig::load(p)
            .with_context(|| format!("Failed to load config from {}", p.display())),
        None => Ok(ViewerConfig::default()),
    }
}

/// Decode `file` into a fresh session sized to the requested viewport.
pub fn open_session(file: &Path, view: &ViewArgs) -> Result<Session> {
    let config = load_config(view.config.as_deref())?;
    let mut session = Session::new(config, (view.width, view.height));
    let ticket = session.begin_load(file);
    match session.complete_load(ticket, FileDecoder.decode(file)) {
        LoadOutcome::Applied => Ok(session),
        LoadOutcome::Failed(e) => {
            Err(e).with_context(|| format!("Failed to decode {}", file.display()))
        }
        LoadOutcome::Stale => anyhow::bail!("Load of {} was superseded", file.display()),
    }
}

/// Zoom to an absolute factor around the viewport centre.
pub fn apply_zoom(session: &mut Session, zoom: f64) {
    let Some(current) = session.image().map(|img| img.view.zoom()) else {
        return;
    };
    let (vw, vh) = session.viewport();
    session.zoom_by(zoom / current, (vw as f64 / 2.0, vh as f64 / 2.0));
}
