use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::{apply_zoom, open_session, ViewArgs};

#[derive(Args)]
pub struct ProbeArgs {
    /// Input image
    pub file: PathBuf,

    /// Viewport x coordinate
    pub x: f64,

    /// Viewport y coordinate
    pub y: f64,

    /// Zoom factor anchored at the viewport centre (default: fit)
    #[arg(long)]
    pub zoom: Option<f64>,

    #[command(flatten)]
    pub view: ViewArgs,
}

pub fn run(args: &ProbeArgs) -> Result<()> {
    let mut session = open_session(&args.file, &args.view)?;
    if let Some(zoom) = args.zoom {
        apply_zoom(&mut session, zoom);
    }
    println!("{}", session.probe(args.x, args.y));
    Ok(())
}
