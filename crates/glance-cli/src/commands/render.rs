use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use image::RgbaImage;
use tracing::info;

use super::{apply_zoom, open_session, ViewArgs};

#[derive(Args)]
pub struct RenderArgs {
    /// Input image
    pub file: PathBuf,

    /// Output PNG
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,

    /// Apply the percentile auto-window before rendering
    #[arg(long)]
    pub auto: bool,

    /// Window for every colour channel, as LOWER UPPER in raw units
    #[arg(long, num_args = 2, value_names = ["LOWER", "UPPER"], allow_negative_numbers = true)]
    pub window: Option<Vec<f64>>,

    /// Zoom factor anchored at the viewport centre (default: fit)
    #[arg(long)]
    pub zoom: Option<f64>,

    #[command(flatten)]
    pub view: ViewArgs,
}

pub fn run(args: &RenderArgs) -> Result<()> {
    let mut session = open_session(&args.file, &args.view)?;

    if args.auto {
        session.auto_contrast()?;
    }
    if let Some(window) = args.window.as_deref() {
        if let [lower, upper] = *window {
            session
                .set_all_windows(lower, upper)
                .context("Invalid --window")?;
        }
    }
    if let Some(zoom) = args.zoom {
        apply_zoom(&mut session, zoom);
    }

    let Some(bitmap) = session.render() else {
        anyhow::bail!("Nothing loaded");
    };
    let bitmap = bitmap?;
    let img = RgbaImage::from_raw(
        bitmap.width as u32,
        bitmap.height as u32,
        bitmap.as_rgba_bytes(),
    )
    .context("Bitmap size does not match viewport")?;
    img.save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!(output = %args.output.display(), "Rendered");
    println!("Saved {}x{} render to {}", bitmap.width, bitmap.height, args.output.display());
    Ok(())
}
