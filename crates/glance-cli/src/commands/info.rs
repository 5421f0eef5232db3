use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use glance_core::io::decode::{Decoder, FileDecoder};

use crate::summary::print_image_summary;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image (png, jpeg, gif, bmp, tiff or npy)
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let raster = FileDecoder
        .decode(&args.file)
        .with_context(|| format!("Failed to decode {}", args.file.display()))?;
    let stats = raster.stats()?;
    print_image_summary(&args.file, &stats);
    Ok(())
}
