use std::path::Path;

use image::{DynamicImage, ImageReader};
use tracing::debug;

use crate::consts::SUPPORTED_EXTENSIONS;
use crate::error::DecodeError;
use crate::io::npy;
use crate::raster::{Raster, Sample};

/// Turns a file into a [`Raster`].
///
/// Implementations must be callable from a worker thread.
pub trait Decoder: Send + Sync {
    fn decode(&self, path: &Path) -> Result<Raster, DecodeError>;
}

/// Default decoder: common raster formats through `image`, plus `.npy`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileDecoder;

impl Decoder for FileDecoder {
    fn decode(&self, path: &Path) -> Result<Raster, DecodeError> {
        let raster = match extension(path).as_deref() {
            Some("npy") => npy::read_npy(path)?,
            _ => decode_image(path)?,
        };
        debug!(
            path = %path.display(),
            width = raster.width(),
            height = raster.height(),
            channels = raster.channels(),
            depth = %raster.depth(),
            "Decoded"
        );
        Ok(raster)
    }
}

/// Whether the file extension is one the default decoder understands.
pub fn is_supported(path: &Path) -> bool {
    extension(path).is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

fn decode_image(path: &Path) -> Result<Raster, DecodeError> {
    // Sniff the content so a mislabelled file still opens.
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    from_dynamic(img)
}

/// Convert a decoded `image` buffer, keeping its native depth and channels.
///
/// Layouts without a direct counterpart (e.g. 16-bit float) are widened to
/// 8-bit RGBA.
pub fn from_dynamic(img: DynamicImage) -> Result<Raster, DecodeError> {
    let w = img.width() as usize;
    let h = img.height() as usize;
    match img {
        DynamicImage::ImageLuma8(buf) => build(w, h, 1, buf.into_raw()),
        DynamicImage::ImageLumaA8(buf) => build(w, h, 2, buf.into_raw()),
        DynamicImage::ImageRgb8(buf) => build(w, h, 3, buf.into_raw()),
        DynamicImage::ImageRgba8(buf) => build(w, h, 4, buf.into_raw()),
        DynamicImage::ImageLuma16(buf) => build(w, h, 1, buf.into_raw()),
        DynamicImage::ImageLumaA16(buf) => build(w, h, 2, buf.into_raw()),
        DynamicImage::ImageRgb16(buf) => build(w, h, 3, buf.into_raw()),
        DynamicImage::ImageRgba16(buf) => build(w, h, 4, buf.into_raw()),
        DynamicImage::ImageRgb32F(buf) => build(w, h, 3, buf.into_raw()),
        DynamicImage::ImageRgba32F(buf) => build(w, h, 4, buf.into_raw()),
        other => build(w, h, 4, other.to_rgba8().into_raw()),
    }
}

pub(crate) fn build<T: Sample>(
    width: usize,
    height: usize,
    channels: usize,
    samples: Vec<T>,
) -> Result<Raster, DecodeError> {
    Raster::new(width, height, channels, samples)
        .map_err(|e| DecodeError::CorruptFile(e.to_string()))
}
