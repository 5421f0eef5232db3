use thiserror::Error;

/// Failure reported by a [`Decoder`](crate::io::decode::Decoder).
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Corrupt file: {0}")]
    CorruptFile(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for DecodeError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => DecodeError::Io(e),
            image::ImageError::Unsupported(e) => DecodeError::UnsupportedFormat(e.to_string()),
            other => DecodeError::CorruptFile(other.to_string()),
        }
    }
}

#[derive(Error, Debug)]
pub enum GlanceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Unsupported channel count: {0}")]
    UnsupportedChannelCount(usize),

    #[error("Sample count {actual} does not match {width}x{height}x{channels}")]
    SampleCountMismatch {
        width: usize,
        height: usize,
        channels: usize,
        actual: usize,
    },

    #[error("{windows} channel windows for a {channels}-channel raster")]
    WindowCountMismatch { windows: usize, channels: usize },

    #[error("Coordinate ({x}, {y}, channel {channel}) out of range")]
    OutOfRange { x: i64, y: i64, channel: usize },

    #[error("Invalid window: lower {lower} > upper {upper}")]
    InvalidWindow { lower: f64, upper: f64 },

    #[error("Image has no pixels")]
    EmptyImage,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, GlanceError>;
