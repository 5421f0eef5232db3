/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Default low percentile for auto-window, as a fraction in [0.0, 1.0].
pub const DEFAULT_LOW_PERCENTILE: f64 = 0.0035;

/// Default high percentile for auto-window, as a fraction in [0.0, 1.0].
pub const DEFAULT_HIGH_PERCENTILE: f64 = 0.9965;

/// Smallest zoom factor reachable through `zoom_by`.
pub const DEFAULT_ZOOM_MIN: f64 = 0.01;

/// Largest zoom factor reachable through `zoom_by`.
pub const DEFAULT_ZOOM_MAX: f64 = 256.0;

/// Multiplicative step for the zoom in / zoom out actions.
pub const DEFAULT_ZOOM_STEP: f64 = 1.3;

/// Background painted where the viewport shows no image (RGB).
pub const DEFAULT_BACKGROUND: [u8; 3] = [30, 30, 30];

/// Number of histogram bins used for float rasters.
pub const FLOAT_HISTOGRAM_BINS: usize = 1024;

/// Number of bins the 16-bit histogram is folded to for plotting.
pub const DISPLAY_HISTOGRAM_BINS: usize = 256;

/// Largest representable 8-bit sample.
pub const U8_MAX: f64 = 255.0;

/// Largest representable 16-bit sample.
pub const U16_MAX: f64 = 65_535.0;

/// File extensions accepted by the default decoder (lower case, no dot).
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "npy",
];
