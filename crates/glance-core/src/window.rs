//! Intensity windowing: raw sample values to display bytes.

use tracing::{debug, info};

use crate::consts::{DEFAULT_HIGH_PERCENTILE, DEFAULT_LOW_PERCENTILE, U16_MAX, U8_MAX};
use crate::error::{GlanceError, Result};
use crate::histogram::ChannelDistribution;
use crate::raster::{Raster, SampleDepth};

/// Raw-value range mapped to the full display range for one channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelWindow {
    pub lower: f64,
    pub upper: f64,
}

impl ChannelWindow {
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        if !lower.is_finite() || !upper.is_finite() || lower > upper {
            return Err(GlanceError::InvalidWindow { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// `clamp(round((raw - lower) / (upper - lower) * 255), 0, 255)`.
    ///
    /// A degenerate window (`upper == lower`) is a hard threshold: values at
    /// or above `lower` map to 255, values below to 0.
    pub fn map(&self, raw: f64) -> u8 {
        let span = self.upper - self.lower;
        if span <= 0.0 {
            return if raw >= self.lower { 255 } else { 0 };
        }
        let scaled = ((raw - self.lower) / span * 255.0).round();
        scaled.clamp(0.0, 255.0) as u8
    }
}

/// Percentile pair used by [`auto_window`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutoWindowParams {
    pub low_percentile: f64,
    pub high_percentile: f64,
}

impl Default for AutoWindowParams {
    fn default() -> Self {
        Self {
            low_percentile: DEFAULT_LOW_PERCENTILE,
            high_percentile: DEFAULT_HIGH_PERCENTILE,
        }
    }
}

/// One window per channel of the loaded raster.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowSet {
    windows: Vec<ChannelWindow>,
    bounds: (f64, f64),
}

impl WindowSet {
    /// Default windows for a freshly loaded raster.
    ///
    /// Integer rasters start at the full representable range. Float rasters
    /// have no useful representable range, so they start at the observed
    /// data range of each channel instead.
    pub fn for_raster(raster: &Raster) -> Self {
        let bounds = raster.representable_range();
        let windows = (0..raster.channels())
            .map(|c| {
                let (lower, upper) = if raster.depth().is_integer() {
                    bounds
                } else {
                    raster.channel_range(c).unwrap_or((0.0, 1.0))
                };
                ChannelWindow { lower, upper }
            })
            .collect();
        Self { windows, bounds }
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn get(&self, channel: usize) -> Result<ChannelWindow> {
        self.windows
            .get(channel)
            .copied()
            .ok_or(GlanceError::OutOfRange {
                x: 0,
                y: 0,
                channel,
            })
    }

    pub fn windows(&self) -> &[ChannelWindow] {
        &self.windows
    }

    /// Replace the window for one channel.
    ///
    /// Bounds are clamped into the representable range of the sample depth.
    /// On error the stored window is left untouched.
    pub fn set_window(&mut self, channel: usize, lower: f64, upper: f64) -> Result<()> {
        let window = self.checked(lower, upper)?;
        let slot = self.windows.get_mut(channel).ok_or(GlanceError::OutOfRange {
            x: 0,
            y: 0,
            channel,
        })?;
        *slot = window;
        debug!(channel, lower = window.lower, upper = window.upper, "Window set");
        Ok(())
    }

    /// Apply the same window to every channel in `channels`.
    pub fn set_all(&mut self, channels: std::ops::Range<usize>, lower: f64, upper: f64) -> Result<()> {
        let window = self.checked(lower, upper)?;
        if channels.end > self.windows.len() {
            return Err(GlanceError::OutOfRange {
                x: 0,
                y: 0,
                channel: channels.end - 1,
            });
        }
        for slot in &mut self.windows[channels] {
            *slot = window;
        }
        Ok(())
    }

    pub fn map(&self, raw: f64, channel: usize) -> Result<u8> {
        Ok(self.get(channel)?.map(raw))
    }

    fn checked(&self, lower: f64, upper: f64) -> Result<ChannelWindow> {
        let window = ChannelWindow::new(lower, upper)?;
        let (lo, hi) = self.bounds;
        Ok(ChannelWindow {
            lower: window.lower.clamp(lo, hi),
            upper: window.upper.clamp(lo, hi),
        })
    }
}

/// Compute an outlier-trimmed window for every channel.
///
/// Nothing is applied; callers pass the result to [`WindowSet::set_window`].
pub fn auto_window(raster: &Raster, params: &AutoWindowParams) -> Result<Vec<ChannelWindow>> {
    if raster.pixel_count() == 0 {
        return Err(GlanceError::EmptyImage);
    }

    let windows = (0..raster.channels())
        .map(|c| {
            let dist = ChannelDistribution::from_raster(raster, c)?;
            if dist.total() == 0 {
                let (lower, upper) = raster.channel_range(c)?;
                return ChannelWindow::new(lower, upper);
            }
            let lower = dist.percentile(params.low_percentile)?;
            let upper = dist.percentile(params.high_percentile)?;
            ChannelWindow::new(lower, upper.max(lower))
        })
        .collect::<Result<Vec<_>>>()?;

    info!(
        channels = windows.len(),
        low = params.low_percentile,
        high = params.high_percentile,
        "Auto-window computed"
    );
    Ok(windows)
}

/// Precomputed mapping for one channel.
///
/// Integer depths get a table indexed by the raw value, so rendering a frame
/// costs one lookup per sample. Float depths evaluate the window directly.
#[derive(Clone, Debug)]
pub enum ChannelMap {
    Lut(Vec<u8>),
    Window(ChannelWindow),
}

impl ChannelMap {
    pub fn build(window: ChannelWindow, depth: SampleDepth) -> Self {
        match depth {
            SampleDepth::U8 => ChannelMap::Lut(build_lut(window, U8_MAX as usize)),
            SampleDepth::U16 => ChannelMap::Lut(build_lut(window, U16_MAX as usize)),
            SampleDepth::F32 => ChannelMap::Window(window),
        }
    }

    /// Map through the alpha normalization instead of a user window.
    pub fn alpha(depth: SampleDepth) -> Self {
        match depth {
            SampleDepth::U8 => ChannelMap::build(ChannelWindow { lower: 0.0, upper: U8_MAX }, depth),
            SampleDepth::U16 => {
                ChannelMap::build(ChannelWindow { lower: 0.0, upper: U16_MAX }, depth)
            }
            SampleDepth::F32 => ChannelMap::Window(ChannelWindow { lower: 0.0, upper: 1.0 }),
        }
    }

    #[inline]
    pub fn apply(&self, lut_index: usize, raw: f64) -> u8 {
        match self {
            ChannelMap::Lut(table) => table[lut_index],
            ChannelMap::Window(window) => window.map(raw),
        }
    }
}

fn build_lut(window: ChannelWindow, max: usize) -> Vec<u8> {
    (0..=max).map(|v| window.map(v as f64)).collect()
}
