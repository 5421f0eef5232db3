//! Immutable decoded raster.
//!
//! Samples are stored in an `Array3` of shape `(height, width, channels)` in
//! standard layout, which is exactly the row-major, channel-interleaved order
//! decoders produce. A raster is never mutated after construction; loading a
//! new image replaces it wholesale.

use std::fmt;

use ndarray::Array3;
use num_traits::AsPrimitive;

use crate::consts::{U16_MAX, U8_MAX};
use crate::error::{GlanceError, Result};
use crate::histogram::ChannelDistribution;

/// Storage type of a single sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleDepth {
    U8,
    U16,
    F32,
}

impl SampleDepth {
    /// Full range a sample of this depth can hold.
    pub fn representable_range(self) -> (f64, f64) {
        match self {
            SampleDepth::U8 => (0.0, U8_MAX),
            SampleDepth::U16 => (0.0, U16_MAX),
            SampleDepth::F32 => (f32::MIN as f64, f32::MAX as f64),
        }
    }

    pub fn is_integer(self) -> bool {
        !matches!(self, SampleDepth::F32)
    }

    pub fn bits(self) -> u8 {
        match self {
            SampleDepth::U8 => 8,
            SampleDepth::U16 => 16,
            SampleDepth::F32 => 32,
        }
    }
}

impl fmt::Display for SampleDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleDepth::U8 => write!(f, "uint8"),
            SampleDepth::U16 => write!(f, "uint16"),
            SampleDepth::F32 => write!(f, "float32"),
        }
    }
}

/// Channel arrangement, derived from the channel count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelLayout {
    Gray,
    GrayAlpha,
    Rgb,
    Rgba,
}

impl ChannelLayout {
    pub fn from_count(channels: usize) -> Option<Self> {
        match channels {
            1 => Some(ChannelLayout::Gray),
            2 => Some(ChannelLayout::GrayAlpha),
            3 => Some(ChannelLayout::Rgb),
            4 => Some(ChannelLayout::Rgba),
            _ => None,
        }
    }

    pub fn channel_count(self) -> usize {
        match self {
            ChannelLayout::Gray => 1,
            ChannelLayout::GrayAlpha => 2,
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }

    /// Index of the alpha channel, if the layout has one.
    pub fn alpha_channel(self) -> Option<usize> {
        match self {
            ChannelLayout::GrayAlpha => Some(1),
            ChannelLayout::Rgba => Some(3),
            _ => None,
        }
    }

    /// Number of channels that carry intensity (everything but alpha).
    pub fn color_channels(self) -> usize {
        match self {
            ChannelLayout::Gray | ChannelLayout::GrayAlpha => 1,
            ChannelLayout::Rgb | ChannelLayout::Rgba => 3,
        }
    }
}

impl fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChannelLayout::Gray => "Gray",
            ChannelLayout::GrayAlpha => "Gray+Alpha",
            ChannelLayout::Rgb => "RGB",
            ChannelLayout::Rgba => "RGBA",
        };
        write!(f, "{name}")
    }
}

/// A sample type a raster can be built from.
pub trait Sample: Copy + Send + Sync + AsPrimitive<f64> + 'static {
    const DEPTH: SampleDepth;

    /// Index into a per-value lookup table. Only meaningful for integer depths.
    fn lut_index(self) -> usize;

    #[doc(hidden)]
    fn wrap(data: Array3<Self>) -> RasterData;
}

impl Sample for u8 {
    const DEPTH: SampleDepth = SampleDepth::U8;

    fn lut_index(self) -> usize {
        self as usize
    }

    fn wrap(data: Array3<Self>) -> RasterData {
        RasterData::U8(data)
    }
}

impl Sample for u16 {
    const DEPTH: SampleDepth = SampleDepth::U16;

    fn lut_index(self) -> usize {
        self as usize
    }

    fn wrap(data: Array3<Self>) -> RasterData {
        RasterData::U16(data)
    }
}

impl Sample for f32 {
    const DEPTH: SampleDepth = SampleDepth::F32;

    fn lut_index(self) -> usize {
        0
    }

    fn wrap(data: Array3<Self>) -> RasterData {
        RasterData::F32(data)
    }
}

/// Typed sample storage, shape `(height, width, channels)`.
#[derive(Clone, Debug)]
pub enum RasterData {
    U8(Array3<u8>),
    U16(Array3<u16>),
    F32(Array3<f32>),
}

/// Decoded pixel grid.
///
/// Float rasters may contain NaN or infinite samples; they are treated as
/// missing and left out of ranges and distributions.
#[derive(Clone, Debug)]
pub struct Raster {
    data: RasterData,
    layout: ChannelLayout,
    /// Observed (min, max) per channel.
    ranges: Vec<(f64, f64)>,
}

impl Raster {
    /// Build a raster from `width * height * channels` interleaved samples.
    pub fn new<T: Sample>(
        width: usize,
        height: usize,
        channels: usize,
        samples: Vec<T>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GlanceError::InvalidDimensions { width, height });
        }
        let layout = ChannelLayout::from_count(channels)
            .ok_or(GlanceError::UnsupportedChannelCount(channels))?;
        if samples.len() != width * height * channels {
            return Err(GlanceError::SampleCountMismatch {
                width,
                height,
                channels,
                actual: samples.len(),
            });
        }
        let actual = samples.len();
        let array = Array3::from_shape_vec((height, width, channels), samples).map_err(|_| {
            GlanceError::SampleCountMismatch {
                width,
                height,
                channels,
                actual,
            }
        })?;
        let ranges = channel_ranges(&array);

        Ok(Self {
            data: T::wrap(array),
            layout,
            ranges,
        })
    }

    pub fn width(&self) -> usize {
        self.dim().1
    }

    pub fn height(&self) -> usize {
        self.dim().0
    }

    pub fn channels(&self) -> usize {
        self.layout.channel_count()
    }

    pub fn pixel_count(&self) -> usize {
        self.width() * self.height()
    }

    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    pub fn depth(&self) -> SampleDepth {
        match self.data {
            RasterData::U8(_) => SampleDepth::U8,
            RasterData::U16(_) => SampleDepth::U16,
            RasterData::F32(_) => SampleDepth::F32,
        }
    }

    pub fn data(&self) -> &RasterData {
        &self.data
    }

    pub fn representable_range(&self) -> (f64, f64) {
        self.depth().representable_range()
    }

    /// Observed (min, max) of one channel.
    pub fn channel_range(&self, channel: usize) -> Result<(f64, f64)> {
        self.ranges
            .get(channel)
            .copied()
            .ok_or(GlanceError::OutOfRange {
                x: 0,
                y: 0,
                channel,
            })
    }

    /// Raw value of one sample, bounds-checked.
    pub fn sample(&self, x: i64, y: i64, channel: usize) -> Result<f64> {
        let in_bounds = x >= 0
            && y >= 0
            && (x as usize) < self.width()
            && (y as usize) < self.height()
            && channel < self.channels();
        if !in_bounds {
            return Err(GlanceError::OutOfRange { x, y, channel });
        }
        let idx = [y as usize, x as usize, channel];
        Ok(match &self.data {
            RasterData::U8(a) => a[idx] as f64,
            RasterData::U16(a) => a[idx] as f64,
            RasterData::F32(a) => a[idx] as f64,
        })
    }

    /// Raw values of every channel at one pixel.
    pub fn pixel(&self, x: i64, y: i64) -> Result<Vec<f64>> {
        (0..self.channels())
            .map(|c| self.sample(x, y, c))
            .collect()
    }

    /// Per-channel summary for the information views.
    pub fn stats(&self) -> Result<RasterStats> {
        let channels = (0..self.channels())
            .map(|c| {
                let dist = ChannelDistribution::from_raster(self, c)?;
                let (min, max) = self.ranges[c];
                Ok(ChannelStats {
                    min,
                    max,
                    distinct: dist.distinct(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RasterStats {
            width: self.width(),
            height: self.height(),
            depth: self.depth(),
            layout: self.layout,
            channels,
        })
    }

    fn dim(&self) -> (usize, usize, usize) {
        match &self.data {
            RasterData::U8(a) => a.dim(),
            RasterData::U16(a) => a.dim(),
            RasterData::F32(a) => a.dim(),
        }
    }
}

fn channel_ranges<T: Sample>(array: &Array3<T>) -> Vec<(f64, f64)> {
    let channels = array.dim().2;
    let mut ranges = vec![(f64::INFINITY, f64::NEG_INFINITY); channels];
    for pixel in array.rows() {
        for (c, &v) in pixel.iter().enumerate() {
            let v: f64 = v.as_();
            if !v.is_finite() {
                continue;
            }
            let (lo, hi) = &mut ranges[c];
            *lo = lo.min(v);
            *hi = hi.max(v);
        }
    }
    // A channel with no finite sample at all.
    for range in &mut ranges {
        if range.0 > range.1 {
            *range = (0.0, 0.0);
        }
    }
    ranges
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChannelStats {
    pub min: f64,
    pub max: f64,
    pub distinct: usize,
}

/// Summary shown by the information dialog and the `info` command.
#[derive(Clone, Debug)]
pub struct RasterStats {
    pub width: usize,
    pub height: usize,
    pub depth: SampleDepth,
    pub layout: ChannelLayout,
    pub channels: Vec<ChannelStats>,
}
