//! Per-channel intensity distributions.
//!
//! Integer rasters get an exact histogram with one bin per representable
//! value. Float rasters have no natural binning, so their samples are kept
//! sorted instead. Both answer percentile and distinct-value queries exactly.

use ndarray::{Array3, Axis};

use crate::error::{GlanceError, Result};
use crate::raster::{Raster, RasterData, Sample};

#[derive(Clone, Debug)]
pub enum ChannelDistribution {
    /// `counts[v]` is the number of samples equal to `v`.
    Counts { counts: Vec<u64>, total: usize },
    /// Every finite sample of the channel in ascending order.
    Sorted(Vec<f32>),
}

impl ChannelDistribution {
    pub fn from_raster(raster: &Raster, channel: usize) -> Result<Self> {
        if channel >= raster.channels() {
            return Err(GlanceError::OutOfRange {
                x: 0,
                y: 0,
                channel,
            });
        }
        Ok(match raster.data() {
            RasterData::U8(a) => Self::counts(a, channel, 1 << 8),
            RasterData::U16(a) => Self::counts(a, channel, 1 << 16),
            RasterData::F32(a) => {
                let mut sorted: Vec<f32> = a
                    .index_axis(Axis(2), channel)
                    .iter()
                    .copied()
                    .filter(|v| v.is_finite())
                    .collect();
                sorted.sort_by(|a, b| a.total_cmp(b));
                ChannelDistribution::Sorted(sorted)
            }
        })
    }

    fn counts<T: Sample>(array: &Array3<T>, channel: usize, bins: usize) -> Self {
        let mut counts = vec![0u64; bins];
        let plane = array.index_axis(Axis(2), channel);
        for &v in plane.iter() {
            counts[v.lut_index()] += 1;
        }
        ChannelDistribution::Counts {
            counts,
            total: plane.len(),
        }
    }

    pub fn total(&self) -> usize {
        match self {
            ChannelDistribution::Counts { total, .. } => *total,
            ChannelDistribution::Sorted(values) => values.len(),
        }
    }

    /// Value at fractional rank `p` in [0.0, 1.0].
    ///
    /// The rank is `floor(n * p)` clamped to the last sample, so `p = 0`
    /// yields the minimum and `p = 1` the maximum.
    pub fn percentile(&self, p: f64) -> Result<f64> {
        let n = self.total();
        if n == 0 {
            return Err(GlanceError::EmptyImage);
        }
        let rank = ((n as f64 * p.clamp(0.0, 1.0)) as usize).min(n - 1);

        match self {
            ChannelDistribution::Sorted(values) => Ok(values[rank] as f64),
            ChannelDistribution::Counts { counts, .. } => {
                let mut seen = 0usize;
                for (value, &count) in counts.iter().enumerate() {
                    seen += count as usize;
                    if seen > rank {
                        return Ok(value as f64);
                    }
                }
                Err(GlanceError::EmptyImage)
            }
        }
    }

    /// Number of distinct sample values.
    pub fn distinct(&self) -> usize {
        match self {
            ChannelDistribution::Counts { counts, .. } => {
                counts.iter().filter(|&&c| c > 0).count()
            }
            ChannelDistribution::Sorted(values) => {
                let mut distinct = 0;
                let mut prev: Option<f32> = None;
                for &v in values {
                    if prev != Some(v) {
                        distinct += 1;
                        prev = Some(v);
                    }
                }
                distinct
            }
        }
    }

    /// Fold the distribution into `bins` equal-width bins spanning `[lo, hi]`.
    ///
    /// Returns `(bin_start, count)` pairs for plotting. Samples outside the
    /// span are dropped.
    pub fn binned(&self, bins: usize, lo: f64, hi: f64) -> Vec<(f64, u64)> {
        let bins = bins.max(1);
        let width = if hi > lo { (hi - lo) / bins as f64 } else { 1.0 };
        let mut out: Vec<(f64, u64)> = (0..bins).map(|i| (lo + i as f64 * width, 0)).collect();

        let mut add = |value: f64, count: u64| {
            if value < lo || value > hi {
                return;
            }
            let idx = (((value - lo) / width) as usize).min(bins - 1);
            out[idx].1 += count;
        };

        match self {
            ChannelDistribution::Counts { counts, .. } => {
                for (value, &count) in counts.iter().enumerate() {
                    if count > 0 {
                        add(value as f64, count);
                    }
                }
            }
            ChannelDistribution::Sorted(values) => {
                for &v in values {
                    add(v as f64, 1);
                }
            }
        }
        out
    }
}
