use std::fmt;

use glance_core::consts::{DISPLAY_HISTOGRAM_BINS, FLOAT_HISTOGRAM_BINS};
use glance_core::histogram::ChannelDistribution;
use glance_core::raster::{ChannelLayout, Raster};

/// Which window the contrast dialog edits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChannelChoice {
    /// Every intensity channel moves together.
    #[default]
    All,
    Channel(usize),
}

impl ChannelChoice {
    /// Choices offered for a layout. Alpha is never windowed.
    pub fn options(layout: ChannelLayout) -> Vec<ChannelChoice> {
        let mut out = Vec::with_capacity(4);
        if layout.color_channels() > 1 {
            out.push(ChannelChoice::All);
        }
        out.extend((0..layout.color_channels()).map(ChannelChoice::Channel));
        out
    }

    /// Channels this choice covers.
    pub fn channels(self, layout: ChannelLayout) -> std::ops::Range<usize> {
        match self {
            ChannelChoice::All => 0..layout.color_channels(),
            ChannelChoice::Channel(c) => c..c + 1,
        }
    }
}

impl fmt::Display for ChannelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelChoice::All => write!(f, "All channels"),
            ChannelChoice::Channel(c) => write!(f, "Channel {c}"),
        }
    }
}

/// Contrast dialog state.
#[derive(Default)]
pub struct ContrastState {
    pub choice: ChannelChoice,
    /// Last rejected edit, shown under the sliders.
    pub error: Option<String>,
    histogram: Option<(ChannelChoice, Vec<(f64, u64)>)>,
}

impl ContrastState {
    /// Forget everything tied to the previous image.
    pub fn reset(&mut self, raster: &Raster) {
        self.choice = ChannelChoice::options(raster.layout())
            .first()
            .copied()
            .unwrap_or_default();
        self.error = None;
        self.histogram = None;
    }

    /// Range the sliders span for the current choice.
    pub fn slider_range(&self, raster: &Raster) -> (f64, f64) {
        if raster.depth().is_integer() {
            return raster.representable_range();
        }
        self.choice
            .channels(raster.layout())
            .filter_map(|c| raster.channel_range(c).ok())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (a, b)| {
                (lo.min(a), hi.max(b))
            })
    }

    /// Binned histogram of the selected channels, computed once per choice.
    pub fn histogram(&mut self, raster: &Raster) -> &[(f64, u64)] {
        let stale = !matches!(&self.histogram, Some((choice, _)) if *choice == self.choice);
        if stale {
            let bins = build_histogram(raster, self.choice, self.slider_range(raster));
            self.histogram = Some((self.choice, bins));
        }
        self.histogram
            .as_ref()
            .map(|(_, bins)| bins.as_slice())
            .unwrap_or_default()
    }
}

fn build_histogram(raster: &Raster, choice: ChannelChoice, (lo, hi): (f64, f64)) -> Vec<(f64, u64)> {
    let bins = if raster.depth().is_integer() {
        DISPLAY_HISTOGRAM_BINS
    } else {
        FLOAT_HISTOGRAM_BINS
    };
    let mut total: Vec<(f64, u64)> = Vec::new();
    for c in choice.channels(raster.layout()) {
        let Ok(dist) = ChannelDistribution::from_raster(raster, c) else {
            continue;
        };
        let binned = dist.binned(bins, lo, hi);
        if total.is_empty() {
            total = binned;
        } else {
            for (acc, (_, count)) in total.iter_mut().zip(binned) {
                acc.1 += count;
            }
        }
    }
    total
}
