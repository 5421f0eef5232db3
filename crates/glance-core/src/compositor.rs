//! Turns raster + windows + view into the bitmap shown on screen.
//!
//! The screen -> image mapping is separable, so each frame precomputes the
//! source column for every destination column and the source row for every
//! destination row. Sampling is strictly nearest-neighbour: every output
//! pixel carries the windowed value of exactly one raw pixel.

use ndarray::Array3;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::{GlanceError, Result};
use crate::raster::{Raster, RasterData, Sample};
use crate::viewport::ViewState;
use crate::window::{ChannelMap, WindowSet};

/// RGBA8 bitmap sized to the viewport, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayBitmap {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<[u8; 4]>,
}

impl DisplayBitmap {
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Flat RGBA bytes, e.g. for handing to an image encoder.
    pub fn as_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }
}

/// Render the current view. Pure: the output depends only on the arguments.
pub fn render(
    raster: &Raster,
    windows: &WindowSet,
    view: &ViewState,
    background: [u8; 3],
) -> Result<DisplayBitmap> {
    if windows.len() != raster.channels() {
        return Err(GlanceError::WindowCountMismatch {
            windows: windows.len(),
            channels: raster.channels(),
        });
    }

    let (vw, vh) = view.viewport_size();
    let (iw, ih) = view.image_size();
    if (iw, ih) != (raster.width(), raster.height()) {
        return Err(GlanceError::InvalidDimensions {
            width: iw,
            height: ih,
        });
    }

    let columns: Vec<Option<usize>> = (0..vw)
        .map(|sx| source_index(view.screen_to_image(sx as f64, 0.0).0, iw))
        .collect();
    let rows: Vec<Option<usize>> = (0..vh)
        .map(|sy| source_index(view.screen_to_image(0.0, sy as f64).1, ih))
        .collect();

    let layout = raster.layout();
    let depth = raster.depth();
    let maps: Vec<ChannelMap> = (0..raster.channels())
        .map(|c| {
            if Some(c) == layout.alpha_channel() {
                ChannelMap::alpha(depth)
            } else {
                ChannelMap::build(windows.windows()[c], depth)
            }
        })
        .collect();

    let plan = Plan {
        columns: &columns,
        rows: &rows,
        maps: &maps,
        alpha: layout.alpha_channel(),
        color_channels: layout.color_channels(),
        background: [background[0], background[1], background[2], 255],
    };

    let mut pixels = vec![plan.background; vw * vh];
    match raster.data() {
        RasterData::U8(a) => plan.fill(a, &mut pixels, vw),
        RasterData::U16(a) => plan.fill(a, &mut pixels, vw),
        RasterData::F32(a) => plan.fill(a, &mut pixels, vw),
    }

    Ok(DisplayBitmap {
        width: vw,
        height: vh,
        pixels,
    })
}

/// Floor an image coordinate to a pixel index inside `[0, extent)`.
fn source_index(coord: f64, extent: usize) -> Option<usize> {
    let idx = coord.floor();
    if idx >= 0.0 && idx < extent as f64 {
        Some(idx as usize)
    } else {
        None
    }
}

struct Plan<'a> {
    columns: &'a [Option<usize>],
    rows: &'a [Option<usize>],
    maps: &'a [ChannelMap],
    alpha: Option<usize>,
    color_channels: usize,
    background: [u8; 4],
}

impl Plan<'_> {
    fn fill<T: Sample>(&self, data: &Array3<T>, pixels: &mut [[u8; 4]], width: usize) {
        if width == 0 {
            return;
        }
        if pixels.len() >= PARALLEL_PIXEL_THRESHOLD {
            pixels
                .par_chunks_mut(width)
                .zip(self.rows.par_iter())
                .for_each(|(out, row)| self.fill_row(data, *row, out));
        } else {
            for (out, row) in pixels.chunks_mut(width).zip(self.rows.iter()) {
                self.fill_row(data, *row, out);
            }
        }
    }

    fn fill_row<T: Sample>(&self, data: &Array3<T>, row: Option<usize>, out: &mut [[u8; 4]]) {
        let Some(y) = row else {
            return;
        };
        for (px, col) in out.iter_mut().zip(self.columns) {
            let Some(x) = *col else {
                continue;
            };
            *px = self.compose(data, y, x);
        }
    }

    #[inline]
    fn compose<T: Sample>(&self, data: &Array3<T>, y: usize, x: usize) -> [u8; 4] {
        let map = |c: usize| {
            let v = data[[y, x, c]];
            self.maps[c].apply(v.lut_index(), v.as_())
        };
        let alpha = self.alpha.map_or(255, map);
        if self.color_channels == 1 {
            let v = map(0);
            [v, v, v, alpha]
        } else {
            [map(0), map(1), map(2), alpha]
        }
    }
}
