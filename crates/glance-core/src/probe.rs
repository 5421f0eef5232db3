//! Raw pixel readout under a screen coordinate.

use std::fmt;

use crate::raster::{Raster, SampleDepth};
use crate::viewport::ViewState;

#[derive(Clone, Debug, PartialEq)]
pub enum ProbeReadout {
    /// The coordinate does not land on the image.
    OutOfImage,
    Pixel {
        x: usize,
        y: usize,
        /// Raw sample of every channel, in channel order.
        values: Vec<f64>,
        depth: SampleDepth,
    },
}

impl ProbeReadout {
    pub fn is_in_image(&self) -> bool {
        matches!(self, ProbeReadout::Pixel { .. })
    }

    /// `"(x, y)"`, or `-` when off the image.
    pub fn position_text(&self) -> String {
        match self {
            ProbeReadout::OutOfImage => "-".to_string(),
            ProbeReadout::Pixel { x, y, .. } => format!("({x}, {y})"),
        }
    }

    /// Channel values joined with `-`, or `-` when off the image.
    pub fn value_text(&self) -> String {
        match self {
            ProbeReadout::OutOfImage => "-".to_string(),
            ProbeReadout::Pixel { values, depth, .. } => values
                .iter()
                .map(|&v| format_sample(v, *depth))
                .collect::<Vec<_>>()
                .join("-"),
        }
    }
}

impl fmt::Display for ProbeReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeReadout::OutOfImage => write!(f, "-"),
            ProbeReadout::Pixel { .. } => {
                write!(f, "{}: {}", self.position_text(), self.value_text())
            }
        }
    }
}

fn format_sample(value: f64, depth: SampleDepth) -> String {
    if depth.is_integer() {
        format!("{}", value as i64)
    } else {
        format!("{}", value as f32)
    }
}

/// Look up the raw pixel under `(sx, sy)`.
///
/// Uses the same floor of `screen_to_image` as the compositor, so the
/// readout always describes the pixel drawn at that position.
pub fn probe(raster: &Raster, view: &ViewState, sx: f64, sy: f64) -> ProbeReadout {
    let Some((x, y)) = view.pixel_at(sx, sy) else {
        return ProbeReadout::OutOfImage;
    };
    match raster.pixel(x as i64, y as i64) {
        Ok(values) => ProbeReadout::Pixel {
            x,
            y,
            values,
            depth: raster.depth(),
        },
        Err(_) => ProbeReadout::OutOfImage,
    }
}
