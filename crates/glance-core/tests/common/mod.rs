#![allow(dead_code)]

use glance_core::raster::Raster;
use glance_core::viewport::{ViewState, ZoomLimits};

/// 4x4 8-bit grayscale raster whose rows read 0, 85, 170, 255.
pub fn row_ramp_4x4() -> Raster {
    let mut samples = Vec::with_capacity(16);
    for value in [0u8, 85, 170, 255] {
        samples.extend_from_slice(&[value; 4]);
    }
    Raster::new(4, 4, 1, samples).unwrap()
}

/// Grayscale 8-bit raster where pixel `(x, y)` holds `(x + y * width) % 256`.
pub fn gray8_sequence(width: usize, height: usize) -> Raster {
    let samples = (0..width * height).map(|i| (i % 256) as u8).collect();
    Raster::new(width, height, 1, samples).unwrap()
}

/// 16-bit grayscale raster filled from a closure over `(x, y)`.
pub fn gray16_from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> u16) -> Raster {
    let mut samples = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            samples.push(f(x, y));
        }
    }
    Raster::new(width, height, 1, samples).unwrap()
}

/// 8-bit RGB raster with every pixel set to `rgb`.
pub fn solid_rgb8(width: usize, height: usize, rgb: [u8; 3]) -> Raster {
    let samples = (0..width * height).flat_map(|_| rgb).collect();
    Raster::new(width, height, 3, samples).unwrap()
}

/// 8-bit RGBA raster with every pixel set to `rgba`.
pub fn solid_rgba8(width: usize, height: usize, rgba: [u8; 4]) -> Raster {
    let samples = (0..width * height).flat_map(|_| rgba).collect();
    Raster::new(width, height, 4, samples).unwrap()
}

/// Float grayscale raster from explicit samples.
pub fn gray_f32(width: usize, height: usize, samples: Vec<f32>) -> Raster {
    Raster::new(width, height, 1, samples).unwrap()
}

/// View over `raster` fitted to a `vw x vh` viewport with default limits.
pub fn fitted_view(raster: &Raster, vw: usize, vh: usize) -> ViewState {
    ViewState::new((raster.width(), raster.height()), (vw, vh), ZoomLimits::default())
}

/// Serialise a C-order `.npy` (format 1.0) with the given descr and shape.
pub fn build_npy(descr: &str, shape: &[usize], data: &[u8]) -> Vec<u8> {
    build_npy_with_order(descr, shape, false, data)
}

pub fn build_npy_with_order(
    descr: &str,
    shape: &[usize],
    fortran_order: bool,
    data: &[u8],
) -> Vec<u8> {
    let shape_text = match shape {
        [single] => format!("({single},)"),
        dims => format!(
            "({})",
            dims.iter().map(|d| d.to_string()).collect::<Vec<_>>().join(", ")
        ),
    };
    let order = if fortran_order { "True" } else { "False" };
    let mut dict =
        format!("{{'descr': '{descr}', 'fortran_order': {order}, 'shape': {shape_text}, }}");
    // Pad so the data starts on a 64-byte boundary, newline-terminated.
    let unpadded = 10 + dict.len() + 1;
    let padding = (64 - unpadded % 64) % 64;
    dict.push_str(&" ".repeat(padding));
    dict.push('\n');

    let mut buf = b"\x93NUMPY".to_vec();
    buf.extend_from_slice(&[1, 0]);
    buf.extend_from_slice(&(dict.len() as u16).to_le_bytes());
    buf.extend_from_slice(dict.as_bytes());
    assert_eq!(buf.len() % 64, 0);
    buf.extend_from_slice(data);
    buf
}
