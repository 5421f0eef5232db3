//! Reader for NumPy `.npy` arrays.
//!
//! Accepts format versions 1 to 3 holding a 2-D `(height, width)` or 3-D
//! `(height, width, channels)` array with 1 to 4 channels. `uint8` and
//! `bool` stay 8-bit, `uint16` stays 16-bit, everything else becomes 32-bit
//! float.

use std::fs::File;
use std::io::Cursor;
use std::path::Path;

use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt};
use memmap2::Mmap;
use ndarray::{Array3, ShapeBuilder};

use crate::error::DecodeError;
use crate::io::decode::build;
use crate::raster::{Raster, Sample};

const NPY_MAGIC: &[u8; 6] = b"\x93NUMPY";
const NPY_PREAMBLE: usize = 8;

/// Element type named by the `descr` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NpyKind {
    Bool,
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
}

impl NpyKind {
    pub fn size(self) -> usize {
        match self {
            NpyKind::Bool | NpyKind::U8 | NpyKind::I8 => 1,
            NpyKind::U16 | NpyKind::I16 => 2,
            NpyKind::U32 | NpyKind::I32 | NpyKind::F32 => 4,
            NpyKind::U64 | NpyKind::I64 | NpyKind::F64 => 8,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NpyHeader {
    pub kind: NpyKind,
    pub big_endian: bool,
    pub fortran_order: bool,
    pub shape: Vec<usize>,
    /// Offset of the first data byte.
    pub data_offset: usize,
}

impl NpyHeader {
    /// `(height, width, channels)` of the stored array.
    pub fn dims(&self) -> Result<(usize, usize, usize), DecodeError> {
        match self.shape.as_slice() {
            &[h, w] => Ok((h, w, 1)),
            &[h, w, c] if (1..=4).contains(&c) => Ok((h, w, c)),
            &[_, _, c] => Err(DecodeError::UnsupportedFormat(format!(
                "npy array with {c} channels"
            ))),
            other => Err(DecodeError::UnsupportedFormat(format!(
                "npy array with {} dimensions",
                other.len()
            ))),
        }
    }
}

/// Memory-map and decode a `.npy` file.
pub fn read_npy(path: &Path) -> Result<Raster, DecodeError> {
    let file = File::open(path)?;
    let mmap = unsafe { Mmap::map(&file)? };
    parse_npy(&mmap)
}

/// Decode a complete `.npy` byte image.
pub fn parse_npy(bytes: &[u8]) -> Result<Raster, DecodeError> {
    let header = parse_header(bytes)?;
    let (height, width, channels) = header.dims()?;

    let needed = height
        .checked_mul(width)
        .and_then(|n| n.checked_mul(channels))
        .and_then(|n| n.checked_mul(header.kind.size()))
        .ok_or_else(|| DecodeError::CorruptFile("npy shape overflows".into()))?;
    let available = bytes.len().saturating_sub(header.data_offset);
    if available < needed {
        return Err(DecodeError::CorruptFile(format!(
            "npy data truncated: expected {needed} bytes, got {available}"
        )));
    }
    let raw = &bytes[header.data_offset..header.data_offset + needed];

    if header.big_endian {
        decode_samples::<BigEndian>(raw, &header, (height, width, channels))
    } else {
        decode_samples::<LittleEndian>(raw, &header, (height, width, channels))
    }
}

pub fn parse_header(bytes: &[u8]) -> Result<NpyHeader, DecodeError> {
    if bytes.len() < NPY_PREAMBLE + 2 || &bytes[..6] != NPY_MAGIC {
        return Err(DecodeError::UnsupportedFormat(
            "missing NUMPY magic".into(),
        ));
    }
    let major = bytes[6];
    let mut cursor = Cursor::new(&bytes[NPY_PREAMBLE..]);
    let (header_len, header_start) = match major {
        1 => (cursor.read_u16::<LittleEndian>()? as usize, NPY_PREAMBLE + 2),
        2 | 3 => (cursor.read_u32::<LittleEndian>()? as usize, NPY_PREAMBLE + 4),
        v => {
            return Err(DecodeError::UnsupportedFormat(format!(
                "npy format version {v}"
            )));
        }
    };
    let data_offset = header_start + header_len;
    let text = bytes
        .get(header_start..data_offset)
        .ok_or_else(|| DecodeError::CorruptFile("npy header truncated".into()))?;
    let text = String::from_utf8_lossy(text);

    let descr = dict_value(&text, "descr")
        .and_then(quoted)
        .ok_or_else(|| DecodeError::CorruptFile("npy header has no descr".into()))?;
    let (kind, big_endian) = parse_descr(descr)?;

    let fortran_order = match dict_value(&text, "fortran_order") {
        Some(v) if v.starts_with("True") => true,
        Some(v) if v.starts_with("False") => false,
        _ => {
            return Err(DecodeError::CorruptFile(
                "npy header has no fortran_order".into(),
            ));
        }
    };

    let shape = dict_value(&text, "shape")
        .and_then(parse_shape)
        .ok_or_else(|| DecodeError::CorruptFile("npy header has no shape".into()))?;

    Ok(NpyHeader {
        kind,
        big_endian,
        fortran_order,
        shape,
        data_offset,
    })
}

/// Text following `'key':` in the header dict.
fn dict_value<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    let quoted_key = ["'", key, "'"].concat();
    let start = text.find(&quoted_key)? + quoted_key.len();
    let rest = text[start..].trim_start().strip_prefix(':')?;
    Some(rest.trim_start())
}

fn quoted(value: &str) -> Option<&str> {
    let quote = value.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let body = &value[1..];
    body.find(quote).map(|end| &body[..end])
}

fn parse_shape(value: &str) -> Option<Vec<usize>> {
    let body = value.strip_prefix('(')?;
    let body = &body[..body.find(')')?];
    body.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.trim_end_matches('L').parse().ok())
        .collect()
}

fn parse_descr(descr: &str) -> Result<(NpyKind, bool), DecodeError> {
    let (big_endian, code) = match descr.as_bytes().first() {
        Some(b'>') => (true, &descr[1..]),
        Some(b'<') => (false, &descr[1..]),
        Some(b'|') | Some(b'=') => (cfg!(target_endian = "big"), &descr[1..]),
        _ => (cfg!(target_endian = "big"), descr),
    };
    let kind = match code {
        "b1" | "?" => NpyKind::Bool,
        "u1" => NpyKind::U8,
        "i1" => NpyKind::I8,
        "u2" => NpyKind::U16,
        "i2" => NpyKind::I16,
        "u4" => NpyKind::U32,
        "i4" => NpyKind::I32,
        "u8" => NpyKind::U64,
        "i8" => NpyKind::I64,
        "f4" => NpyKind::F32,
        "f8" => NpyKind::F64,
        other => {
            return Err(DecodeError::UnsupportedFormat(format!(
                "npy dtype '{other}'"
            )));
        }
    };
    Ok((kind, big_endian))
}

fn decode_samples<E: ByteOrder>(
    raw: &[u8],
    header: &NpyHeader,
    dims: (usize, usize, usize),
) -> Result<Raster, DecodeError> {
    let chunks = raw.chunks_exact(header.kind.size());
    match header.kind {
        NpyKind::Bool | NpyKind::U8 => assemble(raw.to_vec(), header, dims),
        NpyKind::U16 => assemble(chunks.map(E::read_u16).collect(), header, dims),
        NpyKind::I8 => assemble(chunks.map(|b| b[0] as i8 as f32).collect(), header, dims),
        NpyKind::I16 => assemble(chunks.map(|b| E::read_i16(b) as f32).collect(), header, dims),
        NpyKind::U32 => assemble(chunks.map(|b| E::read_u32(b) as f32).collect(), header, dims),
        NpyKind::I32 => assemble(chunks.map(|b| E::read_i32(b) as f32).collect(), header, dims),
        NpyKind::U64 => assemble(chunks.map(|b| E::read_u64(b) as f32).collect(), header, dims),
        NpyKind::I64 => assemble(chunks.map(|b| E::read_i64(b) as f32).collect(), header, dims),
        NpyKind::F32 => assemble(chunks.map(E::read_f32).collect(), header, dims),
        NpyKind::F64 => assemble(chunks.map(|b| E::read_f64(b) as f32).collect(), header, dims),
    }
}

fn assemble<T: Sample>(
    samples: Vec<T>,
    header: &NpyHeader,
    (height, width, channels): (usize, usize, usize),
) -> Result<Raster, DecodeError> {
    let samples = if header.fortran_order {
        // Column-major on disk; reorder to row-major interleaved.
        Array3::from_shape_vec((height, width, channels).f(), samples)
            .map_err(|e| DecodeError::CorruptFile(e.to_string()))?
            .iter()
            .copied()
            .collect()
    } else {
        samples
    };
    build(width, height, channels, samples)
}
