//! Synthetic PNG fixture construction.
//!
//! Builds PNG byte streams from raw scanlines so tests control every
//! field: dimensions, color type, bit depth, palette, per-row filters,
//! and the compressed stream itself.

#![allow(dead_code)]

use std::io::Write;

use amaze::bytes::crc32;
use flate2::write::ZlibEncoder;
use flate2::Compression;

/// PNG file signature (magic bytes).
pub const SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Assemble one chunk record: length, type, payload, CRC.
pub fn chunk(kind: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(12 + payload.len());
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(payload);
    let mut crc_input = kind.to_vec();
    crc_input.extend_from_slice(payload);
    out.extend_from_slice(&crc32(&crc_input).to_be_bytes());
    out
}

/// A 13-byte IHDR payload wrapped in a chunk.
pub fn ihdr(width: u32, height: u32, bit_depth: u8, color_type: u8, interlace: u8) -> Vec<u8> {
    let mut payload = Vec::with_capacity(13);
    payload.extend_from_slice(&width.to_be_bytes());
    payload.extend_from_slice(&height.to_be_bytes());
    payload.extend_from_slice(&[bit_depth, color_type, 0, 0, interlace]);
    chunk(b"IHDR", &payload)
}

/// Compress bytes into a zlib stream.
pub fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("zlib write");
    encoder.finish().expect("zlib finish")
}

/// Samples per pixel for a PNG color type code.
pub fn channels(color_type: u8) -> usize {
    match color_type {
        0 | 3 => 1,
        2 => 3,
        4 => 2,
        6 => 4,
        other => panic!("bad color type {other}"),
    }
}

/// Filter byte distance to the previous pixel.
pub fn bpp(color_type: u8, bit_depth: u8) -> usize {
    (channels(color_type) * bit_depth as usize / 8).max(1)
}

fn paeth(west: u8, north: u8, northwest: u8) -> u8 {
    let estimate = i32::from(west) + i32::from(north) - i32::from(northwest);
    let dist = |n: u8| (estimate - i32::from(n)).abs();
    if dist(west) <= dist(north) && dist(west) <= dist(northwest) {
        west
    } else if dist(north) <= dist(northwest) {
        north
    } else {
        northwest
    }
}

/// Forward-filter raw scanlines into the serialized stream layout:
/// one filter byte followed by the filtered row, per scanline.
pub fn filter_rows(raw_rows: &[Vec<u8>], filters: &[u8], bpp: usize) -> Vec<u8> {
    let mut out = Vec::new();
    let row_len = raw_rows.first().map_or(0, Vec::len);
    let zero = vec![0u8; row_len];

    for (y, raw) in raw_rows.iter().enumerate() {
        let filter = filters[y % filters.len()];
        let prev = if y == 0 { &zero } else { &raw_rows[y - 1] };

        out.push(filter);
        for i in 0..raw.len() {
            let west = if i >= bpp { raw[i - bpp] } else { 0 };
            let north = prev[i];
            let northwest = if i >= bpp { prev[i - bpp] } else { 0 };
            let prediction = match filter {
                0 => 0,
                1 => west,
                2 => north,
                3 => ((u16::from(west) + u16::from(north)) >> 1) as u8,
                4 => paeth(west, north, northwest),
                other => panic!("bad filter {other}"),
            };
            out.push(raw[i].wrapping_sub(prediction));
        }
    }
    out
}

/// Assemble a complete PNG from raw scanlines.
///
/// `filters` is cycled across rows. `palette` supplies a PLTE payload
/// (RGB triplets) when present.
pub fn build_png(
    width: u32,
    height: u32,
    bit_depth: u8,
    color_type: u8,
    palette: Option<&[u8]>,
    raw_rows: &[Vec<u8>],
    filters: &[u8],
) -> Vec<u8> {
    let stream = filter_rows(raw_rows, filters, bpp(color_type, bit_depth));

    let mut out = SIGNATURE.to_vec();
    out.extend_from_slice(&ihdr(width, height, bit_depth, color_type, 0));
    if let Some(plte) = palette {
        out.extend_from_slice(&chunk(b"PLTE", plte));
    }
    out.extend_from_slice(&chunk(b"IDAT", &zlib(&stream)));
    out.extend_from_slice(&chunk(b"IEND", &[]));
    out
}

/// Like [`build_png`] but with the serialized scanline stream supplied
/// verbatim, for malformed-stream tests.
pub fn build_png_from_stream(
    width: u32,
    height: u32,
    bit_depth: u8,
    color_type: u8,
    stream: &[u8],
) -> Vec<u8> {
    let mut out = SIGNATURE.to_vec();
    out.extend_from_slice(&ihdr(width, height, bit_depth, color_type, 0));
    out.extend_from_slice(&chunk(b"IDAT", &zlib(stream)));
    out.extend_from_slice(&chunk(b"IEND", &[]));
    out
}
