//! PNG decode driver.
//!
//! Validates the chunk sequence, inflates the concatenated IDAT stream,
//! and reconstructs scanlines in parallel. Scanlines are sharded across
//! workers; a row whose Up/Average/Paeth filter needs a previous row from
//! another shard is deferred and fixed up by the coordinator, so the
//! output is identical to a single-threaded decode.

use std::num::NonZeroUsize;
use std::thread;

use log::debug;
use miniz_oxide::inflate::decompress_to_vec_zlib_with_limit;

use crate::error::{Error, Result};
use crate::png::header::{ColorType, Header, Interlace};
use crate::png::pixel::Pixel;
use crate::png::{chunk, filter, palette, pixel, Image};

/// Soft target of scanlines per worker.
const SCANLINES_PER_WORKER: usize = 100;

/// Decode a PNG image from bytes.
pub fn decode(data: &[u8]) -> Result<Image> {
    let chunks = chunk::split_chunks(data)?;

    match chunks.first() {
        Some(first) if &first.kind == b"IHDR" => {}
        _ => return Err(Error::MissingHeader),
    }
    match chunks.last() {
        Some(last) if &last.kind == b"IEND" => {}
        _ => return Err(Error::MissingTerminator),
    }

    let header = Header::parse(&chunks[0].data)?;
    if header.interlace == Interlace::Adam7 {
        return Err(Error::UnsupportedInterlace);
    }
    debug!(
        "decoding {}x{} {:?} image at bit depth {}",
        header.width, header.height, header.color_type, header.bit_depth
    );

    let mut palette = Vec::new();
    let mut idat = Vec::new();
    for chunk in &chunks {
        match &chunk.kind {
            b"PLTE" if idat.is_empty() => {
                palette = palette::parse(&chunk.data, header.bit_depth)?;
            }
            b"IDAT" => idat.extend_from_slice(&chunk.data),
            // Ancillary chunks are skipped.
            _ => {}
        }
    }

    if idat.is_empty() {
        return Err(Error::MissingImageData);
    }
    if header.color_type == ColorType::Palette && palette.is_empty() {
        return Err(Error::MissingPalette);
    }

    let row_size = header.scanline_byte_size() + 1;
    let expected = row_size
        .checked_mul(header.height as usize)
        .ok_or(Error::InvalidDimensions {
            width: header.width,
            height: header.height,
        })?;

    // Inflate with one byte of headroom; the exact-length check below
    // reports the mismatch.
    let inflated = decompress_to_vec_zlib_with_limit(&idat, expected.saturating_add(1))
        .map_err(|err| Error::DecompressionFailed(err.to_string()))?;
    if inflated.len() != expected {
        return Err(Error::ScanlineSizeMismatch {
            expected,
            actual: inflated.len(),
        });
    }

    let pixels = decode_scanlines(header, &palette, &inflated)?;
    Ok(Image {
        header,
        palette,
        pixels,
    })
}

/// Per-shard results. `recon` and `pixels` are indexed relative to the
/// shard start; deferred rows hold `None` in both.
struct ShardOutput {
    recon: Vec<Option<Vec<u8>>>,
    pixels: Vec<Option<Vec<Pixel>>>,
    deferred: Vec<usize>,
}

fn decode_scanlines(
    header: Header,
    palette: &[palette::PaletteEntry],
    inflated: &[u8],
) -> Result<Vec<Vec<Pixel>>> {
    let height = header.height as usize;
    let row_size = header.scanline_byte_size() + 1;
    let rows: Vec<&[u8]> = inflated.chunks_exact(row_size).collect();
    debug_assert_eq!(rows.len(), height);

    let workers = worker_count(height);
    let shards = if workers == 1 {
        vec![decode_shard(header, palette, &rows, 0, height)?]
    } else {
        debug!("sharding {height} scanlines across {workers} workers");
        let shard_len = height / workers;
        let rows_ref = &rows;
        thread::scope(|s| {
            let handles: Vec<_> = (0..workers)
                .map(|w| {
                    let start = w * shard_len;
                    let end = if w == workers - 1 {
                        height
                    } else {
                        start + shard_len
                    };
                    s.spawn(move || decode_shard(header, palette, rows_ref, start, end))
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|payload| std::panic::resume_unwind(payload)))
                .collect::<Result<Vec<_>>>()
        })?
    };

    let mut recon: Vec<Option<Vec<u8>>> = Vec::with_capacity(height);
    let mut pixels: Vec<Option<Vec<Pixel>>> = Vec::with_capacity(height);
    let mut deferred = Vec::new();
    for shard in shards {
        recon.extend(shard.recon);
        pixels.extend(shard.pixels);
        deferred.extend(shard.deferred);
    }
    deferred.sort_unstable();

    if !deferred.is_empty() {
        debug!(
            "fixing up {} scanlines deferred at shard boundaries",
            deferred.len()
        );
    }

    let bpp = header.filter_unit();
    let zero_row = vec![0u8; header.scanline_byte_size()];
    for index in deferred {
        let filter = rows[index][0];
        let mut row = rows[index][1..].to_vec();
        // Ascending order guarantees the previous row is already
        // reconstructed.
        let prev = recon[index - 1].as_deref().unwrap_or(&zero_row);
        filter::unfilter_row(filter, &mut row, prev, bpp)?;
        let unpacked = pixel::unpack_row(&header, &row, palette.len())?;
        recon[index] = Some(row);
        pixels[index] = Some(unpacked);
    }

    debug_assert!(pixels.iter().all(Option::is_some));
    Ok(pixels.into_iter().flatten().collect())
}

/// Reconstruct and unpack the scanlines in `[start, end)`, deferring rows
/// whose filter input is not yet available.
fn decode_shard(
    header: Header,
    palette: &[palette::PaletteEntry],
    rows: &[&[u8]],
    start: usize,
    end: usize,
) -> Result<ShardOutput> {
    let bpp = header.filter_unit();
    let zero_row = vec![0u8; header.scanline_byte_size()];
    let mut out = ShardOutput {
        recon: Vec::with_capacity(end - start),
        pixels: Vec::with_capacity(end - start),
        deferred: Vec::new(),
    };

    for index in start..end {
        let filter = rows[index][0];

        let prev: &[u8] = if !filter::requires_previous_row(filter) || index == 0 {
            &zero_row
        } else if index == start || out.recon[index - start - 1].is_none() {
            // The previous row lives in another shard, or was itself
            // deferred; leave this row for the fixup pass.
            out.recon.push(None);
            out.pixels.push(None);
            out.deferred.push(index);
            continue;
        } else {
            out.recon[index - start - 1].as_deref().unwrap_or(&zero_row)
        };

        let mut recon = rows[index][1..].to_vec();
        filter::unfilter_row(filter, &mut recon, prev, bpp)?;
        let unpacked = pixel::unpack_row(&header, &recon, palette.len())?;
        out.recon.push(Some(recon));
        out.pixels.push(Some(unpacked));
    }

    Ok(out)
}

/// Worker count: the lesser of hardware parallelism and the soft target
/// of rows per worker, `ceil(scanlines / 100) + 1`.
fn worker_count(scanlines: usize) -> usize {
    let hardware = thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);
    hardware.min(scanlines.div_ceil(SCANLINES_PER_WORKER) + 1)
}
