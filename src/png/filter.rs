//! Scanline filter reversal.
//!
//! Each scanline is stored behind a one-byte filter selector. Filtering
//! operates on raw bytes, never on unpacked samples, so the same five
//! reversals cover every color type and bit depth.

use crate::error::{Error, Result};

/// Reconstruct a row in place by reversing its filter.
///
/// Every mode adds a prediction to each filtered byte, modulo 256. The
/// prediction draws on up to three already-reconstructed neighbors: the
/// byte `bpp` positions to the west in this row, the byte directly north
/// in `prev` (all zeros for the first row), and the byte northwest of
/// both.
pub(crate) fn unfilter_row(filter: u8, row: &mut [u8], prev: &[u8], bpp: usize) -> Result<()> {
    if filter > 4 {
        return Err(Error::UnknownFilter(filter));
    }
    if filter == 0 {
        return Ok(());
    }

    for i in 0..row.len() {
        let west = if i >= bpp { row[i - bpp] } else { 0 };
        let north = prev[i];
        let northwest = if i >= bpp { prev[i - bpp] } else { 0 };
        let prediction = match filter {
            1 => west,
            2 => north,
            // Floor of the mean; the sum needs one extra bit.
            3 => ((u16::from(west) + u16::from(north)) >> 1) as u8,
            _ => paeth_predictor(west, north, northwest),
        };
        row[i] = row[i].wrapping_add(prediction);
    }
    Ok(())
}

/// Whether reversing `filter` reads the previous scanline.
#[inline]
pub(crate) fn requires_previous_row(filter: u8) -> bool {
    matches!(filter, 2..=4)
}

/// Paeth predictor: whichever of the three neighbors sits closest to
/// `west + north - northwest`. Ties resolve west, then north, then
/// northwest.
#[inline]
pub(crate) fn paeth_predictor(west: u8, north: u8, northwest: u8) -> u8 {
    let estimate = i32::from(west) + i32::from(north) - i32::from(northwest);
    let to_west = (estimate - i32::from(west)).abs();
    let to_north = (estimate - i32::from(north)).abs();
    let to_northwest = (estimate - i32::from(northwest)).abs();

    if to_west <= to_north && to_west <= to_northwest {
        west
    } else if to_north <= to_northwest {
        north
    } else {
        northwest
    }
}
