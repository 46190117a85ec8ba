//! Bridges a decoded image and the pathfinder.
//!
//! A maze image encodes walls as black and corridors as non-black; the
//! blue channel carries that distinction for every color type.

use crate::png::{Image, PaletteEntry, Pixel};

/// Blue sample of a pixel, resolving palette indices through `palette`.
/// Grayscale pixels use their single sample.
fn blue_sample(pixel: &Pixel, palette: &[PaletteEntry]) -> u16 {
    match pixel {
        Pixel::Truecolor { blue, .. } => *blue,
        Pixel::Grayscale { value } => *value,
        Pixel::Palette { index } => palette
            .get(*index as usize)
            .map_or(0, |entry| entry.blue as u16),
    }
}

/// Project the image onto a boolean grid: a nonzero blue channel marks a
/// passable cell, zero marks a wall.
pub fn passable_grid(image: &Image) -> Vec<Vec<bool>> {
    image
        .pixels
        .iter()
        .map(|row| {
            row.iter()
                .map(|pixel| blue_sample(pixel, &image.palette) > 0)
                .collect()
        })
        .collect()
}

/// Right-shift 16-bit samples down to 8-bit display intensity, in place.
///
/// Images at or below 8 bits are left untouched. Palette pixels carry
/// indices, not samples, and are never rescaled.
pub fn normalize_to_8bit(image: &mut Image) {
    if image.header.bit_depth <= 8 {
        return;
    }
    for row in &mut image.pixels {
        for pixel in row {
            match pixel {
                Pixel::Grayscale { value } => *value >>= 8,
                Pixel::Truecolor {
                    red,
                    green,
                    blue,
                    alpha,
                } => {
                    *red >>= 8;
                    *green >>= 8;
                    *blue >>= 8;
                    *alpha >>= 8;
                }
                Pixel::Palette { .. } => {}
            }
        }
    }
}
