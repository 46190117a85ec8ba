//! PLTE chunk parsing.

use crate::error::{Error, Result};

/// One palette entry. Alpha is implicitly opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Red component.
    pub red: u8,
    /// Green component.
    pub green: u8,
    /// Blue component.
    pub blue: u8,
}

impl PaletteEntry {
    /// The entry as RGBA; palette entries are always fully opaque.
    #[inline]
    pub const fn rgba(self) -> [u8; 4] {
        [self.red, self.green, self.blue, 0xFF]
    }
}

/// Parse a PLTE payload into palette entries.
///
/// The payload must split into 3-byte RGB groups, and the entry count
/// must not exceed what the bit depth can index.
pub fn parse(payload: &[u8], bit_depth: u8) -> Result<Vec<PaletteEntry>> {
    if payload.len() % 3 != 0 {
        return Err(Error::InvalidPalette(format!(
            "payload length {} not divisible by 3",
            payload.len()
        )));
    }
    let count = payload.len() / 3;
    let max_entries = 1usize << bit_depth;
    if count > max_entries {
        return Err(Error::InvalidPalette(format!(
            "{count} entries exceed the {max_entries} addressable at bit depth {bit_depth}"
        )));
    }

    Ok(payload
        .chunks_exact(3)
        .map(|rgb| PaletteEntry {
            red: rgb[0],
            green: rgb[1],
            blue: rgb[2],
        })
        .collect())
}
