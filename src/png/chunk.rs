//! PNG chunk stream parsing.
//!
//! A PNG file is the 8-byte signature followed by a sequence of
//! `length | type | payload | crc` records. The CRC covers the type and
//! payload of each chunk.

use crate::bytes::{crc32_range, read_u32_be, slice_range};
use crate::error::{Error, Result};

/// PNG file signature (magic bytes).
pub const SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// A single chunk: four-character type tag plus owned payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Four ASCII bytes naming the chunk type.
    pub kind: [u8; 4],
    /// Chunk payload, CRC already verified.
    pub data: Vec<u8>,
}

/// Validate the signature and split the rest of the buffer into chunks,
/// verifying each chunk's CRC along the way.
pub fn split_chunks(data: &[u8]) -> Result<Vec<Chunk>> {
    if data.len() < SIGNATURE.len() || data[..SIGNATURE.len()] != SIGNATURE {
        return Err(Error::InvalidSignature);
    }

    let mut chunks = Vec::new();
    let mut pos = SIGNATURE.len();
    while pos < data.len() {
        let (chunk, read) = read_chunk(data, pos)?;
        pos += read;
        chunks.push(chunk);
    }
    Ok(chunks)
}

/// Read one chunk record starting at `pos`. Returns the chunk and the
/// number of bytes consumed.
pub(crate) fn read_chunk(data: &[u8], pos: usize) -> Result<(Chunk, usize)> {
    let length = read_u32_be(data, pos)? as usize;
    let kind_bytes = slice_range(data, pos + 4, pos + 8)?;
    let kind = [kind_bytes[0], kind_bytes[1], kind_bytes[2], kind_bytes[3]];

    let payload_end = (pos + 8)
        .checked_add(length)
        .ok_or(Error::InsufficientBytes {
            needed: usize::MAX,
            available: data.len(),
        })?;
    let stored = read_u32_be(data, payload_end)?;

    // CRC covers the type tag and the payload.
    let computed = crc32_range(data, pos + 4, payload_end)?;
    if stored != computed {
        return Err(Error::ChecksumMismatch {
            chunk_type: kind,
            expected: stored,
            actual: computed,
        });
    }

    let chunk = Chunk {
        kind,
        data: data[pos + 8..payload_end].to_vec(),
    };
    Ok((chunk, 12 + length))
}
