//! Error types for the amaze library.

use std::fmt;

use crate::png::ColorType;

/// Result type alias for amaze operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding a maze image or searching it.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The first 8 bytes are not the PNG signature.
    InvalidSignature,
    /// A chunk's stored CRC does not match the CRC computed over its
    /// type and payload.
    ChecksumMismatch {
        /// Four-character chunk type tag.
        chunk_type: [u8; 4],
        /// CRC stored in the file.
        expected: u32,
        /// CRC computed over the chunk.
        actual: u32,
    },
    /// A read extends past the end of the input buffer.
    InsufficientBytes {
        /// Number of bytes the read requires.
        needed: usize,
        /// Number of bytes actually available.
        available: usize,
    },
    /// The first chunk is not IHDR.
    MissingHeader,
    /// The last chunk is not IEND.
    MissingTerminator,
    /// No IDAT chunk is present.
    MissingImageData,
    /// A palette image has no PLTE chunk before its image data.
    MissingPalette,
    /// IHDR payload is not exactly 13 bytes.
    InvalidHeaderLength(usize),
    /// Image width or height is zero.
    InvalidDimensions {
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
    },
    /// Color type code outside {0, 2, 3, 4, 6}.
    InvalidColorType(u8),
    /// Bit depth not allowed for the declared color type.
    InvalidBitDepth {
        /// Declared bit depth.
        bit_depth: u8,
        /// Declared color type.
        color_type: ColorType,
    },
    /// Interlace method code outside {0, 1}.
    InvalidInterlace(u8),
    /// Compression or filter method byte is nonzero.
    UnsupportedMethod {
        /// Which IHDR method field was rejected.
        field: &'static str,
        /// The rejected value.
        value: u8,
    },
    /// The image is Adam7 interlaced; only the non-interlaced layout is
    /// decoded.
    UnsupportedInterlace,
    /// PLTE payload is malformed or a pixel indexes past the palette.
    InvalidPalette(String),
    /// The concatenated IDAT stream failed to inflate.
    DecompressionFailed(String),
    /// Scanline filter selector outside 0..=4.
    UnknownFilter(u8),
    /// Inflated stream length does not match the declared dimensions.
    ScanlineSizeMismatch {
        /// Byte count the header implies.
        expected: usize,
        /// Byte count the stream inflated to.
        actual: usize,
    },
    /// The pathfinder exhausted its frontier without reaching the goal.
    NoPath,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSignature => {
                write!(f, "not a PNG file: bad signature")
            }
            Error::ChecksumMismatch {
                chunk_type,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "CRC mismatch in {} chunk: stored {expected:#010x}, computed {actual:#010x}",
                    String::from_utf8_lossy(chunk_type)
                )
            }
            Error::InsufficientBytes { needed, available } => {
                write!(f, "need {needed} bytes, only {available} available")
            }
            Error::MissingHeader => write!(f, "first chunk is not IHDR"),
            Error::MissingTerminator => write!(f, "last chunk is not IEND"),
            Error::MissingImageData => write!(f, "no IDAT chunk present"),
            Error::MissingPalette => {
                write!(f, "palette color type but no PLTE chunk before image data")
            }
            Error::InvalidHeaderLength(len) => {
                write!(f, "IHDR payload must be 13 bytes, was {len}")
            }
            Error::InvalidDimensions { width, height } => {
                write!(f, "invalid image dimensions: {width}x{height}")
            }
            Error::InvalidColorType(code) => {
                write!(f, "invalid color type: {code}")
            }
            Error::InvalidBitDepth {
                bit_depth,
                color_type,
            } => {
                write!(f, "invalid bit depth {bit_depth} for color type {color_type:?}")
            }
            Error::InvalidInterlace(code) => {
                write!(f, "invalid interlace method: {code}")
            }
            Error::UnsupportedMethod { field, value } => {
                write!(f, "unsupported {field} method: {value}")
            }
            Error::UnsupportedInterlace => {
                write!(f, "Adam7 interlaced images are not supported")
            }
            Error::InvalidPalette(msg) => write!(f, "invalid palette: {msg}"),
            Error::DecompressionFailed(msg) => {
                write!(f, "failed to inflate image data: {msg}")
            }
            Error::UnknownFilter(filter) => {
                write!(f, "unknown scanline filter type: {filter}")
            }
            Error::ScanlineSizeMismatch { expected, actual } => {
                write!(
                    f,
                    "inflated stream is {actual} bytes, dimensions require {expected}"
                )
            }
            Error::NoPath => write!(f, "no path from start to goal"),
        }
    }
}

impl std::error::Error for Error {}
