//! IHDR parsing and the scanline size arithmetic derived from it.

use crate::bytes::read_u32_be;
use crate::error::{Error, Result};

/// PNG color type values from the specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorType {
    /// One grayscale sample per pixel.
    Grayscale,
    /// Red, green and blue samples per pixel.
    Truecolor,
    /// One palette index per pixel.
    Palette,
    /// Grayscale plus alpha samples per pixel.
    GrayscaleAlpha,
    /// Red, green, blue and alpha samples per pixel.
    TruecolorAlpha,
}

impl ColorType {
    /// Number of samples per pixel for this color type.
    #[inline]
    pub const fn channels(self) -> usize {
        match self {
            ColorType::Grayscale => 1,
            ColorType::Truecolor => 3,
            ColorType::Palette => 1,
            ColorType::GrayscaleAlpha => 2,
            ColorType::TruecolorAlpha => 4,
        }
    }

    fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(ColorType::Grayscale),
            2 => Ok(ColorType::Truecolor),
            3 => Ok(ColorType::Palette),
            4 => Ok(ColorType::GrayscaleAlpha),
            6 => Ok(ColorType::TruecolorAlpha),
            other => Err(Error::InvalidColorType(other)),
        }
    }

    const fn allows_bit_depth(self, bit_depth: u8) -> bool {
        match self {
            ColorType::Grayscale => matches!(bit_depth, 1 | 2 | 4 | 8 | 16),
            ColorType::Truecolor => matches!(bit_depth, 8 | 16),
            ColorType::Palette => matches!(bit_depth, 1 | 2 | 4 | 8),
            ColorType::GrayscaleAlpha => matches!(bit_depth, 8 | 16),
            ColorType::TruecolorAlpha => matches!(bit_depth, 8 | 16),
        }
    }
}

/// Interlace layout declared in IHDR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interlace {
    /// Scanlines stored top to bottom.
    None,
    /// Adam7 pass layout. Recognized but not decoded.
    Adam7,
}

/// Parsed IHDR fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Image width in pixels, nonzero.
    pub width: u32,
    /// Image height in pixels, nonzero.
    pub height: u32,
    /// Bits per sample, one of 1, 2, 4, 8, 16.
    pub bit_depth: u8,
    /// Color model of the pixel data.
    pub color_type: ColorType,
    /// Interlace layout.
    pub interlace: Interlace,
}

impl Header {
    /// Parse a 13-byte IHDR payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        if payload.len() != 13 {
            return Err(Error::InvalidHeaderLength(payload.len()));
        }

        let width = read_u32_be(payload, 0)?;
        let height = read_u32_be(payload, 4)?;
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let bit_depth = payload[8];
        let color_type = ColorType::from_code(payload[9])?;
        if !color_type.allows_bit_depth(bit_depth) {
            return Err(Error::InvalidBitDepth {
                bit_depth,
                color_type,
            });
        }

        if payload[10] != 0 {
            return Err(Error::UnsupportedMethod {
                field: "compression",
                value: payload[10],
            });
        }
        if payload[11] != 0 {
            return Err(Error::UnsupportedMethod {
                field: "filter",
                value: payload[11],
            });
        }

        let interlace = match payload[12] {
            0 => Interlace::None,
            1 => Interlace::Adam7,
            other => return Err(Error::InvalidInterlace(other)),
        };

        Ok(Header {
            width,
            height,
            bit_depth,
            color_type,
            interlace,
        })
    }

    /// Bits occupied by one pixel.
    #[inline]
    pub(crate) fn pixel_bit_size(&self) -> usize {
        self.color_type.channels() * self.bit_depth as usize
    }

    /// The byte distance between corresponding bytes of horizontally
    /// adjacent pixels, as used by the Sub/Average/Paeth filters. Packed
    /// sub-byte pixels filter at a distance of one byte.
    #[inline]
    pub(crate) fn filter_unit(&self) -> usize {
        (self.pixel_bit_size() / 8).max(1)
    }

    /// Bytes per scanline, excluding the leading filter byte. Rows of
    /// packed pixels round up to a whole byte.
    #[inline]
    pub(crate) fn scanline_byte_size(&self) -> usize {
        (self.width as usize * self.pixel_bit_size()).div_ceil(8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(
        width: u32,
        height: u32,
        bit_depth: u8,
        color_type: u8,
        compression: u8,
        filter: u8,
        interlace: u8,
    ) -> Vec<u8> {
        let mut out = Vec::with_capacity(13);
        out.extend_from_slice(&width.to_be_bytes());
        out.extend_from_slice(&height.to_be_bytes());
        out.extend_from_slice(&[bit_depth, color_type, compression, filter, interlace]);
        out
    }

    #[test]
    fn test_parse_rgba8() {
        let header = Header::parse(&payload(5, 5, 8, 6, 0, 0, 0)).unwrap();
        assert_eq!(header.width, 5);
        assert_eq!(header.height, 5);
        assert_eq!(header.bit_depth, 8);
        assert_eq!(header.color_type, ColorType::TruecolorAlpha);
        assert_eq!(header.interlace, Interlace::None);
    }

    #[test]
    fn test_parse_is_stable() {
        // Re-parsing the same payload yields identical fields.
        let bytes = payload(640, 480, 16, 2, 0, 0, 0);
        assert_eq!(Header::parse(&bytes).unwrap(), Header::parse(&bytes).unwrap());
    }

    #[test]
    fn test_wrong_payload_length() {
        assert_eq!(
            Header::parse(&[0u8; 12]),
            Err(Error::InvalidHeaderLength(12))
        );
        assert_eq!(
            Header::parse(&[0u8; 14]),
            Err(Error::InvalidHeaderLength(14))
        );
    }

    #[test]
    fn test_zero_dimensions() {
        assert_eq!(
            Header::parse(&payload(0, 7, 8, 0, 0, 0, 0)),
            Err(Error::InvalidDimensions {
                width: 0,
                height: 7
            })
        );
        assert_eq!(
            Header::parse(&payload(7, 0, 8, 0, 0, 0, 0)),
            Err(Error::InvalidDimensions {
                width: 7,
                height: 0
            })
        );
    }

    #[test]
    fn test_color_type_codes() {
        for (code, expected) in [
            (0, ColorType::Grayscale),
            (2, ColorType::Truecolor),
            (3, ColorType::Palette),
            (4, ColorType::GrayscaleAlpha),
            (6, ColorType::TruecolorAlpha),
        ] {
            let header = Header::parse(&payload(1, 1, 8, code, 0, 0, 0)).unwrap();
            assert_eq!(header.color_type, expected);
        }
        for code in [1u8, 5, 7, 255] {
            assert_eq!(
                Header::parse(&payload(1, 1, 8, code, 0, 0, 0)),
                Err(Error::InvalidColorType(code))
            );
        }
    }

    #[test]
    fn test_bit_depth_table() {
        // (color type code, allowed depths)
        let table: [(u8, &[u8]); 5] = [
            (0, &[1, 2, 4, 8, 16]),
            (2, &[8, 16]),
            (3, &[1, 2, 4, 8]),
            (4, &[8, 16]),
            (6, &[8, 16]),
        ];
        for (code, allowed) in table {
            for depth in [1u8, 2, 4, 8, 16, 3, 32] {
                let result = Header::parse(&payload(1, 1, depth, code, 0, 0, 0));
                if allowed.contains(&depth) {
                    assert!(result.is_ok(), "depth {depth} for color {code}");
                } else {
                    assert!(
                        matches!(result, Err(Error::InvalidBitDepth { .. })),
                        "depth {depth} for color {code}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_nonzero_methods() {
        assert_eq!(
            Header::parse(&payload(1, 1, 8, 0, 1, 0, 0)),
            Err(Error::UnsupportedMethod {
                field: "compression",
                value: 1
            })
        );
        assert_eq!(
            Header::parse(&payload(1, 1, 8, 0, 0, 3, 0)),
            Err(Error::UnsupportedMethod {
                field: "filter",
                value: 3
            })
        );
    }

    #[test]
    fn test_interlace_codes() {
        let adam7 = Header::parse(&payload(1, 1, 8, 0, 0, 0, 1)).unwrap();
        assert_eq!(adam7.interlace, Interlace::Adam7);
        assert_eq!(
            Header::parse(&payload(1, 1, 8, 0, 0, 0, 2)),
            Err(Error::InvalidInterlace(2))
        );
    }

    #[test]
    fn test_scanline_byte_size() {
        // 10 pixels at 1 bit -> 2 bytes, packed with 6 pad bits.
        let g1 = Header::parse(&payload(10, 1, 1, 0, 0, 0, 0)).unwrap();
        assert_eq!(g1.scanline_byte_size(), 2);
        assert_eq!(g1.filter_unit(), 1);

        // RGB16: 6 bytes per pixel.
        let rgb16 = Header::parse(&payload(4, 1, 16, 2, 0, 0, 0)).unwrap();
        assert_eq!(rgb16.scanline_byte_size(), 24);
        assert_eq!(rgb16.filter_unit(), 6);

        // RGBA8: 4 bytes per pixel.
        let rgba8 = Header::parse(&payload(5, 5, 8, 6, 0, 0, 0)).unwrap();
        assert_eq!(rgba8.scanline_byte_size(), 20);
        assert_eq!(rgba8.filter_unit(), 4);
    }
}
