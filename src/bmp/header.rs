//! BMP file header and the three supported info header variants.
//!
//! Layout of the part we read (all fields little-endian):
//!
//! | offset | size | field                        |
//! |--------|------|------------------------------|
//! | 0      | 2    | signature `BM`               |
//! | 2      | 8    | file size + reserved, unused |
//! | 10     | 4    | pixel data offset            |
//! | 14     | 4    | info header size (12/40/108) |
//! | 18     | ..   | variant-specific fields      |

use alloc::format;

use super::utils;
use crate::error::BitmapError;

/// Bytes needed to parse the largest supported header (Windows V3: 18 + 14).
pub(crate) const MAX_HEADER_LEN: usize = 32;

/// Info header layout, selected by the header size field.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeaderVariant {
    /// OS/2 V1 `BITMAPCOREHEADER` (12 bytes).
    Core,
    /// Windows V3 `BITMAPINFOHEADER` (40 bytes).
    Info,
    /// Windows V4 `BITMAPV4HEADER` (108 bytes).
    V4,
}

impl HeaderVariant {
    pub fn from_size(size: u32) -> Option<Self> {
        match size {
            12 => Some(Self::Core),
            40 => Some(Self::Info),
            108 => Some(Self::V4),
            _ => None,
        }
    }

    pub fn size(self) -> u32 {
        match self {
            Self::Core => 12,
            Self::Info => 40,
            Self::V4 => 108,
        }
    }
}

/// Parsed header fields of a supported bitmap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapHeader {
    /// Absolute byte offset of the pixel array.
    pub data_offset: u32,
    pub variant: HeaderVariant,
    pub width: u32,
    pub height: u32,
    /// Always 24 for a header that parsed successfully.
    pub bits_per_pixel: u16,
    /// Always 0 for a header that parsed successfully. Only the Windows V3
    /// variant carries this field; the others report 0.
    pub compression: u16,
}

impl BitmapHeader {
    /// Padded length of one stored scanline.
    pub fn bytes_per_row(&self) -> Result<usize, BitmapError> {
        utils::bytes_per_row(self.width, self.height)
    }

    /// Length of the stored pixel array.
    pub fn bitmap_size(&self) -> Result<usize, BitmapError> {
        utils::bitmap_size(self.width, self.height)
    }
}

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], BitmapError> {
        let end = self.pos + N;
        if end > self.data.len() {
            return Err(BitmapError::TruncatedFile {
                needed: end,
                actual: self.data.len(),
            });
        }
        let mut buf = [0u8; N];
        buf.copy_from_slice(&self.data[self.pos..end]);
        self.pos = end;
        Ok(buf)
    }

    fn skip(&mut self, n: usize) -> Result<(), BitmapError> {
        let end = self.pos + n;
        if end > self.data.len() {
            return Err(BitmapError::TruncatedFile {
                needed: end,
                actual: self.data.len(),
            });
        }
        self.pos = end;
        Ok(())
    }

    fn get_u16_le(&mut self) -> Result<u16, BitmapError> {
        self.take::<2>().map(u16::from_le_bytes)
    }

    fn get_u32_le(&mut self) -> Result<u32, BitmapError> {
        self.take::<4>().map(u32::from_le_bytes)
    }
}

/// Parse the file header and info header from the start of a bitmap.
///
/// Only the first [`MAX_HEADER_LEN`] bytes are ever looked at.
pub(crate) fn parse_header(data: &[u8]) -> Result<BitmapHeader, BitmapError> {
    if data.len() < 2 || &data[..2] != b"BM" {
        return Err(BitmapError::BadSignature);
    }

    let mut cur = Cursor::new(data);
    cur.skip(2)?;
    // file size and reserved words
    cur.skip(8)?;
    let data_offset = cur.get_u32_le()?;
    let header_size = cur.get_u32_le()?;

    let variant = HeaderVariant::from_size(header_size).ok_or_else(|| {
        BitmapError::UnsupportedFormat(format!("unrecognized info header size {header_size}"))
    })?;

    let (width, height, bits_per_pixel, compression) = match variant {
        HeaderVariant::Info => {
            let width = cur.get_u32_le()?;
            let height = cur.get_u32_le()?;
            // planes
            cur.skip(2)?;
            let bpp = check_bpp(cur.get_u16_le()?)?;
            let compression = cur.get_u16_le()?;
            if compression != 0 {
                return Err(BitmapError::UnsupportedFormat(format!(
                    "compressed bitmap (compression {compression})"
                )));
            }
            (width, height, bpp, compression)
        }
        HeaderVariant::Core => {
            let width = u32::from(cur.get_u16_le()?);
            let height = u32::from(cur.get_u16_le()?);
            // planes
            cur.skip(2)?;
            let bpp = check_bpp(cur.get_u16_le()?)?;
            (width, height, bpp, 0)
        }
        HeaderVariant::V4 => {
            let width = u32::from(cur.get_u16_le()?);
            cur.skip(2)?;
            let height = u32::from(cur.get_u16_le()?);
            cur.skip(4)?;
            let bpp = check_bpp(cur.get_u16_le()?)?;
            (width, height, bpp, 0)
        }
    };

    log::debug!("bmp header: {variant:?} {width}x{height}, pixel data at {data_offset}");

    Ok(BitmapHeader {
        data_offset,
        variant,
        width,
        height,
        bits_per_pixel,
        compression,
    })
}

fn check_bpp(bpp: u16) -> Result<u16, BitmapError> {
    if bpp != 24 {
        return Err(BitmapError::UnsupportedFormat(format!(
            "{bpp} bits per pixel (only 24 is supported)"
        )));
    }
    Ok(bpp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn file_header(header_size: u32) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&[0u8; 8]);
        out.extend_from_slice(&54u32.to_le_bytes());
        out.extend_from_slice(&header_size.to_le_bytes());
        out
    }

    fn info(width: u32, height: u32, bpp: u16, compression: u16) -> Vec<u8> {
        let mut out = file_header(40);
        out.extend_from_slice(&width.to_le_bytes());
        out.extend_from_slice(&height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&bpp.to_le_bytes());
        out.extend_from_slice(&compression.to_le_bytes());
        out
    }

    #[test]
    fn parses_info_header() {
        let h = parse_header(&info(640, 480, 24, 0)).unwrap();
        assert_eq!(h.variant, HeaderVariant::Info);
        assert_eq!((h.width, h.height), (640, 480));
        assert_eq!(h.data_offset, 54);
        assert_eq!(h.bits_per_pixel, 24);
    }

    #[test]
    fn parses_core_header() {
        let mut data = file_header(12);
        data.extend_from_slice(&7u16.to_le_bytes());
        data.extend_from_slice(&3u16.to_le_bytes());
        data.extend_from_slice(&1u16.to_le_bytes());
        data.extend_from_slice(&24u16.to_le_bytes());
        let h = parse_header(&data).unwrap();
        assert_eq!(h.variant, HeaderVariant::Core);
        assert_eq!((h.width, h.height), (7, 3));
        assert_eq!(h.compression, 0);
    }

    #[test]
    fn parses_v4_header() {
        let mut data = file_header(108);
        data.extend_from_slice(&300u16.to_le_bytes());
        data.extend_from_slice(&[0, 0]);
        data.extend_from_slice(&200u16.to_le_bytes());
        data.extend_from_slice(&[0, 0, 1, 0]);
        data.extend_from_slice(&24u16.to_le_bytes());
        let h = parse_header(&data).unwrap();
        assert_eq!(h.variant, HeaderVariant::V4);
        assert_eq!((h.width, h.height), (300, 200));
    }

    #[test]
    fn rejects_bad_signature() {
        let mut data = info(1, 1, 24, 0);
        data[0] = b'P';
        assert!(matches!(parse_header(&data), Err(BitmapError::BadSignature)));
        assert!(matches!(parse_header(b""), Err(BitmapError::BadSignature)));
        assert!(matches!(parse_header(b"B"), Err(BitmapError::BadSignature)));
    }

    #[test]
    fn rejects_wrong_bpp_and_compression() {
        assert!(matches!(
            parse_header(&info(1, 1, 32, 0)),
            Err(BitmapError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            parse_header(&info(1, 1, 24, 1)),
            Err(BitmapError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn rejects_unknown_header_size() {
        for size in [0u32, 16, 52, 56, 64, 124] {
            let data = file_header(size);
            assert!(matches!(
                parse_header(&data),
                Err(BitmapError::UnsupportedFormat(_))
            ));
        }
    }

    #[test]
    fn short_header_is_truncated() {
        let data = info(1, 1, 24, 0);
        assert!(matches!(
            parse_header(&data[..20]),
            Err(BitmapError::TruncatedFile { .. })
        ));
    }

    #[test]
    fn variant_sizes_round_trip() {
        for v in [HeaderVariant::Core, HeaderVariant::Info, HeaderVariant::V4] {
            assert_eq!(HeaderVariant::from_size(v.size()), Some(v));
        }
    }
}
