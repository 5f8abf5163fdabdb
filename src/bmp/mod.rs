//! BMP decoding and encoding (internal).
//!
//! Use top-level [`crate::decode_bmp`], [`crate::decode_bmp_file`],
//! [`crate::encode_bmp`], etc.

mod decode;
mod encode;
mod header;
mod utils;

pub use header::{BitmapHeader, HeaderVariant};

use crate::decode::{DecodeOutput, Orientation};
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use alloc::vec::Vec;
use enough::Stop;

/// Per-call decode settings collected by [`crate::DecodeRequest`].
pub(crate) struct DecodeParams<'a> {
    pub limits: Option<&'a Limits>,
    pub orientation: Orientation,
    pub layout: PixelLayout,
}

/// Parse the headers only.
pub(crate) fn probe(data: &[u8]) -> Result<BitmapHeader, BitmapError> {
    header::parse_header(data)
}

/// Decode an in-memory bitmap file.
pub(crate) fn decode(
    data: &[u8],
    params: &DecodeParams<'_>,
    stop: &dyn Stop,
) -> Result<DecodeOutput, BitmapError> {
    let header = header::parse_header(data)?;
    let size = check_dimensions(params.limits, &header)?;
    stop.check()?;

    let start = header.data_offset as usize;
    let end = start
        .checked_add(size)
        .filter(|&end| end <= data.len())
        .ok_or(BitmapError::TruncatedFile {
            needed: start.saturating_add(size),
            actual: data.len(),
        })?;
    check_memory(params.limits, &header, size)?;

    let pixels = decode::convert_scanlines(
        &data[start..end],
        &header,
        params.layout,
        params.orientation,
        stop,
    )?;
    Ok(DecodeOutput::new(
        pixels,
        header.width,
        header.height,
        params.layout,
    ))
}

/// Checks dimension limits against the header and returns the stored pixel
/// array size.
fn check_dimensions(limits: Option<&Limits>, header: &BitmapHeader) -> Result<usize, BitmapError> {
    let bitmap_size = utils::bitmap_size(header.width, header.height)?;
    if let Some(limits) = limits {
        limits.check(header.width, header.height)?;
    }
    Ok(bitmap_size)
}

/// Checks the scanline and output buffers against the memory limit. Only
/// called once the source is known to hold `bitmap_size` bytes.
fn check_memory(
    limits: Option<&Limits>,
    header: &BitmapHeader,
    bitmap_size: usize,
) -> Result<(), BitmapError> {
    let out_bytes = utils::packed_size(header.width, header.height)?;
    log::trace!("bmp: {bitmap_size} stored bytes, {out_bytes} output bytes");
    if let Some(limits) = limits {
        limits.check_memory(bitmap_size.saturating_add(out_bytes))?;
    }
    Ok(())
}

/// Encode to a 24-bit BMP.
pub(crate) fn encode(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BitmapError> {
    encode::encode_bmp(pixels, width, height, layout, stop)
}

// ── std sources ─────────────────────────────────────────────────────

#[cfg(feature = "std")]
pub(crate) trait ReadSeek: std::io::Read + std::io::Seek {}

#[cfg(feature = "std")]
impl<T: std::io::Read + std::io::Seek + ?Sized> ReadSeek for T {}

/// Open `path` and decode it.
#[cfg(feature = "std")]
pub(crate) fn decode_path(
    path: &std::path::Path,
    params: &DecodeParams<'_>,
    stop: &dyn Stop,
) -> Result<DecodeOutput, BitmapError> {
    log::debug!("decoding bitmap {}", path.display());
    let mut file = std::fs::File::open(path).map_err(|_| BitmapError::FileNotFound {
        path: path.display().to_string(),
    })?;
    decode_reader(&mut file, params, stop)
}

/// Decode from a seekable stream: header read, seek to the pixel array,
/// one bulk read of the padded scanlines.
#[cfg(feature = "std")]
pub(crate) fn decode_reader(
    reader: &mut dyn ReadSeek,
    params: &DecodeParams<'_>,
    stop: &dyn Stop,
) -> Result<DecodeOutput, BitmapError> {
    use alloc::vec;
    use std::io::SeekFrom;

    reader.seek(SeekFrom::Start(0))?;
    let mut head = [0u8; header::MAX_HEADER_LEN];
    let head_len = read_up_to(reader, &mut head)?;
    let header = header::parse_header(&head[..head_len])?;
    let size = check_dimensions(params.limits, &header)?;
    stop.check()?;

    // The header alone must not decide how much we allocate.
    let start = header.data_offset as usize;
    let needed = start.saturating_add(size);
    let stream_len = reader.seek(SeekFrom::End(0))?;
    if needed as u64 > stream_len {
        return Err(BitmapError::TruncatedFile {
            needed,
            actual: usize::try_from(stream_len).unwrap_or(usize::MAX),
        });
    }
    check_memory(params.limits, &header, size)?;

    reader.seek(SeekFrom::Start(u64::from(header.data_offset)))?;
    let mut raw = vec![0u8; size];
    let got = read_up_to(reader, &mut raw)?;
    if got < size {
        return Err(BitmapError::TruncatedFile {
            needed,
            actual: start + got,
        });
    }

    let pixels =
        decode::convert_scanlines(&raw, &header, params.layout, params.orientation, stop)?;
    Ok(DecodeOutput::new(
        pixels,
        header.width,
        header.height,
        params.layout,
    ))
}

/// Fill `buf` as far as the stream allows; returns the number of bytes read.
#[cfg(feature = "std")]
fn read_up_to(reader: &mut dyn ReadSeek, buf: &mut [u8]) -> Result<usize, BitmapError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use enough::Unstoppable;
    use std::io::Cursor;

    fn params() -> DecodeParams<'static> {
        DecodeParams {
            limits: None,
            orientation: Orientation::TopDown,
            layout: PixelLayout::Rgb8,
        }
    }

    #[test]
    fn reader_and_slice_agree() {
        let pixels: Vec<u8> = (0..5 * 3 * 3).map(|v| v as u8).collect();
        let file = encode(&pixels, 5, 3, PixelLayout::Rgb8, &Unstoppable).unwrap();

        let from_slice = decode(&file, &params(), &Unstoppable).unwrap();
        let mut cursor = Cursor::new(file.clone());
        let from_reader = decode_reader(&mut cursor, &params(), &Unstoppable).unwrap();

        assert_eq!(from_slice.pixels(), &pixels[..]);
        assert_eq!(from_reader.pixels(), from_slice.pixels());
    }

    #[test]
    fn reader_reports_short_pixel_array() {
        let pixels = vec![7u8; 4 * 4 * 3];
        let mut file = encode(&pixels, 4, 4, PixelLayout::Rgb8, &Unstoppable).unwrap();
        file.truncate(file.len() - 1);
        let mut cursor = Cursor::new(file);
        let err = decode_reader(&mut cursor, &params(), &Unstoppable).unwrap_err();
        assert!(matches!(
            err,
            BitmapError::TruncatedFile {
                needed: 102,
                actual: 101
            }
        ));
    }

    /// V3 header claiming `width` x `height` with no pixel data after it.
    fn header_only(width: u32, height: u32) -> Vec<u8> {
        let mut file = encode(&[0u8; 3], 1, 1, PixelLayout::Rgb8, &Unstoppable).unwrap();
        file.resize(60, 0);
        file[18..22].copy_from_slice(&width.to_le_bytes());
        file[22..26].copy_from_slice(&height.to_le_bytes());
        file
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn reader_rejects_huge_claim_without_allocating() {
        let file = header_only(0x7FFF_FFFF, 0x7FFF_FFFF);
        let needed = 54 + utils::bitmap_size(0x7FFF_FFFF, 0x7FFF_FFFF).unwrap();
        let mut cursor = Cursor::new(file);
        match decode_reader(&mut cursor, &params(), &Unstoppable) {
            Err(BitmapError::TruncatedFile {
                needed: n,
                actual: 60,
            }) => assert_eq!(n, needed),
            other => panic!("expected TruncatedFile, got {other:?}"),
        }
    }

    #[test]
    fn reader_checks_length_before_memory_limit() {
        let limits = Limits {
            max_memory_bytes: Some(1024),
            ..Default::default()
        };
        let limited = DecodeParams {
            limits: Some(&limits),
            orientation: Orientation::TopDown,
            layout: PixelLayout::Rgb8,
        };

        // short stream: truncation wins over the memory cap
        let mut cursor = Cursor::new(header_only(1000, 1000));
        assert!(matches!(
            decode_reader(&mut cursor, &limited, &Unstoppable),
            Err(BitmapError::TruncatedFile { .. })
        ));

        // complete stream over the cap
        let pixels = vec![1u8; 20 * 20 * 3];
        let file = encode(&pixels, 20, 20, PixelLayout::Rgb8, &Unstoppable).unwrap();
        let mut cursor = Cursor::new(file);
        assert!(matches!(
            decode_reader(&mut cursor, &limited, &Unstoppable),
            Err(BitmapError::LimitExceeded(_))
        ));
    }

    #[test]
    fn offset_past_end_is_truncated() {
        let pixels = vec![0u8; 3];
        let mut file = encode(&pixels, 1, 1, PixelLayout::Rgb8, &Unstoppable).unwrap();
        file[10..14].copy_from_slice(&1000u32.to_le_bytes());
        assert!(matches!(
            decode(&file, &params(), &Unstoppable),
            Err(BitmapError::TruncatedFile { .. })
        ));
        let mut cursor = Cursor::new(file);
        assert!(matches!(
            decode_reader(&mut cursor, &params(), &Unstoppable),
            Err(BitmapError::TruncatedFile { .. })
        ));
    }
}
