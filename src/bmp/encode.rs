//! BMP encoder: uncompressed 24-bit with a Windows V3 info header.

use alloc::vec::Vec;

use enough::Stop;

use super::utils;
use crate::error::BitmapError;
use crate::pixel::PixelLayout;

/// File header (14) + BITMAPINFOHEADER (40).
pub(crate) const HEADER_LEN: usize = 54;

/// Encode packed 3-byte pixels (top-down) to a 24-bit BMP.
pub(crate) fn encode_bmp(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BitmapError> {
    let row_stride = utils::bytes_per_row(width, height)?;
    let pixel_data_size = utils::bitmap_size(width, height)?;
    let file_size = pixel_data_size
        .checked_add(HEADER_LEN)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    // Both sizes are u32 fields in the header.
    let too_large = |_| BitmapError::DimensionsTooLarge { width, height };
    let file_size_field = u32::try_from(file_size).map_err(too_large)?;
    let pixel_data_field = u32::try_from(pixel_data_size).map_err(too_large)?;

    let expected = utils::packed_size(width, height)?;
    if pixels.len() < expected {
        return Err(BitmapError::BufferTooSmall {
            needed: expected,
            actual: pixels.len(),
        });
    }

    stop.check()?;

    let mut out = Vec::with_capacity(file_size);
    write_bmp_header(&mut out, file_size_field, pixel_data_field, width, height);

    let w = width as usize;
    let pad_bytes = row_stride - w * 3;
    let [r, g, b] = layout.rgb_offsets();
    let is_bgr_native = matches!(layout, PixelLayout::Bgr8);

    for row in (0..height as usize).rev() {
        if row % 16 == 0 {
            stop.check()?;
        }
        let src = &pixels[row * w * 3..(row + 1) * w * 3];
        if is_bgr_native {
            out.extend_from_slice(src);
        } else {
            for px in src.chunks_exact(3) {
                out.extend_from_slice(&[px[b], px[g], px[r]]);
            }
        }
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
    }

    Ok(out)
}

fn write_bmp_header(
    out: &mut Vec<u8>,
    file_size: u32,
    pixel_data_size: u32,
    width: u32,
    height: u32,
) {
    // BITMAPFILEHEADER
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // reserved
    out.extend_from_slice(&(HEADER_LEN as u32).to_le_bytes());

    // BITMAPINFOHEADER
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB
    out.extend_from_slice(&pixel_data_size.to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes()); // 72 DPI
    out.extend_from_slice(&2835u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // colors used
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors
}
