//! Scanline conversion: padded bottom-up BGR rows to a packed pixel buffer.

use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

use super::header::BitmapHeader;
use super::utils;
use crate::decode::Orientation;
use crate::error::BitmapError;
use crate::pixel::PixelLayout;

/// Convert the stored pixel array of `header` into a packed buffer.
///
/// `raw` must hold at least `header.bitmap_size()` bytes.
pub(crate) fn convert_scanlines(
    raw: &[u8],
    header: &BitmapHeader,
    layout: PixelLayout,
    orientation: Orientation,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BitmapError> {
    let (width, height) = (header.width, header.height);
    let stride = utils::bytes_per_row(width, height)?;
    let bitmap_size = utils::bitmap_size(width, height)?;
    if raw.len() < bitmap_size {
        return Err(BitmapError::TruncatedFile {
            needed: bitmap_size,
            actual: raw.len(),
        });
    }

    let mut out = vec![0u8; utils::packed_size(width, height)?];
    if out.is_empty() {
        return Ok(out);
    }

    let w = width as usize;
    let h = height as usize;
    let row_len = w * 3;
    let [r, g, b] = layout.rgb_offsets();

    for (y, out_row) in out.chunks_exact_mut(row_len).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        // Rows are stored bottom-up. TopDown reads them in reverse; the
        // legacy layout keeps storage order and mirrors each row instead.
        let stored_row = match orientation {
            Orientation::TopDown => h - 1 - y,
            Orientation::Rotated180 => y,
        };
        let start = stored_row * stride;
        let src = raw[start..start + row_len].chunks_exact(3);
        let dst = out_row.chunks_exact_mut(3);

        match orientation {
            Orientation::TopDown => src.zip(dst).for_each(|(s, d)| {
                d[r] = s[2];
                d[g] = s[1];
                d[b] = s[0];
            }),
            Orientation::Rotated180 => src.rev().zip(dst).for_each(|(s, d)| {
                d[r] = s[2];
                d[g] = s[1];
                d[b] = s[0];
            }),
        }
    }

    Ok(out)
}
