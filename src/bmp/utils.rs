//! Scanline size arithmetic shared by the decoder and encoder.

use crate::error::BitmapError;

/// Padded length of one 24 bpp scanline: `width * 3` rounded up to a multiple of 4.
pub(crate) fn bytes_per_row(width: u32, height: u32) -> Result<usize, BitmapError> {
    (width as usize)
        .checked_mul(3)
        .and_then(|r| r.checked_add(3))
        .map(|r| r & !3)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })
}

/// Size of the stored pixel array (`bytes_per_row * height`).
pub(crate) fn bitmap_size(width: u32, height: u32) -> Result<usize, BitmapError> {
    bytes_per_row(width, height)?
        .checked_mul(height as usize)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })
}

/// Size of the tightly packed 3-byte-per-pixel output buffer.
pub(crate) fn packed_size(width: u32, height: u32) -> Result<usize, BitmapError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(3))
        .ok_or(BitmapError::DimensionsTooLarge { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_pad_to_four_bytes() {
        assert_eq!(bytes_per_row(1, 1).unwrap(), 4);
        assert_eq!(bytes_per_row(2, 1).unwrap(), 8);
        assert_eq!(bytes_per_row(3, 1).unwrap(), 12);
        assert_eq!(bytes_per_row(4, 1).unwrap(), 12);
        assert_eq!(bytes_per_row(5, 1).unwrap(), 16);
        assert_eq!(bytes_per_row(0, 1).unwrap(), 0);
    }

    #[test]
    fn bitmap_size_uses_padded_stride() {
        assert_eq!(bitmap_size(5, 3).unwrap(), 48);
        assert_eq!(packed_size(5, 3).unwrap(), 45);
    }

    #[test]
    fn overflow_is_reported() {
        assert!(matches!(
            bitmap_size(u32::MAX, u32::MAX),
            Err(BitmapError::DimensionsTooLarge { .. })
        ));
    }
}
