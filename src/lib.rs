//! # minibmp
//!
//! Loader for uncompressed 24-bit BMP files, producing a tightly packed
//! top-down RGB buffer ready for an 8-bit-per-channel texture upload.
//!
//! ## Supported Formats
//!
//! - 24 bits per pixel, uncompressed (`BI_RGB`)
//! - Info header variants: OS/2 V1 (`BITMAPCOREHEADER`, 12 bytes),
//!   Windows V3 (`BITMAPINFOHEADER`, 40 bytes) and Windows V4
//!   (`BITMAPV4HEADER`, 108 bytes)
//!
//! Everything else (palettes, 16/32 bpp, RLE, bitfields, V5 headers with ICC
//! profiles) is rejected with [`BitmapError::UnsupportedFormat`].
//!
//! ## Usage
//!
//! ```no_run
//! use minibmp::{decode_bmp, probe_bmp, Unstoppable};
//!
//! let data: &[u8] = &[]; // your BMP bytes
//!
//! // Probe without decoding
//! let header = probe_bmp(data)?;
//! println!("{}x{} {:?}", header.width, header.height, header.variant);
//!
//! let decoded = decode_bmp(data, Unstoppable)?;
//! assert_eq!(decoded.pixels().len(), (decoded.width * decoded.height * 3) as usize);
//! # Ok::<(), minibmp::BitmapError>(())
//! ```
//!
//! With the default `std` feature, files and seekable readers can be decoded
//! directly with [`decode_bmp_file`] and [`decode_bmp_reader`].

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bmp;
mod decode;
mod error;
mod limits;
mod pixel;

use alloc::vec::Vec;

// Re-exports
pub use bmp::{BitmapHeader, HeaderVariant};
pub use decode::{DecodeOutput, DecodeRequest, Orientation};
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use limits::Limits;
#[cfg(feature = "rgb")]
pub use pixel::DecodePixel;
pub use pixel::PixelLayout;

/// Parse the bitmap headers without touching pixel data.
pub fn probe_bmp(data: &[u8]) -> Result<BitmapHeader, BitmapError> {
    bmp::probe(data)
}

/// Decode an in-memory BMP file to top-down RGB8.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<DecodeOutput, BitmapError> {
    DecodeRequest::new(data).decode(stop)
}

/// Decode an in-memory BMP file to top-down BGR8 (no channel swap).
pub fn decode_bmp_native(data: &[u8], stop: impl Stop) -> Result<DecodeOutput, BitmapError> {
    DecodeRequest::new(data).native(true).decode(stop)
}

/// Decode a BMP file from disk to top-down RGB8.
#[cfg(feature = "std")]
pub fn decode_bmp_file<P: AsRef<std::path::Path>>(path: P) -> Result<DecodeOutput, BitmapError> {
    DecodeRequest::from_path(path.as_ref()).decode(Unstoppable)
}

/// Decode a BMP from a seekable stream to top-down RGB8.
#[cfg(feature = "std")]
pub fn decode_bmp_reader<R: std::io::Read + std::io::Seek>(
    reader: &mut R,
    stop: impl Stop,
) -> Result<DecodeOutput, BitmapError> {
    DecodeRequest::from_reader(reader).decode(stop)
}

/// Encode packed top-down pixels ([`PixelLayout::Rgb8`] or
/// [`PixelLayout::Bgr8`]) as a 24-bit Windows V3 BMP.
pub fn encode_bmp(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    stop: impl Stop,
) -> Result<Vec<u8>, BitmapError> {
    bmp::encode(pixels, width, height, layout, &stop)
}
