use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use enough::Stop;

use crate::bmp::{self, DecodeParams};
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::PixelLayout;

/// Row and column order of a decoded buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// First row is the top of the image, pixels run left to right.
    #[default]
    TopDown,
    /// Rows in storage order (bottom of the image first), each row mirrored.
    ///
    /// This is the top-down image turned by 180 degrees, the layout older
    /// texture loaders uploaded directly.
    Rotated180,
}

/// Decoded image: an owned, tightly packed 3-byte-per-pixel buffer.
#[derive(Clone, Debug)]
pub struct DecodeOutput {
    pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
}

impl DecodeOutput {
    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data, e.g. for a one-time texture upload.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    pub(crate) fn new(pixels: Vec<u8>, width: u32, height: u32, layout: PixelLayout) -> Self {
        Self {
            pixels,
            width,
            height,
            layout,
        }
    }

    /// Reinterpret pixel data as typed pixel slice.
    ///
    /// Returns [`BitmapError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::DecodePixel>(&self) -> Result<&[P], BitmapError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        if self.layout != P::layout() {
            return Err(BitmapError::LayoutMismatch {
                expected: P::layout(),
                actual: self.layout,
            });
        }
        Ok(self.pixels().as_pixels())
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::DecodePixel>(&self) -> Result<imgref::ImgRef<'_, P>, BitmapError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }

    /// Convert to an [`imgref::ImgVec`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: crate::DecodePixel>(&self) -> Result<imgref::ImgVec<P>, BitmapError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgVec::new(
            pixels.to_vec(),
            self.width as usize,
            self.height as usize,
        ))
    }
}

enum Source<'a> {
    Bytes(&'a [u8]),
    #[cfg(feature = "std")]
    Path(&'a std::path::Path),
    #[cfg(feature = "std")]
    Reader(&'a mut dyn bmp::ReadSeek),
}

/// Builder for a bitmap decode.
///
/// ```no_run
/// use minibmp::{DecodeRequest, Limits, Orientation, Unstoppable};
///
/// let limits = Limits {
///     max_pixels: Some(4096 * 4096),
///     ..Default::default()
/// };
/// let texture = DecodeRequest::from_path("Resources/earthmap.bmp")
///     .with_limits(&limits)
///     .with_orientation(Orientation::TopDown)
///     .decode(Unstoppable)?;
/// assert_eq!(texture.pixels().len(), (texture.width * texture.height * 3) as usize);
/// # Ok::<(), minibmp::BitmapError>(())
/// ```
pub struct DecodeRequest<'a> {
    source: Source<'a>,
    limits: Option<&'a Limits>,
    orientation: Orientation,
    native: bool,
}

impl<'a> DecodeRequest<'a> {
    /// Decode from an in-memory bitmap file.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_source(Source::Bytes(data))
    }

    /// Decode from a file on disk.
    #[cfg(feature = "std")]
    pub fn from_path<P: AsRef<std::path::Path> + ?Sized>(path: &'a P) -> Self {
        Self::with_source(Source::Path(path.as_ref()))
    }

    /// Decode from a seekable reader positioned anywhere; offsets are
    /// taken from the start of the stream.
    #[cfg(feature = "std")]
    pub fn from_reader<R: std::io::Read + std::io::Seek>(reader: &'a mut R) -> Self {
        Self::with_source(Source::Reader(reader))
    }

    fn with_source(source: Source<'a>) -> Self {
        Self {
            source,
            limits: None,
            orientation: Orientation::TopDown,
            native: false,
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Keep BMP's BGR channel order ([`PixelLayout::Bgr8`]) instead of
    /// swapping to RGB.
    pub fn native(mut self, native: bool) -> Self {
        self.native = native;
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput, BitmapError> {
        let params = DecodeParams {
            limits: self.limits,
            orientation: self.orientation,
            layout: if self.native {
                PixelLayout::Bgr8
            } else {
                PixelLayout::Rgb8
            },
        };
        match self.source {
            Source::Bytes(data) => bmp::decode(data, &params, &stop),
            #[cfg(feature = "std")]
            Source::Path(path) => bmp::decode_path(path, &params, &stop),
            #[cfg(feature = "std")]
            Source::Reader(reader) => bmp::decode_reader(reader, &params, &stop),
        }
    }
}
