/// Pixel memory layout of a decoded buffer.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// 3 channels, 8-bit RGB.
    Rgb8,
    /// 3 channels, 8-bit BGR (the order BMP stores on disk).
    Bgr8,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Rgb8 | Self::Bgr8 => 3,
        }
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        match self {
            Self::Rgb8 | Self::Bgr8 => 3,
        }
    }

    /// Byte offsets of red, green and blue within one pixel.
    pub(crate) fn rgb_offsets(&self) -> [usize; 3] {
        match self {
            Self::Rgb8 => [0, 1, 2],
            Self::Bgr8 => [2, 1, 0],
        }
    }
}

/// Pixel types a decoded buffer can be viewed as.
#[cfg(feature = "rgb")]
pub trait DecodePixel: Copy + 'static {
    /// The layout this pixel type has in memory.
    fn layout() -> PixelLayout;
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::Rgb<u8> {
    fn layout() -> PixelLayout {
        PixelLayout::Rgb8
    }
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::Bgr<u8> {
    fn layout() -> PixelLayout {
        PixelLayout::Bgr8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_mirrored() {
        assert_eq!(PixelLayout::Rgb8.rgb_offsets(), [0, 1, 2]);
        assert_eq!(PixelLayout::Bgr8.rgb_offsets(), [2, 1, 0]);
        assert_eq!(PixelLayout::Bgr8.bytes_per_pixel(), 3);
    }
}
