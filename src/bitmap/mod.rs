//! Opaque bitmap type shared by the cache tiers
//!
//! Wraps a decoded RGBA buffer and exposes just enough surface for the cache:
//! dimensions, byte size, and an encode/decode pair.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::utils::{FavicacheError, Result};

/// Bytes per pixel of a decoded bitmap (RGBA8)
pub const BYTES_PER_PIXEL: usize = 4;

/// Encoded image formats a bitmap can be written as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitmapFormat {
    #[default]
    Png,
    Bmp,
}

impl BitmapFormat {
    fn as_image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Bmp => ImageFormat::Bmp,
        }
    }

    /// Format implied by a file name; anything but `.bmp` is PNG
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("bmp") => Self::Bmp,
            _ => Self::Png,
        }
    }

    /// File extension used on disk
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Bmp => "bmp",
        }
    }
}

/// Decoded image data
///
/// Cloning is cheap; the pixel buffer is shared.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    pixels: Arc<RgbaImage>,
}

impl Bitmap {
    /// Wrap an already decoded RGBA image
    pub fn from_image(image: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(image),
        }
    }

    /// Build a bitmap from raw RGBA bytes
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let len = data.len();
        RgbaImage::from_raw(width, height, data)
            .map(Self::from_image)
            .ok_or(FavicacheError::PixelBuffer { width, height, len })
    }

    /// A bitmap filled with one color
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self::from_image(RgbaImage::from_pixel(width, height, Rgba(rgba)))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Memory footprint of the decoded pixels
    pub fn byte_size(&self) -> usize {
        self.width() as usize * self.height() as usize * BYTES_PER_PIXEL
    }

    /// RGBA value at (x, y), or `None` outside the bitmap
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixels.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Raw RGBA bytes, row-major
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Encode the bitmap into the given format
    pub fn encode(&self, format: BitmapFormat) -> Result<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8((*self.pixels).clone())
            .write_to(&mut buf, format.as_image_format())?;
        Ok(buf.into_inner())
    }

    /// Decode any supported image format into a bitmap
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes)?;
        Ok(Self::from_image(img.to_rgba8()))
    }
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_size_is_rgba() {
        let bmp = Bitmap::solid(16, 8, [1, 2, 3, 255]);
        assert_eq!(bmp.byte_size(), 16 * 8 * 4);
    }

    #[test]
    fn test_png_round_trip_preserves_pixels() {
        let mut data = Vec::new();
        for i in 0..(4 * 4) {
            data.extend_from_slice(&[i as u8 * 10, 255 - i as u8, 7, 255]);
        }
        let bmp = Bitmap::from_rgba(4, 4, data).unwrap();

        let encoded = bmp.encode(BitmapFormat::Png).unwrap();
        assert_eq!(&encoded[1..4], b"PNG");

        let decoded = Bitmap::decode(&encoded).unwrap();
        assert_eq!(decoded, bmp);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(BitmapFormat::from_path(Path::new("icon.BMP")), BitmapFormat::Bmp);
        assert_eq!(BitmapFormat::from_path(Path::new("icon.png")), BitmapFormat::Png);
        assert_eq!(BitmapFormat::from_path(Path::new("icon")), BitmapFormat::Png);
    }

    #[test]
    fn test_bmp_round_trip() {
        let bmp = Bitmap::solid(3, 2, [12, 34, 56, 255]);
        let encoded = bmp.encode(BitmapFormat::Bmp).unwrap();
        assert_eq!(&encoded[..2], b"BM");
        assert_eq!(Bitmap::decode(&encoded).unwrap(), bmp);
    }

    #[test]
    fn test_from_rgba_rejects_short_buffer() {
        let err = Bitmap::from_rgba(2, 2, vec![0; 3]).unwrap_err();
        assert!(matches!(err, FavicacheError::PixelBuffer { len: 3, .. }));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(Bitmap::decode(b"definitely not an image").is_err());
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let bmp = Bitmap::solid(2, 2, [9, 9, 9, 9]);
        assert_eq!(bmp.pixel(1, 1), Some([9, 9, 9, 9]));
        assert_eq!(bmp.pixel(2, 0), None);
    }
}
