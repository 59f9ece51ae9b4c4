//! Luminance image types

use image::{GrayImage, Luma};

/// Decoded single-channel image with intensities in `[0, 255]`.
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct LumaImage {
    pixels: GrayImage,
}

impl LumaImage {
    pub fn from_gray(pixels: GrayImage) -> Self {
        Self { pixels }
    }

    /// Builds an image from row-major bytes. Returns `None` if `data` does
    /// not hold exactly `width * height` samples.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        GrayImage::from_raw(width, height, data).map(Self::from_gray)
    }

    /// Uniform image, every pixel set to `value`.
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self::from_gray(GrayImage::from_pixel(width, height, Luma([value])))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Intensity at column `x`, row `y`. Panics when out of bounds.
    pub fn luminance(&self, x: u32, y: u32) -> u8 {
        self.pixels.get_pixel(x, y).0[0]
    }

    pub fn as_gray(&self) -> &GrayImage {
        &self.pixels
    }
}
