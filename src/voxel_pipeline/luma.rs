//! Luminance image loading module
//!
//! This module decodes standard bitmap formats into single-channel 8-bit
//! luminance images.

mod reader;
mod image_reader;
pub mod types;

use std::path::Path;

use crate::voxel_pipeline::common::error::{ConversionError, Result};

pub use reader::LumaReader;
pub use image_reader::ImageCrateReader;
pub use types::LumaImage;

/// Returns the `(width, height)` of an image file without decoding its pixels.
pub fn probe_dimensions(path: &Path) -> Result<(u32, u32)> {
    image::ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| ConversionError::decode(path, e))?
        .into_dimensions()
        .map_err(|e| ConversionError::decode(path, e))
}
