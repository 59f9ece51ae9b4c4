//! Luminance reader backed by the `image` crate.
//!
//! Any format the `image` crate was built with (PNG, JPEG, BMP, GIF, TIFF,
//! ...) is accepted. The format is sniffed from the content, not the file
//! extension. Colour images are reduced to luminance by the crate's own
//! grayscale conversion; alpha is discarded.

use std::path::Path;

use tracing::debug;

use crate::voxel_pipeline::common::error::{ConversionError, Result};
use crate::voxel_pipeline::luma::reader::LumaReader;
use crate::voxel_pipeline::luma::types::LumaImage;

#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateReader;

impl LumaReader for ImageCrateReader {
    fn read_luma(&self, data: &[u8], origin: &Path) -> Result<LumaImage> {
        debug!("Decoding image, {} bytes", data.len());

        let decoded = image::load_from_memory(data)
            .map_err(|e| ConversionError::decode(origin, e))?;

        let color = decoded.color();
        let gray = decoded.into_luma8();
        debug!("Decoded image: {}x{} ({:?})", gray.width(), gray.height(), color);

        if gray.width() == 0 || gray.height() == 0 {
            return Err(ConversionError::decode(
                origin,
                format!("image has no pixels ({}x{})", gray.width(), gray.height()),
            ));
        }

        Ok(LumaImage::from_gray(gray))
    }
}
