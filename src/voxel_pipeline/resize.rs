//! Proportional downscaling
//!
//! Images larger than the configured maximum dimension are shrunk by a
//! single uniform ratio so that the longer side fits. Smaller images pass
//! through untouched.

use image::imageops::{self, FilterType};
use tracing::debug;

use crate::voxel_pipeline::common::error::{ConversionError, Result};
use crate::voxel_pipeline::luma::LumaImage;

/// Computes the output size for a `width` x `height` image bounded by `max_dim`.
///
/// Returns the input size when neither side exceeds `max_dim`. Otherwise both
/// sides are multiplied by `min(max_dim / width, max_dim / height)`, floored,
/// and clamped to at least one pixel.
pub fn target_dimensions(width: u32, height: u32, max_dim: u32) -> Result<(u32, u32)> {
    if max_dim == 0 {
        return Err(ConversionError::InvalidSize(max_dim));
    }

    if width <= max_dim && height <= max_dim {
        return Ok((width, height));
    }

    let max = max_dim as f64;
    let ratio = (max / width as f64).min(max / height as f64);
    let scale = |side: u32| ((side as f64 * ratio).floor() as u32).max(1);

    Ok((scale(width), scale(height)))
}

/// Rejects resampling kernels unfit for the main transform.
pub fn check_filter(filter: FilterType) -> Result<()> {
    match filter {
        FilterType::Nearest => Err(ConversionError::UnsupportedFilter(filter)),
        _ => Ok(()),
    }
}

/// A luminance image that is guaranteed to fit the maximum dimension.
#[derive(Debug, Clone)]
pub struct ScaledImage {
    image: LumaImage,
    original_width: u32,
    original_height: u32,
}

impl ScaledImage {
    /// Wraps an image that already fits, without resampling.
    pub fn unscaled(image: LumaImage) -> Self {
        let (original_width, original_height) = image.dimensions();
        Self {
            image,
            original_width,
            original_height,
        }
    }

    pub fn image(&self) -> &LumaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn original_dimensions(&self) -> (u32, u32) {
        (self.original_width, self.original_height)
    }

    pub fn was_resized(&self) -> bool {
        self.image.dimensions() != (self.original_width, self.original_height)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ProportionalResizer {
    max_dimension: u32,
    filter: FilterType,
}

impl ProportionalResizer {
    pub fn new(max_dimension: u32) -> Result<Self> {
        Self::with_filter(max_dimension, FilterType::Lanczos3)
    }

    /// Fails with `UnsupportedFilter` for `FilterType::Nearest`, which
    /// aliases fine detail into solid blocks before thresholding.
    pub fn with_filter(max_dimension: u32, filter: FilterType) -> Result<Self> {
        if max_dimension == 0 {
            return Err(ConversionError::InvalidSize(max_dimension));
        }
        check_filter(filter)?;
        Ok(Self { max_dimension, filter })
    }

    pub fn max_dimension(&self) -> u32 {
        self.max_dimension
    }

    pub fn resize(&self, image: LumaImage) -> Result<ScaledImage> {
        let (width, height) = image.dimensions();
        let (new_width, new_height) = target_dimensions(width, height, self.max_dimension)?;

        if (new_width, new_height) == (width, height) {
            debug!("{}x{} fits within {}, no resize", width, height, self.max_dimension);
            return Ok(ScaledImage::unscaled(image));
        }

        debug!(
            "Resizing {}x{} -> {}x{} ({:?})",
            width, height, new_width, new_height, self.filter
        );
        let resized = imageops::resize(image.as_gray(), new_width, new_height, self.filter);

        Ok(ScaledImage {
            image: LumaImage::from_gray(resized),
            original_width: width,
            original_height: height,
        })
    }
}
