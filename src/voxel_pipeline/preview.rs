//! Colour preview of a voxel grid
//!
//! Land is painted green and water blue, each cell blown up to a
//! `scale x scale` block. Purely cosmetic; the map file is the real output.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use tracing::debug;

use crate::voxel_pipeline::common::error::{ConversionError, Result};
use crate::voxel_pipeline::grid::{Voxel, VoxelGrid};
use crate::voxel_pipeline::output::sibling;

pub const LAND_COLOR: Rgb<u8> = Rgb([34, 139, 34]);
pub const WATER_COLOR: Rgb<u8> = Rgb([30, 144, 255]);

const PREVIEW_FILE_NAME: &str = "mapPreview.png";

/// `<dir of input>/mapPreview.png`
pub fn preview_path_for(input: &Path) -> PathBuf {
    sibling(input, PREVIEW_FILE_NAME)
}

/// Renders `grid` with one `scale x scale` block per cell. A scale of 0 is
/// treated as 1. Fails with `EncodeError` when the scaled size does not fit
/// in an image buffer.
pub fn render_preview(grid: &VoxelGrid, scale: u32) -> Result<RgbImage> {
    let base = RgbImage::from_fn(grid.width(), grid.height(), |x, y| {
        match grid.get(x, y) {
            Some(Voxel::Land) => LAND_COLOR,
            _ => WATER_COLOR,
        }
    });

    let scale = scale.max(1);
    if scale == 1 {
        return Ok(base);
    }

    let (width, height) = scaled_size(grid, scale).ok_or_else(|| {
        ConversionError::EncodeError(format!(
            "preview of {}x{} cells at scale {} is too large",
            grid.width(),
            grid.height(),
            scale
        ))
    })?;
    // Nearest keeps cell edges hard.
    Ok(imageops::resize(&base, width, height, FilterType::Nearest))
}

fn scaled_size(grid: &VoxelGrid, scale: u32) -> Option<(u32, u32)> {
    let width = grid.width().checked_mul(scale)?;
    let height = grid.height().checked_mul(scale)?;
    // RGB8 buffer length must also be addressable.
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(3)?;
    Some((width, height))
}

pub fn save_preview(grid: &VoxelGrid, path: &Path, scale: u32) -> Result<()> {
    let preview = render_preview(grid, scale)?;
    debug!(
        path = %path.display(),
        "Saving {}x{} preview",
        preview.width(),
        preview.height()
    );
    preview
        .save(path)
        .map_err(|e| ConversionError::EncodeError(format!("{}: {}", path.display(), e)))
}
