//! Luminance thresholding
//!
//! Dark pixels become land, light pixels become water. The polarity is
//! fixed; only the cutoff is adjustable.

use tracing::debug;

use crate::voxel_pipeline::grid::{Voxel, VoxelGrid};
use crate::voxel_pipeline::resize::ScaledImage;

/// Luminance cutoff separating land (below) from water (at or above).
pub const DEFAULT_THRESHOLD: u8 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholder {
    threshold: u8,
}

impl Default for Thresholder {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl Thresholder {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn classify(&self, luminance: u8) -> Voxel {
        if luminance < self.threshold {
            Voxel::Land
        } else {
            Voxel::Water
        }
    }

    pub fn apply(&self, image: &ScaledImage) -> VoxelGrid {
        let gray = image.image().as_gray();
        let cells: Vec<Voxel> = gray.pixels().map(|p| self.classify(p.0[0])).collect();
        let grid = VoxelGrid::from_cells(gray.width(), gray.height(), cells);

        debug!(
            "Thresholded {}x{} at {}: {} land cells",
            grid.width(),
            grid.height(),
            self.threshold,
            grid.land_count()
        );
        grid
    }
}
