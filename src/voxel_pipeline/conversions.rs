//! Pipeline conversions module
//!
//! This module contains the orchestration logic that runs an image through
//! every stage and reports the result.

mod image_to_voxel;

#[cfg(test)]
mod tests;

pub use image_to_voxel::{ImageToVoxelPipeline, ConversionReport, VoxelMap, convert};
