//! Voxel grid module
//!
//! This module holds the binary land/water grid together with its textual
//! encoding and the matching parser.

mod encoder;
mod decoder;
pub mod types;

pub use encoder::{GridEncoder, MapHeader};
pub use decoder::parse_map;
pub use types::{Voxel, VoxelGrid};
