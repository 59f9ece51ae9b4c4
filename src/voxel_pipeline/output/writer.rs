use std::path::Path;

use crate::voxel_pipeline::common::error::Result;
use crate::voxel_pipeline::output::types::ConversionConfig;

pub trait MapWriter {
    fn write_map(&self, payload: &str, output_path: &Path, config: &ConversionConfig) -> Result<()>;
}
