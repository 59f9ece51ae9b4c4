use std::path::Path;

use crate::voxel_pipeline::common::error::Result;
use crate::voxel_pipeline::luma::types::LumaImage;

pub trait LumaReader {
    /// Decodes encoded image bytes. `origin` names the source in errors.
    fn read_luma(&self, data: &[u8], origin: &Path) -> Result<LumaImage>;
}
