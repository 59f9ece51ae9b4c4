pub mod voxel_pipeline;
pub mod logger;
