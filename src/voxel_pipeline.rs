//! Image to voxel map pipeline
//!
//! This module turns a raster image into a binary land/water grid and
//! serializes it as a nested table literal. Each stage lives in its own
//! module: luminance reading, proportional resizing, thresholding, grid
//! encoding and output writing, with orchestration in `conversions`.

pub mod common;
pub mod luma;
pub mod resize;
pub mod threshold;
pub mod grid;
pub mod output;
pub mod conversions;
pub mod timing;
pub mod preview;
pub mod worker;

pub use common::{
    ConversionError,
    Result,
};

pub use luma::{
    LumaImage,
    LumaReader,
    ImageCrateReader,
    probe_dimensions,
};

pub use resize::{
    ProportionalResizer,
    ScaledImage,
    check_filter,
    target_dimensions,
};

pub use threshold::{
    Thresholder,
    DEFAULT_THRESHOLD,
};

pub use grid::{
    Voxel,
    VoxelGrid,
    MapHeader,
    GridEncoder,
    parse_map,
};

pub use output::{
    OutputFormat,
    WriteMode,
    ConversionConfig,
    ConversionConfigBuilder,
    MapWriter,
    FsMapWriter,
    output_path_for,
};

pub use conversions::{
    ImageToVoxelPipeline,
    ConversionReport,
    VoxelMap,
    convert,
};

pub use timing::{PipelineTimings, StepTiming, Timer};

pub use preview::{render_preview, save_preview, preview_path_for};

pub use worker::{spawn_conversion, ConversionHandle};
