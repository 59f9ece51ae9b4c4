use tracing::{info, instrument};
use std::path::{Path, PathBuf};

use crate::voxel_pipeline::{
    common::error::{ConversionError, Result},
    grid::{GridEncoder, MapHeader, VoxelGrid},
    luma::{ImageCrateReader, LumaImage, LumaReader},
    output::{output_path_for, ConversionConfig, FsMapWriter, MapWriter},
    resize::{check_filter, ProportionalResizer},
    threshold::Thresholder,
    timing::PipelineTimings,
};

/// Grid and serialized payload for one conversion, before anything is written.
#[derive(Debug, Clone)]
pub struct VoxelMap {
    pub grid: VoxelGrid,
    pub payload: String,
    pub original_width: u32,
    pub original_height: u32,
}

/// Outcome of a completed file conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub output_path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub original_width: u32,
    pub original_height: u32,
    /// Number of land cells in the grid
    pub voxel_count: usize,
}

pub struct ImageToVoxelPipeline<R: LumaReader, W: MapWriter> {
    reader: R,
    writer: W,
    config: ConversionConfig,
}

impl ImageToVoxelPipeline<ImageCrateReader, FsMapWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            reader: ImageCrateReader,
            writer: FsMapWriter,
            config,
        }
    }
}

impl<R: LumaReader, W: MapWriter> ImageToVoxelPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_config(&self) -> Result<()> {
        if self.config.max_dimension == 0 {
            return Err(ConversionError::InvalidSize(self.config.max_dimension));
        }
        check_filter(self.config.filter)
    }

    fn transform(
        &self,
        image: LumaImage,
        source_name: &str,
        timings: &mut PipelineTimings,
    ) -> Result<VoxelMap> {
        let (original_width, original_height) = image.dimensions();

        let scaled = {
            let _span = tracing::info_span!("resize",
                width = original_width,
                height = original_height,
                max_dimension = self.config.max_dimension
            ).entered();
            let resizer = ProportionalResizer::with_filter(self.config.max_dimension, self.config.filter)?;
            timings.time("resize", || resizer.resize(image))?
        };

        if scaled.was_resized() {
            info!(
                "Resized to: {}x{}",
                scaled.width(),
                scaled.height()
            );
        }

        let grid = {
            let _span = tracing::info_span!("threshold", threshold = self.config.threshold).entered();
            let thresholder = Thresholder::new(self.config.threshold);
            timings.time("threshold", || thresholder.apply(&scaled))
        };

        let payload = {
            let _span = tracing::info_span!("encode").entered();
            let header = MapHeader::for_grid(source_name, &grid);
            timings.time("encode", || GridEncoder.encode(&grid, &header))
        };

        Ok(VoxelMap {
            grid,
            payload,
            original_width,
            original_height,
        })
    }

    /// Runs an already-decoded image through resize, threshold and encode.
    pub fn convert_image(&self, image: LumaImage, source_name: &str) -> Result<VoxelMap> {
        self.validate_config()?;
        self.transform(image, source_name, &mut PipelineTimings::new())
    }

    /// Decodes `input_data` and converts it in memory. Nothing is written.
    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], source_name: &str) -> Result<VoxelMap> {
        self.validate_config()?;

        let image = {
            let _span = tracing::info_span!("decode").entered();
            self.reader.read_luma(input_data, Path::new(source_name))?
        };

        self.transform(image, source_name, &mut PipelineTimings::new())
    }

    pub fn convert_file<P: AsRef<Path>>(&self, input_path: P) -> Result<ConversionReport> {
        self.convert_file_with_timings(input_path).map(|(report, _)| report)
    }

    pub fn convert_file_with_timings<P: AsRef<Path>>(
        &self,
        input_path: P,
    ) -> Result<(ConversionReport, PipelineTimings)> {
        self.convert_file_with_map(input_path)
            .map(|(report, _, timings)| (report, timings))
    }

    /// Like `convert_file_with_timings`, but also hands back the in-memory
    /// grid and payload that were written.
    #[instrument(skip(self, input_path), fields(input = %input_path.as_ref().display()))]
    pub fn convert_file_with_map<P: AsRef<Path>>(
        &self,
        input_path: P,
    ) -> Result<(ConversionReport, VoxelMap, PipelineTimings)> {
        let input_path = input_path.as_ref();
        let output_path = output_path_for(input_path, self.config.format);
        let mut timings = PipelineTimings::new();

        self.validate_config()?;

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            max_dimension = self.config.max_dimension,
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            timings.time("read_input_file", || std::fs::read(input_path))
                .map_err(|e| ConversionError::decode(input_path, e))?
        };

        let image = {
            let _span = tracing::info_span!("decode", input_size = input_data.len()).entered();
            timings.time("decode", || self.reader.read_luma(&input_data, input_path))?
        };

        info!("Original size: {}x{}", image.width(), image.height());

        let source_name = input_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| input_path.display().to_string());

        let map = self.transform(image, &source_name, &mut timings)?;

        {
            let _span = tracing::info_span!("write_output").entered();
            timings.time("write_output", || {
                self.writer.write_map(&map.payload, &output_path, &self.config)
            })?;
        }

        let report = ConversionReport {
            output_path,
            width: map.grid.width(),
            height: map.grid.height(),
            original_width: map.original_width,
            original_height: map.original_height,
            voxel_count: map.grid.land_count(),
        };

        info!(
            width = report.width,
            height = report.height,
            voxels = report.voxel_count,
            output = %report.output_path.display(),
            "Conversion complete"
        );
        Ok((report, map, timings))
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}

/// Converts the image at `image_path` with default settings and the given
/// maximum dimension, writing the map next to the image.
pub fn convert<P: AsRef<Path>>(image_path: P, max_dim: u32) -> Result<ConversionReport> {
    let config = ConversionConfig::builder().max_dimension(max_dim).build();
    ImageToVoxelPipeline::new(config).convert_file(image_path)
}
