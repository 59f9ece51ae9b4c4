//! Conversion configuration types

use image::imageops::FilterType;

use crate::voxel_pipeline::threshold::DEFAULT_THRESHOLD;

/// Maximum grid dimension used when none is configured.
pub const DEFAULT_MAX_DIMENSION: u32 = 100;

/// Output file flavour. Both carry identical content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `mapData.txt`
    #[default]
    Text,
    /// `mapData.lua`
    Lua,
}

impl OutputFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            OutputFormat::Text => "mapData.txt",
            OutputFormat::Lua => "mapData.lua",
        }
    }
}

/// How the output file is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Truncate and write in place
    #[default]
    Direct,
    /// Write a temp file in the same directory, then rename over the target
    Atomic,
}

/// Configuration for image to voxel map conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Upper bound on the grid's width and height
    pub max_dimension: u32,
    /// Luminance below this value is land
    pub threshold: u8,
    /// Resampling kernel used when downscaling
    pub filter: FilterType,
    pub format: OutputFormat,
    pub write_mode: WriteMode,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            threshold: DEFAULT_THRESHOLD,
            filter: FilterType::Lanczos3,
            format: OutputFormat::Text,
            write_mode: WriteMode::Direct,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    max_dimension: Option<u32>,
    threshold: Option<u8>,
    filter: Option<FilterType>,
    format: Option<OutputFormat>,
    write_mode: Option<WriteMode>,
}

impl ConversionConfigBuilder {
    pub fn max_dimension(mut self, max: u32) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn threshold(mut self, threshold: u8) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// `FilterType::Nearest` is accepted here but refused by the pipeline
    /// with `UnsupportedFilter` before any input is read.
    pub fn filter(mut self, filter: FilterType) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = Some(mode);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            threshold: self.threshold.unwrap_or(default.threshold),
            filter: self.filter.unwrap_or(default.filter),
            format: self.format.unwrap_or(default.format),
            write_mode: self.write_mode.unwrap_or(default.write_mode),
        }
    }
}
