use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use image::imageops::FilterType;

use crate::voxel_pipeline::common::error::{ConversionError, Result};
use crate::voxel_pipeline::conversions::ImageToVoxelPipeline;
use crate::voxel_pipeline::grid::parse_map;
use crate::voxel_pipeline::luma::{LumaImage, LumaReader};
use crate::voxel_pipeline::output::{ConversionConfig, MapWriter, OutputFormat};

struct MockReader {
    should_fail: bool,
    mock_image: Option<LumaImage>,
    calls: Arc<Mutex<usize>>,
}

impl MockReader {
    fn returning(image: LumaImage) -> Self {
        Self {
            should_fail: false,
            mock_image: Some(image),
            calls: Arc::new(Mutex::new(0)),
        }
    }
}

impl LumaReader for MockReader {
    fn read_luma(&self, _data: &[u8], origin: &Path) -> Result<LumaImage> {
        *self.calls.lock().unwrap() += 1;
        if self.should_fail {
            return Err(ConversionError::DecodeError {
                path: origin.to_path_buf(),
                reason: "Mock decode error".to_string(),
            });
        }
        Ok(self.mock_image.clone().unwrap_or_else(|| LumaImage::filled(4, 4, 0)))
    }
}

#[derive(Default)]
struct MockWriter {
    should_fail: bool,
    written: Arc<Mutex<Vec<(PathBuf, String)>>>,
}

impl MapWriter for MockWriter {
    fn write_map(&self, payload: &str, output_path: &Path, _config: &ConversionConfig) -> Result<()> {
        if self.should_fail {
            return Err(ConversionError::WriteError {
                path: output_path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Mock write error"),
            });
        }
        self.written
            .lock()
            .unwrap()
            .push((output_path.to_path_buf(), payload.to_string()));
        Ok(())
    }
}

fn source_file(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("island.png");
    std::fs::write(&path, b"placeholder bytes, decoding is mocked").unwrap();
    path
}

#[test]
fn test_config_builder() {
    let config = ConversionConfig::builder()
        .max_dimension(42)
        .threshold(64)
        .format(OutputFormat::Lua)
        .build();

    assert_eq!(config.max_dimension, 42);
    assert_eq!(config.threshold, 64);
    assert_eq!(config.format, OutputFormat::Lua);
}

#[test]
fn test_default_config() {
    let config = ConversionConfig::default();

    assert_eq!(config.max_dimension, 100);
    assert_eq!(config.threshold, 128);
    assert_eq!(config.format, OutputFormat::Text);
}

#[test]
fn test_in_memory_conversion_does_not_write() {
    let writer = MockWriter::default();
    let written = writer.written.clone();
    let pipeline = ImageToVoxelPipeline::with_custom(
        MockReader::returning(LumaImage::filled(4, 4, 0)),
        writer,
        ConversionConfig::default(),
    );

    let map = pipeline.convert(b"fake image data", "black.png").unwrap();

    assert_eq!(map.grid.land_count(), 16);
    assert!(map.payload.contains("-- Source: black.png\n"));
    assert_eq!(map.payload.matches("\t{1,1,1,1},\n").count(), 4);
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_successful_file_conversion() {
    let dir = tempfile::tempdir().unwrap();
    let input = source_file(&dir);
    let writer = MockWriter::default();
    let written = writer.written.clone();
    let pipeline = ImageToVoxelPipeline::with_custom(
        MockReader::returning(LumaImage::from_raw(2, 1, vec![0, 255]).unwrap()),
        writer,
        ConversionConfig::default(),
    );

    let report = pipeline.convert_file(&input).unwrap();

    assert_eq!(report.output_path, dir.path().join("mapData.txt"));
    assert_eq!((report.width, report.height), (2, 1));
    assert_eq!(report.voxel_count, 1);

    let written = written.lock().unwrap();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].0, report.output_path);
    assert!(written[0].1.contains("-- Source: island.png\n-- Dimensions: 2x1\n"));
    assert!(written[0].1.contains("\t{1,0},\n"));
}

#[test]
fn test_oversized_image_is_scaled_before_thresholding() {
    let dir = tempfile::tempdir().unwrap();
    let input = source_file(&dir);
    let pipeline = ImageToVoxelPipeline::with_custom(
        MockReader::returning(LumaImage::filled(300, 150, 10)),
        MockWriter::default(),
        ConversionConfig::builder().max_dimension(30).build(),
    );

    let (report, timings) = pipeline.convert_file_with_timings(&input).unwrap();

    assert_eq!((report.original_width, report.original_height), (300, 150));
    assert_eq!((report.width, report.height), (30, 15));
    assert_eq!(report.voxel_count, 30 * 15);
    for step in ["read_input_file", "decode", "resize", "threshold", "encode", "write_output"] {
        assert!(timings.get_step(step).is_some(), "missing timing for {step}");
    }
}

#[test]
fn test_zero_max_dimension_fails_before_decoding() {
    let reader = MockReader::returning(LumaImage::filled(4, 4, 0));
    let calls = reader.calls.clone();
    let writer = MockWriter::default();
    let written = writer.written.clone();
    let pipeline = ImageToVoxelPipeline::with_custom(
        reader,
        writer,
        ConversionConfig::builder().max_dimension(0).build(),
    );

    let result = pipeline.convert_file("does/not/matter.png");

    assert!(matches!(result, Err(ConversionError::InvalidSize(0))));
    assert_eq!(*calls.lock().unwrap(), 0);
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_reader_failure() {
    let dir = tempfile::tempdir().unwrap();
    let input = source_file(&dir);
    let writer = MockWriter::default();
    let written = writer.written.clone();
    let pipeline = ImageToVoxelPipeline::with_custom(
        MockReader {
            should_fail: true,
            mock_image: None,
            calls: Arc::new(Mutex::new(0)),
        },
        writer,
        ConversionConfig::default(),
    );

    let result = pipeline.convert_file(&input);

    assert!(matches!(result, Err(ConversionError::DecodeError { .. })));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_missing_input_file_is_a_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let reader = MockReader::returning(LumaImage::filled(1, 1, 0));
    let calls = reader.calls.clone();
    let pipeline = ImageToVoxelPipeline::with_custom(reader, MockWriter::default(), ConversionConfig::default());

    let missing = dir.path().join("missing.png");
    match pipeline.convert_file(&missing) {
        Err(ConversionError::DecodeError { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected DecodeError, got {:?}", other),
    }
    assert_eq!(*calls.lock().unwrap(), 0);
}

#[test]
fn test_writer_failure() {
    let dir = tempfile::tempdir().unwrap();
    let input = source_file(&dir);
    let pipeline = ImageToVoxelPipeline::with_custom(
        MockReader::returning(LumaImage::filled(2, 2, 0)),
        MockWriter {
            should_fail: true,
            ..Default::default()
        },
        ConversionConfig::default(),
    );

    let result = pipeline.convert_file(&input);

    assert!(matches!(result, Err(ConversionError::WriteError { .. })));
}

#[test]
fn test_set_config_changes_output_format() {
    let dir = tempfile::tempdir().unwrap();
    let input = source_file(&dir);
    let mut pipeline = ImageToVoxelPipeline::with_custom(
        MockReader::returning(LumaImage::filled(2, 2, 255)),
        MockWriter::default(),
        ConversionConfig::default(),
    );

    pipeline.set_config(ConversionConfig::builder().format(OutputFormat::Lua).build());
    let report = pipeline.convert_file(&input).unwrap();

    assert_eq!(pipeline.config().format, OutputFormat::Lua);
    assert_eq!(report.output_path, dir.path().join("mapData.lua"));
    assert_eq!(report.voxel_count, 0);
}

#[test]
fn test_nearest_filter_fails_before_decoding() {
    let dir = tempfile::tempdir().unwrap();
    let input = source_file(&dir);
    // One-pixel checkerboard: nearest sampling would hit only the dark cells.
    let checkerboard = LumaImage::from_raw(
        100,
        100,
        (0..100u32 * 100).map(|i| if (i % 100 + i / 100) % 2 == 0 { 0 } else { 255 }).collect(),
    )
    .unwrap();
    let reader = MockReader::returning(checkerboard.clone());
    let calls = reader.calls.clone();
    let writer = MockWriter::default();
    let written = writer.written.clone();
    let pipeline = ImageToVoxelPipeline::with_custom(
        reader,
        writer,
        ConversionConfig::builder()
            .max_dimension(10)
            .filter(FilterType::Nearest)
            .build(),
    );

    assert!(matches!(
        pipeline.convert_file(&input),
        Err(ConversionError::UnsupportedFilter(FilterType::Nearest))
    ));
    assert!(matches!(
        pipeline.convert_image(checkerboard, "checker.png"),
        Err(ConversionError::UnsupportedFilter(FilterType::Nearest))
    ));
    assert_eq!(*calls.lock().unwrap(), 0);
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_convert_file_with_map_returns_written_grid() {
    let dir = tempfile::tempdir().unwrap();
    let input = source_file(&dir);
    let writer = MockWriter::default();
    let written = writer.written.clone();
    let pipeline = ImageToVoxelPipeline::with_custom(
        MockReader::returning(LumaImage::from_raw(3, 2, vec![0, 255, 0, 255, 0, 255]).unwrap()),
        writer,
        ConversionConfig::default(),
    );

    let (report, map, timings) = pipeline.convert_file_with_map(&input).unwrap();

    assert_eq!((map.grid.width(), map.grid.height()), (report.width, report.height));
    assert_eq!(map.grid.land_count(), report.voxel_count);
    assert!(timings.get_step("write_output").is_some());

    let written = written.lock().unwrap();
    assert_eq!(written[0].1, map.payload);
    assert_eq!(parse_map(&written[0].1).unwrap(), map.grid);
}
