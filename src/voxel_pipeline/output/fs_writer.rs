use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::voxel_pipeline::common::error::{ConversionError, Result};
use crate::voxel_pipeline::output::types::{ConversionConfig, WriteMode};
use crate::voxel_pipeline::output::writer::MapWriter;

/// Writes maps to the local filesystem, replacing any existing file.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsMapWriter;

impl FsMapWriter {
    fn write_atomic(payload: &str, output_path: &Path) -> Result<()> {
        let dir = match output_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)
            .map_err(|e| ConversionError::write(output_path, e))?;
        tmp.write_all(payload.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| ConversionError::write(output_path, e))?;
        tmp.persist(output_path)
            .map_err(|e| ConversionError::write(output_path, e.error))?;
        Ok(())
    }
}

impl MapWriter for FsMapWriter {
    fn write_map(&self, payload: &str, output_path: &Path, config: &ConversionConfig) -> Result<()> {
        debug!(
            path = %output_path.display(),
            bytes = payload.len(),
            mode = ?config.write_mode,
            "Writing map"
        );

        match config.write_mode {
            // A crash mid-write can leave a truncated file behind.
            WriteMode::Direct => std::fs::write(output_path, payload)
                .map_err(|e| ConversionError::write(output_path, e)),
            WriteMode::Atomic => Self::write_atomic(payload, output_path),
        }
    }
}
