//! Map output module
//!
//! This module persists serialized maps next to their source image and
//! holds the conversion configuration.

mod writer;
mod fs_writer;
pub mod types;

use std::path::{Path, PathBuf};

pub use writer::MapWriter;
pub use fs_writer::FsMapWriter;
pub use types::{OutputFormat, WriteMode, ConversionConfig, ConversionConfigBuilder};

/// Output location for a map converted from `input`: a fixed file name in
/// the same directory as the image.
pub fn output_path_for(input: &Path, format: OutputFormat) -> PathBuf {
    sibling(input, format.file_name())
}

pub(crate) fn sibling(input: &Path, file_name: &str) -> PathBuf {
    match input.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}
