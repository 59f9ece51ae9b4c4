use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to decode image {}: {reason}", path.display())]
    DecodeError {
        path: PathBuf,
        reason: String,
    },

    #[error("Invalid maximum dimension: {0} (must be at least 1)")]
    InvalidSize(u32),

    #[error("Resampling filter {0:?} aliases when downscaling; use an area-aware filter")]
    UnsupportedFilter(image::imageops::FilterType),

    #[error("Failed to write output file {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode preview image: {0}")]
    EncodeError(String),

    #[error("Malformed map data at line {line}: {reason}")]
    ParseError {
        line: usize,
        reason: String,
    },
}

impl ConversionError {
    pub(crate) fn decode(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::DecodeError {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteError {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;
