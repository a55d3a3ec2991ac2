//! Error types for the placeholder generator.
//!
//! Every fallible operation in the crate returns [`PlaceholderResult`]. Errors are
//! recovered at the boundary that raised them; none of them poison the batch.

use std::io;
use thiserror::Error;
use serde::Serialize;

/// Main error type for the placeholder generator.
#[derive(Error, Debug, Serialize, Clone, PartialEq, Eq)]
pub enum PlaceholderError {
    /// None of the submitted files declared an image media type
    #[error("Please select valid image files")]
    NoValidImages,

    /// The bytes of an upload could not be decoded as an image
    #[error("Decode error: {0}")]
    DecodeFailure(String),

    /// The renderer was asked for a surface with a zero side
    #[error("Invalid placeholder dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Batch export was requested but no task has completed
    #[error("No completed images to download")]
    NothingToExport,

    /// Archive assembly or PNG encoding failed
    #[error("Export error: {0}")]
    ExportFailure(String),

    /// Upload or batch export attempted while a batch is still being processed
    #[error("A batch is still being processed")]
    BatchInProgress,

    /// File IO error on the host side
    #[error("IO error: {0}")]
    IO(String),
}

/// Convenience result type for placeholder operations.
pub type PlaceholderResult<T> = Result<T, PlaceholderError>;

// Helper methods for error creation
impl PlaceholderError {
    pub fn decode<T: Into<String>>(msg: T) -> Self {
        Self::DecodeFailure(msg.into())
    }

    pub fn export<T: Into<String>>(msg: T) -> Self {
        Self::ExportFailure(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        Self::IO(msg.into())
    }
}

// Convert std::io::Error to PlaceholderError
impl From<io::Error> for PlaceholderError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}

impl From<image::ImageError> for PlaceholderError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Decoding(e) => Self::DecodeFailure(e.to_string()),
            image::ImageError::Unsupported(e) => Self::DecodeFailure(e.to_string()),
            other => Self::ExportFailure(other.to_string()),
        }
    }
}

impl From<zip::result::ZipError> for PlaceholderError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::ExportFailure(format!("Failed to build archive: {}", err))
    }
}
