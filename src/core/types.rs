//! Core value types shared by intake, processing and export.

use std::fmt;
use std::sync::Arc;
use serde::{Deserialize, Serialize};

/// Pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {}", self.width, self.height)
    }
}

/// A user-supplied file: name, declared media type and raw content.
///
/// Content is shared so it can be handed to a blocking decode without copying.
#[derive(Clone)]
pub struct InputFile {
    /// Original file name, used to derive output names
    pub name: String,
    /// Declared media type, e.g. `image/png`
    pub media_type: String,
    /// Raw file content
    pub bytes: Arc<[u8]>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for InputFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A downloadable result: a single placeholder PNG or the batch archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// File name offered for the download
    pub file_name: String,
    /// Media type of `bytes`
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Outcome of one processing run over a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Number of tasks in the batch
    pub total: usize,
    /// Tasks that reached `Completed`
    pub completed: usize,
    /// Tasks that reached `Failed`
    pub failed: usize,
    /// Whether the run stopped early on a cancel request
    pub cancelled: bool,
}
