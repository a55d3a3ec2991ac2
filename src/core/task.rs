//! Image task definition and its state machine.

use std::fmt;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;
use crate::core::{Dimensions, InputFile};

/// Opaque identifier assigned to a task at intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Processing state of a task.
///
/// `Pending → Processing → {Completed | Failed}`; the last two are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Processing record of one submitted image.
pub struct ImageTask {
    id: TaskId,
    source: InputFile,
    status: TaskStatus,
    decoded_original: Option<DynamicImage>,
    dimensions: Option<Dimensions>,
    placeholder: Option<Vec<u8>>,
    progress: u8,
    error: Option<String>,
}

impl ImageTask {
    /// Creates a pending task for an accepted upload.
    pub fn new(source: InputFile) -> Self {
        Self {
            id: TaskId::new(),
            source,
            status: TaskStatus::Pending,
            decoded_original: None,
            dimensions: None,
            placeholder: None,
            progress: 0,
            error: None,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Original file name of the upload
    pub fn source_name(&self) -> &str {
        &self.source.name
    }

    pub fn source(&self) -> &InputFile {
        &self.source
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn decoded_original(&self) -> Option<&DynamicImage> {
        self.decoded_original.as_ref()
    }

    pub fn dimensions(&self) -> Option<Dimensions> {
        self.dimensions
    }

    /// Generated PNG, present only once the task completed
    pub fn placeholder(&self) -> Option<&[u8]> {
        self.placeholder.as_deref()
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Why the task failed, if it did
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    // ── Transitions ──────────────────────────────────────────────────────────────────
    //
    // Each returns false and leaves the task untouched when called from the wrong state.

    /// `Pending → Processing`
    pub fn start_processing(&mut self) -> bool {
        if self.status != TaskStatus::Pending {
            warn!("Task {} cannot start from state {}", self.id, self.status);
            return false;
        }
        self.status = TaskStatus::Processing;
        true
    }

    /// Records the decoded original. Dimensions are set once and never change.
    pub fn record_decoded(&mut self, image: DynamicImage) -> bool {
        if self.status != TaskStatus::Processing || self.dimensions.is_some() {
            warn!("Task {} cannot record a decode in state {}", self.id, self.status);
            return false;
        }
        self.dimensions = Some(Dimensions::new(image.width(), image.height()));
        self.decoded_original = Some(image);
        self.progress = self.progress.max(50);
        true
    }

    /// `Processing → Completed`
    pub fn complete(&mut self, placeholder: Vec<u8>) -> bool {
        if self.status != TaskStatus::Processing || self.dimensions.is_none() {
            warn!("Task {} cannot complete from state {}", self.id, self.status);
            return false;
        }
        self.status = TaskStatus::Completed;
        self.placeholder = Some(placeholder);
        self.progress = 100;
        true
    }

    /// `Processing → Failed`
    pub fn fail(&mut self, reason: impl Into<String>) -> bool {
        if self.status != TaskStatus::Processing {
            warn!("Task {} cannot fail from state {}", self.id, self.status);
            return false;
        }
        self.status = TaskStatus::Failed;
        self.placeholder = None;
        self.error = Some(reason.into());
        true
    }
}

impl fmt::Debug for ImageTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageTask")
            .field("id", &self.id)
            .field("source", &self.source)
            .field("status", &self.status)
            .field("dimensions", &self.dimensions)
            .field("placeholder_len", &self.placeholder.as_ref().map(Vec::len))
            .field("progress", &self.progress)
            .field("error", &self.error)
            .finish()
    }
}
