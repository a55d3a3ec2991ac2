use serde::{Deserialize, Serialize};
use crate::core::{Batch, Dimensions, ImageTask, TaskId, TaskStatus};

/// Progress message type
#[derive(Debug, Deserialize, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ProgressType {
    Start,
    Progress,
    Complete,
}

/// Unified progress record reported while a batch is processed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Progress type (start, progress, complete)
    pub progress_type: ProgressType,
    /// Number of tasks in a terminal state
    pub completed_tasks: usize,
    /// Total number of tasks
    pub total_tasks: usize,
    /// Overall batch progress (0-100)
    pub progress_percentage: u8,
    /// Current status message
    pub status: String,
    /// Task this record is about, if any
    #[serde(default)]
    pub task_id: Option<TaskId>,
    /// Status of that task after the transition
    #[serde(default)]
    pub task_status: Option<TaskStatus>,
    /// Per-task progress (0-100)
    #[serde(default)]
    pub task_progress: Option<u8>,
    /// Decoded dimensions, once known
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    /// Failure reason for failed tasks
    #[serde(default)]
    pub error: Option<String>,
}

impl Progress {
    /// Batch-level record without task details
    pub fn for_batch(progress_type: ProgressType, batch: &Batch, status: &str) -> Self {
        Self {
            progress_type,
            completed_tasks: batch.finished_count(),
            total_tasks: batch.len(),
            progress_percentage: batch.overall_progress(),
            status: status.to_string(),
            task_id: None,
            task_status: None,
            task_progress: None,
            dimensions: None,
            error: None,
        }
    }

    /// Record describing the current state of one task within `batch`
    pub fn for_task(batch: &Batch, task: &ImageTask) -> Self {
        let status = match task.dimensions() {
            Some(dims) if task.status() == TaskStatus::Processing => {
                format!("{} decoded ({})", task.source_name(), dims)
            }
            _ => format!("{} {}", task.source_name(), task.status()),
        };

        Self {
            task_id: Some(task.id()),
            task_status: Some(task.status()),
            task_progress: Some(task.progress()),
            dimensions: task.dimensions(),
            error: task.error().map(str::to_string),
            ..Self::for_batch(ProgressType::Progress, batch, &status)
        }
    }
}
