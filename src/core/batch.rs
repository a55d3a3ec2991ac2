//! The batch store: ordered tasks of one upload plus aggregate progress.

use crate::core::{ImageTask, TaskId, TaskStatus};

/// Ordered collection of tasks from one upload session.
///
/// A new upload replaces the batch wholesale; dropping it releases every payload.
#[derive(Debug, Default)]
pub struct Batch {
    tasks: Vec<ImageTask>,
    overall_progress: u8,
    is_processing: bool,
}

impl Batch {
    /// An empty batch, as left behind by a reset.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A fresh batch of pending tasks, flagged as processing.
    pub fn from_tasks(tasks: Vec<ImageTask>) -> Self {
        Self {
            tasks,
            overall_progress: 0,
            is_processing: true,
        }
    }

    pub fn tasks(&self) -> &[ImageTask] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&ImageTask> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    pub(crate) fn task_mut(&mut self, id: TaskId) -> Option<&mut ImageTask> {
        self.tasks.iter_mut().find(|task| task.id() == id)
    }

    /// Ids of all tasks in submission order
    pub fn task_ids(&self) -> Vec<TaskId> {
        self.tasks.iter().map(ImageTask::id).collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Percentage (0-100) of tasks that reached a terminal state
    pub fn overall_progress(&self) -> u8 {
        self.overall_progress
    }

    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    pub fn completed(&self) -> impl Iterator<Item = &ImageTask> {
        self.tasks.iter().filter(|task| task.is_completed())
    }

    pub fn completed_count(&self) -> usize {
        self.count(TaskStatus::Completed)
    }

    pub fn failed_count(&self) -> usize {
        self.count(TaskStatus::Failed)
    }

    pub fn finished_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.status().is_terminal()).count()
    }

    /// Whether a batch download can be offered right now
    pub fn can_export_all(&self) -> bool {
        !self.is_processing && self.completed_count() > 0
    }

    fn count(&self, status: TaskStatus) -> usize {
        self.tasks.iter().filter(|task| task.status() == status).count()
    }

    /// Recomputes overall progress as `round(100 * finished / total)`.
    pub(crate) fn refresh_progress(&mut self) {
        let total = self.tasks.len();
        self.overall_progress = if total == 0 {
            0
        } else {
            let finished = self.finished_count();
            ((finished * 100 + total / 2) / total) as u8
        };
    }

    pub(crate) fn finish_processing(&mut self) {
        self.is_processing = false;
    }
}
