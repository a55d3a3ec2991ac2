// src/processing/processor.rs

//! Sequential batch processor.
//!
//! Every task is taken through decode → render → publish before the next one
//! starts. Decoding and rendering are CPU-bound, so each step runs inside
//! `tokio::task::spawn_blocking` and is awaited immediately; no two image steps
//! ever overlap.

use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::core::{Batch, BatchSummary, CancelFlag, Progress, ProgressType, TaskId};
use crate::utils::{PlaceholderError, PlaceholderResult};

use super::config::ProcessorConfig;
use super::renderer::render_placeholder;

/// Drives the tasks of a batch one at a time.
pub struct SequentialProcessor {
    config: ProcessorConfig,
    cancel: CancelFlag,
}

impl SequentialProcessor {
    pub fn new(config: ProcessorConfig, cancel: CancelFlag) -> Self {
        Self { config, cancel }
    }

    /// Processes every pending task of `batch` in submission order.
    ///
    /// `on_progress` receives a record at batch start, after each task transition
    /// (when enabled in the config) and at batch end. A failing task never aborts
    /// the batch. If the cancel flag is raised, the run stops before the next task
    /// and leaves the remaining tasks pending.
    pub async fn process_batch<F>(&self, batch: &mut Batch, mut on_progress: F) -> BatchSummary
    where
        F: FnMut(&Progress),
    {
        let total = batch.len();
        info!("Processing batch of {} images", total);
        on_progress(&Progress::for_batch(ProgressType::Start, batch, "processing"));

        let mut cancelled = false;
        for id in batch.task_ids() {
            if self.cancel.is_cancelled() {
                warn!("Batch cancelled with {} of {} images finished", batch.finished_count(), total);
                cancelled = true;
                break;
            }

            self.process_task(batch, id, &mut on_progress).await;
            batch.refresh_progress();
            self.emit_task(batch, id, &mut on_progress);
        }

        batch.finish_processing();
        self.cancel.clear();

        let summary = BatchSummary {
            total,
            completed: batch.completed_count(),
            failed: batch.failed_count(),
            cancelled,
        };

        if summary.failed > 0 {
            warn!(
                "Batch processing completed with {} failed images out of {}",
                summary.failed, total
            );
        } else {
            info!("Batch processing completed: {} placeholders generated", summary.completed);
        }

        let status = if cancelled { "cancelled" } else { "complete" };
        on_progress(&Progress::for_batch(ProgressType::Complete, batch, status));
        summary
    }

    /// Takes one task from `Pending` to a terminal state.
    async fn process_task<F>(&self, batch: &mut Batch, id: TaskId, on_progress: &mut F)
    where
        F: FnMut(&Progress),
    {
        let Some(task) = batch.task_mut(id) else {
            return;
        };
        if !task.start_processing() {
            return;
        }
        let name = task.source_name().to_string();
        let bytes = task.source().bytes.clone();
        self.emit_task(batch, id, on_progress);

        let decoded = tokio::task::spawn_blocking(move || decode_image(&bytes))
            .await
            .unwrap_or_else(|e| Err(PlaceholderError::decode(format!("Decoder panicked: {e}"))));

        let image = match decoded {
            Ok(image) => image,
            Err(e) => {
                warn!("Could not decode {}: {}", name, e);
                if let Some(task) = batch.task_mut(id) {
                    task.fail(e.to_string());
                }
                return;
            }
        };

        let (width, height) = (image.width(), image.height());
        debug!("Loaded '{}': {}×{}", name, width, height);
        if let Some(task) = batch.task_mut(id) {
            task.record_decoded(image);
        }
        self.emit_task(batch, id, on_progress);

        let rendered = tokio::task::spawn_blocking(move || render_placeholder(width, height))
            .await
            .unwrap_or_else(|e| Err(PlaceholderError::export(format!("Renderer panicked: {e}"))));

        let delay = self.config.completion_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let Some(task) = batch.task_mut(id) else {
            return;
        };
        match rendered {
            Ok(png) => {
                debug!("'{}' → {} byte placeholder", name, png.len());
                task.complete(png);
            }
            Err(e) => {
                warn!("Could not render placeholder for {}: {}", name, e);
                task.fail(e.to_string());
            }
        }
    }

    fn emit_task<F>(&self, batch: &Batch, id: TaskId, on_progress: &mut F)
    where
        F: FnMut(&Progress),
    {
        if !self.config.emit_task_events {
            return;
        }
        if let Some(task) = batch.task(id) {
            on_progress(&Progress::for_task(batch, task));
        }
    }
}

/// Decodes raw upload bytes, sniffing the format from its content.
fn decode_image(bytes: &[u8]) -> PlaceholderResult<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| PlaceholderError::decode(e.to_string()))
}
