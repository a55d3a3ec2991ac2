//! Command handlers for the host.

use tracing::{debug, info};
use crate::core::{AppState, Batch, BatchSummary, ExportedFile, InputFile, Progress, TaskId};
use crate::export;
use crate::processing::intake;
use crate::utils::{PlaceholderError, PlaceholderResult};

/// Starts a new batch from the submitted files.
///
/// Non-image files are dropped; the previous batch and all of its payloads are
/// released. On error the current batch is left untouched.
///
/// # Errors
/// * [`PlaceholderError::BatchInProgress`] while the current batch is processing
/// * [`PlaceholderError::NoValidImages`] when no file declares an image media type
pub fn upload_images(state: &mut AppState, files: Vec<InputFile>) -> PlaceholderResult<usize> {
    if state.batch.is_processing() {
        return Err(PlaceholderError::BatchInProgress);
    }

    let batch = intake(files)?;
    let accepted = batch.len();
    state.batch = batch;
    // A cancel requested while idle must not stop the new batch
    state.cancel_flag().clear();
    debug!("Installed new batch of {} images", accepted);
    Ok(accepted)
}

/// Generates placeholders for every pending task of the current batch.
///
/// # Arguments
/// * `state` - Application state holding the batch
/// * `on_progress` - Receives a record after every state transition
pub async fn process_images<F>(state: &mut AppState, on_progress: F) -> BatchSummary
where
    F: FnMut(&Progress),
{
    let processor = state.create_processor();
    processor.process_batch(&mut state.batch, on_progress).await
}

/// Upload then process in one call.
pub async fn generate_placeholders<F>(
    state: &mut AppState,
    files: Vec<InputFile>,
    on_progress: F,
) -> PlaceholderResult<BatchSummary>
where
    F: FnMut(&Progress),
{
    upload_images(state, files)?;
    Ok(process_images(state, on_progress).await)
}

/// The placeholder of one task, or `None` when it is unknown or not completed.
pub fn download_placeholder(state: &AppState, id: TaskId) -> Option<ExportedFile> {
    state.batch.task(id).and_then(export::export_single)
}

/// All completed placeholders as a single ZIP archive.
///
/// # Errors
/// * [`PlaceholderError::BatchInProgress`] while the batch is still processing
/// * [`PlaceholderError::NothingToExport`] when no task completed
/// * [`PlaceholderError::ExportFailure`] when the archive cannot be assembled
pub fn download_all(state: &AppState) -> PlaceholderResult<ExportedFile> {
    if !state.batch.can_export_all() {
        return Err(if state.batch.is_processing() {
            PlaceholderError::BatchInProgress
        } else {
            PlaceholderError::NothingToExport
        });
    }
    export::export_all(&state.batch)
}

/// Discards the current batch.
pub fn reset(state: &mut AppState) {
    let released = state.batch.len();
    state.batch = Batch::empty();
    state.cancel_flag().clear();
    info!("Batch reset ({} images released)", released);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TaskStatus;

    fn not_an_image() -> InputFile {
        InputFile::new("notes.txt", "text/plain", b"hello".to_vec())
    }

    fn tiny_png(name: &str) -> InputFile {
        let mut out = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(image::RgbImage::new(8, 6))
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        InputFile::new(name, "image/png", out.into_inner())
    }

    fn broken_image(name: &str) -> InputFile {
        InputFile::new(name, "image/png", b"garbage".to_vec())
    }

    #[test]
    fn rejected_upload_keeps_the_previous_batch() {
        let mut state = AppState::default();
        upload_images(&mut state, vec![broken_image("a.png")]).unwrap();
        state.batch.finish_processing();
        let ids = state.batch().task_ids();

        let err = upload_images(&mut state, vec![not_an_image()]).unwrap_err();
        assert_eq!(err, PlaceholderError::NoValidImages);
        assert_eq!(state.batch().task_ids(), ids);
    }

    #[test]
    fn uploads_are_refused_while_processing() {
        let mut state = AppState::default();
        upload_images(&mut state, vec![broken_image("a.png")]).unwrap();
        assert_eq!(
            upload_images(&mut state, vec![broken_image("b.png")]).unwrap_err(),
            PlaceholderError::BatchInProgress
        );
        assert_eq!(download_all(&state).unwrap_err(), PlaceholderError::BatchInProgress);
    }

    #[tokio::test]
    async fn new_upload_replaces_the_finished_batch() {
        let mut state = AppState::default();
        generate_placeholders(&mut state, vec![broken_image("a.png")], |_| {}).await.unwrap();
        let old = state.batch().task_ids();

        upload_images(&mut state, vec![broken_image("b.png"), broken_image("c.png")]).unwrap();
        assert_eq!(state.batch().len(), 2);
        assert!(state.batch().task(old[0]).is_none());
        assert!(state.batch().tasks().iter().all(|t| t.status() == TaskStatus::Pending));
    }

    #[tokio::test]
    async fn failed_tasks_cannot_be_downloaded() {
        let mut state = AppState::default();
        let summary = generate_placeholders(&mut state, vec![broken_image("a.png")], |_| {})
            .await
            .unwrap();
        assert_eq!(summary.failed, 1);

        let id = state.batch().task_ids()[0];
        assert!(download_placeholder(&state, id).is_none());
        assert_eq!(download_all(&state).unwrap_err(), PlaceholderError::NothingToExport);
    }

    #[tokio::test]
    async fn archive_is_offered_once_a_task_completed() {
        let mut state = AppState::default();
        generate_placeholders(&mut state, vec![tiny_png("a.png"), broken_image("b.png")], |_| {})
            .await
            .unwrap();
        assert!(state.batch().can_export_all());
        assert_eq!(download_all(&state).unwrap().media_type, "application/zip");
    }

    #[tokio::test]
    async fn idle_cancel_does_not_stop_the_next_batch() {
        let mut state = AppState::default();
        state.cancel_flag().cancel();

        upload_images(&mut state, vec![tiny_png("a.png")]).unwrap();
        let summary = process_images(&mut state, |_| {}).await;

        assert!(!summary.cancelled);
        assert_eq!(summary.completed, 1);
        assert_eq!(state.batch().tasks()[0].status(), TaskStatus::Completed);
        assert_eq!(state.batch().overall_progress(), 100);
    }

    #[tokio::test]
    async fn reset_discards_everything() {
        let mut state = AppState::default();
        generate_placeholders(&mut state, vec![broken_image("a.png")], |_| {}).await.unwrap();
        reset(&mut state);
        assert!(state.batch().is_empty());
        assert_eq!(state.batch().overall_progress(), 0);
        assert!(!state.batch().is_processing());
    }
}
