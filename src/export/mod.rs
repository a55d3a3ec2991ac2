//! Turning completed placeholders into downloads.
//!
//! - [`export_single`]: one task's placeholder as `<basename>.png`
//! - [`export_all`]: every completed placeholder in one timestamped ZIP

mod archive;

use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

use crate::core::{Batch, ExportedFile, ImageTask};
use crate::utils::{
    archive_file_name, placeholder_file_name, PlaceholderError, PlaceholderResult,
    ARCHIVE_MEDIA_TYPE, PLACEHOLDER_MEDIA_TYPE,
};

pub use archive::ArchiveBuilder;

/// The placeholder of a completed task, ready to download.
///
/// Returns `None` for tasks that have not completed.
pub fn export_single(task: &ImageTask) -> Option<ExportedFile> {
    if !task.is_completed() {
        debug!("Skipping download of {} ({})", task.source_name(), task.status());
        return None;
    }
    let placeholder = task.placeholder()?;

    Some(ExportedFile {
        file_name: placeholder_file_name(task.source_name()),
        media_type: PLACEHOLDER_MEDIA_TYPE,
        bytes: placeholder.to_vec(),
    })
}

/// Packages every completed placeholder of `batch` into one ZIP archive named
/// after the current time.
pub fn export_all(batch: &Batch) -> PlaceholderResult<ExportedFile> {
    let timestamp_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    export_all_at(batch, timestamp_ms)
}

/// [`export_all`] with an explicit archive timestamp (unix epoch milliseconds).
///
/// Fails with [`PlaceholderError::NothingToExport`] when no task has completed.
/// Entries whose names collide overwrite each other.
pub fn export_all_at(batch: &Batch, timestamp_ms: u128) -> PlaceholderResult<ExportedFile> {
    let mut builder = ArchiveBuilder::new();
    for task in batch.completed() {
        if let Some(placeholder) = task.placeholder() {
            builder.add(placeholder_file_name(task.source_name()), placeholder);
        }
    }

    if builder.is_empty() {
        return Err(PlaceholderError::NothingToExport);
    }

    let entries = builder.len();
    let bytes = builder.finish()?;
    let file_name = archive_file_name(timestamp_ms);
    info!("Packaged {} placeholders into {} ({} bytes)", entries, file_name, bytes.len());

    Ok(ExportedFile {
        file_name,
        media_type: ARCHIVE_MEDIA_TYPE,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use image::{DynamicImage, RgbImage};
    use zip::ZipArchive;
    use crate::core::InputFile;
    use crate::processing::intake;

    /// Batch whose tasks end up completed (`true`) or failed (`false`).
    fn settled_batch(outcomes: &[(&str, bool)]) -> Batch {
        let files = outcomes
            .iter()
            .map(|(name, _)| InputFile::new(*name, "image/png", vec![0u8]))
            .collect();
        let mut batch = intake(files).unwrap();
        for (id, (_, ok)) in batch.task_ids().into_iter().zip(outcomes) {
            let task = batch.task_mut(id).unwrap();
            task.start_processing();
            if *ok {
                task.record_decoded(DynamicImage::ImageRgb8(RgbImage::new(1, 1)));
                task.complete(b"png bytes".to_vec());
            } else {
                task.fail("corrupt");
            }
        }
        batch.refresh_progress();
        batch.finish_processing();
        batch
    }

    fn entry_names(file: &ExportedFile) -> Vec<String> {
        let archive = ZipArchive::new(Cursor::new(file.bytes.clone())).unwrap();
        archive.file_names().map(str::to_string).collect::<Vec<_>>()
    }

    #[test]
    fn single_export_requires_completion() {
        let batch = settled_batch(&[("photo.jpg", true), ("bad.png", false)]);

        let file = export_single(&batch.tasks()[0]).unwrap();
        assert_eq!(file.file_name, "photo.png");
        assert_eq!(file.media_type, "image/png");
        assert_eq!(file.bytes, b"png bytes");

        assert!(export_single(&batch.tasks()[1]).is_none());
    }

    #[test]
    fn pending_tasks_are_not_exported() {
        let batch = intake(vec![InputFile::new("photo.jpg", "image/jpeg", vec![0u8])]).unwrap();
        assert!(export_single(&batch.tasks()[0]).is_none());
        assert_eq!(export_all(&batch).unwrap_err(), PlaceholderError::NothingToExport);
    }

    #[test]
    fn archive_holds_only_completed_placeholders() {
        let batch = settled_batch(&[("photo.jpg", true), ("bad.png", false), ("logo.gif", true)]);
        let file = export_all_at(&batch, 1_700_000_000_000).unwrap();

        assert_eq!(file.file_name, "placeholder-images-1700000000000.zip");
        assert_eq!(file.media_type, "application/zip");
        let mut names = entry_names(&file);
        names.sort();
        assert_eq!(names, ["logo.png", "photo.png"]);
    }

    #[test]
    fn nothing_completed_means_nothing_to_export() {
        let batch = settled_batch(&[("bad.png", false)]);
        assert_eq!(export_all(&batch).unwrap_err(), PlaceholderError::NothingToExport);
    }

    #[test]
    fn colliding_names_collapse_to_one_entry() {
        let batch = settled_batch(&[("photo.jpg", true), ("photo.png", true)]);
        let file = export_all(&batch).unwrap();
        assert_eq!(entry_names(&file), ["photo.png"]);
        assert!(file.file_name.starts_with("placeholder-images-"));
    }
}
