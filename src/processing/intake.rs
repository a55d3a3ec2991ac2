use tracing::debug;
use crate::core::{Batch, ImageTask, InputFile};
use crate::utils::{PlaceholderError, PlaceholderResult, is_image_media_type};

/// Builds a new batch from the submitted files.
///
/// Only files whose declared media type is `image/*` are kept, in their original
/// order, each as a pending task. Fails with [`PlaceholderError::NoValidImages`]
/// when nothing survives the filter.
pub fn intake(files: Vec<InputFile>) -> PlaceholderResult<Batch> {
    let submitted = files.len();

    let tasks: Vec<ImageTask> = files
        .into_iter()
        .filter(|file| {
            let accepted = is_image_media_type(&file.media_type);
            if !accepted {
                debug!("Skipping {} ({})", file.name, file.media_type);
            }
            accepted
        })
        .map(ImageTask::new)
        .collect();

    if tasks.is_empty() {
        return Err(PlaceholderError::NoValidImages);
    }

    debug!("Accepted {} of {} submitted files", tasks.len(), submitted);
    Ok(Batch::from_tasks(tasks))
}
