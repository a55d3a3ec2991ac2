use std::path::{Path, PathBuf};
use tokio::fs;
use crate::core::{ExportedFile, InputFile};
use crate::utils::{media_type_from_path, PlaceholderError, PlaceholderResult};

/// Reads a file from disk as an upload, deriving its media type from the extension.
pub async fn read_input_file(path: impl AsRef<Path>) -> PlaceholderResult<InputFile> {
    let path = path.as_ref();
    let bytes = fs::read(path)
        .await
        .map_err(|e| PlaceholderError::io(format!("Failed to read {}: {}", path.display(), e)))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    Ok(InputFile::new(name, media_type_from_path(path), bytes))
}

/// Writes a download into `dir`, creating the directory if needed.
///
/// Only the final component of the file name is used, so the file always lands in `dir`.
pub async fn save_export(dir: impl AsRef<Path>, file: &ExportedFile) -> PlaceholderResult<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)
        .await
        .map_err(|e| PlaceholderError::io(format!("Cannot create output directory {}: {}", dir.display(), e)))?;

    let name = Path::new(&file.file_name)
        .file_name()
        .ok_or_else(|| PlaceholderError::io(format!("Invalid output file name '{}'", file.file_name)))?;
    let target = dir.join(name);
    fs::write(&target, &file.bytes)
        .await
        .map_err(|e| PlaceholderError::io(format!("Failed to write {}: {}", target.display(), e)))?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("placeholder-generator-test-{}", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn reads_name_and_media_type() {
        let dir = scratch_dir();
        fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("photo.JPG");
        fs::write(&path, b"bytes").await.unwrap();

        let file = read_input_file(&path).await.unwrap();
        assert_eq!(file.name, "photo.JPG");
        assert_eq!(file.media_type, "image/jpeg");
        assert_eq!(&*file.bytes, b"bytes");

        let _ = fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn missing_input_is_an_io_error() {
        let err = read_input_file(scratch_dir().join("nope.png")).await.unwrap_err();
        assert!(matches!(err, PlaceholderError::IO(_)));
    }

    #[tokio::test]
    async fn saves_into_a_fresh_directory() {
        let dir = scratch_dir().join("nested");
        let export = ExportedFile {
            file_name: "photo.png".to_string(),
            media_type: "image/png",
            bytes: vec![1, 2, 3],
        };

        let written = save_export(&dir, &export).await.unwrap();
        assert_eq!(written, dir.join("photo.png"));
        assert_eq!(fs::read(&written).await.unwrap(), vec![1, 2, 3]);

        let _ = fs::remove_dir_all(dir.parent().unwrap()).await;
    }

    #[tokio::test]
    async fn saved_files_stay_inside_the_output_directory() {
        let root = scratch_dir();
        let dir = root.join("out");
        let export = ExportedFile {
            file_name: "../escape.png".to_string(),
            media_type: "image/png",
            bytes: vec![7],
        };

        let written = save_export(&dir, &export).await.unwrap();
        assert_eq!(written, dir.join("escape.png"));
        assert!(!root.join("escape.png").exists());

        let dotdot = ExportedFile { file_name: "..".to_string(), ..export };
        assert!(matches!(save_export(&dir, &dotdot).await, Err(PlaceholderError::IO(_))));

        let _ = fs::remove_dir_all(&root).await;
    }
}
